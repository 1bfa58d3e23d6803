pub use crate::{
    concept::{find_concept, load_concepts, Concept},
    error::{BackendError, ClassifierError},
    llm_backends::{config::LlmApiConfigTrait, LlmBackend, TextGenerator},
    logging::LoggingConfigTrait,
    models::{ModelFamily, SupportedModel},
    workflows::classify::{
        ClassificationProcedure,
        ClassificationProcedureBuilder,
        ClassificationRequest,
        ClassificationResult,
        Verdict,
    },
};
