pub mod result;

use crate::{
    concept::Concept,
    error::ClassifierError,
    llm_backends::{
        config::{ApiConfig, LlmApiConfigTrait},
        LlmBackend,
        TextGenerator,
    },
    logging::{LoggingConfig, LoggingConfigTrait},
    models::{ModelFamily, DEFAULT_MODEL, DEFAULT_TEMPERATURE},
    prompting::{AnswerInput, PromptChain, RationaleInput},
};
pub use result::{ClassificationRequest, ClassificationResult, Verdict};

/// Zero-shot chain of thought classification against a single concept.
///
/// The prompt chain is built once at construction and reused for every call to
/// [`ClassificationProcedure::classify`]. Each call runs the rationale stage, then feeds
/// its output into the answer stage. The first failing stage ends the call; nothing from
/// an incomplete run is returned.
pub struct ClassificationProcedure<G: TextGenerator = LlmBackend> {
    concept: Concept,
    /// `None` when the generator was injected rather than resolved from a model name.
    pub model: Option<ModelFamily>,
    generator: G,
    chain: PromptChain,
    _logging_config: Option<LoggingConfig>,
}

impl ClassificationProcedure<LlmBackend> {
    /// Builds a procedure for a supported model with the given temperature.
    pub fn new<S: Into<String>>(
        id: S,
        term: S,
        definition: S,
        reference: S,
        model_name: &str,
        temperature: f32,
    ) -> crate::Result<Self, ClassifierError> {
        Self::builder(Concept::new(id, term, definition, reference))
            .model(model_name)
            .temperature(temperature)
            .init()
    }

    /// Starts a builder defaulting to `gpt-4` at temperature 0.1.
    pub fn builder(concept: Concept) -> ClassificationProcedureBuilder {
        ClassificationProcedureBuilder::new(concept)
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.generator
    }
}

impl<G: TextGenerator> ClassificationProcedure<G> {
    /// Builds a procedure around any text generator.
    pub fn with_generator(concept: Concept, generator: G) -> crate::Result<Self, ClassifierError> {
        Ok(Self {
            concept,
            model: None,
            generator,
            chain: PromptChain::new()?,
            _logging_config: None,
        })
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// The concept is fixed for the procedure's lifetime.
    pub fn concept(&self) -> &Concept {
        &self.concept
    }

    /// Determines whether the entity is in the extension of the procedure's concept.
    pub async fn classify(
        &self,
        name: &str,
        description: &str,
    ) -> crate::Result<ClassificationResult, ClassifierError> {
        let input = RationaleInput {
            concept: &self.concept.term,
            definition: &self.concept.definition,
            entity: name,
            description,
        };

        let rationale = self.generate_rationale(&input).await?;
        let answer = self
            .generate_answer(&input.with_rationale(&rationale))
            .await?;

        crate::info!(
            concept = %self.concept.term,
            entity = %name,
            answer = %answer.trim(),
            "classification complete"
        );
        Ok(ClassificationResult {
            concept: self.concept.term.clone(),
            definition: self.concept.definition.clone(),
            entity: name.to_owned(),
            description: description.to_owned(),
            rationale,
            answer,
        })
    }

    pub async fn classify_request(
        &self,
        request: &ClassificationRequest,
    ) -> crate::Result<ClassificationResult, ClassifierError> {
        self.classify(&request.name, &request.description).await
    }

    async fn generate_rationale(
        &self,
        input: &RationaleInput<'_>,
    ) -> crate::Result<String, ClassifierError> {
        crate::debug!(entity = %input.entity, "rationale pending");
        let prompt = self.chain.rationale_prompt(input)?;
        crate::trace!("Rationale prompt: {}", prompt);
        let rationale = self.generator.generate(&prompt).await?;
        crate::trace!("Rationale: {}", rationale);
        Ok(rationale)
    }

    async fn generate_answer(
        &self,
        input: &AnswerInput<'_>,
    ) -> crate::Result<String, ClassifierError> {
        crate::debug!(entity = %input.entity, "answer pending");
        let prompt = self.chain.answer_prompt(input)?;
        crate::trace!("Answer prompt: {}", prompt);
        let answer = self.generator.generate(&prompt).await?;
        crate::trace!("Answer: {}", answer);
        Ok(answer)
    }
}

pub struct ClassificationProcedureBuilder {
    pub concept: Concept,
    pub model_name: String,
    pub temperature: f32,
    pub api_config: ApiConfig,
    pub logging_config: LoggingConfig,
}

impl ClassificationProcedureBuilder {
    pub fn new(concept: Concept) -> Self {
        Self {
            concept,
            model_name: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            api_config: ApiConfig::default(),
            logging_config: LoggingConfig {
                logger_name: "classification_procedure".to_string(),
                ..Default::default()
            },
        }
    }

    pub fn model<S: AsRef<str>>(mut self, model_name: S) -> Self {
        self.model_name = model_name.as_ref().to_owned();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn init(mut self) -> crate::Result<ClassificationProcedure<LlmBackend>, ClassifierError> {
        let model = ModelFamily::resolve(&self.model_name, self.temperature)?;
        self.logging_config.load_logger();
        let backend = LlmBackend::new(&model, &self.api_config)?;
        crate::info!(
            concept_id = %self.concept.id,
            concept = %self.concept.term,
            model = %model.model_id(),
            temperature = model.temperature(),
            "classification procedure ready"
        );
        Ok(ClassificationProcedure {
            concept: self.concept,
            model: Some(model),
            generator: backend,
            chain: PromptChain::new()?,
            _logging_config: Some(self.logging_config),
        })
    }
}

impl LlmApiConfigTrait for ClassificationProcedureBuilder {
    fn api_config_mut(&mut self) -> &mut ApiConfig {
        &mut self.api_config
    }
}

impl LoggingConfigTrait for ClassificationProcedureBuilder {
    fn logging_config_mut(&mut self) -> &mut LoggingConfig {
        &mut self.logging_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mammal() -> Concept {
        Concept::new(
            "1",
            "mammal",
            "an animal that is warm-blooded, has hair/fur, and nurses its young",
            "https://example.com/mammal",
        )
    }

    #[test]
    fn builder_defaults() {
        let builder = ClassificationProcedure::builder(mammal());
        assert_eq!(builder.model_name, "gpt-4");
        assert_eq!(builder.temperature, 0.1);
    }

    #[test]
    fn unsupported_model_fails_before_any_client_exists() {
        let result = ClassificationProcedure::builder(mammal())
            .model("gpt-5")
            .logging_enabled(false)
            .init();
        assert!(matches!(result, Err(ClassifierError::UnsupportedModel(name)) if name == "gpt-5"));
    }

    #[test]
    fn builds_each_family_eagerly() {
        for (name, expected) in [
            ("gpt-4", "gpt-4"),
            ("text-curie-001", "text-curie-001"),
            ("google/flan-t5-xxl", "google/flan-t5-xxl"),
        ] {
            let procedure = ClassificationProcedure::builder(mammal())
                .model(name)
                .temperature(0.7)
                .with_api_key("test-key")
                .logging_enabled(false)
                .init()
                .unwrap();
            assert_eq!(procedure.backend().model_id(), expected);
            assert_eq!(procedure.model.as_ref().unwrap().temperature(), 0.7);
            assert_eq!(procedure.concept().reference, "https://example.com/mammal");
        }
    }

    #[test]
    fn unusable_log_dir_does_not_fail_construction() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let procedure = ClassificationProcedure::builder(mammal())
            .model("gpt-3.5-turbo")
            .with_api_key("test-key")
            .log_dir(file.path().join("logs"))
            .init()
            .unwrap();
        assert_eq!(procedure.backend().model_id(), "gpt-3.5-turbo");
    }
}
