use crate::error::ClassifierError;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_TEMPERATURE: f32 = 0.1;
/// Legacy completion endpoints are slow; their client gets a longer request timeout.
pub const LEGACY_COMPLETION_TIMEOUT: Duration = Duration::from_secs(100);

/// The closed set of models a classification procedure can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedModel {
    Gpt4,
    Gpt35Turbo,
    TextCurie001,
    Llama2_70bChat,
    FlanT5Xxl,
}

impl SupportedModel {
    pub const ALL: [SupportedModel; 5] = [
        SupportedModel::Gpt4,
        SupportedModel::Gpt35Turbo,
        SupportedModel::TextCurie001,
        SupportedModel::Llama2_70bChat,
        SupportedModel::FlanT5Xxl,
    ];

    pub fn model_id(&self) -> &'static str {
        match self {
            SupportedModel::Gpt4 => "gpt-4",
            SupportedModel::Gpt35Turbo => "gpt-3.5-turbo",
            SupportedModel::TextCurie001 => "text-curie-001",
            SupportedModel::Llama2_70bChat => "meta-llama/Llama-2-70b-chat-hf",
            SupportedModel::FlanT5Xxl => "google/flan-t5-xxl",
        }
    }

    /// Exact match only. No trimming, no case folding.
    pub fn from_model_id(model_id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|model| model.model_id() == model_id)
    }

    /// The inference task the Hugging Face Inference API runs for a hosted repository.
    pub fn hosted_task(&self) -> Option<HostedTask> {
        match self {
            SupportedModel::Llama2_70bChat => Some(HostedTask::TextGeneration),
            SupportedModel::FlanT5Xxl => Some(HostedTask::Text2TextGeneration),
            _ => None,
        }
    }
}

impl std::fmt::Display for SupportedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.model_id())
    }
}

impl std::str::FromStr for SupportedModel {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_model_id(s).ok_or_else(|| ClassifierError::UnsupportedModel(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostedTask {
    /// Decoder models echo the prompt at the start of `generated_text`.
    TextGeneration,
    Text2TextGeneration,
}

/// The three provider shapes a model can be addressed through.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelFamily {
    ChatCompletion {
        model: String,
        temperature: f32,
    },
    LegacyCompletion {
        model: String,
        temperature: f32,
        timeout: Duration,
    },
    HostedRepository {
        repo_id: String,
        temperature: f32,
    },
}

impl ModelFamily {
    /// Resolves a model name into its family. Names outside the supported set are rejected
    /// before any client is configured.
    pub fn resolve(model_name: &str, temperature: f32) -> Result<Self, ClassifierError> {
        let model: SupportedModel = model_name.parse()?;
        Ok(match model {
            SupportedModel::Gpt4 | SupportedModel::Gpt35Turbo => ModelFamily::ChatCompletion {
                model: model.model_id().to_owned(),
                temperature,
            },
            SupportedModel::TextCurie001 => ModelFamily::LegacyCompletion {
                model: model.model_id().to_owned(),
                temperature,
                timeout: LEGACY_COMPLETION_TIMEOUT,
            },
            SupportedModel::Llama2_70bChat | SupportedModel::FlanT5Xxl => {
                ModelFamily::HostedRepository {
                    repo_id: model.model_id().to_owned(),
                    temperature,
                }
            }
        })
    }

    pub fn model_id(&self) -> &str {
        match self {
            ModelFamily::ChatCompletion { model, .. } => model,
            ModelFamily::LegacyCompletion { model, .. } => model,
            ModelFamily::HostedRepository { repo_id, .. } => repo_id,
        }
    }

    pub fn temperature(&self) -> f32 {
        match self {
            ModelFamily::ChatCompletion { temperature, .. }
            | ModelFamily::LegacyCompletion { temperature, .. }
            | ModelFamily::HostedRepository { temperature, .. } => *temperature,
        }
    }
}
