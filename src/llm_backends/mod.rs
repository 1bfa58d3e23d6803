pub mod config;
pub mod hugging_face;
pub mod openai;

use crate::{
    error::{BackendError, ClassifierError},
    models::ModelFamily,
};
use config::ApiConfig;
use hugging_face::HuggingFaceHubBackend;
use openai::{OpenAiChatBackend, OpenAiCompletionBackend};
use std::future::Future;

/// Turns a rendered prompt into model text. Both stages of a classification go through this.
pub trait TextGenerator {
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = crate::Result<String, BackendError>> + Send;
}

pub enum LlmBackend {
    OpenAiChat(OpenAiChatBackend),
    OpenAiCompletion(OpenAiCompletionBackend),
    HuggingFaceHub(HuggingFaceHubBackend),
}

impl LlmBackend {
    pub fn new(family: &ModelFamily, api_config: &ApiConfig) -> crate::Result<Self, ClassifierError> {
        Ok(match family {
            ModelFamily::ChatCompletion { model, temperature } => {
                LlmBackend::OpenAiChat(OpenAiChatBackend::new(api_config, model, *temperature)?)
            }
            ModelFamily::LegacyCompletion {
                model,
                temperature,
                timeout,
            } => LlmBackend::OpenAiCompletion(OpenAiCompletionBackend::new(
                api_config,
                model,
                *temperature,
                *timeout,
            )?),
            ModelFamily::HostedRepository {
                repo_id,
                temperature,
            } => LlmBackend::HuggingFaceHub(HuggingFaceHubBackend::new(
                api_config,
                repo_id,
                *temperature,
            )?),
        })
    }

    pub fn model_id(&self) -> &str {
        match self {
            LlmBackend::OpenAiChat(b) => &b.model,
            LlmBackend::OpenAiCompletion(b) => &b.model,
            LlmBackend::HuggingFaceHub(b) => &b.repo_id,
        }
    }

    pub fn openai_chat(&self) -> crate::Result<&OpenAiChatBackend, ClassifierError> {
        match self {
            LlmBackend::OpenAiChat(b) => Ok(b),
            _ => Err(ClassifierError::Backend(BackendError::Generic {
                message: "Backend is not openai chat".to_string(),
            })),
        }
    }

    pub fn openai_completion(&self) -> crate::Result<&OpenAiCompletionBackend, ClassifierError> {
        match self {
            LlmBackend::OpenAiCompletion(b) => Ok(b),
            _ => Err(ClassifierError::Backend(BackendError::Generic {
                message: "Backend is not openai completion".to_string(),
            })),
        }
    }

    pub fn hugging_face_hub(&self) -> crate::Result<&HuggingFaceHubBackend, ClassifierError> {
        match self {
            LlmBackend::HuggingFaceHub(b) => Ok(b),
            _ => Err(ClassifierError::Backend(BackendError::Generic {
                message: "Backend is not hugging face hub".to_string(),
            })),
        }
    }
}

impl TextGenerator for LlmBackend {
    async fn generate(&self, prompt: &str) -> crate::Result<String, BackendError> {
        match self {
            LlmBackend::OpenAiChat(b) => b.generate(prompt).await,
            LlmBackend::OpenAiCompletion(b) => b.generate(prompt).await,
            LlmBackend::HuggingFaceHub(b) => b.generate(prompt).await,
        }
    }
}
