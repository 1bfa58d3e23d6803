use super::config::{ApiConfig, HUGGINGFACE_API_KEY_ENV_VAR};
use crate::{
    error::{map_deserialization_error, BackendError, ClassifierError, HuggingFaceApiError},
    models::{HostedTask, SupportedModel},
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Default Inference API base url
pub const HUGGINGFACE_API_HOST: &str = "api-inference.huggingface.co";

pub struct HuggingFaceHubBackend {
    http_client: reqwest::Client,
    api_key: Secret<String>,
    pub repo_id: String,
    pub task: HostedTask,
    pub parameters: HuggingFaceParameters,
    pub options: HuggingFaceOptions,
}

/// Model options nested under `parameters` in the request body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HuggingFaceParameters {
    pub temperature: f32,
}

/// Inference API options; a cold repository blocks until loaded instead of returning 503.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HuggingFaceOptions {
    pub wait_for_model: bool,
}

impl Default for HuggingFaceOptions {
    fn default() -> Self {
        Self {
            wait_for_model: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct HuggingFaceRequest<'a> {
    inputs: &'a str,
    parameters: &'a HuggingFaceParameters,
    options: &'a HuggingFaceOptions,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HuggingFaceResponse {
    Generated(Vec<GeneratedText>),
    Error(HuggingFaceApiError),
}

impl HuggingFaceHubBackend {
    pub fn new(
        api_config: &ApiConfig,
        repo_id: &str,
        temperature: f32,
    ) -> crate::Result<Self, ClassifierError> {
        let task = SupportedModel::from_model_id(repo_id)
            .and_then(|model| model.hosted_task())
            .ok_or_else(|| ClassifierError::UnsupportedModel(repo_id.to_owned()))?;
        let api_key = api_config.load_api_key(HUGGINGFACE_API_KEY_ENV_VAR)?;
        Ok(Self {
            http_client: reqwest::Client::new(),
            api_key,
            repo_id: repo_id.to_owned(),
            task,
            parameters: HuggingFaceParameters { temperature },
            options: HuggingFaceOptions::default(),
        })
    }

    pub fn url(&self) -> String {
        format!("https://{}/models/{}", HUGGINGFACE_API_HOST, self.repo_id)
    }

    pub async fn generate(&self, prompt: &str) -> crate::Result<String, BackendError> {
        let request = HuggingFaceRequest {
            inputs: prompt,
            parameters: &self.parameters,
            options: &self.options,
        };
        tracing::trace!(?request);

        let response = self
            .http_client
            .post(self.url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::trace!("Serialized response: {}", String::from_utf8_lossy(&bytes));

        parse_response(self.task, prompt, status.as_u16(), &bytes)
    }
}

fn parse_response(
    task: HostedTask,
    prompt: &str,
    status: u16,
    bytes: &[u8],
) -> crate::Result<String, BackendError> {
    let parsed: HuggingFaceResponse = match serde_json::from_slice(bytes) {
        Ok(parsed) => parsed,
        Err(e) if (200..300).contains(&status) => return Err(map_deserialization_error(e, bytes)),
        Err(_) => {
            return Err(BackendError::HuggingFace {
                status,
                message: String::from_utf8_lossy(bytes).into_owned(),
            })
        }
    };

    match parsed {
        HuggingFaceResponse::Error(e) => Err(BackendError::HuggingFace {
            status,
            message: e.error,
        }),
        HuggingFaceResponse::Generated(generated) => {
            let text = generated
                .into_iter()
                .next()
                .map(|g| g.generated_text)
                .ok_or(BackendError::ResponseContentEmpty)?;
            Ok(match task {
                // Decoder models return the prompt followed by the completion
                HostedTask::TextGeneration => match text.strip_prefix(prompt) {
                    Some(completion) => completion.to_owned(),
                    None => text,
                },
                HostedTask::Text2TextGeneration => text,
            })
        }
    }
}
