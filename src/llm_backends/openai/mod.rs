use super::config::{ApiConfig, OPENAI_API_KEY_ENV_VAR};
use crate::error::{BackendError, ClassifierError};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse,
        CreateCompletionRequestArgs,
        CreateCompletionResponse,
    },
    Client as OpenAiClient,
};
use backoff::ExponentialBackoff;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// Completion endpoints default to 16 tokens; rationales need more room.
pub const LEGACY_COMPLETION_MAX_TOKENS: u16 = 256;

/// Zero elapsed-time budget: the client gives up before its first retry.
fn no_retry_backoff() -> ExponentialBackoff {
    backoff::ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

/// A client that surfaces rate limits and server errors on the first attempt.
fn openai_client(
    api_key: &Secret<String>,
    http_client: Option<reqwest::Client>,
) -> OpenAiClient<OpenAIConfig> {
    let config = OpenAIConfig::new().with_api_key(api_key.expose_secret());
    let client = OpenAiClient::with_config(config).with_backoff(no_retry_backoff());
    match http_client {
        Some(http_client) => client.with_http_client(http_client),
        None => client,
    }
}

pub struct OpenAiChatBackend {
    client: OpenAiClient<OpenAIConfig>,
    pub model: String,
    pub temperature: f32,
}

impl OpenAiChatBackend {
    pub fn new(
        api_config: &ApiConfig,
        model: &str,
        temperature: f32,
    ) -> crate::Result<Self, ClassifierError> {
        let api_key = api_config.load_api_key(OPENAI_API_KEY_ENV_VAR)?;
        Ok(Self {
            client: openai_client(&api_key, None),
            model: model.to_owned(),
            temperature,
        })
    }

    pub async fn generate(&self, prompt: &str) -> crate::Result<String, BackendError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.to_owned())
                .build()?
                .into()])
            .temperature(self.temperature)
            .build()?;
        tracing::trace!(?request);

        let response = self.client.chat().create(request).await?;
        tracing::trace!(?response);
        chat_text(response)
    }
}

pub struct OpenAiCompletionBackend {
    client: OpenAiClient<OpenAIConfig>,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl OpenAiCompletionBackend {
    pub fn new(
        api_config: &ApiConfig,
        model: &str,
        temperature: f32,
        timeout: Duration,
    ) -> crate::Result<Self, ClassifierError> {
        let api_key = api_config.load_api_key(OPENAI_API_KEY_ENV_VAR)?;
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(BackendError::from)?;
        Ok(Self {
            client: openai_client(&api_key, Some(http_client)),
            model: model.to_owned(),
            temperature,
            timeout,
        })
    }

    pub async fn generate(&self, prompt: &str) -> crate::Result<String, BackendError> {
        let request = CreateCompletionRequestArgs::default()
            .model(self.model.as_str())
            .prompt(prompt)
            .temperature(self.temperature)
            .max_tokens(LEGACY_COMPLETION_MAX_TOKENS)
            .build()?;
        tracing::trace!(?request);

        let response = self.client.completions().create(request).await?;
        tracing::trace!(?response);
        completion_text(response)
    }
}

/// Content of the first choice.
fn chat_text(response: CreateChatCompletionResponse) -> crate::Result<String, BackendError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(BackendError::ResponseContentEmpty)
}

fn completion_text(response: CreateCompletionResponse) -> crate::Result<String, BackendError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.text)
        .ok_or(BackendError::ResponseContentEmpty)
}
