use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    // Configuration errors, raised before any model call
    #[error("UnsupportedModel: Model {0} not supported")]
    UnsupportedModel(String),
    #[error("MissingApiKey: {env_var} not found in dotenv, nor was it set manually")]
    MissingApiKey { env_var: String },
    #[error("ConceptFile: {0}")]
    ConceptFile(String),
    #[error("LoggerError: {0}")]
    Logger(String),
    #[error("PromptError: {0}")]
    Prompt(#[from] minijinja::Error),
    /// Provider failures are passed through untouched.
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("UnparseableAnswer: expected 'positive' or 'negative', got '{0}'")]
    UnparseableAnswer(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Error returned by the async-openai client, including API error objects
    #[error("OpenAiError: {0}")]
    OpenAi(#[from] async_openai::error::OpenAIError),
    /// Underlying error from reqwest library after an API call was made
    #[error("http error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Hugging Face Inference API returned an error object or a non-success status
    #[error("HuggingFaceError ({status}): {message}")]
    HuggingFace { status: u16, message: String },
    /// Error when a response cannot be deserialized into a Rust type
    #[error("failed to deserialize api response: {0}")]
    JSONDeserialize(serde_json::Error),
    #[error("ResponseContentEmpty: Response had no content")]
    ResponseContentEmpty,
    #[error("Generic error: {message}")]
    Generic { message: String },
}

/// Error object returned by the Hugging Face Inference API, e.g. `{"error": "Model is loading"}`
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct HuggingFaceApiError {
    pub(crate) error: String,
}

pub(crate) fn map_deserialization_error(e: serde_json::Error, bytes: &[u8]) -> BackendError {
    tracing::error!(
        "failed deserialization of: {}",
        String::from_utf8_lossy(bytes)
    );
    BackendError::JSONDeserialize(e)
}
