use crate::error::ClassifierError;
use secrecy::Secret;

pub const OPENAI_API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const HUGGINGFACE_API_KEY_ENV_VAR: &str = "HUGGINGFACEHUB_API_TOKEN";

#[derive(Clone, Debug, Default)]
pub struct ApiConfig {
    pub api_key: Option<Secret<String>>,
    /// Overrides the backend's default environment variable when set.
    pub api_key_env_var: Option<String>,
}

impl ApiConfig {
    pub(crate) fn load_api_key(
        &self,
        default_env_var: &str,
    ) -> crate::Result<Secret<String>, ClassifierError> {
        if let Some(api_key) = self.api_key.as_ref() {
            crate::trace!("Using api_key from parameter");
            return Ok(api_key.to_owned());
        }
        let env_var = self.api_key_env_var.as_deref().unwrap_or(default_env_var);
        crate::trace!("api_key not set. Attempting to load {env_var} from .env");
        dotenvy::dotenv().ok();

        match dotenvy::var(env_var) {
            Ok(api_key) => {
                crate::trace!("Successfully loaded api_key from .env");
                Ok(api_key.into())
            }
            Err(_) => {
                crate::error!("{env_var} not found in dotenv, nor was it set manually");
                Err(ClassifierError::MissingApiKey {
                    env_var: env_var.to_owned(),
                })
            }
        }
    }
}

pub trait LlmApiConfigTrait {
    fn api_config_mut(&mut self) -> &mut ApiConfig;

    /// Set the API key for the client. Otherwise it will attempt to load it from the .env file.
    fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self
    where
        Self: Sized,
    {
        self.api_config_mut().api_key = Some(Secret::from(api_key.into()));
        self
    }

    /// Set the environment variable name for the API key. Default is set from the backend.
    fn with_api_key_env_var<S: Into<String>>(mut self, api_key_env_var: S) -> Self
    where
        Self: Sized,
    {
        self.api_config_mut().api_key_env_var = Some(api_key_env_var.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn parameter_wins() {
        let config = ApiConfig {
            api_key: Some(Secret::from("sk-param".to_string())),
            api_key_env_var: None,
        };
        let key = config.load_api_key(OPENAI_API_KEY_ENV_VAR).unwrap();
        assert_eq!(key.expose_secret(), "sk-param");
    }

    #[test]
    fn missing_env_var_is_a_configuration_error() {
        let config = ApiConfig {
            api_key: None,
            api_key_env_var: Some("CONCEPT_CLASSIFIER_TEST_UNSET_KEY".to_string()),
        };
        match config.load_api_key(OPENAI_API_KEY_ENV_VAR) {
            Err(ClassifierError::MissingApiKey { env_var }) => {
                assert_eq!(env_var, "CONCEPT_CLASSIFIER_TEST_UNSET_KEY")
            }
            other => panic!("expected MissingApiKey, got {other:?}"),
        }
    }
}
