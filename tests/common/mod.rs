#![allow(dead_code)]
pub use concept_classifier::prelude::*;
pub use serial_test::serial;
use std::{collections::VecDeque, sync::Mutex};

pub const DOG_RATIONALE: &str =
    "Dogs are warm-blooded, have fur, and nurse their young, matching the definition of mammal.";
pub const ROCK_RATIONALE: &str =
    "Rocks are not warm-blooded and do not nurse young, contradicting the definition.";

pub fn mammal() -> Concept {
    Concept::new(
        "1",
        "mammal",
        "an animal that is warm-blooded, has hair/fur, and nurses its young",
        "https://example.com/mammal",
    )
}

/// Replays scripted responses in order and records every prompt it receives.
pub struct StubGenerator {
    responses: Mutex<VecDeque<Result<String, BackendError>>>,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn new(responses: Vec<Result<String, BackendError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(responses: &[&str]) -> Self {
        Self::new(responses.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(BackendError::Generic {
                    message: "no scripted response left".to_string(),
                })
            })
    }
}

/// Answers from the prompt text alone, so it can serve concurrent classifications.
pub struct ScriptedGenerator<F>
where
    F: Fn(&str) -> Result<String, BackendError> + Send + Sync,
{
    script: F,
}

impl<F> ScriptedGenerator<F>
where
    F: Fn(&str) -> Result<String, BackendError> + Send + Sync,
{
    pub fn new(script: F) -> Self {
        Self { script }
    }
}

impl<F> TextGenerator for ScriptedGenerator<F>
where
    F: Fn(&str) -> Result<String, BackendError> + Send + Sync,
{
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        (self.script)(prompt)
    }
}

pub fn rate_limited() -> BackendError {
    BackendError::HuggingFace {
        status: 429,
        message: "Rate limit reached".to_string(),
    }
}
