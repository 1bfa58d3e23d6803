//! The two prompt templates of the zero-shot chain of thought and their rendering.
//!
//! Templates are registered once per [`PromptChain`] and rendered in a single pass, so
//! entity text that happens to look like a placeholder is inserted as is. Trailing
//! spaces inside the templates are part of the prompt text sent to the model.

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

pub const RATIONALE_TEMPLATE_NAME: &str = "rationale_generation";
pub const ANSWER_TEMPLATE_NAME: &str = "answer_generation";

pub const RATIONALE_GENERATION_PROMPT: &str = concat!(
    "Concept: {{ concept }} \n",
    "Definition: {{ definition }}\n",
    "Entity: {{ entity }} \n",
    "Description: {{ description }}\n",
    "  \n",
    "Using the above definition, and only the information in the above definition, \n",
    "provide an argument for the assertion that {{ entity }} is a(n) {{ concept }}.\n",
    "    \n",
    "Rationale:\n",
);

pub const ANSWER_GENERATION_PROMPT: &str = concat!(
    "Concept: {{ concept }} \n",
    "Definition: {{ definition }}\n",
    "Entity: {{ entity }} \n",
    "Description: {{ description }}\n",
    "Rationale: {{ rationale }}\n",
    "\n",
    "Now using the argument provided in the above rationale, answer the question: is {{ entity }} a(n) {{ concept }}? \n",
    "Answer 'positive' or 'negative', and only 'positive' or 'negative'.  Use lower case. \n",
    "If there is not enough information to be sure of an answer, answer 'negative'.\n",
    "  \n",
    "Answer:\n",
);

/// Stage 1 input: concept and entity information.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RationaleInput<'a> {
    pub concept: &'a str,
    pub definition: &'a str,
    pub entity: &'a str,
    pub description: &'a str,
}

/// Stage 2 input: the stage 1 input plus the generated rationale.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnswerInput<'a> {
    pub concept: &'a str,
    pub definition: &'a str,
    pub entity: &'a str,
    pub description: &'a str,
    pub rationale: &'a str,
}

impl<'a> RationaleInput<'a> {
    pub fn with_rationale(self, rationale: &'a str) -> AnswerInput<'a> {
        AnswerInput {
            concept: self.concept,
            definition: self.definition,
            entity: self.entity,
            description: self.description,
            rationale,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PromptChain {
    env: Environment<'static>,
}

impl PromptChain {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template(RATIONALE_TEMPLATE_NAME, RATIONALE_GENERATION_PROMPT)?;
        env.add_template(ANSWER_TEMPLATE_NAME, ANSWER_GENERATION_PROMPT)?;
        Ok(Self { env })
    }

    pub fn rationale_prompt(&self, input: &RationaleInput<'_>) -> Result<String, minijinja::Error> {
        self.env.get_template(RATIONALE_TEMPLATE_NAME)?.render(input)
    }

    pub fn answer_prompt(&self, input: &AnswerInput<'_>) -> Result<String, minijinja::Error> {
        self.env.get_template(ANSWER_TEMPLATE_NAME)?.render(input)
    }
}
