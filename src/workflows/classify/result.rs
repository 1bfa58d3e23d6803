use crate::error::ClassifierError;
use serde::{Deserialize, Serialize};

/// The entity half of a classification. Not stored by the procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub name: String,
    pub description: String,
}

impl ClassificationRequest {
    pub fn new<S: Into<String>>(name: S, description: S) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Inputs echoed back alongside both stage outputs. `answer` is the model's raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub concept: String,
    pub definition: String,
    pub entity: String,
    pub description: String,
    pub rationale: String,
    pub answer: String,
}

impl ClassificationResult {
    /// Interprets `answer` after trimming and lowercasing it.
    pub fn verdict(&self) -> crate::Result<Verdict, ClassifierError> {
        self.answer.parse()
    }
}

impl std::fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}Concept\x1b[0m: {}", RESULT_GRADIENT[0], self.concept)?;
        writeln!(f, "{}Entity\x1b[0m: {}", RESULT_GRADIENT[1], self.entity)?;
        writeln!(f, "{}Rationale\x1b[0m: {}", RESULT_GRADIENT[2], self.rationale.trim())?;
        writeln!(f, "{}Answer\x1b[0m: {}", RESULT_GRADIENT[3], self.answer.trim())
    }
}

static RESULT_GRADIENT: [&str; 4] = [
    "\x1B[38;2;92;244;37m",
    "\x1B[38;2;0;225;149m",
    "\x1B[38;2;0;201;196m",
    "\x1B[38;2;0;170;222m",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Positive,
    Negative,
}

impl Verdict {
    pub fn is_positive(&self) -> bool {
        matches!(self, Verdict::Positive)
    }
}

impl std::str::FromStr for Verdict {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Verdict::Positive),
            "negative" => Ok(Verdict::Negative),
            _ => Err(ClassifierError::UnparseableAnswer(s.to_owned())),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Positive => write!(f, "positive"),
            Verdict::Negative => write!(f, "negative"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_answer(answer: &str) -> ClassificationResult {
        ClassificationResult {
            concept: "mammal".to_string(),
            definition: "warm-blooded".to_string(),
            entity: "dog".to_string(),
            description: "a domesticated canine".to_string(),
            rationale: "Dogs are warm-blooded.".to_string(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn verdict_normalizes_case_and_whitespace() {
        assert_eq!(result_with_answer("positive").verdict().unwrap(), Verdict::Positive);
        assert_eq!(result_with_answer(" Positive\n").verdict().unwrap(), Verdict::Positive);
        assert_eq!(result_with_answer("NEGATIVE").verdict().unwrap(), Verdict::Negative);
    }

    #[test]
    fn verdict_rejects_anything_else() {
        for answer in ["", "yes", "positive.", "Answer: negative", "not negative"] {
            match result_with_answer(answer).verdict() {
                Err(ClassifierError::UnparseableAnswer(raw)) => assert_eq!(raw, answer),
                other => panic!("expected UnparseableAnswer for {answer:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn serializes_with_template_field_names() {
        let value = serde_json::to_value(result_with_answer("positive")).unwrap();
        for key in ["concept", "definition", "entity", "description", "rationale", "answer"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(serde_json::to_value(Verdict::Negative).unwrap(), "negative");
    }
}
