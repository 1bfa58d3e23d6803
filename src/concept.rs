use crate::error::ClassifierError;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};

/// The category being tested for membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub id: String,
    pub term: String,
    pub definition: String,
    /// URL of the source the definition was taken from.
    pub reference: String,
}

impl Concept {
    pub fn new<S: Into<String>>(id: S, term: S, definition: S, reference: S) -> Self {
        Self {
            id: id.into(),
            term: term.into(),
            definition: definition.into(),
            reference: reference.into(),
        }
    }
}

/// Parses a YAML list of concepts. Duplicate ids are rejected.
pub fn parse_concepts(content: &str) -> crate::Result<Vec<Concept>, ClassifierError> {
    if content.trim().is_empty() {
        return Err(ClassifierError::ConceptFile(
            "concept file is empty".to_string(),
        ));
    }
    let concepts: Vec<Concept> = serde_yaml::from_str(content)
        .map_err(|e| ClassifierError::ConceptFile(format!("invalid concept yaml: {e}")))?;

    let mut seen = HashSet::new();
    for concept in &concepts {
        if !seen.insert(concept.id.as_str()) {
            return Err(ClassifierError::ConceptFile(format!(
                "duplicate concept id '{}'",
                concept.id
            )));
        }
    }
    Ok(concepts)
}

pub fn load_concepts<P: AsRef<Path>>(path: P) -> crate::Result<Vec<Concept>, ClassifierError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        ClassifierError::ConceptFile(format!("Failed to read {}: {e}", path.display()))
    })?;
    let concepts = parse_concepts(&content)?;
    crate::debug!("Loaded {} concepts from {}", concepts.len(), path.display());
    Ok(concepts)
}

pub fn find_concept<'a>(concepts: &'a [Concept], id: &str) -> Option<&'a Concept> {
    concepts.iter().find(|concept| concept.id == id)
}
