use std::collections::{HashMap, HashSet};

use crate::vocabulary::Vocabulary;

/// Canonical comparison form of a question: lowercase, stopwords dropped,
/// known inflections mapped to their root.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: HashSet<String>,
    stems: HashMap<String, String>,
}

impl Normalizer {
    pub fn new(vocab: &Vocabulary) -> Self {
        Self {
            stopwords: vocab.stopwords.clone(),
            stems: vocab.stems.clone(),
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        text.to_lowercase()
            .split_whitespace()
            .filter(|t| !self.stopwords.contains(*t))
            .map(|t| self.stems.get(t).map(String::as_str).unwrap_or(t))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&Vocabulary::default())
    }
}
