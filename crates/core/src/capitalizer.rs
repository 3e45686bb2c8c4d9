use std::collections::HashSet;

use crate::vocabulary::Vocabulary;

/// Restores the casing of known proper nouns in text shown to the user.
#[derive(Debug, Clone)]
pub struct Capitalizer {
    proper_nouns: HashSet<String>,
}

impl Capitalizer {
    pub fn new(vocab: &Vocabulary) -> Self {
        Self {
            proper_nouns: vocab.proper_nouns.clone(),
        }
    }

    pub fn restore_proper_nouns(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|w| {
                if self.proper_nouns.contains(&w.to_lowercase()) {
                    capitalize(w)
                } else {
                    w.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Capitalizer {
    fn default() -> Self {
        Self::new(&Vocabulary::default())
    }
}

/// First character upper, rest lower.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
