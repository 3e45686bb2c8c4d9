use serde::{Deserialize, Serialize};

use crate::StoreError;

/// One learned question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub question: String,
    pub answer: String,
}

impl Entry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Ordered collection of entries. Insertion order is significant: indices
/// are exposed for listing and deletion and only stay valid until the next
/// mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    questions: Vec<Entry>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn from_entries(entries: Vec<Entry>) -> Self {
        Self { questions: entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(|e| e.question.as_str())
    }

    /// Answer of the first entry whose question equals `question` exactly.
    pub fn lookup_answer(&self, question: &str) -> Option<&str> {
        self.questions
            .iter()
            .find(|e| e.question == question)
            .map(|e| e.answer.as_str())
    }

    pub fn append(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.questions.push(Entry::new(question, answer));
    }

    /// Removes the entry at `index`, shifting later entries down by one.
    pub fn delete_at(&mut self, index: usize) -> Result<Entry, StoreError> {
        if index >= self.questions.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.questions.len(),
            });
        }
        Ok(self.questions.remove(index))
    }

    pub fn clear(&mut self) {
        self.questions.clear();
    }
}
