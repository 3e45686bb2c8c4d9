//! Answers questions from the knowledge base and learns the ones it can't.
//!
//! Every query starts out answering. A query that matches nothing comes back
//! as a [`Lesson`], and the engine stays in the teaching state for it until
//! the caller hands the lesson back with a reply through [`Engine::teach`].
//! There is no timeout. Dropping the lesson abandons it without touching the
//! base.

use std::path::{Path, PathBuf};

use storage::{Entry, KnowledgeBase, StoreError};
use tracing::{debug, info};

use crate::capitalizer::Capitalizer;
use crate::config::AppConfig;
use crate::matcher::{Candidate, Matcher};
use crate::normalizer::Normalizer;
use crate::vocabulary::Vocabulary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Answer(String),
    Unknown(Lesson),
}

/// A question the engine could not answer, waiting for the caller to supply
/// the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    question: String,
}

impl Lesson {
    pub fn question(&self) -> &str {
        &self.question
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeachOutcome {
    Learned,
    Skipped,
}

pub struct Engine {
    normalizer: Normalizer,
    capitalizer: Capitalizer,
    matcher: Matcher,
    kb: KnowledgeBase,
    store_path: PathBuf,
    skip_word: String,
}

impl Engine {
    pub fn new(vocab: &Vocabulary, matcher: Matcher, store_path: impl Into<PathBuf>) -> Self {
        Self {
            normalizer: Normalizer::new(vocab),
            capitalizer: Capitalizer::new(vocab),
            matcher,
            kb: KnowledgeBase::new(),
            store_path: store_path.into(),
            skip_word: "skip".to_string(),
        }
    }

    /// Builds an engine from configuration and loads its default store.
    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let vocab = match &cfg.vocabulary.path {
            Some(p) => Vocabulary::load(Path::new(p))?,
            None => Vocabulary::default(),
        };
        let engine = Self::new(&vocab, Matcher::new(cfg.matching.cutoff), &cfg.store.path)
            .with_skip_word(&cfg.teach.skip_word)
            .with_knowledge(storage::load(Path::new(&cfg.store.path)));
        Ok(engine)
    }

    pub fn with_skip_word(mut self, word: &str) -> Self {
        self.skip_word = word.to_string();
        self
    }

    pub fn with_knowledge(mut self, kb: KnowledgeBase) -> Self {
        self.kb = kb;
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn ask(&self, question: &str) -> Reply {
        // A verbatim hit needs no fuzzy matching.
        if let Some(answer) = self.kb.lookup_answer(question) {
            return Reply::Answer(self.capitalizer.restore_proper_nouns(answer));
        }

        let query = self.normalizer.normalize(question);
        let candidates = self.kb.questions().map(|q| Candidate {
            original: q,
            normalized: self.normalizer.normalize(q),
        });
        if let Some(found) = self.matcher.best_match(&query, candidates) {
            debug!(
                "Matched {:?} to {:?} (ratio {:.3}, cutoff {:.2})",
                question,
                found.question,
                found.ratio,
                self.matcher.cutoff()
            );
            if let Some(answer) = self.kb.lookup_answer(found.question) {
                return Reply::Answer(self.capitalizer.restore_proper_nouns(answer));
            }
        }

        debug!("No match for {:?}", question);
        Reply::Unknown(Lesson {
            question: question.to_string(),
        })
    }

    /// Completes a lesson. The skip word or an empty reply leaves the base
    /// untouched. Otherwise the original question is stored with the reply
    /// and the base is saved.
    pub fn teach(&mut self, lesson: Lesson, reply: &str) -> TeachOutcome {
        let reply = reply.trim();
        if reply.is_empty() || reply.eq_ignore_ascii_case(&self.skip_word) {
            debug!("Skipped teaching {:?}", lesson.question);
            return TeachOutcome::Skipped;
        }
        info!("Learned answer for {:?}", lesson.question);
        self.kb.append(lesson.question, reply);
        self.persist();
        TeachOutcome::Learned
    }

    pub fn delete(&mut self, index: usize) -> Result<Entry, StoreError> {
        let removed = self.kb.delete_at(index)?;
        self.persist();
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.kb.clear();
        self.persist();
    }

    /// Swaps in a base loaded from elsewhere and makes it the default store's
    /// content.
    pub fn replace(&mut self, kb: KnowledgeBase) {
        self.kb = kb;
        self.persist();
    }

    /// Writes an independent copy of the current base.
    pub fn snapshot_to(&self, path: &Path) -> Result<(), StoreError> {
        storage::save(path, &self.kb)
    }

    fn persist(&self) {
        // Failures are logged by the store; the session carries on in memory.
        let _ = storage::persist(&self.store_path, &self.kb);
    }
}
