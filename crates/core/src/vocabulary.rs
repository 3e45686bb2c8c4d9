//! Reference word lists used by the normalizer and capitalizer.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const STOPWORDS: &[&str] = &[
    "the", "a", "of", "and", "to", "in", "for", "on", "is", "it", "this", "that", "with", "at",
    "by", "an",
];

const STEMS: &[(&str, &str)] = &[
    ("running", "run"),
    ("runner", "run"),
    ("runs", "run"),
    ("played", "play"),
    ("playing", "play"),
    ("plays", "play"),
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
];

const PROPER_NOUNS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "india",
    "google",
    "microsoft",
    "windows",
    "linux",
    "minecraft",
    "ultrakill",
    "guido",
    "rossum",
    "netherlands",
    "openai",
];

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid vocabulary file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid vocabulary: {0}")]
    Syntax(#[from] toml::de::Error),
    #[error("stem {word:?} -> {target:?} {reason}")]
    InvalidStem {
        word: String,
        target: String,
        reason: &'static str,
    },
}

/// Immutable word tables. All entries are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub stopwords: HashSet<String>,
    pub stems: HashMap<String, String>,
    pub proper_nouns: HashSet<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            stopwords: STOPWORDS.iter().map(|s| s.to_string()).collect(),
            stems: STEMS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            proper_nouns: PROPER_NOUNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// On-disk overrides. A table left out of the file keeps its built-in value.
#[derive(Debug, Clone, Default, Deserialize)]
struct VocabularyFile {
    stopwords: Option<Vec<String>>,
    stems: Option<HashMap<String, String>>,
    proper_nouns: Option<Vec<String>>,
}

impl Vocabulary {
    pub fn from_toml_str(content: &str) -> Result<Self, VocabularyError> {
        let file: VocabularyFile = toml::from_str(content)?;
        let mut vocab = Self::default();
        if let Some(words) = file.stopwords {
            vocab.stopwords = words.iter().map(|w| w.to_lowercase()).collect();
        }
        if let Some(stems) = file.stems {
            vocab.stems = stems
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v.to_lowercase()))
                .collect();
        }
        if let Some(nouns) = file.proper_nouns {
            vocab.proper_nouns = nouns.iter().map(|w| w.to_lowercase()).collect();
        }
        vocab.check_stems()?;
        Ok(vocab)
    }

    /// A stem target must survive normalization unchanged: one token, not a
    /// stopword, not itself rewritten by another stem.
    fn check_stems(&self) -> Result<(), VocabularyError> {
        for (word, target) in &self.stems {
            let reason = if target.is_empty() || target.chars().any(char::is_whitespace) {
                "must be a single word"
            } else if self.stopwords.contains(target) {
                "maps to a stopword"
            } else if target != word && self.stems.contains_key(target) {
                "maps to another stemmed word"
            } else {
                continue;
            };
            return Err(VocabularyError::InvalidStem {
                word: word.clone(),
                target: target.clone(),
                reason,
            });
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        let content = fs::read_to_string(path).map_err(|source| VocabularyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            VocabularyError::Syntax(source) => VocabularyError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_builtin_tables() {
        let v = Vocabulary::default();
        assert_eq!(v.stopwords.len(), 16);
        assert_eq!(v.stems.get("runner").map(String::as_str), Some("run"));
        assert!(v.proper_nouns.contains("ultrakill"));
    }

    #[test]
    fn toml_overrides_only_given_tables() {
        let v = Vocabulary::from_toml_str(
            r#"
            proper_nouns = ["Rust", "Cargo"]

            [stems]
            Crates = "crate"
            "#,
        )
        .unwrap();
        assert!(v.proper_nouns.contains("rust"));
        assert!(!v.proper_nouns.contains("python"));
        assert_eq!(v.stems.get("crates").map(String::as_str), Some("crate"));
        assert_eq!(v.stopwords, Vocabulary::default().stopwords);
    }

    #[test]
    fn rejects_stems_that_break_normalization() {
        let cases = [
            // chained: "running" -> "run" -> "sprint"
            "[stems]\nrunning = \"run\"\nrun = \"sprint\"\n",
            // onto a stopword
            "[stems]\nfoo = \"the\"\n",
            // onto a stopword from the same file
            "stopwords = [\"Zap\"]\n[stems]\nzapping = \"ZAP\"\n",
            // more than one word
            "[stems]\nfoo = \"bar baz\"\n",
            "[stems]\nfoo = \"\"\n",
        ];
        for content in cases {
            let err = Vocabulary::from_toml_str(content).unwrap_err();
            assert!(
                matches!(err, VocabularyError::InvalidStem { .. }),
                "{content:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn accepted_override_keeps_normalize_idempotent() {
        let v = Vocabulary::from_toml_str(
            "[stems]\nrunning = \"run\"\nrun = \"run\"\nsprinting = \"sprint\"\n",
        )
        .unwrap();
        let n = crate::normalizer::Normalizer::new(&v);
        let once = n.normalize("The running and sprinting run");
        assert_eq!(once, "run sprint run");
        assert_eq!(n.normalize(&once), once);
    }

    #[test]
    fn syntax_error_is_not_a_stem_error() {
        let err = Vocabulary::from_toml_str("stems = [").unwrap_err();
        assert!(matches!(err, VocabularyError::Syntax(_)));
    }

    #[test]
    fn load_reports_bad_file_with_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("vocab.toml");
        std::fs::write(&path, "stems = [").unwrap();
        assert!(matches!(
            Vocabulary::load(&path).unwrap_err(),
            VocabularyError::Parse { .. }
        ));
        std::fs::write(&path, "[stems]\nfoo = \"the\"\n").unwrap();
        assert!(matches!(
            Vocabulary::load(&path).unwrap_err(),
            VocabularyError::InvalidStem { .. }
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let err = Vocabulary::load(&temp.path().join("vocab.toml")).unwrap_err();
        assert!(matches!(err, VocabularyError::Read { .. }));
    }
}
