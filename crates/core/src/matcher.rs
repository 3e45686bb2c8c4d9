use crate::similarity::SequenceMatcher;

pub const DEFAULT_CUTOFF: f64 = 0.6;

/// A stored question paired with its normalized form.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub original: &'a str,
    pub normalized: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    /// Stored question as originally written, usable as a lookup key.
    pub question: &'a str,
    pub ratio: f64,
}

#[derive(Debug, Clone)]
pub struct Matcher {
    cutoff: f64,
}

impl Matcher {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Highest-ratio candidate at or above the cutoff. On equal ratios the
    /// earlier candidate wins.
    pub fn best_match<'a, I>(&self, query: &str, candidates: I) -> Option<Match<'a>>
    where
        I: IntoIterator<Item = Candidate<'a>>,
    {
        let seq = SequenceMatcher::new(query);
        let mut best: Option<Match<'a>> = None;
        for candidate in candidates {
            let text = candidate.normalized.as_str();
            if seq.real_quick_ratio(text) < self.cutoff || seq.quick_ratio(text) < self.cutoff {
                continue;
            }
            let ratio = seq.ratio(text);
            if ratio < self.cutoff {
                continue;
            }
            if best.as_ref().map_or(true, |b| ratio > b.ratio) {
                best = Some(Match {
                    question: candidate.original,
                    ratio,
                });
            }
        }
        best
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_CUTOFF)
    }
}
