//! Matching-character ratio between two strings.
//!
//! The score is `2 * M / T`, where `T` is the combined length of both
//! strings and `M` is the number of characters covered by matching blocks.
//! Blocks are found by taking the longest common block, then recursing on
//! the pieces to its left and right (Ratcliff/Obershelp). When the fixed
//! sequence has 200 or more characters, characters that make up more than
//! 1% of it are left out of the block index. Matches can still grow across
//! them.

use std::collections::HashMap;

const AUTOJUNK_MIN_LEN: usize = 200;

/// Compares many strings against one fixed sequence. The index over the
/// fixed sequence is built once and reused for every comparison.
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    b: Vec<char>,
    b2j: HashMap<char, Vec<usize>>,
    counts: HashMap<char, usize>,
}

impl SequenceMatcher {
    pub fn new(b: &str) -> Self {
        let b: Vec<char> = b.chars().collect();
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        let mut counts: HashMap<char, usize> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
            *counts.entry(*c).or_default() += 1;
        }
        if b.len() >= AUTOJUNK_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            b2j.retain(|_, idxs| idxs.len() <= ntest);
        }
        Self { b, b2j, counts }
    }

    /// Full ratio of `a` against the fixed sequence.
    pub fn ratio(&self, a: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let matches = self.matching_chars(&a);
        calculate_ratio(matches, a.len() + self.b.len())
    }

    /// Upper bound on `ratio` using only lengths.
    pub fn real_quick_ratio(&self, a: &str) -> f64 {
        let la = a.chars().count();
        let lb = self.b.len();
        calculate_ratio(la.min(lb), la + lb)
    }

    /// Upper bound on `ratio` using character counts, ignoring order.
    pub fn quick_ratio(&self, a: &str) -> f64 {
        let mut avail: HashMap<char, usize> = HashMap::new();
        let mut matches = 0;
        let mut la = 0;
        for c in a.chars() {
            la += 1;
            let left = avail
                .entry(c)
                .or_insert_with(|| self.counts.get(&c).copied().unwrap_or(0));
            if *left > 0 {
                *left -= 1;
                matches += 1;
            }
        }
        calculate_ratio(matches, la + self.b.len())
    }

    fn matching_chars(&self, a: &[char]) -> usize {
        let mut total = 0;
        let mut queue = vec![(0, a.len(), 0, self.b.len())];
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.find_longest_match(a, alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }
        total
    }

    /// Longest block `a[i..i+k] == b[j..j+k]` inside the given windows.
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    fn find_longest_match(
        &self,
        a: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let b = &self.b;
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(indices) = self.b2j.get(c) {
                for &j in indices {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = if j > 0 {
                        j2len.get(&(j - 1)).copied().unwrap_or(0)
                    } else {
                        0
                    };
                    let k = prev + 1;
                    next.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = next;
        }

        // Grow across characters that were dropped from the index.
        while besti > alo && bestj > blo && a[besti - 1] == b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && a[besti + bestsize] == b[bestj + bestsize]
        {
            bestsize += 1;
        }
        (besti, bestj, bestsize)
    }
}

fn calculate_ratio(matches: usize, length: usize) -> f64 {
    if length == 0 {
        1.0
    } else {
        2.0 * matches as f64 / length as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(a: &str, b: &str) -> f64 {
        SequenceMatcher::new(b).ratio(a)
    }

    fn close(x: f64, y: f64) -> bool {
        (x - y).abs() < 1e-9
    }

    #[test]
    fn identical_and_disjoint() {
        assert!(close(ratio("python", "python"), 1.0));
        assert!(close(ratio("abc", "xyz"), 0.0));
        assert!(close(ratio("", ""), 1.0));
        assert!(close(ratio("abc", ""), 0.0));
    }

    #[test]
    fn known_values() {
        // "abcd" vs "bcde": block "bcd" -> 2*3/8
        assert!(close(ratio("abcd", "bcde"), 0.75));
        // a "private Thread currentThread;" / b "private volatile Thread currentThread;"
        assert!(close(
            ratio(
                "private Thread currentThread;",
                "private volatile Thread currentThread;"
            ),
            2.0 * 29.0 / 67.0
        ));
        assert!(close(ratio("apple", "ape"), 0.75));
    }

    #[test]
    fn reordering_is_penalised_differently_from_edits() {
        // Only one of the two swapped words can be part of the alignment.
        let swapped = ratio("python what", "what python");
        assert!(close(swapped, 2.0 * 6.0 / 22.0));
    }

    #[test]
    fn bounds_never_undercut_ratio() {
        let pairs = [
            ("what python?", "what's python"),
            ("who make linux", "who invent linux?"),
            ("good run shoe", "run"),
            ("", "x"),
        ];
        for (a, b) in pairs {
            let m = SequenceMatcher::new(b);
            let r = m.ratio(a);
            assert!(m.quick_ratio(a) + 1e-12 >= r, "{a:?} {b:?}");
            assert!(m.real_quick_ratio(a) + 1e-12 >= m.quick_ratio(a), "{a:?} {b:?}");
        }
    }

    #[test]
    fn popular_characters_still_extend_matches() {
        // 'a' makes up far more than 1% of b, so it is not indexed, yet the
        // full run of a's is still matched through block extension.
        let b = format!("x{}", "a".repeat(250));
        let a = format!("x{}", "a".repeat(250));
        assert!(close(ratio(&a, &b), 1.0));
    }

    #[test]
    fn unicode_counts_characters_not_bytes() {
        assert!(close(ratio("héllo", "hello"), 0.8));
    }
}
