//! Sentence-level document alignment and near-duplicate detection.
//!
//! Two documents are split into normalized sentences and aligned by A* over
//! cursor pairs: aligning the current sentences costs their edit distance,
//! skipping a sentence on either side costs 1. Aligned pairs that are close
//! enough are reported as likely plagiarism.

use crate::error::{OptionExt, Result, SearchError};
use crate::search::{FrontierPolicy, SearchEngine, SearchOptions, SearchProblem, Successor};

/// Penalty per sentence left over once the other document is exhausted.
const UNMATCHED_PENALTY: f64 = 10.0;

/// Levenshtein distance between two strings, counted in characters.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            current[j + 1] = if ca == *cb {
                previous[j]
            } else {
                1 + previous[j].min(previous[j + 1]).min(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Lowercases `text`, treats line breaks as sentence ends, drops punctuation
/// other than periods, and splits on periods. Empty sentences are discarded.
pub fn split_sentences(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c == '\n' { '.' } else { c })
        .filter(|&c| c.is_alphanumeric() || c == '_' || c == '.' || c.is_whitespace())
        .collect();
    cleaned
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignMove {
    /// Pair the current sentences of both documents.
    Align,
    /// Leave the current sentence of the first document unmatched.
    SkipFirst,
    /// Leave the current sentence of the second document unmatched.
    SkipSecond,
}

/// Alignment of two sentence lists as a search problem.
///
/// A state `(i, j)` means the first `i` sentences of the first document and
/// the first `j` of the second have been handled. The goal is both lists
/// consumed. The heuristic charges a heavy penalty per leftover sentence when
/// one side is already exhausted, so it is not admissible.
#[derive(Debug, Clone)]
pub struct SentenceAlignment {
    first: Vec<String>,
    second: Vec<String>,
}

impl SentenceAlignment {
    pub fn new(first: Vec<String>, second: Vec<String>) -> Self {
        Self { first, second }
    }

    /// Splits both texts with [`split_sentences`].
    pub fn from_texts(first: &str, second: &str) -> Self {
        Self::new(split_sentences(first), split_sentences(second))
    }

    pub fn first(&self) -> &[String] {
        &self.first
    }

    pub fn second(&self) -> &[String] {
        &self.second
    }

    /// Aligns the documents with A* and lists the resulting pairs in order.
    ///
    /// # Errors
    ///
    /// Propagates search errors. The goal is always reachable, so a search
    /// that ends without one is reported as [`SearchError::Other`].
    pub fn align(&self) -> Result<Vec<AlignedPair>> {
        let engine = SearchEngine::new(SearchOptions::new(FrontierPolicy::AStar));
        let solution = engine.search(self)?.into_solution().ok_or_else_search(|| {
            SearchError::Other("Alignment search ended without reaching the goal".to_string())
        })?;

        let pairs = solution
            .states
            .iter()
            .zip(&solution.actions)
            .map(|(&(i, j), action)| match action {
                AlignMove::Align => AlignedPair {
                    first: Some(self.first[i].clone()),
                    second: Some(self.second[j].clone()),
                    distance: Some(levenshtein(&self.first[i], &self.second[j])),
                },
                AlignMove::SkipFirst => AlignedPair {
                    first: Some(self.first[i].clone()),
                    second: None,
                    distance: None,
                },
                AlignMove::SkipSecond => AlignedPair {
                    first: None,
                    second: Some(self.second[j].clone()),
                    distance: None,
                },
            })
            .collect();
        Ok(pairs)
    }
}

impl SearchProblem for SentenceAlignment {
    type State = (usize, usize);
    type Action = AlignMove;

    fn initial_state(&self) -> (usize, usize) {
        (0, 0)
    }

    fn is_goal(&self, &(i, j): &(usize, usize)) -> bool {
        i == self.first.len() && j == self.second.len()
    }

    fn successors(&self, &(i, j): &(usize, usize)) -> Vec<Successor<(usize, usize), AlignMove>> {
        let mut successors = Vec::with_capacity(3);
        let more_first = i < self.first.len();
        let more_second = j < self.second.len();

        if more_first && more_second {
            let cost = levenshtein(&self.first[i], &self.second[j]) as f64;
            successors.push(Successor::new((i + 1, j + 1), AlignMove::Align, cost));
        }
        if more_first {
            successors.push(Successor::unit((i + 1, j), AlignMove::SkipFirst));
        }
        if more_second {
            successors.push(Successor::unit((i, j + 1), AlignMove::SkipSecond));
        }
        successors
    }

    fn heuristic(&self, &(i, j): &(usize, usize)) -> f64 {
        let left_first = self.first.len() - i;
        let left_second = self.second.len() - j;
        if left_first == 0 || left_second == 0 {
            left_first.max(left_second) as f64 * UNMATCHED_PENALTY
        } else {
            (left_first + left_second) as f64 / 2.0
        }
    }
}

/// One step of an alignment. Skipped sentences have no partner and no
/// distance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignedPair {
    pub first: Option<String>,
    pub second: Option<String>,
    pub distance: Option<usize>,
}

/// When an aligned pair counts as plagiarized: either threshold suffices.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlagiarismThresholds {
    /// Largest edit distance that is always suspicious.
    pub max_distance: usize,
    /// Smallest `1 - distance / longer length` that is suspicious.
    pub min_similarity: f64,
}

impl Default for PlagiarismThresholds {
    fn default() -> Self {
        Self {
            max_distance: 5,
            min_similarity: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlagiarismMatch {
    pub first: String,
    pub second: String,
    pub distance: usize,
    pub similarity: f64,
}

/// Aligned pairs that meet either threshold, in alignment order.
pub fn detect_plagiarism(
    pairs: &[AlignedPair],
    thresholds: &PlagiarismThresholds,
) -> Vec<PlagiarismMatch> {
    pairs
        .iter()
        .filter_map(|pair| {
            let (first, second, distance) = match pair {
                AlignedPair {
                    first: Some(first),
                    second: Some(second),
                    distance: Some(distance),
                } => (first, second, *distance),
                _ => return None,
            };
            let longest = first.chars().count().max(second.chars().count());
            let similarity = if longest == 0 {
                1.0
            } else {
                1.0 - distance as f64 / longest as f64
            };
            (distance <= thresholds.max_distance || similarity >= thresholds.min_similarity).then(
                || PlagiarismMatch {
                    first: first.clone(),
                    second: second.clone(),
                    distance,
                    similarity,
                },
            )
        })
        .collect()
}

/// Splits, aligns, and screens two documents with the default thresholds.
///
/// # Errors
///
/// Same as [`SentenceAlignment::align`].
pub fn compare_documents(first: &str, second: &str) -> Result<Vec<PlagiarismMatch>> {
    let pairs = SentenceAlignment::from_texts(first, second).align()?;
    Ok(detect_plagiarism(&pairs, &PlagiarismThresholds::default()))
}
