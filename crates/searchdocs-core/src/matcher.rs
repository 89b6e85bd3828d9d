//! Fuzzy name matching over a decoded inventory.
//!
//! Every object name is scored against the query with [`ratio`], a
//! normalized similarity in `0..=100`. Candidates below the threshold are
//! dropped, the rest are ordered by score with ties going to the object that
//! appears first in the inventory. The result is fully deterministic for a
//! given inventory and query.

use crate::Inventory;
use crate::config::DEFAULT_THRESHOLD;
use similar::{DiffTag, TextDiff};

/// Knobs for [`suggest`] and [`rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Minimum score (inclusive) a candidate needs.
    pub threshold: u8,
    /// Lowercase and replace punctuation with spaces on both sides before
    /// scoring. Off by default, making scoring case-sensitive.
    pub normalize: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            normalize: false,
        }
    }
}

impl MatchOptions {
    /// Options with a custom threshold and no normalization.
    #[must_use]
    pub fn with_threshold(threshold: u8) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }
}

/// A ranked candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Object name as stored in the inventory
    pub name: String,
    /// Similarity score in `0..=100`
    pub score: u8,
    /// Position of the object in the inventory
    pub index: usize,
}

/// Best match for `query`, or `None` when nothing reaches the threshold.
#[must_use]
pub fn suggest(inventory: &Inventory, query: &str, options: MatchOptions) -> Option<Suggestion> {
    rank(inventory, query, options).into_iter().next()
}

/// All candidates at or above the threshold, best first.
///
/// Equal scores keep inventory order, so the lower index always wins a tie.
#[must_use]
pub fn rank(inventory: &Inventory, query: &str, options: MatchOptions) -> Vec<Suggestion> {
    let query = prepare(query, options.normalize);

    let mut matches: Vec<Suggestion> = inventory
        .objects
        .iter()
        .enumerate()
        .filter_map(|(index, object)| {
            let score = ratio(&query, &prepare(&object.name, options.normalize));
            (score >= options.threshold).then(|| Suggestion {
                name: object.name.clone(),
                score,
                index,
            })
        })
        .collect();

    // `sort_by` is stable: equal scores stay in inventory order.
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

/// Similarity of two strings in `0..=100`.
///
/// `2 * M / T` scaled to a percentage, where `M` is the length of the longest
/// common subsequence of characters and `T` the combined length, rounded half
/// to even. Symmetric and case-sensitive; two empty strings score 100.
#[must_use]
pub fn ratio(a: &str, b: &str) -> u8 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 100;
    }

    let matched: usize = TextDiff::from_chars(a, b)
        .ops()
        .iter()
        .map(similar::DiffOp::as_tag_tuple)
        .filter(|(tag, _, _)| *tag == DiffTag::Equal)
        .map(|(_, old, _)| old.len())
        .sum();

    let numerator = 200 * matched;
    let mut score = numerator / total;
    let remainder = numerator % total;
    if remainder * 2 > total || (remainder * 2 == total && score % 2 == 1) {
        score += 1;
    }

    u8::try_from(score.min(100)).unwrap_or(100)
}

/// The classic fuzzy-matching preprocessor: lowercase, every character that
/// is not a word character becomes a space, surrounding whitespace trimmed.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

fn prepare(text: &str, normalize_text: bool) -> String {
    if normalize_text {
        normalize(text)
    } else {
        text.to_string()
    }
}
