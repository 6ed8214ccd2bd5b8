//! Bucket aggregation, normalization and ranking.
//!
//! Everything here is a pure function of its inputs.

use crate::models::{Bucket, PersonalityBuckets, QuizSessionAnswer, RankedBucket};
use crate::quiz::Quiz;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use tracing::debug;

/// Number of buckets returned by default when ranking.
pub const DEFAULT_TOP_COUNT: usize = 2;

/// How raw sums are turned into integer percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Round each bucket on its own. Totals may drift off 100.
    #[default]
    Independent,
    /// Hamilton apportionment. Totals are always exactly 100.
    LargestRemainder,
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingMode::Independent => write!(f, "independent"),
            RoundingMode::LargestRemainder => write!(f, "largest-remainder"),
        }
    }
}

/// Result of folding a session's answers into buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub buckets: PersonalityBuckets,
    /// Answers that resolved and contributed weights.
    pub scored: usize,
    /// Answers whose question or answer id did not resolve.
    pub skipped: usize,
}

/// Sum the weights of every selected answer.
///
/// References that do not resolve contribute nothing.
pub fn aggregate(quiz: &Quiz, answers: &[QuizSessionAnswer]) -> PersonalityBuckets {
    aggregate_with_stats(quiz, answers).buckets
}

/// Like [`aggregate`], also counting scored and skipped answers.
pub fn aggregate_with_stats(quiz: &Quiz, answers: &[QuizSessionAnswer]) -> Aggregation {
    let mut aggregation = Aggregation::default();

    for recorded in answers {
        let selected = quiz
            .question(&recorded.question_id)
            .and_then(|q| q.answer(&recorded.answer_id));

        match selected {
            Some(answer) => {
                aggregation.buckets.accumulate(&answer.weights);
                aggregation.scored += 1;
            }
            None => {
                debug!(
                    "Skipping unresolved answer '{}' for question '{}'",
                    recorded.answer_id, recorded.question_id
                );
                aggregation.skipped += 1;
            }
        }
    }

    aggregation
}

/// Convert raw sums into integer percentages.
///
/// An all-zero accumulator yields [`PersonalityBuckets::QUARTILES`].
pub fn normalize(raw: &PersonalityBuckets, mode: RoundingMode) -> PersonalityBuckets {
    let total = raw.total();
    if total == 0 {
        return PersonalityBuckets::QUARTILES;
    }

    match mode {
        RoundingMode::Independent => normalize_independent(raw, total),
        RoundingMode::LargestRemainder => normalize_largest_remainder(raw, total),
    }
}

fn normalize_independent(raw: &PersonalityBuckets, total: u64) -> PersonalityBuckets {
    let mut out = PersonalityBuckets::default();
    for (bucket, value) in raw.entries() {
        // round(100 * v / total) with halves rounded up, in integers
        let pct = (200 * u64::from(value) + total) / (2 * total);
        out.set(bucket, pct as u32);
    }
    out
}

fn normalize_largest_remainder(raw: &PersonalityBuckets, total: u64) -> PersonalityBuckets {
    let mut out = PersonalityBuckets::default();
    let mut remainders: Vec<(Bucket, u64)> = Vec::with_capacity(4);
    let mut assigned = 0u64;

    for (bucket, value) in raw.entries() {
        let scaled = 100 * u64::from(value);
        let floor = scaled / total;
        assigned += floor;
        out.set(bucket, floor as u32);
        remainders.push((bucket, scaled % total));
    }

    // stable: equal remainders keep canonical order
    remainders.sort_by_key(|(_, rem)| Reverse(*rem));

    let leftover = 100u64.saturating_sub(assigned) as usize;
    for (bucket, _) in remainders.into_iter().take(leftover) {
        out.set(bucket, out.get(bucket) + 1);
    }

    out
}

/// The `count` highest buckets, descending. Ties keep canonical order.
pub fn top_buckets(buckets: &PersonalityBuckets, count: usize) -> Vec<RankedBucket> {
    let mut ranked: Vec<RankedBucket> = buckets
        .entries()
        .into_iter()
        .map(|(bucket, value)| RankedBucket { bucket, value })
        .collect();

    ranked.sort_by_key(|r| Reverse(r.value));
    ranked.truncate(count);
    ranked
}
