//! Scoring pipeline.
//!
//! Recorded answers are folded into raw bucket sums, normalized to
//! percentages, ranked, and mapped to insight text.

pub mod aggregator;
pub mod insights;

pub use aggregator::*;
pub use insights::generate_insights;

use crate::models::{Profile, QuizSessionAnswer};
use crate::quiz::Quiz;

/// Knobs for building a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringSettings {
    pub top_count: usize,
    pub rounding: RoundingMode,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            top_count: DEFAULT_TOP_COUNT,
            rounding: RoundingMode::default(),
        }
    }
}

impl From<&crate::config::ScoringConfig> for ScoringSettings {
    fn from(config: &crate::config::ScoringConfig) -> Self {
        Self {
            top_count: config.top_count,
            rounding: config.rounding,
        }
    }
}

/// Run the full pipeline over a session's answers.
pub fn build_profile(
    quiz: &Quiz,
    answers: &[QuizSessionAnswer],
    settings: &ScoringSettings,
) -> Profile {
    let aggregation = aggregate_with_stats(quiz, answers);
    let percentages = normalize(&aggregation.buckets, settings.rounding);
    let top = top_buckets(&percentages, settings.top_count);
    let insights = generate_insights(&top);

    Profile {
        raw: aggregation.buckets,
        percentages,
        top,
        insights,
        answers_scored: aggregation.scored,
        skipped_references: aggregation.skipped,
    }
}
