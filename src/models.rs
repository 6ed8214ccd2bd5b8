//! Data models for the personality scorer.
//!
//! This module contains the core data structures shared by the quiz
//! content loader, the session, the scoring pipeline and the reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four personality-processing categories used as a scoring axis.
///
/// Declaration order is the canonical order and doubles as the tie-break
/// order when ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Feeling,
    Sensing,
    Intuition,
    Thinking,
}

impl Bucket {
    /// All buckets in canonical order.
    pub const ALL: [Bucket; 4] = [
        Bucket::Feeling,
        Bucket::Sensing,
        Bucket::Intuition,
        Bucket::Thinking,
    ];

    /// Returns the lowercase key used in files and JSON output.
    pub fn key(&self) -> &'static str {
        match self {
            Bucket::Feeling => "feeling",
            Bucket::Sensing => "sensing",
            Bucket::Intuition => "intuition",
            Bucket::Thinking => "thinking",
        }
    }

    /// Returns an emoji representation of the bucket.
    pub fn emoji(&self) -> &'static str {
        match self {
            Bucket::Feeling => "💗",
            Bucket::Sensing => "👁️",
            Bucket::Intuition => "✨",
            Bucket::Thinking => "🧠",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Feeling => write!(f, "Feeling"),
            Bucket::Sensing => write!(f, "Sensing"),
            Bucket::Intuition => write!(f, "Intuition"),
            Bucket::Thinking => write!(f, "Thinking"),
        }
    }
}

/// Four bucket scores.
///
/// Used both as a raw accumulator (unbounded sums of answer weights) and
/// as a normalized percentage map. Missing fields deserialize as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalityBuckets {
    pub feeling: u32,
    pub sensing: u32,
    pub intuition: u32,
    pub thinking: u32,
}

impl PersonalityBuckets {
    /// Exact quartile split, used when there is nothing to normalize.
    pub const QUARTILES: PersonalityBuckets = PersonalityBuckets {
        feeling: 25,
        sensing: 25,
        intuition: 25,
        thinking: 25,
    };

    pub fn new(feeling: u32, sensing: u32, intuition: u32, thinking: u32) -> Self {
        Self {
            feeling,
            sensing,
            intuition,
            thinking,
        }
    }

    pub fn get(&self, bucket: Bucket) -> u32 {
        match bucket {
            Bucket::Feeling => self.feeling,
            Bucket::Sensing => self.sensing,
            Bucket::Intuition => self.intuition,
            Bucket::Thinking => self.thinking,
        }
    }

    pub fn set(&mut self, bucket: Bucket, value: u32) {
        match bucket {
            Bucket::Feeling => self.feeling = value,
            Bucket::Sensing => self.sensing = value,
            Bucket::Intuition => self.intuition = value,
            Bucket::Thinking => self.thinking = value,
        }
    }

    /// Adds another set of weights into this accumulator.
    ///
    /// Saturates instead of wrapping so a sum can never appear to shrink.
    pub fn accumulate(&mut self, weights: &PersonalityBuckets) {
        for bucket in Bucket::ALL {
            let sum = self.get(bucket).saturating_add(weights.get(bucket));
            self.set(bucket, sum);
        }
    }

    /// Sum of all four values.
    pub fn total(&self) -> u64 {
        Bucket::ALL.iter().map(|b| u64::from(self.get(*b))).sum()
    }

    /// Bucket/value pairs in canonical order.
    pub fn entries(&self) -> [(Bucket, u32); 4] {
        Bucket::ALL.map(|b| (b, self.get(b)))
    }
}

/// Discrete direction tag an answer can be reached by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwipeDirection::Left => write!(f, "left"),
            SwipeDirection::Right => write!(f, "right"),
            SwipeDirection::Up => write!(f, "up"),
        }
    }
}

/// A selectable option of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub id: String,
    pub text: String,
    /// Swipe direction that selects this answer, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<SwipeDirection>,
    /// Weight contributed to each bucket when chosen.
    #[serde(default)]
    pub weights: PersonalityBuckets,
}

/// A quiz question with its ordered answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub answers: Vec<QuizAnswer>,
}

impl QuizQuestion {
    pub fn answer(&self, answer_id: &str) -> Option<&QuizAnswer> {
        self.answers.iter().find(|a| a.id == answer_id)
    }

    /// Answers tagged with `direction`, in definition order.
    pub fn answers_tagged(&self, direction: SwipeDirection) -> Vec<&QuizAnswer> {
        self.answers
            .iter()
            .filter(|a| a.direction == Some(direction))
            .collect()
    }
}

/// A record of which answer was chosen for which question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSessionAnswer {
    pub question_id: String,
    pub answer_id: String,
    pub answered_at: DateTime<Utc>,
}

/// One ranked entry of a top-K selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedBucket {
    pub bucket: Bucket,
    pub value: u32,
}

/// The assembled scoring result for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Raw bucket sums.
    pub raw: PersonalityBuckets,
    /// Normalized percentages.
    pub percentages: PersonalityBuckets,
    /// Highest buckets by percentage, descending.
    pub top: Vec<RankedBucket>,
    /// Canned insight strings for the top buckets.
    pub insights: Vec<String>,
    /// Number of answers that resolved and were scored.
    pub answers_scored: usize,
    /// Number of answers whose question or answer id did not resolve.
    pub skipped_references: usize,
}

/// Metadata about a profile report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Title of the quiz the session answered.
    pub quiz_title: String,
    /// Name of the scored session.
    pub session_name: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Rounding mode used for percentages.
    pub rounding: String,
}

/// A complete profile report for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub profile: Profile,
    /// Recorded answers in insertion order; empty when omitted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<QuizSessionAnswer>,
}

/// A session file that could not be scored in batch mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFailure {
    pub path: String,
    pub error: String,
}

/// Reports for every session scored from a directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub quiz_title: String,
    pub generated_at: DateTime<Utc>,
    pub rounding: String,
    pub sessions: Vec<Report>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<SessionFailure>,
}

impl BatchReport {
    /// How many sessions have each bucket as their dominant one.
    pub fn dominant_counts(&self) -> [(Bucket, usize); 4] {
        Bucket::ALL.map(|bucket| {
            let count = self
                .sessions
                .iter()
                .filter(|r| r.profile.top.first().map(|t| t.bucket) == Some(bucket))
                .count();
            (bucket, count)
        })
    }
}
