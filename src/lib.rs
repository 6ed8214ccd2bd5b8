//! PersonaScore - swipe-quiz personality scoring.
//!
//! Recorded quiz answers are folded into four personality buckets
//! (feeling, sensing, intuition, thinking), normalized to percentages,
//! ranked, and mapped to short insight text.
//!
//! ```text
//! gesture ──classify──▶ session ──aggregate──▶ raw buckets
//!                                     │
//!                     normalize ◀─────┘
//!                         │
//!                   top_buckets ──▶ generate_insights
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod document;
pub mod models;
pub mod quiz;
pub mod recording;
pub mod report;
pub mod scanner;
pub mod scoring;
pub mod session;
pub mod swipe;

pub use document::DocumentError;
pub use models::{
    Bucket, PersonalityBuckets, Profile, QuizAnswer, QuizQuestion, QuizSessionAnswer,
};
pub use quiz::{Quiz, QuizError};
pub use scoring::{
    aggregate, build_profile, generate_insights, normalize, top_buckets, RoundingMode,
    ScoringSettings,
};
pub use session::{QuizSession, SessionError, SessionStep};
pub use swipe::{classify, Gesture, SWIPE_THRESHOLD};
