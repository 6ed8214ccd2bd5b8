//! Canned insight text for a profile's dominant buckets.

use crate::models::{Bucket, RankedBucket};

fn primary_insights(bucket: Bucket) -> &'static [&'static str] {
    match bucket {
        Bucket::Feeling => &[
            "You tune into how people feel before you weigh what they said.",
            "Conflict lands emotionally for you first; naming the feeling helps you respond.",
        ],
        Bucket::Sensing => &[
            "You anchor conversations in concrete details and what actually happened.",
            "Vague messages unsettle you; ask for specifics before drawing conclusions.",
        ],
        Bucket::Intuition => &[
            "You read subtext and patterns quickly, sometimes before they are spoken.",
            "Check your read of the situation out loud so others can confirm it.",
        ],
        Bucket::Thinking => &[
            "You reach for logic and structure when a conversation gets hard.",
            "Leading with the plan can feel cold; a sentence of acknowledgment goes far.",
        ],
    }
}

fn combination_insight(primary: Bucket, secondary: Bucket) -> Option<&'static str> {
    match (primary, secondary) {
        (Bucket::Feeling, Bucket::Intuition) => Some(
            "Feeling backed by intuition makes you quick to sense hurt. \
             Pause before assuming what someone meant.",
        ),
        _ => None,
    }
}

/// Map the top buckets to insight strings.
///
/// The dominant bucket picks the base list; one dominant/runner-up pair
/// adds an extra line.
pub fn generate_insights(top: &[RankedBucket]) -> Vec<String> {
    let Some(primary) = top.first() else {
        return Vec::new();
    };

    let mut insights: Vec<String> = primary_insights(primary.bucket)
        .iter()
        .map(|s| s.to_string())
        .collect();

    if let Some(secondary) = top.get(1) {
        if let Some(extra) = combination_insight(primary.bucket, secondary.bucket) {
            insights.push(extra.to_string());
        }
    }

    insights
}
