//! Swipe gesture classification.
//!
//! A drag gesture is reduced to a direction and the answer tagged with it.
//! Classification is pure; the session decides what to do with the result.

use crate::models::{QuizAnswer, QuizQuestion, SwipeDirection};
use serde::{Deserialize, Serialize};

/// Minimum velocity for a gesture to count as a swipe.
pub const SWIPE_THRESHOLD: f64 = 80.0;

/// Horizontal offset band that selects the centre "up" answer.
pub const UP_OFFSET_BAND: f64 = 50.0;

/// A drag gesture as reported by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gesture {
    pub velocity_x: f64,
    pub velocity_y: f64,
    pub offset_x: f64,
}

impl Gesture {
    pub fn new(velocity_x: f64, velocity_y: f64, offset_x: f64) -> Self {
        Self {
            velocity_x,
            velocity_y,
            offset_x,
        }
    }
}

/// A gesture that resolved to an answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeClassification<'q> {
    pub direction: SwipeDirection,
    pub answer: &'q QuizAnswer,
}

/// Classify a gesture against a question's tagged answers.
///
/// Horizontal swipes win when they are fast enough and dominate the
/// vertical component. Otherwise a fast upward swipe picks among the
/// `up` answers by horizontal offset: centre band is the first, left of
/// it the second, right of it the third, falling back to the first.
/// Anything else returns `None`.
pub fn classify<'q>(
    gesture: &Gesture,
    question: &'q QuizQuestion,
    threshold: f64,
) -> Option<SwipeClassification<'q>> {
    let vx = gesture.velocity_x;
    let vy = gesture.velocity_y;

    if vx.abs() > threshold && vx.abs() > vy.abs() {
        let direction = if vx > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        };
        let answer = question
            .answers
            .iter()
            .find(|a| a.direction == Some(direction))?;
        return Some(SwipeClassification { direction, answer });
    }

    if vy < -threshold {
        let ups = question.answers_tagged(SwipeDirection::Up);
        let index = up_index(gesture.offset_x);
        let answer = ups.get(index).or_else(|| ups.first()).copied()?;
        return Some(SwipeClassification {
            direction: SwipeDirection::Up,
            answer,
        });
    }

    None
}

fn up_index(offset_x: f64) -> usize {
    if offset_x < -UP_OFFSET_BAND {
        1
    } else if offset_x > UP_OFFSET_BAND {
        2
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersonalityBuckets;

    fn tagged(id: &str, direction: Option<SwipeDirection>) -> QuizAnswer {
        QuizAnswer {
            id: id.to_string(),
            text: id.to_string(),
            direction,
            weights: PersonalityBuckets::default(),
        }
    }

    fn question(answers: Vec<QuizAnswer>) -> QuizQuestion {
        QuizQuestion {
            id: "q".to_string(),
            text: "q".to_string(),
            answers,
        }
    }

    fn left_right() -> QuizQuestion {
        question(vec![
            tagged("l", Some(SwipeDirection::Left)),
            tagged("r", Some(SwipeDirection::Right)),
        ])
    }

    fn three_ups() -> QuizQuestion {
        question(vec![
            tagged("l", Some(SwipeDirection::Left)),
            tagged("up0", Some(SwipeDirection::Up)),
            tagged("up1", Some(SwipeDirection::Up)),
            tagged("up2", Some(SwipeDirection::Up)),
        ])
    }

    #[test]
    fn test_fast_right_swipe() {
        let q = left_right();
        let hit = classify(&Gesture::new(150.0, 0.0, 0.0), &q, SWIPE_THRESHOLD).unwrap();
        assert_eq!(hit.direction, SwipeDirection::Right);
        assert_eq!(hit.answer.id, "r");
    }

    #[test]
    fn test_fast_left_swipe() {
        let q = left_right();
        let hit = classify(&Gesture::new(-150.0, 20.0, 0.0), &q, SWIPE_THRESHOLD).unwrap();
        assert_eq!(hit.direction, SwipeDirection::Left);
        assert_eq!(hit.answer.id, "l");
    }

    #[test]
    fn test_up_swipe_left_of_band_picks_second() {
        let q = three_ups();
        let hit = classify(&Gesture::new(10.0, -120.0, -60.0), &q, SWIPE_THRESHOLD).unwrap();
        assert_eq!(hit.direction, SwipeDirection::Up);
        assert_eq!(hit.answer.id, "up1");
    }

    #[test]
    fn test_up_swipe_offsets() {
        let q = three_ups();
        let pick = |offset: f64| {
            classify(&Gesture::new(0.0, -120.0, offset), &q, SWIPE_THRESHOLD)
                .map(|c| c.answer.id.clone())
        };
        assert_eq!(pick(0.0).as_deref(), Some("up0"));
        assert_eq!(pick(50.0).as_deref(), Some("up0"));
        assert_eq!(pick(-50.0).as_deref(), Some("up0"));
        assert_eq!(pick(51.0).as_deref(), Some("up2"));
    }

    #[test]
    fn test_up_swipe_falls_back_to_first() {
        let q = question(vec![tagged("only", Some(SwipeDirection::Up))]);
        let hit = classify(&Gesture::new(0.0, -120.0, 90.0), &q, SWIPE_THRESHOLD).unwrap();
        assert_eq!(hit.answer.id, "only");

        let q = question(vec![
            tagged("a", Some(SwipeDirection::Up)),
            tagged("b", Some(SwipeDirection::Up)),
        ]);
        let hit = classify(&Gesture::new(0.0, -120.0, 90.0), &q, SWIPE_THRESHOLD).unwrap();
        assert_eq!(hit.answer.id, "a");
    }

    #[test]
    fn test_slow_gesture_is_ignored() {
        let q = three_ups();
        assert!(classify(&Gesture::new(10.0, 10.0, 0.0), &q, SWIPE_THRESHOLD).is_none());
    }

    #[test]
    fn test_downward_swipe_is_ignored() {
        let q = three_ups();
        assert!(classify(&Gesture::new(0.0, 200.0, 0.0), &q, SWIPE_THRESHOLD).is_none());
    }

    #[test]
    fn test_vertical_dominance_falls_through_to_up() {
        // fast horizontally but vertical is larger
        let q = three_ups();
        let hit = classify(&Gesture::new(100.0, -150.0, 0.0), &q, SWIPE_THRESHOLD).unwrap();
        assert_eq!(hit.direction, SwipeDirection::Up);
    }

    #[test]
    fn test_missing_direction_tag_is_ignored() {
        let q = three_ups();
        assert!(classify(&Gesture::new(150.0, 0.0, 0.0), &q, SWIPE_THRESHOLD).is_none());
        let up = Gesture::new(0.0, -150.0, 0.0);
        assert!(classify(&up, &left_right(), SWIPE_THRESHOLD).is_none());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let q = left_right();
        assert!(classify(&Gesture::new(80.0, 0.0, 0.0), &q, SWIPE_THRESHOLD).is_none());
        assert!(classify(&Gesture::new(80.1, 0.0, 0.0), &q, SWIPE_THRESHOLD).is_some());
    }
}
