//! Quiz session state.
//!
//! A session walks the questions in order, recording one answer per
//! question. Buckets are not tracked while answering; they are computed
//! once over the full answer list when the last question is answered.

use crate::models::{PersonalityBuckets, QuizQuestion, QuizSessionAnswer};
use crate::quiz::Quiz;
use crate::scoring::aggregate;
use crate::swipe::{classify, Gesture, SWIPE_THRESHOLD};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

/// Errors raised by discrete answer selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("answer '{answer_id}' does not belong to question '{question_id}'")]
    UnknownAnswer {
        question_id: String,
        answer_id: String,
    },

    #[error("session is already complete")]
    AlreadyComplete,
}

/// Outcome of feeding one input to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    /// Nothing was recorded.
    Ignored,
    /// An answer was recorded and the session moved on.
    Advanced { next_index: usize },
    /// The last question was answered; raw bucket sums over all answers.
    Completed(PersonalityBuckets),
}

/// In-progress quiz state for one participant.
#[derive(Debug, Clone)]
pub struct QuizSession<'q> {
    quiz: &'q Quiz,
    answers: Vec<QuizSessionAnswer>,
    current: usize,
}

impl<'q> QuizSession<'q> {
    pub fn new(quiz: &'q Quiz) -> Self {
        Self {
            quiz,
            answers: Vec::new(),
            current: 0,
        }
    }

    /// Continue a session from previously recorded answers.
    ///
    /// Questions those answers already resolve are skipped, so later input
    /// lands on the first question still open.
    pub fn resume(quiz: &'q Quiz, answers: Vec<QuizSessionAnswer>) -> Self {
        let mut session = Self {
            quiz,
            answers,
            current: 0,
        };
        session.skip_answered();
        session
    }

    pub fn quiz(&self) -> &'q Quiz {
        self.quiz
    }

    /// The question awaiting an answer, or `None` once complete.
    pub fn current_question(&self) -> Option<&'q QuizQuestion> {
        self.quiz.questions.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.quiz.questions.len()
    }

    /// Recorded answers in insertion order.
    pub fn answers(&self) -> &[QuizSessionAnswer] {
        &self.answers
    }

    pub fn into_answers(self) -> Vec<QuizSessionAnswer> {
        self.answers
    }

    /// Classify a swipe against the current question and record the result.
    ///
    /// Unclassified gestures and gestures after completion are ignored.
    pub fn apply_gesture(&mut self, gesture: &Gesture, at: DateTime<Utc>) -> SessionStep {
        let Some(question) = self.current_question() else {
            debug!("Ignoring gesture after completion");
            return SessionStep::Ignored;
        };

        match classify(gesture, question, SWIPE_THRESHOLD) {
            Some(hit) => {
                debug!(
                    "Swipe {} on question '{}' selected '{}'",
                    hit.direction, question.id, hit.answer.id
                );
                self.record(&question.id, &hit.answer.id, at)
            }
            None => {
                debug!(
                    "Gesture ({:.0}, {:.0}, {:.0}) below threshold on question '{}'",
                    gesture.velocity_x, gesture.velocity_y, gesture.offset_x, question.id
                );
                SessionStep::Ignored
            }
        }
    }

    /// Record a discrete choice for the current question.
    pub fn choose(
        &mut self,
        answer_id: &str,
        at: DateTime<Utc>,
    ) -> Result<SessionStep, SessionError> {
        let question = self
            .current_question()
            .ok_or(SessionError::AlreadyComplete)?;

        if question.answer(answer_id).is_none() {
            return Err(SessionError::UnknownAnswer {
                question_id: question.id.clone(),
                answer_id: answer_id.to_string(),
            });
        }

        Ok(self.record(&question.id, answer_id, at))
    }

    /// Discard all answers and start again at the first question.
    pub fn retake(&mut self) {
        self.answers.clear();
        self.current = 0;
    }

    fn record(&mut self, question_id: &str, answer_id: &str, at: DateTime<Utc>) -> SessionStep {
        self.answers.push(QuizSessionAnswer {
            question_id: question_id.to_string(),
            answer_id: answer_id.to_string(),
            answered_at: at,
        });
        self.current += 1;
        self.skip_answered();

        if self.is_complete() {
            SessionStep::Completed(aggregate(self.quiz, &self.answers))
        } else {
            SessionStep::Advanced {
                next_index: self.current,
            }
        }
    }

    fn skip_answered(&mut self) {
        while let Some(question) = self.current_question() {
            let answered = self.answers.iter().any(|a| {
                a.question_id == question.id && question.answer(&a.answer_id).is_some()
            });
            if !answered {
                break;
            }
            self.current += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn right() -> Gesture {
        Gesture::new(150.0, 0.0, 0.0)
    }

    #[test]
    fn test_swipes_advance_and_complete() {
        let quiz = Quiz::sample();
        let mut session = QuizSession::new(&quiz);
        let now = Utc::now();

        assert_eq!(
            session.apply_gesture(&right(), now),
            SessionStep::Advanced { next_index: 1 }
        );
        // 2a is the left answer of question 2
        assert_eq!(
            session.apply_gesture(&Gesture::new(-150.0, 0.0, 0.0), now),
            SessionStep::Advanced { next_index: 2 }
        );
        assert_eq!(
            session.apply_gesture(&right(), now),
            SessionStep::Advanced { next_index: 3 }
        );
        assert_eq!(
            session.apply_gesture(&right(), now),
            SessionStep::Completed(PersonalityBuckets::new(21, 0, 13, 4))
        );

        assert!(session.is_complete());
        let ids: Vec<_> = session
            .answers()
            .iter()
            .map(|a| a.answer_id.as_str())
            .collect();
        assert_eq!(ids, vec!["1b", "2a", "3b", "4b"]);
    }

    #[test]
    fn test_ignored_gesture_keeps_question() {
        let quiz = Quiz::sample();
        let mut session = QuizSession::new(&quiz);

        assert_eq!(
            session.apply_gesture(&Gesture::new(10.0, 10.0, 0.0), Utc::now()),
            SessionStep::Ignored
        );
        assert_eq!(session.current_index(), 0);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_up_swipe_on_question_three() {
        let quiz = Quiz::sample();
        let mut session = QuizSession::new(&quiz);
        let now = Utc::now();
        session.choose("1a", now).unwrap();
        session.choose("2b", now).unwrap();

        session.apply_gesture(&Gesture::new(0.0, -120.0, 70.0), now);
        assert_eq!(session.answers()[2].answer_id, "3e");
    }

    #[test]
    fn test_gesture_after_completion_is_ignored() {
        let quiz = Quiz::sample();
        let mut session = QuizSession::new(&quiz);
        let now = Utc::now();
        for _ in 0..4 {
            session.apply_gesture(&right(), now);
        }

        assert_eq!(session.apply_gesture(&right(), now), SessionStep::Ignored);
        assert_eq!(session.answers().len(), 4);
    }

    #[test]
    fn test_choose_validates_answer() {
        let quiz = Quiz::sample();
        let mut session = QuizSession::new(&quiz);

        let err = session.choose("2a", Utc::now()).unwrap_err();
        assert_eq!(
            err,
            SessionError::UnknownAnswer {
                question_id: "1".to_string(),
                answer_id: "2a".to_string()
            }
        );
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_choose_after_completion_fails() {
        let quiz = Quiz::sample();
        let mut session = QuizSession::new(&quiz);
        let now = Utc::now();
        for id in ["1a", "2a", "3a", "4a"] {
            session.choose(id, now).unwrap();
        }
        assert_eq!(session.choose("1a", now), Err(SessionError::AlreadyComplete));
    }

    #[test]
    fn test_resume_skips_answered_questions() {
        let quiz = Quiz::sample();
        let at = Utc::now();
        let recorded = |q: &str, a: &str| QuizSessionAnswer {
            question_id: q.to_string(),
            answer_id: a.to_string(),
            answered_at: at,
        };

        let answers = vec![recorded("1", "1b"), recorded("3", "3b")];
        let mut session = QuizSession::resume(&quiz, answers);
        assert_eq!(session.current_index(), 1);

        // answering question 2 jumps over the already answered question 3
        assert_eq!(
            session.choose("2a", at),
            Ok(SessionStep::Advanced { next_index: 3 })
        );
        assert_eq!(
            session.choose("4b", at),
            Ok(SessionStep::Completed(PersonalityBuckets::new(21, 0, 13, 4)))
        );
    }

    #[test]
    fn test_resume_ignores_unresolved_answers() {
        let quiz = Quiz::sample();
        let dangling = QuizSessionAnswer {
            question_id: "1".to_string(),
            answer_id: "nope".to_string(),
            answered_at: Utc::now(),
        };

        let session = QuizSession::resume(&quiz, vec![dangling]);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn test_retake_resets_state() {
        let quiz = Quiz::sample();
        let mut session = QuizSession::new(&quiz);
        let now = Utc::now();
        session.choose("1a", now).unwrap();
        session.choose("2a", now).unwrap();

        session.retake();

        assert_eq!(session.current_index(), 0);
        assert!(session.answers().is_empty());
        assert_eq!(session.current_question().map(|q| q.id.as_str()), Some("1"));
    }
}
