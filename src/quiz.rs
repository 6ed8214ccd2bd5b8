//! Quiz content loading and validation.
//!
//! Quiz definitions come from a TOML or JSON file, or from the built-in
//! sample quiz.

use crate::document::{read_document, DocumentError};
use crate::models::{PersonalityBuckets, QuizAnswer, QuizQuestion, SwipeDirection};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or validating quiz content.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("quiz has no questions")]
    NoQuestions,

    #[error("question '{0}' has no answers")]
    NoAnswers(String),

    #[error("duplicate question id '{0}'")]
    DuplicateQuestion(String),

    #[error("duplicate answer id '{answer_id}' in question '{question_id}'")]
    DuplicateAnswer {
        question_id: String,
        answer_id: String,
    },
}

/// A complete quiz definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// Load and validate a quiz from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, QuizError> {
        let quiz: Quiz = read_document(path)?;
        quiz.validate()?;
        debug!(
            "Loaded quiz '{}' with {} questions from {}",
            quiz.title,
            quiz.questions.len(),
            path.display()
        );
        Ok(quiz)
    }

    /// Check structural invariants: at least one question, every question
    /// has answers, and ids are unique where lookups depend on them.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        let mut question_ids = HashSet::new();
        for question in &self.questions {
            if !question_ids.insert(question.id.as_str()) {
                return Err(QuizError::DuplicateQuestion(question.id.clone()));
            }
            if question.answers.is_empty() {
                return Err(QuizError::NoAnswers(question.id.clone()));
            }

            let mut answer_ids = HashSet::new();
            for answer in &question.answers {
                if !answer_ids.insert(answer.id.as_str()) {
                    return Err(QuizError::DuplicateAnswer {
                        question_id: question.id.clone(),
                        answer_id: answer.id.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn question(&self, question_id: &str) -> Option<&QuizQuestion> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// The built-in sample quiz.
    pub fn sample() -> Self {
        fn answer(
            id: &str,
            text: &str,
            direction: SwipeDirection,
            weights: PersonalityBuckets,
        ) -> QuizAnswer {
            QuizAnswer {
                id: id.to_string(),
                text: text.to_string(),
                direction: Some(direction),
                weights,
            }
        }

        fn question(id: &str, text: &str, answers: Vec<QuizAnswer>) -> QuizQuestion {
            QuizQuestion {
                id: id.to_string(),
                text: text.to_string(),
                answers,
            }
        }

        use SwipeDirection::{Left, Right, Up};
        let w = PersonalityBuckets::new;

        Quiz {
            title: "How do you process a tough conversation?".to_string(),
            questions: vec![
                question(
                    "1",
                    "A friend cancels plans at the last minute. What goes through your head first?",
                    vec![
                        answer("1a", "I want the details of what happened", Left, w(0, 7, 0, 3)),
                        answer("1b", "I hope they're okay", Right, w(8, 0, 0, 0)),
                        answer("1c", "I wonder what this says about us", Up, w(0, 0, 6, 2)),
                    ],
                ),
                question(
                    "2",
                    "Your manager says \"we need to talk.\" You...",
                    vec![
                        answer(
                            "2a",
                            "Feel a knot forming and imagine the worst",
                            Left,
                            w(6, 0, 3, 1),
                        ),
                        answer("2b", "List what could be on the agenda", Right, w(0, 3, 0, 7)),
                    ],
                ),
                question(
                    "3",
                    "When someone shares a problem, you tend to...",
                    vec![
                        answer("3a", "Ask for the facts in order", Left, w(0, 8, 0, 2)),
                        answer("3b", "Read between the lines", Right, w(1, 0, 7, 2)),
                        answer("3c", "Sit with them in it", Up, w(7, 0, 2, 1)),
                        answer("3d", "Look for a pattern you've seen before", Up, w(0, 2, 6, 2)),
                        answer("3e", "Offer a plan", Up, w(0, 2, 1, 7)),
                    ],
                ),
                question(
                    "4",
                    "After a disagreement, what helps you move on?",
                    vec![
                        answer("4a", "A clear agreement on next steps", Left, w(0, 2, 1, 7)),
                        answer("4b", "Knowing we're still good", Right, w(6, 0, 3, 1)),
                    ],
                ),
            ],
        }
    }

    /// Render the quiz as pretty TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
