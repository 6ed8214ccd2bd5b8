//! Recorded session files.
//!
//! A session file carries explicit answers, raw gestures to replay, or
//! both. Gestures are replayed through a [`QuizSession`] so they follow
//! the same classification rules as live input.

use crate::document::{read_document, DocumentError};
use crate::models::QuizSessionAnswer;
use crate::quiz::Quiz;
use crate::session::{QuizSession, SessionStep};
use crate::swipe::Gesture;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// A gesture with an optional capture time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordedGesture {
    pub velocity_x: f64,
    pub velocity_y: f64,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<DateTime<Utc>>,
}

impl RecordedGesture {
    pub fn gesture(&self) -> Gesture {
        Gesture::new(self.velocity_x, self.velocity_y, self.offset_x)
    }
}

/// Contents of a recorded session file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub answers: Vec<QuizSessionAnswer>,
    #[serde(default)]
    pub gestures: Vec<RecordedGesture>,
}

impl SessionFile {
    /// Load a session file, naming it after the file stem if unnamed.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let mut session: SessionFile = read_document(path)?;
        if session.name.is_none() {
            session.name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(String::from);
        }
        debug!(
            "Loaded session {} ({} answers, {} gestures)",
            path.display(),
            session.answers.len(),
            session.gestures.len()
        );
        Ok(session)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("session")
    }

    /// Explicit answers followed by answers produced by replaying gestures.
    ///
    /// Replay resumes after the explicit answers: questions they already
    /// answer are skipped. Gestures without a timestamp are stamped with `now`.
    pub fn resolve_answers(&self, quiz: &Quiz, now: DateTime<Utc>) -> Vec<QuizSessionAnswer> {
        if self.gestures.is_empty() {
            return self.answers.clone();
        }

        let mut session = QuizSession::resume(quiz, self.answers.clone());
        let mut ignored = 0usize;

        for (i, recorded) in self.gestures.iter().enumerate() {
            if session.is_complete() {
                warn!(
                    "Session '{}': {} gestures after the last question were ignored",
                    self.display_name(),
                    self.gestures.len() - i
                );
                break;
            }
            match session.apply_gesture(&recorded.gesture(), recorded.at.unwrap_or(now)) {
                SessionStep::Ignored => ignored += 1,
                SessionStep::Advanced { .. } | SessionStep::Completed(_) => {}
            }
        }

        if ignored > 0 {
            debug!(
                "Session '{}': {} gestures did not classify",
                self.display_name(),
                ignored
            );
        }
        if !session.is_complete() {
            debug!(
                "Session '{}' stopped at question {} of {}",
                self.display_name(),
                session.current_index() + 1,
                quiz.questions.len()
            );
        }

        session.into_answers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn gesture(vx: f64, vy: f64, ox: f64) -> RecordedGesture {
        RecordedGesture {
            velocity_x: vx,
            velocity_y: vy,
            offset_x: ox,
            at: None,
        }
    }

    #[test]
    fn test_load_toml_session_with_gestures() {
        let toml_content = r#"
[[gestures]]
velocity_x = 150.0
velocity_y = 0.0

[[gestures]]
velocity_x = 10.0
velocity_y = 10.0

[[gestures]]
velocity_x = -150.0
velocity_y = 0.0
at = "2024-05-01T10:00:00Z"
"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alex.toml");
        std::fs::write(&path, toml_content).unwrap();

        let session = SessionFile::load(&path).unwrap();
        assert_eq!(session.display_name(), "alex");
        assert_eq!(session.gestures.len(), 3);
        assert!(session.gestures[2].at.is_some());

        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let answers = session.resolve_answers(&Quiz::sample(), now);
        let ids: Vec<_> = answers.iter().map(|a| a.answer_id.as_str()).collect();
        assert_eq!(ids, vec!["1b", "2a"]);
        assert_eq!(answers[0].answered_at, now);
        assert_eq!(
            answers[1].answered_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_load_json_session_with_answers() {
        let json = r#"{
            "name": "Sam",
            "answers": [
                {"question_id": "1", "answer_id": "1b", "answered_at": "2024-05-01T10:00:00Z"}
            ]
        }"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        std::fs::write(&path, json).unwrap();

        let session = SessionFile::load(&path).unwrap();
        assert_eq!(session.display_name(), "Sam");
        let answers = session.resolve_answers(&Quiz::sample(), Utc::now());
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn test_extra_gestures_after_completion_are_dropped() {
        let session = SessionFile {
            name: None,
            answers: vec![],
            gestures: vec![gesture(150.0, 0.0, 0.0); 6],
        };
        let answers = session.resolve_answers(&Quiz::sample(), Utc::now());
        assert_eq!(answers.len(), 4);
    }

    #[test]
    fn test_explicit_answers_come_first() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let session = SessionFile {
            name: None,
            answers: vec![QuizSessionAnswer {
                question_id: "9".to_string(),
                answer_id: "9z".to_string(),
                answered_at: at,
            }],
            gestures: vec![gesture(150.0, 0.0, 0.0)],
        };
        let answers = session.resolve_answers(&Quiz::sample(), at);
        assert_eq!(answers[0].answer_id, "9z");
        assert_eq!(answers[1].answer_id, "1b");
    }

    #[test]
    fn test_replay_continues_after_explicit_answers() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let session = SessionFile {
            name: None,
            answers: vec![QuizSessionAnswer {
                question_id: "1".to_string(),
                answer_id: "1b".to_string(),
                answered_at: at,
            }],
            gestures: vec![
                gesture(-150.0, 0.0, 0.0),
                gesture(150.0, 0.0, 0.0),
                gesture(150.0, 0.0, 0.0),
            ],
        };

        let quiz = Quiz::sample();
        let answers = session.resolve_answers(&quiz, at);
        let ids: Vec<_> = answers.iter().map(|a| a.answer_id.as_str()).collect();
        assert_eq!(ids, vec!["1b", "2a", "3b", "4b"]);
        assert_eq!(
            crate::scoring::aggregate(&quiz, &answers),
            crate::models::PersonalityBuckets::new(21, 0, 13, 4)
        );
    }

    #[test]
    fn test_load_broken_session_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ \"answers\": [").unwrap();

        assert!(matches!(SessionFile::load(&path), Err(DocumentError::Json(_))));
    }
}
