//! Completed submissions
//!
//! A [`ResponseRecord`] is built once at submission time and never mutated.
//! On the wire it serializes to the remote protocol's JSON shape, where the
//! answers travel under the `responses` key.

use chrono::Local;
use serde::Serialize;
use std::fmt;

/// The timestamp layout used everywhere: local table rows and the remote
/// payload alike.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Error constructing a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// One answer per question, in the same order; anything else is a
    /// caller bug worth surfacing.
    LengthMismatch { questions: usize, answers: usize },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::LengthMismatch { questions, answers } => write!(
                f,
                "answer count {} does not match question count {}",
                answers, questions
            ),
        }
    }
}

impl std::error::Error for RecordError {}

/// One completed, timestamped set of answers aligned to the question list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseRecord {
    pub questions: Vec<String>,
    #[serde(rename = "responses")]
    pub answers: Vec<String>,
    pub timestamp: String,
}

impl ResponseRecord {
    /// Build a record stamped with the current local time.
    pub fn new(questions: Vec<String>, answers: Vec<String>) -> Result<Self, RecordError> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::with_timestamp(questions, answers, timestamp)
    }

    /// Build a record with an explicit timestamp (tests, replays).
    pub fn with_timestamp(
        questions: Vec<String>,
        answers: Vec<String>,
        timestamp: String,
    ) -> Result<Self, RecordError> {
        if questions.len() != answers.len() {
            return Err(RecordError::LengthMismatch {
                questions: questions.len(),
                answers: answers.len(),
            });
        }
        Ok(ResponseRecord {
            questions,
            answers,
            timestamp,
        })
    }
}
