//! Validated specialist reply
//!
//! Specialists answer with loosely-shaped JSON. [`SpecialistReply::from_value`]
//! is the schema check at the client boundary: anything that does not fit
//! becomes a [`ReplyError`] instead of travelling further downstream.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Keys accepted for the answer text, in lookup order
const ANSWER_KEYS: [&str; 3] = ["answer_text", "answer", "text"];

/// Why a raw reply failed the schema check
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReplyError {
    #[error("reply is not a JSON object")]
    NotAnObject,

    #[error("reply has no answer_text")]
    MissingAnswer,

    #[error("answer_text must be a string")]
    AnswerNotText,

    #[error("answer_text is empty")]
    EmptyAnswer,

    #[error("confidence must be a number in [0, 1], got {0}")]
    InvalidConfidence(String),

    #[error("metadata must be an object")]
    InvalidMetadata,
}

/// A well-formed specialist answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialistReply {
    pub answer_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl SpecialistReply {
    pub fn new(answer_text: impl Into<String>) -> Self {
        Self {
            answer_text: answer_text.into(),
            confidence: None,
            metadata: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Validate a raw JSON payload. Unknown keys are ignored.
    pub fn from_value(value: Value) -> Result<Self, ReplyError> {
        let Value::Object(mut map) = value else {
            return Err(ReplyError::NotAnObject);
        };

        let answer = ANSWER_KEYS
            .iter()
            .find_map(|key| map.remove(*key))
            .ok_or(ReplyError::MissingAnswer)?;
        let answer_text = match answer {
            Value::String(s) if s.trim().is_empty() => return Err(ReplyError::EmptyAnswer),
            Value::String(s) => s,
            _ => return Err(ReplyError::AnswerNotText),
        };

        let confidence = match map.remove("confidence") {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => match n.as_f64() {
                Some(c) if c.is_finite() && (0.0..=1.0).contains(&c) => Some(c),
                _ => return Err(ReplyError::InvalidConfidence(n.to_string())),
            },
            Some(other) => return Err(ReplyError::InvalidConfidence(other.to_string())),
        };

        let metadata = match map.remove("metadata") {
            None | Some(Value::Null) => None,
            Some(Value::Object(m)) => Some(m),
            Some(_) => return Err(ReplyError::InvalidMetadata),
        };

        Ok(Self {
            answer_text,
            confidence,
            metadata,
        })
    }
}
