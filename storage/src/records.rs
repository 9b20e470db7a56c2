//! Row models for `requests_log` and `feedback`.
//!
//! Field names match the column names so records serialize straight into `JSONEachRow` rows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StorageError;

/// A classified request before the gateway assigns its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRequest {
    pub user_id: i64,
    pub chat_id: i64,
    pub message_id: i64,
    pub news_text: String,
    /// `REAL`, `FAKE` or `ERROR`.
    pub predicted_label: String,
    pub confidence: Option<f32>,
    pub model_version: String,
    pub processing_time_ms: u32,
}

/// One `requests_log` row. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub request_id: Uuid,
    pub user_id: i64,
    pub chat_id: i64,
    pub message_id: i64,
    pub news_text: String,
    pub predicted_label: String,
    /// 0.0 when the model has no probability interface or prediction failed.
    pub prediction_probability: f32,
    pub model_version: String,
    pub processing_time_ms: u32,
}

impl RequestRecord {
    pub fn new(request_id: Uuid, request: NewRequest) -> Self {
        Self {
            request_id,
            user_id: request.user_id,
            chat_id: request.chat_id,
            message_id: request.message_id,
            news_text: request.news_text,
            predicted_label: request.predicted_label,
            prediction_probability: request.confidence.unwrap_or(0.0),
            model_version: request.model_version,
            processing_time_ms: request.processing_time_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Correct,
    Incorrect,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Correct => "correct",
            Rating::Incorrect => "incorrect",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "correct" => Ok(Rating::Correct),
            "incorrect" => Ok(Rating::Incorrect),
            other => Err(StorageError::InvalidRating(other.to_string())),
        }
    }
}

/// One `feedback` row. Duplicates are allowed; `request_id` is not checked against `requests_log`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub request_id: Uuid,
    pub user_id: i64,
    pub user_rating: Rating,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_confidence_is_stored_as_zero() {
        let record = RequestRecord::new(
            Uuid::new_v4(),
            NewRequest {
                user_id: 1,
                chat_id: 2,
                message_id: 3,
                news_text: "text".to_string(),
                predicted_label: "REAL".to_string(),
                confidence: None,
                model_version: "LinearSVC (Быстрая)".to_string(),
                processing_time_ms: 12,
            },
        );
        assert_eq!(record.prediction_probability, 0.0);
    }

    #[test]
    fn test_feedback_row_serializes_rating_lowercase() {
        let id = Uuid::new_v4();
        let row = serde_json::to_value(FeedbackRecord {
            request_id: id,
            user_id: 7,
            user_rating: Rating::Incorrect,
        })
        .unwrap();
        assert_eq!(row["user_rating"], "incorrect");
        assert_eq!(row["request_id"], id.to_string());
    }

    #[test]
    fn test_rating_from_str() {
        assert_eq!("correct".parse::<Rating>().unwrap(), Rating::Correct);
        assert_eq!("incorrect".parse::<Rating>().unwrap(), Rating::Incorrect);
        assert!(matches!(
            "CORRECT".parse::<Rating>(),
            Err(StorageError::InvalidRating(r)) if r == "CORRECT"
        ));
    }
}
