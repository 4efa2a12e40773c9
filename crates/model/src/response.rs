use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

/// Successful reply of `POST /api/quiz`.
///
/// The server emits the questions exactly as the completion API produced
/// them, so it instantiates this with raw JSON values. The client decodes the
/// same payload with typed [`Question`](crate::Question)s.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizResponse<Q> {
    #[serde(default = "Vec::new")]
    pub questions: Vec<Q>,
}

/// Body of every non-2xx reply.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorResponse {
    /// Short, fixed summary of the failed operation.
    pub error: String,
    /// Descriptive message of the underlying cause.
    pub message: String,
}

/// Body of `GET /`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusMessage {
    pub message: String,
}

/// Body of `GET /api/health`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct HealthStatus {
    pub status: String,
    /// ISO-8601 timestamp of when the check was answered.
    pub timestamp: String,
}
