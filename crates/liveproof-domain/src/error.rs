//! Domain validation errors.

use thiserror::Error;

/// Maximum question length accepted by the verification service
pub const MAX_QUESTION_CHARS: usize = 2000;

/// Maximum topic length accepted by the verification service
pub const MAX_TOPIC_CHARS: usize = 200;

/// Reasons a verify request is rejected before it reaches the transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    /// Question is empty after trimming
    #[error("Question must not be empty")]
    EmptyQuestion,

    /// Question exceeds the service limit
    #[error("Question is {actual} characters (max {MAX_QUESTION_CHARS})")]
    QuestionTooLong {
        /// Length after trimming
        actual: usize,
    },

    /// Topic exceeds the service limit
    #[error("Topic is {actual} characters (max {MAX_TOPIC_CHARS})")]
    TopicTooLong {
        /// Length after trimming
        actual: usize,
    },
}
