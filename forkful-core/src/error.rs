use thiserror::Error;

/// Errors from validating a candidate recipe object pulled out of a
/// completion-service reply.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Candidate is not a JSON object")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),
}
