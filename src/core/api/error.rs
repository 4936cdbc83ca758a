use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure modes of the simulated API layer.
///
/// The two kinds are deliberately distinguishable: a transient fault is
/// worth retrying, a missing id is not: retrying the identical request
/// cannot succeed until the caller corrects the id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Randomly injected fault standing in for a network or server error.
    #[error("{message}")]
    Transient { message: String },

    /// The requested id does not exist in the fixture set.
    #[error("{entity} with ID {id} not found.")]
    NotFound { entity: &'static str, id: String },
}

impl ApiError {
    pub fn transient(message: impl Into<String>) -> Self {
        ApiError::Transient {
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Transient { .. })
    }
}
