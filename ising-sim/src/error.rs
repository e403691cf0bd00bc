use thiserror::Error;
use validator::ValidationErrors;

/// Failure of a lattice construction or a Metropolis run.
///
/// Every variant is total: no partially evolved grid is ever handed back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Rejected before any mutation or random draw.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The cancellation flag was raised mid-run.
    #[error("interrupted after {accepted} of {target} accepted flips")]
    Interrupted { accepted: u64, target: u64 },

    /// The optional `max_attempts` valve was hit before the target was reached.
    #[error("gave up after {limit} attempts with {accepted} of {target} accepted flips")]
    AttemptLimit {
        limit: u64,
        accepted: u64,
        target: u64,
    },
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl From<ValidationErrors> for SimError {
    fn from(e: ValidationErrors) -> Self {
        Self::InvalidArgument(format!("{e}"))
    }
}
