use tracemap_scoring::ScoringError;

/// Request-level failures reported to the caller
///
/// The display strings are the exact `error` messages returned over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Authorization required")]
    Unauthorized,

    #[error("Valid Gmail ID required")]
    InvalidEmail,
}

impl From<ScoringError> for AnalysisError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::MissingAtSign => AnalysisError::InvalidEmail,
        }
    }
}
