/// Domain-specific error types for the payoff and scoring engine.
/// Pure calculators never fail on well-formed input; these variants cover
/// input validation at the edges and process setup.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("unsupported structure: {0} strikes")]
    InvalidStructure(usize),

    #[error("invalid strikes: {0}")]
    InvalidStrikes(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("config error: {0}")]
    Config(String),
}

impl AppError {
    /// True for errors caused by the caller's input rather than the process.
    #[inline]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidStructure(_)
                | AppError::InvalidStrikes(_)
                | AppError::InvalidInput(_)
                | AppError::Parse(_)
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Parse(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
