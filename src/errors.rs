use thiserror::Error;

/// Error type for improperly defined mixtures and convergence problems.
#[derive(Error, Debug)]
pub enum EosError {
    #[error("Invalid composition: {0}.")]
    InvalidComposition(String),
    #[error("Incompatible parameters: {0}")]
    IncompatibleParameters(String),
    #[error("Invalid state in {0}: {1} = {2}.")]
    InvalidState(String, String, f64),
    #[error("`{0}` encountered illegal values during the iteration.")]
    IterationFailed(String),
    #[error("`{0}` did not converge within the maximum number of iterations.")]
    NotConverged(String),
    #[error(transparent)]
    FileIO(#[from] std::io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// Convenience type for `Result<T, EosError>`.
pub type EosResult<T> = Result<T, EosError>;
