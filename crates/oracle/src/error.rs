use thiserror::Error;

pub type Result<T> = std::result::Result<T, OracleError>;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Oracle unavailable: {0}")]
    Unavailable(String),

    #[error("Oracle timed out after {0}s")]
    Timeout(u64),

    #[error("Oracle exited with {status}")]
    Failed { status: String },

    #[error("Invalid oracle config: {0}")]
    Config(String),
}
