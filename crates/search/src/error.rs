use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Empty query")]
    EmptyQuery,

    #[error("Command '{command}' failed: {reason}")]
    Execution { command: String, reason: String },

    #[error("File listing failed: {0}")]
    Listing(String),

    #[error("Invalid search config: {0}")]
    Config(String),
}
