use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Failed to parse trade records: {0}")]
    Parse(#[from] serde_json::Error),
}
