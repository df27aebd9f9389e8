use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),

    #[error("Calculation error: arithmetic overflow in metric '{0}'")]
    Overflow(String),

    #[error("Invalid analytics configuration: {0}")]
    Config(#[from] configuration::error::ConfigError),
}
