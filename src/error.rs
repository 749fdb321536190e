use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("gateway error: {0}")]
    Gateway(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
