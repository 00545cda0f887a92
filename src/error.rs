use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl From<reqwest::Error> for ProbeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProbeError::InvalidResponse(e.to_string())
        } else {
            ProbeError::Network(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
