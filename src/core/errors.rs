use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlashdeckError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    Http { status: u16, url: String },

    #[error("No Gemini API key configured")]
    MissingApiKey,

    #[error("FlashdeckError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for FlashdeckError {
    fn from(error: std::io::Error) -> Self {
        FlashdeckError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for FlashdeckError {
    fn from(error: reqwest::Error) -> Self {
        FlashdeckError::Reqwest(Box::new(error))
    }
}
