use thiserror::Error;

/// Failures a single panel operation can run into.
///
/// Poll ticks and submissions never surface these to the caller; they are
/// logged and turned into a static message on the matching region.
#[derive(Error, Debug)]
pub enum PanelError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PanelError>;
