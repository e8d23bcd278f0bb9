//! API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The server rejected the request; the message is shown to the user
    /// verbatim (invalid credentials, validation failures).
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
