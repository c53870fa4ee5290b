use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Unexpected status code: {0}")]
    UnexpectedStatusCode(u16),

    #[error("API error {code}: {message} {data}")]
    Api {
        code: i64,
        message: String,
        data: String,
    },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Invalid API version: {0}")]
    InvalidVersion(String),

    #[error("Not logged in")]
    NotLoggedIn,
}
