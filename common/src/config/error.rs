use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("API User not set")]
    MissingUsername,

    #[error("API Password not set")]
    MissingPassword,

    #[error("API URL is not set")]
    MissingApi,
}
