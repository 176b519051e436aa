use crate::perspective::PerspectiveError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Perspective(#[from] PerspectiveError),

    #[error("Invalid layout config: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid config value at `{path}`: {message}")]
    InvalidConfigValue { path: String, message: String },
}
