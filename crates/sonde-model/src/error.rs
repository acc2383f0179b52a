use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("variable not found in profile: {name}")]
    NotFound { name: String },
    #[error("variable {name} is stored as {actual}, not {requested}")]
    WrongKind {
        name: String,
        actual: &'static str,
        requested: &'static str,
    },
    #[error("unknown profile check: {key}")]
    UnknownCheck { key: String },
    #[error("invalid options: {message}")]
    InvalidOptions { message: String },
}

impl ProfileError {
    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;
