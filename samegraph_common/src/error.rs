use thiserror::Error;

#[derive(Error, Debug)]
pub enum SameGraphError {
    #[error("failed to read property at '{path}': {reason}")]
    Introspection { path: String, reason: String },

    #[error("invalid comparison rule at '{path}': {message}")]
    Configuration { path: String, message: String },

    #[error("invalid pattern: {0}")]
    Pattern(String),
}

pub type Result<T> = std::result::Result<T, SameGraphError>;
