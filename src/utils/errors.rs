use thiserror::Error;

#[derive(Error, Debug)]
pub enum JstyleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Build error: {0}")]
    Build(String),
}

impl JstyleError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a build error
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build(message.into())
    }

    /// True for errors caused by user-supplied configuration rather than
    /// the build itself. The CLI reports these with usage hints.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, JstyleError>;

impl From<serde_json::Error> for JstyleError {
    fn from(err: serde_json::Error) -> Self {
        JstyleError::config(format!("invalid JSON: {}", err))
    }
}

impl From<anyhow::Error> for JstyleError {
    fn from(err: anyhow::Error) -> Self {
        JstyleError::build(err.to_string())
    }
}
