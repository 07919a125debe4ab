/// workprompt error types
#[derive(Debug, thiserror::Error)]
pub enum WorkPromptError {
    /// Role catalog could not be loaded or failed validation
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Role key outside the fixed role set
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Clipboard write failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WorkPromptError {
    /// Create catalog error
    pub fn catalog<S: Into<String>>(msg: S) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create unknown role error
    pub fn unknown_role<S: Into<String>>(key: S) -> Self {
        Self::UnknownRole(key.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create clipboard error
    pub fn clipboard<S: Into<String>>(msg: S) -> Self {
        Self::Clipboard(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}

// Process exit code conversion (for the CLI)
impl WorkPromptError {
    /// Get process exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) => 2,
            Self::UnknownRole(_) => 2,
            Self::Config(_) => 78,
            Self::Catalog(_) => 65,
            Self::Json(_) => 65,
            Self::Io(_) => 74,
            Self::Clipboard(_) => 1,
            Self::Other(_) => 1,
        }
    }
}
