pub type Result<T> = std::result::Result<T, TriestError>;

#[derive(Debug, thiserror::Error)]
pub enum TriestError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid edge: {0}")]
    InvalidEdge(String),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TriestError {
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        TriestError::InvalidParameter(msg.into())
    }

    pub fn invalid_edge<S: Into<String>>(msg: S) -> Self {
        TriestError::InvalidEdge(msg.into())
    }

    pub fn parse<S: Into<String>>(line: usize, msg: S) -> Self {
        TriestError::Parse {
            line,
            message: msg.into(),
        }
    }
}
