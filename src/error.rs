use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for findversion operations
#[derive(Error, Debug)]
pub enum FindVersionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("FAILED: not a Git repo; must put a VERSION file in {}", root.display())]
    NotVersionControlled { root: PathBuf },

    #[error("{0}")]
    Query(String),

    #[error("cannot read {}", path.display())]
    OverrideRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results in findversion
pub type Result<T> = std::result::Result<T, FindVersionError>;

impl FindVersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        FindVersionError::Config(msg.into())
    }

    /// Create a history query error carrying the underlying message verbatim
    pub fn query(msg: impl Into<String>) -> Self {
        FindVersionError::Query(msg.into())
    }

    /// Create the "tree is not under version control" error for `root`
    pub fn not_version_controlled(root: impl Into<PathBuf>) -> Self {
        FindVersionError::NotVersionControlled { root: root.into() }
    }
}

impl From<git2::Error> for FindVersionError {
    fn from(err: git2::Error) -> Self {
        FindVersionError::Query(err.message().to_string())
    }
}
