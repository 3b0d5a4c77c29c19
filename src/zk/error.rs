use crate::rewrite::DocumentFailure;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZkError {
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    MissingArguments(String),

    #[error(".zk-root cannot be found in {} or any parent directory", .start.display())]
    RootNotFound { start: PathBuf },

    #[error("File {} does not exist", .0.display())]
    SourceNotFound(PathBuf),

    #[error("{} is not inside the zettelkasten rooted at {}", .path.display(), .root.display())]
    PathOutsideRoot { path: PathBuf, root: PathBuf },

    #[error("Destination {} already exists", .0.display())]
    DestinationExists(PathBuf),

    #[error("Destination directory {} does not exist", .0.display())]
    DestinationParentMissing(PathBuf),

    #[error("Cannot move {} into itself", .0.display())]
    MoveIntoSelf(PathBuf),

    #[error("{} document(s) could not be rewritten; nothing was moved", .failures.len())]
    RewriteIncomplete { failures: Vec<DocumentFailure> },

    #[error("Error moving item in file tree: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error starting HTTP server: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ZkError {
    /// Process exit code for this error. Usage problems exit with 2,
    /// everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ZkError::Usage(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ZkError>;
