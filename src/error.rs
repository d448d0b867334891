use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssemblyError>;

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("{}: {reason}", .path.display())]
    InvalidInput { path: PathBuf, reason: String },

    #[error("k-mer size must be at least 2, got {0}")]
    InvalidKmerSize(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report serialization error: {0}")]
    Report(#[from] serde_json::Error),

    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("plot error: {0}")]
    Plot(String),
}

impl AssemblyError {
    /// Checks that `path` names an existing regular file.
    pub fn check_input_file(path: &std::path::Path) -> Result<()> {
        if path.is_file() {
            return Ok(());
        }
        let reason = if path.is_dir() {
            "is a directory".to_string()
        } else {
            "does not exist".to_string()
        };
        Err(AssemblyError::InvalidInput { path: path.to_path_buf(), reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = AssemblyError::check_input_file(dir.path()).unwrap_err();
        assert!(err.to_string().ends_with("is a directory"));
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("reads.fq");
        let err = AssemblyError::check_input_file(&missing).unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidInput { .. }));
        assert!(err.to_string().ends_with("does not exist"));
    }
}
