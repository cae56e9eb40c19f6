//! XDG-compliant cache directory resolution for drift-core.
//!
//! This service holds no persistent state — the only on-disk artifact is
//! the cached encoder model (ONNX weights + tokenizer files, when built
//! with `neural-embeddings`).

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors from path resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(drift::paths::no_home),
        help("Set the HOME environment variable, or set DRIFT_MODEL_CACHE_DIR explicitly.")
    )]
    NoHome,

    #[error("failed to create directory: {path}")]
    #[diagnostic(
        code(drift::paths::create_dir),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type PathResult<T> = std::result::Result<T, PathError>;

/// Cache directory layout for drift-core.
#[derive(Debug, Clone)]
pub struct DriftPaths {
    /// `$XDG_CACHE_HOME/drift-core/` (or `DRIFT_MODEL_CACHE_DIR` if set).
    pub cache_dir: PathBuf,
}

impl DriftPaths {
    /// Resolve cache directories from environment variables with standard
    /// XDG fallbacks.
    pub fn resolve() -> PathResult<Self> {
        if let Ok(dir) = std::env::var("DRIFT_MODEL_CACHE_DIR") {
            return Ok(Self {
                cache_dir: PathBuf::from(dir),
            });
        }

        let home = dirs::home_dir().ok_or(PathError::NoHome)?;

        let cache_dir = std::env::var("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".cache"))
            .join("drift-core");

        Ok(Self { cache_dir })
    }

    /// Directory holding cached encoder model artifacts.
    pub fn models_dir(&self) -> PathBuf {
        self.cache_dir.join("models")
    }

    /// Create all base directories. Idempotent.
    pub fn ensure_dirs(&self) -> PathResult<()> {
        for dir in [&self.cache_dir, &self.models_dir()] {
            std::fs::create_dir_all(dir).map_err(|e| PathError::CreateDir {
                path: dir.display().to_string(),
                source: e,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_cache_dir_env_var_wins() {
        // SAFETY: test runs single-threaded within this process's env mutation scope.
        unsafe {
            std::env::set_var("DRIFT_MODEL_CACHE_DIR", "/tmp/drift-core-test-cache");
        }
        let paths = DriftPaths::resolve().unwrap();
        assert_eq!(
            paths.cache_dir,
            PathBuf::from("/tmp/drift-core-test-cache")
        );
        unsafe {
            std::env::remove_var("DRIFT_MODEL_CACHE_DIR");
        }
    }

    #[test]
    fn models_dir_is_nested_under_cache_dir() {
        let paths = DriftPaths {
            cache_dir: PathBuf::from("/tmp/drift-core-cache"),
        };
        assert_eq!(
            paths.models_dir(),
            PathBuf::from("/tmp/drift-core-cache/models")
        );
    }

    #[test]
    fn ensure_dirs_creates_models_subdir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let paths = DriftPaths {
            cache_dir: tmp.path().join("drift-core"),
        };
        paths.ensure_dirs().unwrap();
        assert!(paths.models_dir().is_dir());
    }
}
