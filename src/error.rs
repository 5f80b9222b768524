use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fnsplice
#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("IO error: {source}")]
    Io {
        source: std::io::Error,
        path: Option<PathBuf>,
    },

    #[error("File is not valid UTF-8: {path}")]
    InvalidEncoding { path: PathBuf },

    #[error("Failed to write file {path}: {message}")]
    WriteFailed { message: String, path: PathBuf },

    #[error("Invalid recipe: {message}")]
    InvalidRecipe { message: String },

    #[error("Failed to parse recipe {path}: {message}")]
    RecipeParse { message: String, path: PathBuf },
}

impl SpliceError {
    /// Create a new IO error with path context
    pub fn io_error(err: std::io::Error, path: Option<impl Into<PathBuf>>) -> Self {
        Self::Io {
            source: err,
            path: path.map(|p| p.into()),
        }
    }

    /// Create a new encoding error
    pub fn invalid_encoding(path: impl Into<PathBuf>) -> Self {
        Self::InvalidEncoding { path: path.into() }
    }

    /// Create a new write error
    pub fn write_failed(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::WriteFailed {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create a new invalid recipe error
    pub fn invalid_recipe(message: impl Into<String>) -> Self {
        Self::InvalidRecipe {
            message: message.into(),
        }
    }

    /// Create a new recipe parse error
    pub fn recipe_parse(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::RecipeParse {
            message: message.into(),
            path: path.into(),
        }
    }
}

/// Result type alias for fnsplice operations
pub type SpliceResult<T> = Result<T, SpliceError>;
