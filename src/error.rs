//! Error types for configuration and persistence.
//!
//! Gameplay itself never fails: stale collision pairs and expired effects are
//! skipped silently.  Errors only arise at the edges, when reading the tuning
//! file or reading/writing the high score, and every caller degrades to
//! defaults after logging.
//!
//! ## Usage
//!
//! ```rust
//! use starfall::error::{GameError, GameResult};
//!
//! fn read_score(text: &str) -> GameResult<u32> {
//!     text.trim().parse().map_err(|e| GameError::Parse {
//!         path: "inline".into(),
//!         reason: format!("{e}"),
//!     })
//! }
//! ```

use std::fmt;
use std::path::PathBuf;

/// Top-level error enum for the game's I/O edges.
#[derive(Debug)]
pub enum GameError {
    /// A file could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A TOML document was malformed or had the wrong shape.
    Parse {
        path: PathBuf,
        reason: String,
    },

    /// A value could not be encoded as TOML.
    Serialize { reason: String },

    /// A tuning value is outside its usable range.
    InvalidConfig {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        valid_range: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io { path, source } => {
                write!(f, "i/o error on {}: {}", path.display(), source)
            }
            GameError::Parse { path, reason } => {
                write!(f, "failed to parse {}: {}", path.display(), reason)
            }
            GameError::Serialize { reason } => write!(f, "failed to serialize: {}", reason),
            GameError::InvalidConfig {
                name,
                value,
                valid_range,
            } => write!(
                f,
                "config value '{}' = {} is outside valid range {}",
                name, value, valid_range
            ),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive and finite.
pub fn validate_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            valid_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `min ≤ value ≤ max`.
pub fn validate_range(
    name: &'static str,
    value: f32,
    min: f32,
    max: f32,
    valid_range: &'static str,
) -> GameResult<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            valid_range,
        })
    }
}
