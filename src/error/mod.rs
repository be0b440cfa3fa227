//! # Error Module
//!
//! Error types for the cube scanner and its solver hand-off.
//!
//! ## Design Principles
//! - **Contract violations fail loudly** - a malformed facelet array or an
//!   unknown move token is an `Err`, never a silently broken cube
//! - **Scan failures are not errors** - the coordinator recovers from detector
//!   and solver failures by moving back to an earlier stage
//! - **Include context** - the offending token, count, or path

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum ScanSolveError {
    #[error("Cube error: {0}")]
    Cube(#[from] CubeError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Misuse of the cube model by its caller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    #[error("A cube has exactly 54 facelets, got {actual}")]
    FaceletCount { actual: usize },

    #[error("Facelet colors must be empty or hold 54 entries, got {actual}")]
    ColorCount { actual: usize },

    #[error("Unknown move token: {token:?}")]
    UnknownMove { token: String },

    #[error("Unknown face symbol {symbol:?} at position {position}")]
    UnknownFace { symbol: char, position: usize },
}

/// Errors produced while asking the external solver for a solution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("Solver could not solve the cube: {message}")]
    Reported { code: Option<u32>, message: String },

    #[error("Solver returned an unknown move token: {token:?}")]
    InvalidMove { token: String },

    #[error("Solver is unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Errors in scanner configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid {kind} geometry {width}x{height} rotated {rotation} degrees")]
    InvalidGeometry {
        kind: String,
        width: u32,
        height: u32,
        rotation: u32,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, ScanSolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_move_includes_token() {
        let error = CubeError::UnknownMove {
            token: "X3".to_string(),
        };
        assert!(error.to_string().contains("X3"));
    }

    #[test]
    fn facelet_count_includes_actual_length() {
        let error = CubeError::FaceletCount { actual: 53 };
        assert!(error.to_string().contains("53"));
    }

    #[test]
    fn config_error_includes_path() {
        let error = ConfigError::Parse {
            path: PathBuf::from("/etc/cube-scan.json"),
            reason: "expected value".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/etc/cube-scan.json"));
        assert!(message.contains("expected value"));
    }

    #[test]
    fn solver_error_converts_to_top_level() {
        let error: ScanSolveError = SolverError::Reported {
            code: Some(7),
            message: "Error 7".to_string(),
        }
        .into();
        assert!(matches!(error, ScanSolveError::Solver(_)));
    }
}
