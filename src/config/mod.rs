//! # Config Module
//!
//! Scanner settings: detector geometry, diagnostics output and solver
//! parameters.
//!
//! Every field has a default, so a config file only lists what it changes:
//!
//! ```json
//! {
//!   "scan": { "rotation": 0, "width": 1280, "height": 720 },
//!   "solver": { "max_depth": 24 }
//! }
//! ```

use crate::core::detector::{CaptureKind, ImageGeometry};
use crate::core::solver::SolverConfig;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for one scan session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Initial geometry of the scan stream
    pub scan: ImageGeometry,
    /// Initial geometry of photos
    pub photo: ImageGeometry,
    /// Where the detector may dump diagnostic images; `None` disables dumps
    pub diagnostics_path: Option<PathBuf>,
    /// Parameters for the solver call
    pub solver: SolverConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            scan: ImageGeometry::default_scan(),
            photo: ImageGeometry::default_photo(),
            diagnostics_path: None,
            solver: SolverConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Load and validate a JSON config file
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check both geometries
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (kind, geometry) in [(CaptureKind::Scan, self.scan), (CaptureKind::Photo, self.photo)] {
            if !geometry.is_valid() {
                return Err(ConfigError::InvalidGeometry {
                    kind: kind.to_string(),
                    width: geometry.width,
                    height: geometry.height,
                    rotation: geometry.rotation,
                });
            }
        }
        Ok(())
    }

    /// Enable diagnostic dumps into `path`
    pub fn with_diagnostics(mut self, path: impl Into<PathBuf>) -> Self {
        self.diagnostics_path = Some(path.into());
        self
    }

    /// Per-user directory for diagnostic dumps
    pub fn default_diagnostics_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rubiks-scan-solve")
            .join("captures")
    }
}
