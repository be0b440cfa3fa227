//! # Detector Module
//!
//! The contract with the external vision engine that finds the cube in
//! camera frames and reads its facelet colors.
//!
//! ## Protocol
//! 1. `set_hemisphere` selects which half of the cube is being captured
//! 2. `scan_cube` is called on low resolution frames until it reports a
//!    usable view of the cube
//! 3. `extract_facelets` reads one hemisphere from a full resolution photo,
//!    using the scan buffer as context
//! 4. after both hemispheres, `analyze_colors` resolves the raw samples into
//!    a 54-facelet `CubeState`
//! 5. `release` tears the engine down once the session ends
//!
//! The detector itself is out of scope for this crate; implementations wrap
//! a native engine or, in tests, a scripted fake.

mod frame;

pub use frame::{Frame, FrameBuffer, ImageGeometry};

use crate::core::cube::{CubeState, Face};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The two passes needed to see all six faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    First,
    Second,
}

impl Hemisphere {
    pub fn is_second(&self) -> bool {
        matches!(self, Hemisphere::Second)
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hemisphere::First => write!(f, "first hemisphere"),
            Hemisphere::Second => write!(f, "second hemisphere"),
        }
    }
}

/// Which image stream a geometry applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptureKind {
    /// Low resolution preview frames fed to `scan_cube`
    Scan,
    /// Full resolution photos fed to `extract_facelets`
    Photo,
}

impl fmt::Display for CaptureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureKind::Scan => write!(f, "scan"),
            CaptureKind::Photo => write!(f, "photo"),
        }
    }
}

/// The external vision engine.
///
/// Only one call is ever in flight per detector: the coordinator owns it
/// and drives it from a single thread.
pub trait CubeDetector: Send {
    /// Reconfigure the geometry of one image stream
    fn configure(&mut self, kind: CaptureKind, geometry: ImageGeometry);

    /// Geometry last configured for `kind`
    fn geometry(&self, kind: CaptureKind) -> ImageGeometry;

    /// Capacity the shared frame buffer must have for the current geometry
    fn required_buffer_size(&self) -> usize;

    /// Tell the engine which hemisphere is being captured
    fn set_hemisphere(&mut self, hemisphere: Hemisphere);

    /// Directory for diagnostic image dumps, if the engine supports them
    fn set_diagnostics_path(&mut self, _path: Option<&Path>) {}

    /// True when the frame in `buffer` shows the cube well enough to take a
    /// photo
    fn scan_cube(&mut self, buffer: &mut FrameBuffer) -> bool;

    /// Read one hemisphere's facelets from `photo`
    fn extract_facelets(&mut self, buffer: &FrameBuffer, photo: &Frame) -> bool;

    /// Resolve both hemispheres into a cube, or `None` when the colors are
    /// ambiguous
    fn analyze_colors(&mut self, buffer: &FrameBuffer) -> Option<CubeState>;

    /// Free engine resources. Called exactly once by the owner.
    fn release(&mut self);
}

/// Build a cube from per-facelet face indices and one ARGB color per face.
///
/// Native engines report their result in this shape. Returns `None` when an
/// index is out of range or the facelet count is wrong.
pub fn decode_detection(face_indices: &[usize], face_colors: &[u32; 6]) -> Option<CubeState> {
    let facelets = face_indices
        .iter()
        .map(|index| Face::from_index(*index))
        .collect::<Option<Vec<_>>>()?;
    let colors = facelets
        .iter()
        .map(|face| face_colors[face.index()])
        .collect();
    CubeState::new(facelets, colors).ok()
}
