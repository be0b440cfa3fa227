//! # Core Module
//!
//! The GUI-agnostic scan and solve engine.
//!
//! ## Modules
//! - `cube` - The 54-facelet cube, its moves and notations
//! - `detector` - Contract with the vision engine that reads the cube
//! - `solver` - Contract with the search engine and the resulting solution
//! - `scan` - The two-hemisphere scan state machine

pub mod cube;
pub mod detector;
pub mod scan;
pub mod solver;

// Re-export main types
pub use cube::{CubeState, Face, Move, MoveModifier};
pub use detector::{CaptureKind, CubeDetector, Frame, FrameBuffer, Hemisphere, ImageGeometry};
pub use scan::{CaptureLoop, ScanCoordinator, ScanObserver, ScanStage};
pub use solver::{CubeSolver, ProcessSolver, Solution, SolverConfig};
