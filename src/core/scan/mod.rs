//! # Scan Module
//!
//! The two-hemisphere scan protocol.
//!
//! ## Flow
//! ```text
//! PreFirstScan -start-> FirstScan -cube found-> FirstPhoto -extracted-> PreSecondScan
//! PreSecondScan -start-> SecondScan -cube found-> SecondPhoto -extracted-> (solve)
//! (solve) -resolved-> Finished
//! (solve) -failed-> PreFirstScan
//! ```
//!
//! `stage` holds the pure transition table. `ScanCoordinator` applies it to
//! a detector and a solver, `ScanObserver` exposes the result to other
//! threads and `CaptureLoop` runs the coordinator on its own thread.

mod capture;
mod coordinator;
mod observer;
mod stage;

pub use capture::{CaptureCommand, CaptureLoop, FrameMailbox};
pub use coordinator::{ScanCoordinator, ScanCoordinatorBuilder};
pub use observer::ScanObserver;
pub use stage::{transition, Effect, ScanStage, Signal, Transition};
