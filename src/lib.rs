//! # Rubik's Scan & Solve
//!
//! Scans a physical Rubik's cube in two passes and computes a solution.
//!
//! ## Architecture
//! The library is split into a core engine (GUI-agnostic) and presentation layers:
//! - `core` - Cube model, scan state machine and the detector/solver contracts
//! - `config` - Session settings loadable from JSON
//! - `events` - Event stream for whatever presents the session
//! - `error` - Error types
//!
//! The vision engine and the search engine are external; this crate only
//! coordinates them.

pub mod config;
pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, ScanSolveError};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. The filter is read
/// from `RUST_LOG`.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
