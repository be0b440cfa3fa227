//! # cube-scan CLI
//!
//! Command-line tooling for the Rubik's scan & solve library.
//!
//! ## Usage
//! ```bash
//! cube-scan notation solved
//! cube-scan apply solved R U2 "F'" --output json
//! RUST_LOG=debug cube-scan solve <FACELETS> --solver ./min2phase
//! ```

mod cli;

use rubiks_scan_solve::Result;

fn main() -> Result<()> {
    rubiks_scan_solve::init_tracing();
    cli::run()
}
