//! Solver adapter backed by an external solver program.
//!
//! The program is run once per solve as
//! `<program> <args...> <scramble> <max_depth> <node_budget> <flag0> <flag1>`
//! and its standard output is taken as the raw answer.

use super::{CubeSolver, SolverConfig};
use crate::error::SolverError;
use std::path::PathBuf;
use std::process::Command;

/// Runs a solver executable for every request
#[derive(Debug, Clone)]
pub struct ProcessSolver {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessSolver {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Arguments placed before the scramble
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl CubeSolver for ProcessSolver {
    fn solve(&self, scramble: &str, config: &SolverConfig) -> Result<String, SolverError> {
        tracing::debug!(program = %self.program.display(), scramble, "running solver");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(scramble)
            .arg(config.max_depth.to_string())
            .arg(config.node_budget.to_string())
            .arg(config.mode_flags[0].to_string())
            .arg(config.mode_flags[1].to_string())
            .output()
            .map_err(|e| SolverError::Unavailable {
                reason: format!("failed to run {}: {}", self.program.display(), e),
            })?;

        if !output.status.success() {
            return Err(SolverError::Unavailable {
                reason: format!(
                    "{} exited with {}: {}",
                    self.program.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| SolverError::Unavailable {
            reason: format!("{} wrote non UTF-8 output", self.program.display()),
        })
    }
}
