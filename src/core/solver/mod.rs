//! # Solver Module
//!
//! The contract with the external search engine and the `Solution` built
//! from its answer.
//!
//! ## Call Contract
//! The solver receives the 54-letter scramble string plus a fixed
//! configuration (depth 21, node budget 100,000,000, two reserved flags set
//! to 0) and answers with a space separated move string. An answer that
//! starts with the word `Error` is the solver's failure sentinel, e.g.
//! `"Error 7"` when the search ran out of budget.
//!
//! The call blocks until the solver returns; there is no cancellation.

mod process;
mod solution;

pub use process::ProcessSolver;
pub use solution::{calculate_states, Solution};

use crate::core::cube::{CubeState, Move};
use crate::error::SolverError;
use serde::{Deserialize, Serialize};

/// Prefix the solver uses for its failure sentinel
const ERROR_SENTINEL: &str = "Error";

/// Search parameters passed to the solver on every call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Longest solution the solver may return
    pub max_depth: u32,
    /// Search nodes the solver may visit before giving up
    pub node_budget: u64,
    /// Reserved solver mode flags, always zero in practice
    pub mode_flags: [i32; 2],
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_depth: 21,
            node_budget: 100_000_000,
            mode_flags: [0, 0],
        }
    }
}

/// The external search engine.
///
/// Implementations must be deterministic for identical inputs. `Err` is for
/// the adapter itself failing (a missing binary, a crashed process); a
/// search that finds nothing is reported through the `Ok` string as the
/// error sentinel.
pub trait CubeSolver: Send + Sync {
    fn solve(&self, scramble: &str, config: &SolverConfig) -> Result<String, SolverError>;
}

/// Interpret a raw solver answer.
///
/// Trimmed answers starting with `Error` are failures, with the number that
/// follows taken as the error code. Anything else must be a whitespace
/// separated list of valid move tokens.
pub fn parse_solver_output(raw: &str) -> Result<Vec<Move>, SolverError> {
    let trimmed = raw.trim();
    if let Some(rest) = trimmed.strip_prefix(ERROR_SENTINEL) {
        return Err(SolverError::Reported {
            code: rest.trim().parse().ok(),
            message: trimmed.to_string(),
        });
    }

    trimmed
        .split_whitespace()
        .map(|token| {
            token.parse::<Move>().map_err(|_| SolverError::InvalidMove {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Ask `solver` for the moves that solve `state`
pub fn calculate_solution(
    state: &CubeState,
    solver: &dyn CubeSolver,
    config: &SolverConfig,
) -> Result<Vec<Move>, SolverError> {
    let raw = solver.solve(&state.to_solver_scramble(), config)?;
    parse_solver_output(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cube::{Face, MoveModifier};
    use std::sync::Mutex;

    struct RecordingSolver {
        answer: String,
        calls: Mutex<Vec<(String, SolverConfig)>>,
    }

    impl RecordingSolver {
        fn new(answer: &str) -> Self {
            Self {
                answer: answer.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl CubeSolver for RecordingSolver {
        fn solve(&self, scramble: &str, config: &SolverConfig) -> Result<String, SolverError> {
            self.calls
                .lock()
                .unwrap()
                .push((scramble.to_string(), *config));
            Ok(self.answer.clone())
        }
    }

    #[test]
    fn default_config_matches_solver_contract() {
        let config = SolverConfig::default();
        assert_eq!(config.max_depth, 21);
        assert_eq!(config.node_budget, 100_000_000);
        assert_eq!(config.mode_flags, [0, 0]);
    }

    #[test]
    fn parses_moves_and_skips_blank_tokens() {
        let moves = parse_solver_output("R2  U' F \n").unwrap();
        assert_eq!(
            moves,
            vec![
                Move::new(Face::Right, MoveModifier::Double),
                Move::new(Face::Up, MoveModifier::Reversed),
                Move::quarter(Face::Front),
            ]
        );
    }

    #[test]
    fn empty_answer_is_an_empty_solution() {
        assert_eq!(parse_solver_output("   ").unwrap(), Vec::new());
    }

    #[test]
    fn error_sentinel_carries_code() {
        let error = parse_solver_output("Error 7").unwrap_err();
        assert_eq!(
            error,
            SolverError::Reported {
                code: Some(7),
                message: "Error 7".to_string()
            }
        );
    }

    #[test]
    fn error_sentinel_without_code() {
        let error = parse_solver_output("Error").unwrap_err();
        assert!(matches!(error, SolverError::Reported { code: None, .. }));
    }

    #[test]
    fn unknown_token_is_rejected() {
        let error = parse_solver_output("R U X2").unwrap_err();
        assert_eq!(
            error,
            SolverError::InvalidMove {
                token: "X2".to_string()
            }
        );
    }

    #[test]
    fn calculate_solution_sends_scramble_and_config() {
        let solver = RecordingSolver::new("R U");
        let state = CubeState::solved();
        let config = SolverConfig::default();

        let moves = calculate_solution(&state, &solver, &config).unwrap();

        assert_eq!(moves.len(), 2);
        let calls = solver.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, state.to_solver_scramble());
        assert_eq!(calls[0].1, config);
    }
}
