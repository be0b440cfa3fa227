//! The solution handed to the presentation layer.

use super::{calculate_solution, CubeSolver, SolverConfig};
use crate::core::cube::{CubeState, Move};
use crate::error::SolverError;
use serde::{Deserialize, Serialize};

/// A solved scan: the scanned state, the moves that solve it and the state
/// after each move.
///
/// `states[i]` is `initial_state` with `solution_steps[..=i]` applied. The
/// states are derived on construction and never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSolution")]
pub struct Solution {
    initial_state: CubeState,
    solution_steps: Vec<Move>,
    states: Vec<CubeState>,
}

/// Serialized states are ignored and derived again
#[derive(Deserialize)]
struct RawSolution {
    initial_state: CubeState,
    solution_steps: Vec<Move>,
}

impl From<RawSolution> for Solution {
    fn from(raw: RawSolution) -> Self {
        Solution::new(raw.initial_state, raw.solution_steps)
    }
}

impl Solution {
    /// Build a solution from known steps, deriving the intermediate states
    pub fn new(initial_state: CubeState, solution_steps: Vec<Move>) -> Self {
        let states = calculate_states(&initial_state, &solution_steps);
        Self {
            initial_state,
            solution_steps,
            states,
        }
    }

    /// Ask `solver` for the steps that solve `initial_state`
    pub fn compute(
        initial_state: CubeState,
        solver: &dyn CubeSolver,
        config: &SolverConfig,
    ) -> Result<Self, SolverError> {
        let steps = calculate_solution(&initial_state, solver, config)?;
        Ok(Self::new(initial_state, steps))
    }

    pub fn initial_state(&self) -> &CubeState {
        &self.initial_state
    }

    pub fn solution_steps(&self) -> &[Move] {
        &self.solution_steps
    }

    pub fn states(&self) -> &[CubeState] {
        &self.states
    }

    /// State after the last step, or the initial state for an empty solution
    pub fn final_state(&self) -> &CubeState {
        self.states.last().unwrap_or(&self.initial_state)
    }

    pub fn move_count(&self) -> usize {
        self.solution_steps.len()
    }

    /// Steps joined by single spaces, as a visualizer expects them
    pub fn move_sequence(&self) -> String {
        self.solution_steps
            .iter()
            .map(Move::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Visualizer notation of the scanned state
    pub fn initial_visualizer_state(&self) -> String {
        self.initial_state.to_visualizer_state()
    }

    /// Solver notation of each intermediate state, one per step
    pub fn step_scrambles(&self) -> Vec<String> {
        self.states.iter().map(CubeState::to_solver_scramble).collect()
    }
}

/// Fold the moves over `initial`, keeping every intermediate state.
///
/// The result has one entry per step; an empty step list yields no states.
pub fn calculate_states(initial: &CubeState, steps: &[Move]) -> Vec<CubeState> {
    steps
        .iter()
        .scan(initial.clone(), |state, mv| {
            *state = state.perform_move(*mv);
            Some(state.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSolver(&'static str);

    impl CubeSolver for FixedSolver {
        fn solve(&self, _scramble: &str, _config: &SolverConfig) -> Result<String, SolverError> {
            Ok(self.0.to_string())
        }
    }

    fn moves(sequence: &str) -> Vec<Move> {
        Move::parse_sequence(sequence).unwrap()
    }

    #[test]
    fn empty_steps_yield_no_states() {
        let solution = Solution::new(CubeState::solved(), Vec::new());
        assert!(solution.states().is_empty());
        assert_eq!(solution.final_state(), &CubeState::solved());
        assert_eq!(solution.move_sequence(), "");
    }

    #[test]
    fn states_follow_each_prefix() {
        let initial = CubeState::solved().perform_moves(&moves("F R U"));
        let steps = moves("U' R' F' D2");
        let states = calculate_states(&initial, &steps);

        assert_eq!(states.len(), steps.len());
        for i in 0..steps.len() {
            assert_eq!(states[i], initial.perform_moves(&steps[..=i]));
        }
    }

    #[test]
    fn each_state_is_one_move_after_the_previous() {
        let initial = CubeState::solved();
        let steps = moves("R U R' U'");
        let solution = Solution::new(initial.clone(), steps.clone());

        let mut previous = initial;
        for (state, mv) in solution.states().iter().zip(&steps) {
            assert_eq!(state, &previous.perform_move(*mv));
            previous = state.clone();
        }
    }

    #[test]
    fn compute_uses_solver_answer() {
        let initial = CubeState::solved().perform_moves(&moves("R U"));
        let solution =
            Solution::compute(initial.clone(), &FixedSolver("U' R'"), &SolverConfig::default())
                .unwrap();

        assert_eq!(solution.move_sequence(), "U' R'");
        assert_eq!(solution.move_count(), 2);
        assert!(solution.final_state().is_solved());
        assert_eq!(solution.initial_state(), &initial);
    }

    #[test]
    fn compute_propagates_sentinel() {
        let result = Solution::compute(
            CubeState::solved(),
            &FixedSolver("Error 8"),
            &SolverConfig::default(),
        );
        assert!(matches!(
            result,
            Err(SolverError::Reported { code: Some(8), .. })
        ));
    }

    #[test]
    fn step_scrambles_end_solved() {
        let initial = CubeState::solved().perform_moves(&moves("R"));
        let solution = Solution::new(initial, moves("R'"));
        assert_eq!(
            solution.step_scrambles(),
            vec![CubeState::solved().to_solver_scramble()]
        );
    }

    #[test]
    fn solution_serializes_with_tokens() {
        let solution = Solution::new(CubeState::solved(), moves("R2 B'"));
        let json = serde_json::to_string(&solution).unwrap();
        assert!(json.contains("\"R2\""));
        assert!(json.contains("\"B'\""));
        let back: Solution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, solution);
    }
}
