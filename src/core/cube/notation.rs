//! Conversions from the internal facelet layout to external notations.
//!
//! Both notations are a fixed reordering of the 54 facelets followed by a
//! per-face symbol. Neither looks at the resolved colors.

use super::{CubeState, Face, FACELET_COUNT};

/// Facelet order expected by the solver (`U R F D L B` blocks)
const SOLVER_SCRAMBLE_ORDER: [usize; FACELET_COUNT] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, //
    18, 19, 20, 21, 22, 23, 24, 25, 26, //
    9, 10, 11, 12, 13, 14, 15, 16, 17, //
    33, 30, 27, 34, 31, 28, 35, 32, 29, //
    44, 43, 42, 41, 40, 39, 38, 37, 36, //
    53, 52, 51, 50, 49, 48, 47, 46, 45,
];

/// Facelet order expected by the cube visualizer
const VISUALIZER_ORDER: [usize; FACELET_COUNT] = [
    6, 7, 8, 3, 4, 5, 0, 1, 2, //
    33, 34, 35, 30, 31, 32, 27, 28, 29, //
    9, 12, 15, 10, 13, 16, 11, 14, 17, //
    53, 50, 47, 52, 49, 46, 51, 48, 45, //
    42, 43, 44, 39, 40, 41, 36, 37, 38, //
    18, 21, 24, 19, 22, 25, 20, 23, 26,
];

impl CubeState {
    /// The 54-letter scramble string consumed by the solver
    pub fn to_solver_scramble(&self) -> String {
        self.render(&SOLVER_SCRAMBLE_ORDER, Face::letter)
    }

    /// The 54-digit string consumed by the visualizer
    pub fn to_visualizer_state(&self) -> String {
        self.render(&VISUALIZER_ORDER, Face::digit)
    }

    fn render(&self, order: &[usize; FACELET_COUNT], symbol: fn(&Face) -> char) -> String {
        order
            .iter()
            .map(|index| symbol(&self.facelets[*index]))
            .collect()
    }
}
