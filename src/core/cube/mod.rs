//! # Cube Module
//!
//! The 54-facelet cube representation, its move algebra and its notations.
//!
//! ## Layout
//! Facelets are stored as six consecutive blocks of nine, one per face, in
//! the order `UP, FRONT, RIGHT, DOWN, LEFT, BACK`:
//!
//! | Face  | Indices   |
//! |-------|-----------|
//! | UP    | `0..9`    |
//! | FRONT | `9..18`   |
//! | RIGHT | `18..27`  |
//! | DOWN  | `27..36`  |
//! | LEFT  | `36..45`  |
//! | BACK  | `45..54`  |
//!
//! Inside a block the nine facelets are row-major. Every move table and
//! notation order in this module assumes this layout.
//!
//! ## Example
//! ```rust
//! use rubiks_scan_solve::core::cube::{CubeState, Move};
//!
//! let solved = CubeState::solved();
//! let turned = solved.perform_move("R".parse::<Move>().unwrap());
//! assert_ne!(turned, solved);
//! assert_eq!(solved.to_solver_scramble().len(), 54);
//! ```

mod moves;
mod notation;

pub use moves::{Move, MoveModifier};

use crate::error::CubeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of facelets on a cube
pub const FACELET_COUNT: usize = 54;

/// Number of facelets on one face
pub const FACELETS_PER_FACE: usize = 9;

/// One of the six faces of the cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Face {
    Up,
    Front,
    Right,
    Down,
    Left,
    Back,
}

impl Face {
    /// All faces in storage order
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Front,
        Face::Right,
        Face::Down,
        Face::Left,
        Face::Back,
    ];

    /// Position of this face in storage order
    pub fn index(&self) -> usize {
        match self {
            Face::Up => 0,
            Face::Front => 1,
            Face::Right => 2,
            Face::Down => 3,
            Face::Left => 4,
            Face::Back => 5,
        }
    }

    /// Index of the first facelet of this face's block
    pub fn offset(&self) -> usize {
        self.index() * FACELETS_PER_FACE
    }

    /// Face letter used by move tokens and the solver
    pub fn letter(&self) -> char {
        match self {
            Face::Up => 'U',
            Face::Front => 'F',
            Face::Right => 'R',
            Face::Down => 'D',
            Face::Left => 'L',
            Face::Back => 'B',
        }
    }

    /// Face digit used by the visualizer
    pub fn digit(&self) -> char {
        match self {
            Face::Up => '0',
            Face::Front => '1',
            Face::Right => '2',
            Face::Down => '3',
            Face::Left => '4',
            Face::Back => '5',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'U' => Some(Face::Up),
            'F' => Some(Face::Front),
            'R' => Some(Face::Right),
            'D' => Some(Face::Down),
            'L' => Some(Face::Left),
            'B' => Some(Face::Back),
            _ => None,
        }
    }

    /// Face for a storage index, as produced by a detector
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Up => write!(f, "Up"),
            Face::Front => write!(f, "Front"),
            Face::Right => write!(f, "Right"),
            Face::Down => write!(f, "Down"),
            Face::Left => write!(f, "Left"),
            Face::Back => write!(f, "Back"),
        }
    }
}

/// An immutable snapshot of the whole cube.
///
/// `facelets` always holds 54 entries. `colors` is either empty (the
/// detector has not resolved colors yet) or holds one ARGB value per
/// facelet. Moves never mutate a state; they return a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCubeState")]
pub struct CubeState {
    facelets: Vec<Face>,
    colors: Vec<u32>,
}

#[derive(Deserialize)]
struct RawCubeState {
    facelets: Vec<Face>,
    #[serde(default)]
    colors: Vec<u32>,
}

impl TryFrom<RawCubeState> for CubeState {
    type Error = CubeError;

    fn try_from(raw: RawCubeState) -> Result<Self, Self::Error> {
        CubeState::new(raw.facelets, raw.colors)
    }
}

impl CubeState {
    /// Build a state, checking the facelet and color counts.
    pub fn new(facelets: Vec<Face>, colors: Vec<u32>) -> Result<Self, CubeError> {
        if facelets.len() != FACELET_COUNT {
            return Err(CubeError::FaceletCount {
                actual: facelets.len(),
            });
        }
        if !colors.is_empty() && colors.len() != FACELET_COUNT {
            return Err(CubeError::ColorCount {
                actual: colors.len(),
            });
        }
        Ok(Self { facelets, colors })
    }

    /// Build a state that has no resolved colors yet
    pub fn from_facelets(facelets: Vec<Face>) -> Result<Self, CubeError> {
        Self::new(facelets, Vec::new())
    }

    /// The solved cube: every block uniform
    pub fn solved() -> Self {
        let facelets = Face::ALL
            .iter()
            .flat_map(|face| std::iter::repeat(*face).take(FACELETS_PER_FACE))
            .collect();
        Self {
            facelets,
            colors: Vec::new(),
        }
    }

    /// Attach resolved colors to this state
    pub fn with_colors(self, colors: Vec<u32>) -> Result<Self, CubeError> {
        Self::new(self.facelets, colors)
    }

    pub fn facelets(&self) -> &[Face] {
        &self.facelets
    }

    pub fn colors(&self) -> &[u32] {
        &self.colors
    }

    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    /// The nine facelets of one face, row-major
    pub fn face(&self, face: Face) -> &[Face] {
        let start = face.offset();
        &self.facelets[start..start + FACELETS_PER_FACE]
    }

    /// True when every face block is uniform
    pub fn is_solved(&self) -> bool {
        Face::ALL.iter().all(|face| {
            let block = self.face(*face);
            block.iter().all(|facelet| *facelet == block[0])
        })
    }

    /// Replace the facelets while keeping the colors
    fn with_facelets(&self, facelets: Vec<Face>) -> Self {
        Self {
            facelets,
            colors: self.colors.clone(),
        }
    }
}

impl FromStr for CubeState {
    type Err = CubeError;

    /// Parse 54 face letters given in storage order.
    ///
    /// Whitespace is ignored so the six blocks can be written apart.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let facelets = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .enumerate()
            .map(|(position, symbol)| {
                Face::from_letter(symbol).ok_or(CubeError::UnknownFace { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_facelets(facelets)
    }
}

impl fmt::Display for CubeState {
    /// Face letters in storage order
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for facelet in &self.facelets {
            write!(f, "{}", facelet.letter())?;
        }
        Ok(())
    }
}
