//! Move tokens and the quarter-turn permutation tables.

use super::{CubeState, Face};
use crate::error::CubeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How far a face is turned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveModifier {
    /// 90 degrees, written without a suffix
    Quarter,
    /// 180 degrees, written `2`
    Double,
    /// -90 degrees, written `'`
    Reversed,
}

impl MoveModifier {
    /// Number of base quarter turns this modifier stands for
    pub fn quarter_turns(&self) -> usize {
        match self {
            MoveModifier::Quarter => 1,
            MoveModifier::Double => 2,
            MoveModifier::Reversed => 3,
        }
    }

    fn suffix(&self) -> &'static str {
        match self {
            MoveModifier::Quarter => "",
            MoveModifier::Double => "2",
            MoveModifier::Reversed => "'",
        }
    }
}

/// A single move token such as `R`, `U2` or `F'`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Move {
    pub face: Face,
    pub modifier: MoveModifier,
}

impl Move {
    pub fn new(face: Face, modifier: MoveModifier) -> Self {
        Self { face, modifier }
    }

    pub fn quarter(face: Face) -> Self {
        Self::new(face, MoveModifier::Quarter)
    }

    /// Parse a whitespace separated move sequence, skipping empty tokens
    pub fn parse_sequence(sequence: &str) -> Result<Vec<Move>, CubeError> {
        sequence.split_whitespace().map(str::parse).collect()
    }
}

impl FromStr for Move {
    type Err = CubeError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let unknown = || CubeError::UnknownMove {
            token: token.to_string(),
        };

        let mut chars = token.chars();
        let face = chars.next().and_then(Face::from_letter).ok_or_else(unknown)?;
        let modifier = match (chars.next(), chars.next()) {
            (None, _) => MoveModifier::Quarter,
            (Some('2'), None) => MoveModifier::Double,
            (Some('\''), None) => MoveModifier::Reversed,
            _ => return Err(unknown()),
        };

        Ok(Self { face, modifier })
    }
}

impl TryFrom<String> for Move {
    type Error = CubeError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

impl From<Move> for String {
    fn from(mv: Move) -> Self {
        mv.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.letter(), self.modifier.suffix())
    }
}

/// Border facelets cycled by a quarter turn of `face`.
///
/// Facelets in group `k` move to group `k + 1` (wrapping). Only the rows and
/// columns of the neighbouring faces are listed; the nine facelets of the
/// turned face itself stay where they are.
fn border_cycle(face: Face) -> [[usize; 3]; 4] {
    match face {
        Face::Up => [[44, 43, 42], [9, 10, 11], [18, 19, 20], [53, 52, 51]],
        Face::Front => [[36, 39, 42], [6, 7, 8], [18, 21, 24], [27, 30, 33]],
        Face::Right => [[11, 14, 17], [2, 5, 8], [47, 50, 53], [27, 28, 29]],
        Face::Left => [[45, 48, 51], [0, 3, 4], [9, 12, 15], [33, 34, 35]],
        Face::Back => [[20, 23, 26], [0, 1, 2], [38, 41, 44], [29, 32, 35]],
        Face::Down => [[38, 37, 36], [15, 16, 17], [24, 25, 26], [47, 46, 45]],
    }
}

impl CubeState {
    /// Apply one move and return the resulting state.
    ///
    /// A double move is the quarter turn applied twice, a reversed move the
    /// quarter turn applied three times.
    pub fn perform_move(&self, mv: Move) -> CubeState {
        (1..mv.modifier.quarter_turns()).fold(self.quarter_turn(mv.face), |state, _| {
            state.quarter_turn(mv.face)
        })
    }

    /// Parse `token` and apply it
    pub fn perform_token(&self, token: &str) -> Result<CubeState, CubeError> {
        Ok(self.perform_move(token.parse()?))
    }

    /// Apply every move in order, returning only the final state
    pub fn perform_moves(&self, moves: &[Move]) -> CubeState {
        moves
            .iter()
            .fold(self.clone(), |state, mv| state.perform_move(*mv))
    }

    fn quarter_turn(&self, face: Face) -> CubeState {
        let cycle = border_cycle(face);
        let mut facelets = self.facelets.clone();
        for (group, source) in cycle.iter().enumerate() {
            let target = &cycle[(group + 1) % cycle.len()];
            for (to, from) in target.iter().zip(source) {
                facelets[*to] = self.facelets[*from];
            }
        }
        self.with_facelets(facelets)
    }
}
