//! Scan stages and the transition table between them.

use crate::core::detector::Hemisphere;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a scan session is in the two-hemisphere capture protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanStage {
    /// Waiting for the user to start scanning the first hemisphere
    PreFirstScan,
    /// Looking for the cube in preview frames
    FirstScan,
    /// Waiting for the first full resolution photo
    FirstPhoto,
    /// First hemisphere captured, waiting for the user to turn the cube
    PreSecondScan,
    SecondScan,
    SecondPhoto,
    /// A solution has been published
    Finished,
}

impl ScanStage {
    /// Stages that feed preview frames to the detector
    pub fn is_scanning(&self) -> bool {
        matches!(self, ScanStage::FirstScan | ScanStage::SecondScan)
    }

    /// Stages waiting for a photo
    pub fn expects_photo(&self) -> bool {
        matches!(self, ScanStage::FirstPhoto | ScanStage::SecondPhoto)
    }

    /// Stages waiting for the user to press start
    pub fn is_idle(&self) -> bool {
        matches!(self, ScanStage::PreFirstScan | ScanStage::PreSecondScan)
    }

    /// Hemisphere being captured, if any
    pub fn hemisphere(&self) -> Option<Hemisphere> {
        match self {
            ScanStage::FirstScan | ScanStage::FirstPhoto => Some(Hemisphere::First),
            ScanStage::SecondScan | ScanStage::SecondPhoto => Some(Hemisphere::Second),
            ScanStage::PreFirstScan | ScanStage::PreSecondScan | ScanStage::Finished => None,
        }
    }
}

impl fmt::Display for ScanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanStage::PreFirstScan => write!(f, "Ready to scan first hemisphere"),
            ScanStage::FirstScan => write!(f, "Scanning first hemisphere"),
            ScanStage::FirstPhoto => write!(f, "Photographing first hemisphere"),
            ScanStage::PreSecondScan => write!(f, "Ready to scan second hemisphere"),
            ScanStage::SecondScan => write!(f, "Scanning second hemisphere"),
            ScanStage::SecondPhoto => write!(f, "Photographing second hemisphere"),
            ScanStage::Finished => write!(f, "Finished"),
        }
    }
}

/// Inputs that may move the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// User pressed start
    Start,
    /// User pressed stop
    Stop,
    /// User asked to start over
    Reset,
    /// The detector found the cube in a preview frame
    CubeFound,
    /// A photo was read successfully
    HemisphereExtracted,
    /// A photo could not be read
    ExtractionFailed,
    /// Colors resolved and the solver produced a solution
    Resolved,
    /// Colors could not be resolved or the solver failed
    ResolutionFailed,
}

/// Work the coordinator does when a transition fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    None,
    /// Point the detector at a hemisphere before scanning it
    ConfigureHemisphere(Hemisphere),
    /// Drop the capture that was in flight
    DiscardCapture,
    /// Keep the extracted hemisphere for the final analysis
    RetainHemisphere(Hemisphere),
    /// Resolve colors and run the solver
    ResolveCube,
    /// Publish the computed solution
    PublishSolution,
    /// Throw away everything captured so far
    DiscardSession,
}

/// Result of feeding a signal to the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: ScanStage,
    pub effect: Effect,
}

impl Transition {
    fn to(next: ScanStage, effect: Effect) -> Self {
        Self { next, effect }
    }

    fn stay(stage: ScanStage) -> Self {
        Self::to(stage, Effect::None)
    }
}

/// The full transition table.
///
/// Every (stage, signal) pair is listed; pairs that do nothing map back to
/// the current stage with no effect.
pub fn transition(stage: ScanStage, signal: Signal) -> Transition {
    use Effect as E;
    use ScanStage::*;

    match (stage, signal) {
        (PreFirstScan, Signal::Start) => {
            Transition::to(FirstScan, E::ConfigureHemisphere(Hemisphere::First))
        }
        (PreSecondScan, Signal::Start) => {
            Transition::to(SecondScan, E::ConfigureHemisphere(Hemisphere::Second))
        }
        (FirstScan | FirstPhoto | SecondScan | SecondPhoto | Finished, Signal::Start) => {
            Transition::stay(stage)
        }

        (FirstScan | FirstPhoto, Signal::Stop) => Transition::to(PreFirstScan, E::DiscardCapture),
        (SecondScan | SecondPhoto, Signal::Stop) => {
            Transition::to(PreSecondScan, E::DiscardCapture)
        }
        (PreFirstScan | PreSecondScan | Finished, Signal::Stop) => Transition::stay(stage),

        (
            PreFirstScan | FirstScan | FirstPhoto | PreSecondScan | SecondScan | SecondPhoto
            | Finished,
            Signal::Reset,
        ) => Transition::to(PreFirstScan, E::DiscardSession),

        (FirstScan, Signal::CubeFound) => Transition::to(FirstPhoto, E::None),
        (SecondScan, Signal::CubeFound) => Transition::to(SecondPhoto, E::None),
        (PreFirstScan | FirstPhoto | PreSecondScan | SecondPhoto | Finished, Signal::CubeFound) => {
            Transition::stay(stage)
        }

        (FirstPhoto, Signal::HemisphereExtracted) => {
            Transition::to(PreSecondScan, E::RetainHemisphere(Hemisphere::First))
        }
        (SecondPhoto, Signal::HemisphereExtracted) => Transition::to(SecondPhoto, E::ResolveCube),
        (
            PreFirstScan | FirstScan | PreSecondScan | SecondScan | Finished,
            Signal::HemisphereExtracted,
        ) => Transition::stay(stage),

        (FirstPhoto, Signal::ExtractionFailed) => Transition::to(FirstScan, E::None),
        (SecondPhoto, Signal::ExtractionFailed) => Transition::to(SecondScan, E::None),
        (
            PreFirstScan | FirstScan | PreSecondScan | SecondScan | Finished,
            Signal::ExtractionFailed,
        ) => Transition::stay(stage),

        (SecondPhoto, Signal::Resolved) => Transition::to(Finished, E::PublishSolution),
        (
            PreFirstScan | FirstScan | FirstPhoto | PreSecondScan | SecondScan | Finished,
            Signal::Resolved,
        ) => Transition::stay(stage),

        (SecondPhoto, Signal::ResolutionFailed) => Transition::to(PreFirstScan, E::DiscardSession),
        (
            PreFirstScan | FirstScan | FirstPhoto | PreSecondScan | SecondScan | Finished,
            Signal::ResolutionFailed,
        ) => Transition::stay(stage),
    }
}
