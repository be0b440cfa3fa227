//! Event type definitions for the presentation boundary.

use crate::core::detector::{CaptureKind, Hemisphere, ImageGeometry};
use crate::core::scan::ScanStage;
use crate::core::solver::Solution;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All events emitted by a scan session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Session lifecycle and observable state
    Session(SessionEvent),
    /// Camera and detector activity
    Capture(CaptureEvent),
    /// Solver activity
    Solve(SolveEvent),
}

/// Session-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A coordinator was created
    Started {
        session_id: Uuid,
        started_at: DateTime<Utc>,
    },
    /// The scan stage moved
    StageChanged { from: ScanStage, to: ScanStage },
    /// The flash was toggled
    FlashChanged { enabled: bool },
    /// All captured data was thrown away and scanning starts over
    Discarded { reason: DiscardReason },
    /// The detector was torn down; no further events follow
    DetectorReleased,
}

/// Why a session was started over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscardReason {
    /// The user asked to start over
    UserReset,
    /// The detector could not resolve the colors into a cube
    ColorsUnresolved,
    /// The solver reported an error
    SolverFailed { message: String },
}

/// Events from the capture protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CaptureEvent {
    /// The detector found the cube in a scan frame
    CubeFound { hemisphere: Hemisphere },
    /// A photo was read successfully
    HemisphereExtracted { hemisphere: Hemisphere },
    /// A photo could not be read; that hemisphere is scanned again
    ExtractionFailed { hemisphere: Hemisphere },
    /// A photo arrived after the stage stopped waiting for one
    StalePhotoIgnored { stage: ScanStage },
    /// The detector was reconfigured for a new image geometry
    GeometryRefreshed {
        kind: CaptureKind,
        geometry: ImageGeometry,
    },
}

/// Events from the solver hand-off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SolveEvent {
    /// The solver was invoked
    Started { scramble: String },
    /// A solution was found and published
    Completed { solution: Solution, duration_ms: u64 },
    /// The solver gave up or failed
    Failed { message: String },
}

impl std::fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscardReason::UserReset => write!(f, "reset by user"),
            DiscardReason::ColorsUnresolved => write!(f, "colors could not be resolved"),
            DiscardReason::SolverFailed { message } => write!(f, "solver failed: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cube::CubeState;

    #[test]
    fn events_are_serializable() {
        let event = Event::Session(SessionEvent::StageChanged {
            from: ScanStage::FirstScan,
            to: ScanStage::FirstPhoto,
        });

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::Session(SessionEvent::StageChanged { from, to }) => {
                assert_eq!(from, ScanStage::FirstScan);
                assert_eq!(to, ScanStage::FirstPhoto);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn solve_event_carries_solution() {
        let solution = Solution::new(CubeState::solved(), Vec::new());
        let event = Event::Solve(SolveEvent::Completed {
            solution,
            duration_ms: 42,
        });

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("42"));
        assert!(json.contains("initial_state"));
    }

    #[test]
    fn discard_reason_display() {
        let reason = DiscardReason::SolverFailed {
            message: "Error 7".to_string(),
        };
        assert!(reason.to_string().contains("Error 7"));
    }
}
