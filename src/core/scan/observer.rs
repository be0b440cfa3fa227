//! Read side of a scan session.
//!
//! The coordinator is the only writer. Readers on other threads see the
//! latest value of each field; intermediate values written in a burst may be
//! skipped.

use super::ScanStage;
use crate::core::solver::Solution;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

struct SharedState {
    session_id: Uuid,
    stage: RwLock<ScanStage>,
    solution: RwLock<Option<Arc<Solution>>>,
    flash_enabled: AtomicBool,
}

/// Snapshot access to a running session
#[derive(Clone)]
pub struct ScanObserver {
    shared: Arc<SharedState>,
}

impl ScanObserver {
    pub(crate) fn new(session_id: Uuid) -> Self {
        Self {
            shared: Arc::new(SharedState {
                session_id,
                stage: RwLock::new(ScanStage::PreFirstScan),
                solution: RwLock::new(None),
                flash_enabled: AtomicBool::new(false),
            }),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.shared.session_id
    }

    pub fn stage(&self) -> ScanStage {
        *self
            .shared
            .stage
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// The published solution, present once the session has finished
    pub fn solution(&self) -> Option<Arc<Solution>> {
        self.shared
            .solution
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn flash_enabled(&self) -> bool {
        self.shared.flash_enabled.load(Ordering::Acquire)
    }

    pub(crate) fn set_stage(&self, stage: ScanStage) {
        *self
            .shared
            .stage
            .write()
            .unwrap_or_else(PoisonError::into_inner) = stage;
    }

    pub(crate) fn set_solution(&self, solution: Option<Arc<Solution>>) {
        *self
            .shared
            .solution
            .write()
            .unwrap_or_else(PoisonError::into_inner) = solution;
    }

    pub(crate) fn set_flash_enabled(&self, enabled: bool) {
        self.shared.flash_enabled.store(enabled, Ordering::Release);
    }
}

impl std::fmt::Debug for ScanObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanObserver")
            .field("session_id", &self.session_id())
            .field("stage", &self.stage())
            .field("flash_enabled", &self.flash_enabled())
            .field("has_solution", &self.solution().is_some())
            .finish()
    }
}
