//! The scan coordinator: drives the detector through both hemispheres and
//! hands the result to the solver.

use super::stage::{transition, Effect, Signal, Transition};
use super::{ScanObserver, ScanStage};
use crate::config::ScanConfig;
use crate::core::detector::{CaptureKind, CubeDetector, Frame, FrameBuffer, ImageGeometry};
use crate::core::solver::{CubeSolver, Solution};
use crate::events::{
    null_sender, CaptureEvent, DiscardReason, Event, EventSender, SessionEvent, SolveEvent,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Builder for a scan coordinator
pub struct ScanCoordinatorBuilder {
    detector: Box<dyn CubeDetector>,
    solver: Arc<dyn CubeSolver>,
    config: ScanConfig,
    events: Option<EventSender>,
}

impl ScanCoordinatorBuilder {
    /// Set the session configuration
    pub fn config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// Publish events to `events`
    pub fn events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Configure the detector and start the session
    pub fn build(self) -> ScanCoordinator {
        let Self {
            mut detector,
            solver,
            config,
            events,
        } = self;

        detector.configure(CaptureKind::Scan, config.scan);
        detector.configure(CaptureKind::Photo, config.photo);
        detector.set_diagnostics_path(config.diagnostics_path.as_deref());

        let session_id = Uuid::new_v4();
        let events = events.unwrap_or_else(null_sender);
        events.send(Event::Session(SessionEvent::Started {
            session_id,
            started_at: Utc::now(),
        }));
        tracing::info!(
            %session_id,
            scan = %config.scan,
            photo = %config.photo,
            "scan session started"
        );

        ScanCoordinator {
            buffer: FrameBuffer::with_capacity(detector.required_buffer_size()),
            detector,
            solver,
            config,
            stage: ScanStage::PreFirstScan,
            observer: ScanObserver::new(session_id),
            events,
            pending_solution: None,
            discard_reason: None,
            released: false,
        }
    }
}

/// Owns one scan session.
///
/// All methods are called from the capture thread; other threads read the
/// session through a [`ScanObserver`]. Detector and solver failures never
/// surface as errors: the stage moves back instead. The detector is
/// released exactly once, by [`ScanCoordinator::release`] or on drop.
pub struct ScanCoordinator {
    detector: Box<dyn CubeDetector>,
    solver: Arc<dyn CubeSolver>,
    config: ScanConfig,
    buffer: FrameBuffer,
    stage: ScanStage,
    observer: ScanObserver,
    events: EventSender,
    pending_solution: Option<(Solution, u64)>,
    discard_reason: Option<DiscardReason>,
    released: bool,
}

impl ScanCoordinator {
    pub fn builder(
        detector: Box<dyn CubeDetector>,
        solver: Arc<dyn CubeSolver>,
    ) -> ScanCoordinatorBuilder {
        ScanCoordinatorBuilder {
            detector,
            solver,
            config: ScanConfig::default(),
            events: None,
        }
    }

    pub fn stage(&self) -> ScanStage {
        self.stage
    }

    /// A handle other threads can read the session through
    pub fn observer(&self) -> ScanObserver {
        self.observer.clone()
    }

    pub fn solution(&self) -> Option<Arc<Solution>> {
        self.observer.solution()
    }

    pub fn flash_enabled(&self) -> bool {
        self.observer.flash_enabled()
    }

    pub fn session_id(&self) -> Uuid {
        self.observer.session_id()
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Start scanning the next hemisphere
    pub fn start(&mut self) {
        self.apply(Signal::Start);
    }

    /// Stop scanning the current hemisphere
    pub fn stop(&mut self) {
        self.apply(Signal::Stop);
    }

    /// Start when idle, stop otherwise; a single button drives both
    pub fn toggle_scanning(&mut self) {
        let signal = if self.stage.is_idle() {
            Signal::Start
        } else {
            Signal::Stop
        };
        self.apply(signal);
    }

    /// Throw away the session and return to the first hemisphere
    pub fn reset_scan_progress(&mut self) {
        self.discard_reason = Some(DiscardReason::UserReset);
        self.apply(Signal::Reset);
    }

    /// Flip the flash flag. The stage is unaffected.
    pub fn toggle_flash(&mut self) -> bool {
        let enabled = !self.observer.flash_enabled();
        self.observer.set_flash_enabled(enabled);
        self.events
            .send(Event::Session(SessionEvent::FlashChanged { enabled }));
        enabled
    }

    /// Feed one preview frame to the detector.
    ///
    /// Ignored unless a hemisphere is being scanned right now.
    pub fn process_scan_frame(&mut self, frame: &Frame) {
        if self.released {
            tracing::trace!("frame ignored after release");
            return;
        }
        let Some(hemisphere) = self.stage.hemisphere().filter(|_| self.stage.is_scanning()) else {
            tracing::trace!(stage = ?self.stage, "frame ignored");
            return;
        };

        self.refresh_geometry(CaptureKind::Scan, frame.geometry);
        self.buffer.load(&frame.data);

        if self.detector.scan_cube(&mut self.buffer) {
            tracing::debug!(%hemisphere, "cube found");
            self.events
                .send(Event::Capture(CaptureEvent::CubeFound { hemisphere }));
            self.apply(Signal::CubeFound);
        }
    }

    /// Feed a full resolution photo to the detector.
    ///
    /// The photo is checked against the stage at the time it is processed;
    /// a photo arriving after a stop or reset is dropped.
    pub fn process_photo(&mut self, photo: &Frame) {
        if self.released {
            tracing::debug!("photo ignored after release");
            return;
        }
        let Some(hemisphere) = self.stage.hemisphere().filter(|_| self.stage.expects_photo()) else {
            tracing::debug!(stage = ?self.stage, "stale photo ignored");
            self.events.send(Event::Capture(CaptureEvent::StalePhotoIgnored {
                stage: self.stage,
            }));
            return;
        };

        self.refresh_geometry(CaptureKind::Photo, photo.geometry);

        if self.detector.extract_facelets(&self.buffer, photo) {
            self.events
                .send(Event::Capture(CaptureEvent::HemisphereExtracted { hemisphere }));
            self.apply(Signal::HemisphereExtracted);
        } else {
            tracing::debug!(%hemisphere, "facelet extraction failed, scanning again");
            self.events
                .send(Event::Capture(CaptureEvent::ExtractionFailed { hemisphere }));
            self.apply(Signal::ExtractionFailed);
        }
    }

    /// Tear the detector down.
    ///
    /// Later calls do nothing, and the session is frozen: every signal is
    /// ignored and the stage stays where it was.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.detector.release();
        tracing::info!(session_id = %self.session_id(), "detector released");
        self.events
            .send(Event::Session(SessionEvent::DetectorReleased));
    }

    fn apply(&mut self, signal: Signal) {
        if self.released {
            tracing::debug!(?signal, stage = ?self.stage, "signal ignored after release");
            return;
        }
        let Transition { next, effect } = transition(self.stage, signal);
        let follow_up = self.run_effect(effect);
        self.set_stage(next);
        if let Some(signal) = follow_up {
            self.apply(signal);
        }
    }

    /// Effects run before the new stage is published, so a reader that sees
    /// `Finished` also sees the solution.
    fn run_effect(&mut self, effect: Effect) -> Option<Signal> {
        match effect {
            Effect::None => None,
            Effect::ConfigureHemisphere(hemisphere) => {
                self.detector.set_hemisphere(hemisphere);
                None
            }
            Effect::DiscardCapture => {
                self.buffer.clear();
                None
            }
            Effect::RetainHemisphere(hemisphere) => {
                tracing::info!(%hemisphere, "hemisphere captured");
                None
            }
            Effect::ResolveCube => Some(self.resolve_cube()),
            Effect::PublishSolution => {
                if let Some((solution, duration_ms)) = self.pending_solution.take() {
                    tracing::info!(
                        moves = solution.move_count(),
                        sequence = %solution.move_sequence(),
                        duration_ms,
                        "solution published"
                    );
                    self.observer.set_solution(Some(Arc::new(solution.clone())));
                    self.events.send(Event::Solve(SolveEvent::Completed {
                        solution,
                        duration_ms,
                    }));
                }
                None
            }
            Effect::DiscardSession => {
                let reason = self
                    .discard_reason
                    .take()
                    .unwrap_or(DiscardReason::UserReset);
                tracing::warn!(%reason, "scan session discarded");
                self.pending_solution = None;
                self.observer.set_solution(None);
                self.buffer.clear();
                self.events
                    .send(Event::Session(SessionEvent::Discarded { reason }));
                None
            }
        }
    }

    /// Resolve colors and run the solver once. Blocks for as long as the
    /// solver searches.
    fn resolve_cube(&mut self) -> Signal {
        let Some(state) = self.detector.analyze_colors(&self.buffer) else {
            self.discard_reason = Some(DiscardReason::ColorsUnresolved);
            return Signal::ResolutionFailed;
        };

        let scramble = state.to_solver_scramble();
        tracing::debug!(%scramble, "solving");
        self.events
            .send(Event::Solve(SolveEvent::Started { scramble }));

        let started = Instant::now();
        match Solution::compute(state, self.solver.as_ref(), &self.config.solver) {
            Ok(solution) => {
                let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                self.pending_solution = Some((solution, duration_ms));
                Signal::Resolved
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(error = %message, "solver failed");
                self.events.send(Event::Solve(SolveEvent::Failed {
                    message: message.clone(),
                }));
                self.discard_reason = Some(DiscardReason::SolverFailed { message });
                Signal::ResolutionFailed
            }
        }
    }

    /// Reconfigure the detector when an image does not match its geometry.
    ///
    /// A new scan geometry reallocates the frame buffer. A new photo
    /// geometry only grows it, since the buffer still holds the scan the
    /// extraction depends on.
    fn refresh_geometry(&mut self, kind: CaptureKind, geometry: ImageGeometry) {
        if self.detector.geometry(kind) == geometry {
            return;
        }

        tracing::debug!(%kind, %geometry, "reconfiguring detector");
        self.detector.configure(kind, geometry);
        let required = self.detector.required_buffer_size();
        match kind {
            CaptureKind::Scan => self.buffer.reallocate(required),
            CaptureKind::Photo => self.buffer.ensure_capacity(required),
        }
        self.events
            .send(Event::Capture(CaptureEvent::GeometryRefreshed { kind, geometry }));
    }

    fn set_stage(&mut self, next: ScanStage) {
        if next == self.stage {
            return;
        }
        let from = std::mem::replace(&mut self.stage, next);
        tracing::debug!(from = ?from, to = ?next, "scan stage changed");
        self.observer.set_stage(next);
        self.events
            .send(Event::Session(SessionEvent::StageChanged { from, to: next }));
    }
}

impl Drop for ScanCoordinator {
    fn drop(&mut self) {
        self.release();
    }
}
