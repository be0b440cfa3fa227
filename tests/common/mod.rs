//! Scripted detector and solver shared by the integration tests.
#![allow(dead_code)]

use rubiks_scan_solve::config::ScanConfig;
use rubiks_scan_solve::core::cube::CubeState;
use rubiks_scan_solve::core::detector::{
    CaptureKind, CubeDetector, Frame, FrameBuffer, Hemisphere, ImageGeometry,
};
use rubiks_scan_solve::core::solver::{CubeSolver, SolverConfig};
use rubiks_scan_solve::error::SolverError;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Small geometries so tests never allocate camera-sized buffers
pub fn small_config() -> ScanConfig {
    ScanConfig {
        scan: ImageGeometry::new(90, 8, 6),
        photo: ImageGeometry::new(90, 16, 12),
        ..ScanConfig::default()
    }
}

pub fn scan_frame(tag: u8) -> Frame {
    Frame::new(small_config().scan, vec![tag; 4])
}

pub fn photo() -> Frame {
    Frame::new(small_config().photo, vec![0xAA; 8])
}

/// NV21 size of the scan stream plus a quarter of the photo
pub fn required_for(scan: ImageGeometry, photo: ImageGeometry) -> usize {
    let scan = (scan.width * scan.height * 3 / 2) as usize;
    let photo = (photo.width * photo.height / 4) as usize;
    scan.max(photo)
}

/// Everything the detector saw, plus the answers it will give
#[derive(Debug)]
pub struct DetectorState {
    pub scan_geometry: ImageGeometry,
    pub photo_geometry: ImageGeometry,
    pub configured: Vec<(CaptureKind, ImageGeometry)>,
    pub hemispheres: Vec<Hemisphere>,
    pub diagnostics_path: Option<PathBuf>,
    pub scan_calls: usize,
    pub extract_calls: usize,
    pub analyze_calls: usize,
    pub release_calls: usize,
    /// Buffer contents and capacity seen by each extraction
    pub extract_buffers: Vec<(Vec<u8>, usize)>,
    pub scan_results: VecDeque<bool>,
    pub extract_results: VecDeque<bool>,
    pub analyze_result: Option<CubeState>,
}

impl Default for DetectorState {
    fn default() -> Self {
        Self {
            scan_geometry: ImageGeometry::default_scan(),
            photo_geometry: ImageGeometry::default_photo(),
            configured: Vec::new(),
            hemispheres: Vec::new(),
            diagnostics_path: None,
            scan_calls: 0,
            extract_calls: 0,
            analyze_calls: 0,
            release_calls: 0,
            extract_buffers: Vec::new(),
            scan_results: VecDeque::new(),
            extract_results: VecDeque::new(),
            analyze_result: Some(CubeState::solved()),
        }
    }
}

/// Test-side view of a [`ScriptedDetector`]
#[derive(Clone, Default)]
pub struct DetectorProbe {
    state: Arc<Mutex<DetectorState>>,
}

impl DetectorProbe {
    pub fn state(&self) -> MutexGuard<'_, DetectorState> {
        self.state.lock().unwrap()
    }

    pub fn queue_scans(&self, results: &[bool]) {
        self.state().scan_results.extend(results);
    }

    pub fn queue_extractions(&self, results: &[bool]) {
        self.state().extract_results.extend(results);
    }

    pub fn set_analysis(&self, result: Option<CubeState>) {
        self.state().analyze_result = result;
    }
}

/// Detector answering from queued results; an empty queue answers true
pub struct ScriptedDetector {
    state: Arc<Mutex<DetectorState>>,
}

impl ScriptedDetector {
    pub fn new() -> (Self, DetectorProbe) {
        let probe = DetectorProbe::default();
        (
            Self {
                state: probe.state.clone(),
            },
            probe,
        )
    }

    fn state(&self) -> MutexGuard<'_, DetectorState> {
        self.state.lock().unwrap()
    }
}

impl CubeDetector for ScriptedDetector {
    fn configure(&mut self, kind: CaptureKind, geometry: ImageGeometry) {
        let mut state = self.state();
        match kind {
            CaptureKind::Scan => state.scan_geometry = geometry,
            CaptureKind::Photo => state.photo_geometry = geometry,
        }
        state.configured.push((kind, geometry));
    }

    fn geometry(&self, kind: CaptureKind) -> ImageGeometry {
        let state = self.state();
        match kind {
            CaptureKind::Scan => state.scan_geometry,
            CaptureKind::Photo => state.photo_geometry,
        }
    }

    fn required_buffer_size(&self) -> usize {
        let state = self.state();
        required_for(state.scan_geometry, state.photo_geometry)
    }

    fn set_hemisphere(&mut self, hemisphere: Hemisphere) {
        self.state().hemispheres.push(hemisphere);
    }

    fn set_diagnostics_path(&mut self, path: Option<&Path>) {
        self.state().diagnostics_path = path.map(Path::to_path_buf);
    }

    fn scan_cube(&mut self, _buffer: &mut FrameBuffer) -> bool {
        let mut state = self.state();
        state.scan_calls += 1;
        state.scan_results.pop_front().unwrap_or(true)
    }

    fn extract_facelets(&mut self, buffer: &FrameBuffer, _photo: &Frame) -> bool {
        let mut state = self.state();
        state.extract_calls += 1;
        state
            .extract_buffers
            .push((buffer.as_slice().to_vec(), buffer.capacity()));
        state.extract_results.pop_front().unwrap_or(true)
    }

    fn analyze_colors(&mut self, _buffer: &FrameBuffer) -> Option<CubeState> {
        let mut state = self.state();
        state.analyze_calls += 1;
        state.analyze_result.clone()
    }

    fn release(&mut self) {
        self.state().release_calls += 1;
    }
}

/// Solver with a fixed answer that records every scramble it receives
pub struct ScriptedSolver {
    answer: Result<String, SolverError>,
    calls: Arc<Mutex<Vec<(String, SolverConfig)>>>,
}

impl ScriptedSolver {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Ok(answer.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn failing(error: SolverError) -> Self {
        Self {
            answer: Err(error),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<(String, SolverConfig)>>> {
        self.calls.clone()
    }
}

impl CubeSolver for ScriptedSolver {
    fn solve(&self, scramble: &str, config: &SolverConfig) -> Result<String, SolverError> {
        self.calls
            .lock()
            .unwrap()
            .push((scramble.to_string(), *config));
        self.answer.clone()
    }
}
