//! Integration tests for the threaded capture loop.

mod common;

use common::{photo, scan_frame, small_config, DetectorProbe, ScriptedDetector, ScriptedSolver};
use rubiks_scan_solve::core::cube::CubeState;
use rubiks_scan_solve::core::scan::{CaptureLoop, ScanCoordinator, ScanObserver, ScanStage};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn spawn_loop() -> (CaptureLoop, DetectorProbe) {
    let (detector, probe) = ScriptedDetector::new();
    probe.set_analysis(Some(CubeState::solved()));
    let coordinator = ScanCoordinator::builder(
        Box::new(detector),
        Arc::new(ScriptedSolver::answering("")),
    )
    .config(small_config())
    .build();

    (CaptureLoop::spawn(coordinator).unwrap(), probe)
}

fn wait_for(observer: &ScanObserver, stage: ScanStage) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while observer.stage() != stage {
        assert!(
            Instant::now() < deadline,
            "timed out waiting for {:?}, still {:?}",
            stage,
            observer.stage()
        );
        thread::sleep(Duration::from_millis(2));
    }
}

#[test]
fn loop_runs_full_session() {
    let (capture, probe) = spawn_loop();
    let observer = capture.observer();

    capture.start();
    wait_for(&observer, ScanStage::FirstScan);
    capture.post_frame(scan_frame(1));
    wait_for(&observer, ScanStage::FirstPhoto);
    capture.take_photo(photo());
    wait_for(&observer, ScanStage::PreSecondScan);

    capture.start();
    wait_for(&observer, ScanStage::SecondScan);
    capture.post_frame(scan_frame(2));
    wait_for(&observer, ScanStage::SecondPhoto);
    capture.take_photo(photo());
    wait_for(&observer, ScanStage::Finished);

    let solution = observer.solution().expect("solution published");
    assert_eq!(solution.move_count(), 0);

    capture.shutdown();
    let state = probe.state();
    assert_eq!(state.analyze_calls, 1);
    assert_eq!(state.release_calls, 1);
}

#[test]
fn queued_commands_run_before_shutdown() {
    let (capture, probe) = spawn_loop();
    let observer = capture.observer();

    capture.toggle_scanning();
    capture.toggle_flash();
    capture.toggle_scanning();
    capture.toggle_scanning();
    capture.shutdown();

    assert_eq!(observer.stage(), ScanStage::FirstScan);
    assert!(observer.flash_enabled());
    assert_eq!(probe.state().release_calls, 1);
}

#[test]
fn frames_before_start_are_ignored() {
    let (capture, probe) = spawn_loop();
    let observer = capture.observer();

    capture.post_frame(scan_frame(1));
    capture.reset();
    capture.shutdown();

    assert_eq!(observer.stage(), ScanStage::PreFirstScan);
    assert_eq!(probe.state().scan_calls, 0);
}

#[test]
fn photo_after_stop_is_dropped() {
    let (capture, probe) = spawn_loop();
    let observer = capture.observer();

    capture.start();
    wait_for(&observer, ScanStage::FirstScan);
    capture.post_frame(scan_frame(1));
    wait_for(&observer, ScanStage::FirstPhoto);

    capture.stop();
    capture.take_photo(photo());
    capture.shutdown();

    assert_eq!(observer.stage(), ScanStage::PreFirstScan);
    assert_eq!(probe.state().extract_calls, 0);
}

#[test]
fn dropping_handle_releases_detector() {
    let (capture, probe) = spawn_loop();
    let observer = capture.observer();

    drop(capture);

    assert_eq!(probe.state().release_calls, 1);
    assert_eq!(observer.stage(), ScanStage::PreFirstScan);
}

#[test]
fn mailbox_from_handle_feeds_the_loop() {
    let (capture, _probe) = spawn_loop();
    let observer = capture.observer();
    let frames = capture.frames();

    capture.start();
    wait_for(&observer, ScanStage::FirstScan);
    let camera = thread::spawn(move || {
        frames.post(scan_frame(9));
    });
    camera.join().unwrap();

    wait_for(&observer, ScanStage::FirstPhoto);
}
