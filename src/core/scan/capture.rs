//! Runs a coordinator on its own thread.
//!
//! Preview frames arrive through a [`FrameMailbox`] that only ever holds the
//! newest frame; a slow detector skips frames instead of falling behind.
//! User actions and photos go through an unbounded command channel and are
//! never dropped.

use super::{ScanCoordinator, ScanObserver};
use crate::core::detector::Frame;
use crossbeam_channel::{bounded, select, unbounded, Receiver, Sender, TrySendError};
use std::io;
use std::thread::{self, JoinHandle};

/// Latest-frame-only delivery to the capture thread
#[derive(Clone)]
pub struct FrameMailbox {
    sender: Sender<Frame>,
    evict: Receiver<Frame>,
}

impl FrameMailbox {
    /// A mailbox and the receiver the consumer reads from
    pub fn channel() -> (Self, Receiver<Frame>) {
        let (sender, receiver) = bounded(1);
        let mailbox = Self {
            sender,
            evict: receiver.clone(),
        };
        (mailbox, receiver)
    }

    /// Post a frame, evicting an older one nobody has picked up yet.
    ///
    /// Returns true when a frame was evicted.
    pub fn post(&self, frame: Frame) -> bool {
        let mut frame = frame;
        let mut evicted = false;
        loop {
            match self.sender.try_send(frame) {
                Ok(()) => return evicted,
                Err(TrySendError::Full(returned)) => {
                    evicted |= self.evict.try_recv().is_ok();
                    frame = returned;
                }
                Err(TrySendError::Disconnected(_)) => return evicted,
            }
        }
    }
}

/// Requests handled by the capture thread, in the order they were sent
#[derive(Debug)]
pub enum CaptureCommand {
    Start,
    Stop,
    ToggleScanning,
    Reset,
    ToggleFlash,
    /// A full resolution photo taken after the cube was found
    Photo(Frame),
    Shutdown,
}

/// Handle to a coordinator running on a dedicated thread.
///
/// Dropping the handle shuts the thread down and releases the detector.
pub struct CaptureLoop {
    commands: Sender<CaptureCommand>,
    frames: FrameMailbox,
    observer: ScanObserver,
    thread: Option<JoinHandle<()>>,
}

impl CaptureLoop {
    /// Move `coordinator` onto a new thread
    pub fn spawn(coordinator: ScanCoordinator) -> io::Result<Self> {
        let (commands, command_rx) = unbounded();
        let (frames, frame_rx) = FrameMailbox::channel();
        let observer = coordinator.observer();

        let thread = thread::Builder::new()
            .name("cube-capture".to_string())
            .spawn(move || run(coordinator, command_rx, frame_rx))?;

        Ok(Self {
            commands,
            frames,
            observer,
            thread: Some(thread),
        })
    }

    /// A mailbox the camera can post preview frames to
    pub fn frames(&self) -> FrameMailbox {
        self.frames.clone()
    }

    /// Post one preview frame; see [`FrameMailbox::post`]
    pub fn post_frame(&self, frame: Frame) -> bool {
        self.frames.post(frame)
    }

    pub fn observer(&self) -> ScanObserver {
        self.observer.clone()
    }

    /// Queue a command. Returns false once the thread has stopped.
    pub fn send(&self, command: CaptureCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn start(&self) -> bool {
        self.send(CaptureCommand::Start)
    }

    pub fn stop(&self) -> bool {
        self.send(CaptureCommand::Stop)
    }

    pub fn toggle_scanning(&self) -> bool {
        self.send(CaptureCommand::ToggleScanning)
    }

    pub fn reset(&self) -> bool {
        self.send(CaptureCommand::Reset)
    }

    pub fn toggle_flash(&self) -> bool {
        self.send(CaptureCommand::ToggleFlash)
    }

    pub fn take_photo(&self, photo: Frame) -> bool {
        self.send(CaptureCommand::Photo(photo))
    }

    /// Stop the thread after the commands already queued, and wait for it
    pub fn shutdown(mut self) {
        self.join();
    }

    fn join(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        let _ = self.commands.send(CaptureCommand::Shutdown);
        if thread.join().is_err() {
            tracing::error!("capture thread panicked");
        }
    }
}

impl Drop for CaptureLoop {
    fn drop(&mut self) {
        self.join();
    }
}

fn run(
    mut coordinator: ScanCoordinator,
    commands: Receiver<CaptureCommand>,
    frames: Receiver<Frame>,
) {
    tracing::debug!(session_id = %coordinator.session_id(), "capture thread started");

    loop {
        select! {
            recv(commands) -> command => match command {
                Ok(CaptureCommand::Shutdown) | Err(_) => break,
                Ok(command) => dispatch(&mut coordinator, command),
            },
            recv(frames) -> frame => match frame {
                Ok(frame) => coordinator.process_scan_frame(&frame),
                Err(_) => break,
            },
        }
    }

    coordinator.release();
    tracing::debug!("capture thread stopped");
}

fn dispatch(coordinator: &mut ScanCoordinator, command: CaptureCommand) {
    match command {
        CaptureCommand::Start => coordinator.start(),
        CaptureCommand::Stop => coordinator.stop(),
        CaptureCommand::ToggleScanning => coordinator.toggle_scanning(),
        CaptureCommand::Reset => coordinator.reset_scan_progress(),
        CaptureCommand::ToggleFlash => {
            coordinator.toggle_flash();
        }
        CaptureCommand::Photo(photo) => coordinator.process_photo(&photo),
        CaptureCommand::Shutdown => {}
    }
}
