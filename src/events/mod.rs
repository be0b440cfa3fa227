//! # Events Module
//!
//! Event stream between the scan core and whatever presents it.
//!
//! ## Design
//! The coordinator publishes every stage change, capture result and solver
//! outcome through a channel. A UI subscribes to the stream, or reads the
//! latest values from a `ScanObserver` when it only needs snapshots.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::Session(SessionEvent::StageChanged { to, .. }) => println!("{}", to),
//!             Event::Solve(SolveEvent::Completed { solution, .. }) => {
//!                 println!("{}", solution.move_sequence())
//!             }
//!             _ => {}
//!         }
//!     }
//! });
//!
//! let coordinator = ScanCoordinator::builder(detector, solver)
//!     .config(config)
//!     .events(sender)
//!     .build();
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
