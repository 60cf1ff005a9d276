//! # Capture Module
//!
//! The countdown-to-capture state machine.
//!
//! A [`CaptureSequencer`] turns a start command into a timed countdown
//! followed by a single capture event. Ticks are emitted in strictly
//! descending order, the capture event fires exactly once per completed
//! session, and a reset at any point cancels the pending wait and suppresses
//! every further event for that session.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use photo_booth::capture::{CaptureSequencer, SequencerEvent};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let (sequencer, mut events) = CaptureSequencer::new();
//! sequencer.start(3, Duration::from_secs(1))?;
//!
//! while let Some(event) = events.recv().await {
//!     match event {
//!         SequencerEvent::CountdownTick { remaining } => println!("{}", remaining),
//!         SequencerEvent::CaptureNow => {
//!             // grab the frame, filter it, persist it ...
//!             sequencer.finish_capture()?;
//!         }
//!         SequencerEvent::StatusChanged(status) if !status.is_active() => break,
//!         SequencerEvent::StatusChanged(_) => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod sequencer;
pub mod session;

pub use sequencer::{CaptureSequencer, SequencerEvent};
pub use session::{CaptureSession, CaptureStatus};
