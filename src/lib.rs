//! # Photo-Booth
//!
//! A photo-booth capture pipeline: countdown sequencing, classic color
//! filters, and lossless photo persistence.
//!
//! The library drives a user-triggered capture as a deterministic pipeline:
//! a cancelable countdown, a single frame grab, one of four pure color
//! transforms, and PNG encoding for storage. Video devices, widgets, and
//! audio cues stay outside; the core exchanges pixel buffers and events with
//! them through small collaborator traits.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use photo_booth::{
//!     booth::{BoothEngine, DirectorySink, LogPresenter, StillImageSource},
//!     config::Config,
//!     filter::FilterKind,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let source = StillImageSource::open("selfie.png")?;
//! let sink = DirectorySink::new("photos");
//!
//! let mut engine = BoothEngine::new(
//!     config,
//!     Box::new(source),
//!     Box::new(sink),
//!     Box::new(LogPresenter),
//! );
//! engine.select_filter(FilterKind::Sepia);
//! engine.run_capture().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`frame`] - Pixel buffers and lossless encoding
//! - [`filter`] - The closed set of color transforms
//! - [`capture`] - The countdown-to-capture state machine
//! - [`booth`] - Orchestration engine and collaborator traits
//! - [`config`] - Configuration management
//!
//! ## Bringing Your Own Camera
//!
//! Any live source can feed the booth by implementing the
//! [`FrameSource`](booth::FrameSource) trait:
//!
//! ```rust,no_run
//! use photo_booth::{booth::FrameSource, error::Result, frame::PixelBuffer};
//!
//! struct MyWebcam;
//!
//! impl FrameSource for MyWebcam {
//!     fn current_frame(&self) -> Result<PixelBuffer> {
//!         // Pull the latest frame from the device
//!         Ok(PixelBuffer::new_black(256, 256))
//!     }
//! }
//! ```

pub mod booth;
pub mod capture;
pub mod config;
pub mod error;
pub mod filter;
pub mod frame;

// Re-export commonly used types for convenience
pub use crate::{
    booth::BoothEngine,
    capture::{CaptureSequencer, CaptureStatus, SequencerEvent},
    config::Config,
    error::{BoothError, Result},
    filter::FilterKind,
    frame::PixelBuffer,
};
