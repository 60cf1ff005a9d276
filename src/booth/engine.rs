use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    booth::traits::{FrameSource, PhotoSink, Presenter},
    capture::{CaptureSequencer, CaptureStatus, SequencerEvent},
    config::Config,
    error::Result,
    filter::{self, FilterKind},
    frame,
};

/// Main engine that orchestrates one photo-booth capture run
///
/// The engine drives a clear pipeline:
/// 1. Countdown - the sequencer emits ticks at the configured interval
/// 2. Capture - the frame source supplies the current raw frame
/// 3. Filter - the selected transform produces the final photo
/// 4. Persist - the photo is encoded and handed to the sink
///
/// Countdown values, state transitions, and the finished photo are forwarded
/// to the presenter along the way.
pub struct BoothEngine {
    config: Config,
    selected_filter: FilterKind,
    sequencer: CaptureSequencer,
    events: mpsc::UnboundedReceiver<SequencerEvent>,
    source: Box<dyn FrameSource>,
    sink: Box<dyn PhotoSink>,
    presenter: Box<dyn Presenter>,
}

impl BoothEngine {
    /// Create an engine with the given configuration and collaborators
    pub fn new(
        config: Config,
        source: Box<dyn FrameSource>,
        sink: Box<dyn PhotoSink>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        let (sequencer, events) = CaptureSequencer::new();
        let selected_filter = config.filter.default;
        Self {
            config,
            selected_filter,
            sequencer,
            events,
            source,
            sink,
            presenter,
        }
    }

    /// Select the active filter, replacing the previous selection
    pub fn select_filter(&mut self, kind: FilterKind) {
        if kind != self.selected_filter {
            info!("Filter selected: {}", kind);
        }
        self.selected_filter = kind;
    }

    /// The currently active filter
    pub fn selected_filter(&self) -> FilterKind {
        self.selected_filter
    }

    /// Current state of the capture sequencer
    pub fn status(&self) -> CaptureStatus {
        self.sequencer.status()
    }

    /// A sequencer handle for issuing resets from outside the engine
    ///
    /// Clones share the session, so a UI layer can cancel a countdown while
    /// [`run_capture`](Self::run_capture) is awaiting it.
    pub fn sequencer_handle(&self) -> CaptureSequencer {
        self.sequencer.clone()
    }

    /// Abandon any in-flight session and return the booth to idle
    pub fn reset(&self) {
        self.sequencer.reset();
    }

    /// Run one full countdown, capture, persist cycle
    ///
    /// Returns once the session completes or is cancelled. An encoding or
    /// storage failure is surfaced as an error, but the session still
    /// settles in `Complete` first: the sequencing contract is independent
    /// of whether persistence succeeded.
    pub async fn run_capture(&mut self) -> Result<()> {
        info!("📸 Starting capture session");
        info!("   Filter: {}", self.selected_filter);
        info!("   Countdown: {} ticks", self.config.capture.start_count);

        let interval = Duration::from_millis(self.config.capture.tick_interval_ms);
        self.sequencer
            .start(self.config.capture.start_count, interval)?;

        let mut outcome = Ok(());
        while let Some(event) = self.events.recv().await {
            match event {
                SequencerEvent::CountdownTick { remaining } => {
                    debug!(remaining, "Countdown");
                    self.presenter.countdown_tick(remaining);
                }
                SequencerEvent::CaptureNow => {
                    outcome = self.capture_photo();
                }
                SequencerEvent::StatusChanged(status) => {
                    self.presenter.status_changed(status);
                    match status {
                        CaptureStatus::Complete => {
                            info!("🎉 Capture session complete");
                            break;
                        }
                        CaptureStatus::Cancelled => {
                            info!("Capture session cancelled");
                            break;
                        }
                        _ => {}
                    }
                }
            }
        }
        outcome
    }

    /// Grab, filter, acknowledge, then encode and persist
    fn capture_photo(&mut self) -> Result<()> {
        let raw = match self.source.current_frame() {
            Ok(frame) => frame,
            Err(e) => {
                // A failed grab abandons the session, same as a reset
                warn!("Frame source failed: {}", e);
                self.sequencer.reset();
                return Err(e);
            }
        };

        info!(
            "📷 Capturing {}x{} frame with {} filter",
            raw.width(),
            raw.height(),
            self.selected_filter
        );
        let photo = filter::apply(&raw, self.selected_filter);
        self.presenter.photo_ready(&photo);

        // Settle the session before persistence: completion does not depend
        // on whether the encode or the sink succeeds
        self.sequencer.finish_capture()?;

        let bytes = frame::encode_png(&photo)?;
        self.sink.store(&self.config.output.file_name, &bytes)?;
        Ok(())
    }
}
