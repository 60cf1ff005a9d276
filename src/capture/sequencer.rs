use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::{
    capture::session::{CaptureSession, CaptureStatus},
    error::CaptureError,
};

/// Events emitted by the sequencer while a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    /// One countdown tick; `remaining` descends strictly to 1
    CountdownTick { remaining: u32 },
    /// The countdown reached zero: grab the current frame now
    CaptureNow,
    /// The session moved to a new lifecycle state
    StatusChanged(CaptureStatus),
}

/// Drives the timed countdown, capture, settle sequence
///
/// One sequencer runs at most one session at a time. The countdown waits are
/// suspending (`tokio::time::sleep`), raced against an explicit cancel
/// signal, so a reset interrupts the pending wait immediately instead of
/// letting a stale tick through.
///
/// The sequencer is a cheap handle: clones share the same session, so a UI
/// layer can hold one for reset while the engine drives the capture.
#[derive(Clone)]
pub struct CaptureSequencer {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<SequencerState>,
    events: mpsc::UnboundedSender<SequencerEvent>,
}

#[derive(Default)]
struct SequencerState {
    session: Option<CaptureSession>,
    /// Bumped on every start and reset; countdown tasks from older epochs
    /// are not allowed to emit or mutate anything.
    epoch: u64,
    cancel: Option<watch::Sender<bool>>,
}

impl CaptureSequencer {
    /// Create a sequencer and the stream of events it will emit
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SequencerEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let sequencer = Self {
            inner: Arc::new(Inner {
                state: Mutex::new(SequencerState::default()),
                events,
            }),
        };
        (sequencer, receiver)
    }

    /// Begin a countdown of `start_count` ticks spaced `tick_interval` apart
    ///
    /// Rejected with [`CaptureError::AlreadyInProgress`] while a session is
    /// counting down or capturing; the running session is unaffected. Must
    /// be called from within a tokio runtime.
    pub fn start(&self, start_count: u32, tick_interval: Duration) -> Result<(), CaptureError> {
        if start_count == 0 {
            return Err(CaptureError::InvalidParameters {
                details: "start_count must be greater than zero".to_string(),
            });
        }
        if tick_interval.is_zero() {
            return Err(CaptureError::InvalidParameters {
                details: "tick_interval must be greater than zero".to_string(),
            });
        }

        let (epoch, cancelled) = {
            let mut state = self.inner.lock_state();
            if state.session.is_some_and(|s| s.status.is_active()) {
                return Err(CaptureError::AlreadyInProgress);
            }

            state.epoch += 1;
            let (cancel, cancelled) = watch::channel(false);
            state.cancel = Some(cancel);
            state.session = Some(CaptureSession::new(start_count));
            self.inner
                .send(SequencerEvent::StatusChanged(CaptureStatus::CountingDown));
            (state.epoch, cancelled)
        };

        info!(start_count, ?tick_interval, "Countdown started");
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner
                .run_countdown(epoch, start_count, tick_interval, cancelled)
                .await;
        });
        Ok(())
    }

    /// Cancel any in-flight session and return to idle
    ///
    /// Always succeeds and is idempotent; calling from idle is a no-op. A
    /// reset received mid-wait cancels the remaining waits and suppresses
    /// every further event of that session, including the capture event.
    pub fn reset(&self) {
        let mut state = self.inner.lock_state();
        state.epoch += 1;
        if let Some(cancel) = state.cancel.take() {
            let _ = cancel.send(true);
        }
        if let Some(session) = state.session.take() {
            if session.status.is_active() {
                info!("Capture session cancelled");
                self.inner
                    .send(SequencerEvent::StatusChanged(CaptureStatus::Cancelled));
            }
        }
    }

    /// Acknowledge that the capture work for the current session is done
    ///
    /// Moves the session from `Capturing` to `Complete`. The acknowledgement
    /// is about sequencing only; whether persistence succeeded is the
    /// caller's concern.
    pub fn finish_capture(&self) -> Result<(), CaptureError> {
        let mut state = self.inner.lock_state();
        match state.session.as_mut() {
            Some(session) if session.status == CaptureStatus::Capturing => {
                session.status = CaptureStatus::Complete;
                state.cancel = None;
                info!("Capture session complete");
                self.inner
                    .send(SequencerEvent::StatusChanged(CaptureStatus::Complete));
                Ok(())
            }
            _ => Err(CaptureError::NotCapturing),
        }
    }

    /// Current lifecycle state; `Idle` when no session exists
    pub fn status(&self) -> CaptureStatus {
        self.inner
            .lock_state()
            .session
            .map_or(CaptureStatus::Idle, |s| s.status)
    }

    /// Snapshot of the current session, if any
    pub fn session(&self) -> Option<CaptureSession> {
        self.inner.lock_state().session
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, SequencerState> {
        self.state.lock().expect("sequencer state lock poisoned")
    }

    fn send(&self, event: SequencerEvent) {
        // The receiver side may already be gone during shutdown
        let _ = self.events.send(event);
    }

    async fn run_countdown(
        self: Arc<Self>,
        epoch: u64,
        start_count: u32,
        tick_interval: Duration,
        mut cancelled: watch::Receiver<bool>,
    ) {
        for remaining in (1..=start_count).rev() {
            if !self.emit_tick(epoch, remaining) {
                return;
            }
            tokio::select! {
                _ = tokio::time::sleep(tick_interval) => {}
                _ = cancelled.changed() => {
                    debug!(remaining, "Countdown wait interrupted");
                    return;
                }
            }
        }
        self.begin_capture(epoch);
    }

    /// Emit one tick, unless the session was replaced or cancelled
    ///
    /// Emission happens under the state lock and is guarded by the epoch, so
    /// a reset can never race a stale tick through.
    fn emit_tick(&self, epoch: u64, remaining: u32) -> bool {
        let mut state = self.lock_state();
        if state.epoch != epoch {
            return false;
        }
        match state.session.as_mut() {
            Some(session) if session.status == CaptureStatus::CountingDown => {
                session.remaining_ticks = remaining;
                debug!(remaining, "Countdown tick");
                self.send(SequencerEvent::CountdownTick { remaining });
                true
            }
            _ => false,
        }
    }

    /// Transition to `Capturing` and fire the capture event exactly once
    fn begin_capture(&self, epoch: u64) {
        let mut state = self.lock_state();
        if state.epoch != epoch {
            return;
        }
        if let Some(session) = state.session.as_mut() {
            if session.status == CaptureStatus::CountingDown {
                session.remaining_ticks = 0;
                session.status = CaptureStatus::Capturing;
                self.send(SequencerEvent::StatusChanged(CaptureStatus::Capturing));
                self.send(SequencerEvent::CaptureNow);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, Instant};

    const TICK: Duration = Duration::from_secs(1);

    async fn next_event(events: &mut mpsc::UnboundedReceiver<SequencerEvent>) -> SequencerEvent {
        events.recv().await.expect("event stream closed")
    }

    /// Receive events until the given one shows up, panicking on anything
    /// unexpected along the way
    async fn expect_event(
        events: &mut mpsc::UnboundedReceiver<SequencerEvent>,
        expected: SequencerEvent,
    ) {
        let event = next_event(events).await;
        assert_eq!(event, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_emits_ordered_ticks_then_one_capture() {
        let (sequencer, mut events) = CaptureSequencer::new();
        let started = Instant::now();

        sequencer.start(3, TICK).unwrap();
        expect_event(
            &mut events,
            SequencerEvent::StatusChanged(CaptureStatus::CountingDown),
        )
        .await;

        let mut tick_times = Vec::new();
        for expected in (1..=3).rev() {
            match next_event(&mut events).await {
                SequencerEvent::CountdownTick { remaining } => {
                    assert_eq!(remaining, expected);
                    tick_times.push(Instant::now());
                }
                other => panic!("expected tick {}, got {:?}", expected, other),
            }
        }

        expect_event(
            &mut events,
            SequencerEvent::StatusChanged(CaptureStatus::Capturing),
        )
        .await;
        expect_event(&mut events, SequencerEvent::CaptureNow).await;

        // Ticks are spaced by at least the interval on the virtual clock
        for pair in tick_times.windows(2) {
            assert!(pair[1] - pair[0] >= TICK);
        }
        assert!(started.elapsed() >= 3 * TICK);

        assert_eq!(sequencer.status(), CaptureStatus::Capturing);
        sequencer.finish_capture().unwrap();
        expect_event(
            &mut events,
            SequencerEvent::StatusChanged(CaptureStatus::Complete),
        )
        .await;
        assert_eq!(sequencer.status(), CaptureStatus::Complete);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_mid_countdown_suppresses_remaining_events() {
        let (sequencer, mut events) = CaptureSequencer::new();
        sequencer.start(3, TICK).unwrap();

        expect_event(
            &mut events,
            SequencerEvent::StatusChanged(CaptureStatus::CountingDown),
        )
        .await;
        expect_event(&mut events, SequencerEvent::CountdownTick { remaining: 3 }).await;
        expect_event(&mut events, SequencerEvent::CountdownTick { remaining: 2 }).await;

        // Reset after "2" but before "1"
        sequencer.reset();
        expect_event(
            &mut events,
            SequencerEvent::StatusChanged(CaptureStatus::Cancelled),
        )
        .await;
        assert_eq!(sequencer.status(), CaptureStatus::Idle);

        // Let any stale timers run out; nothing further may arrive
        advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn start_while_counting_down_is_rejected() {
        let (sequencer, mut events) = CaptureSequencer::new();
        sequencer.start(3, TICK).unwrap();

        expect_event(
            &mut events,
            SequencerEvent::StatusChanged(CaptureStatus::CountingDown),
        )
        .await;
        expect_event(&mut events, SequencerEvent::CountdownTick { remaining: 3 }).await;

        let err = sequencer.start(5, TICK).unwrap_err();
        assert!(matches!(err, CaptureError::AlreadyInProgress));

        // The original countdown keeps going where it left off
        expect_event(&mut events, SequencerEvent::CountdownTick { remaining: 2 }).await;
        expect_event(&mut events, SequencerEvent::CountdownTick { remaining: 1 }).await;
    }

    #[tokio::test]
    async fn reset_from_idle_is_a_noop() {
        let (sequencer, mut events) = CaptureSequencer::new();

        sequencer.reset();
        sequencer.reset();

        assert_eq!(sequencer.status(), CaptureStatus::Idle);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn invalid_parameters_are_rejected_commands() {
        let (sequencer, mut events) = CaptureSequencer::new();

        assert!(matches!(
            sequencer.start(0, TICK),
            Err(CaptureError::InvalidParameters { .. })
        ));
        assert!(matches!(
            sequencer.start(3, Duration::ZERO),
            Err(CaptureError::InvalidParameters { .. })
        ));

        assert_eq!(sequencer.status(), CaptureStatus::Idle);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn finish_capture_requires_a_pending_capture() {
        let (sequencer, _events) = CaptureSequencer::new();
        assert!(matches!(
            sequencer.finish_capture(),
            Err(CaptureError::NotCapturing)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn a_new_session_can_start_after_completion_or_reset() {
        let (sequencer, mut events) = CaptureSequencer::new();

        // First session runs to completion
        sequencer.start(1, TICK).unwrap();
        loop {
            if next_event(&mut events).await == SequencerEvent::CaptureNow {
                break;
            }
        }
        sequencer.finish_capture().unwrap();
        expect_event(
            &mut events,
            SequencerEvent::StatusChanged(CaptureStatus::Complete),
        )
        .await;

        // Starting from Complete is allowed
        sequencer.start(2, TICK).unwrap();
        expect_event(
            &mut events,
            SequencerEvent::StatusChanged(CaptureStatus::CountingDown),
        )
        .await;
        expect_event(&mut events, SequencerEvent::CountdownTick { remaining: 2 }).await;

        // ... and so is starting after a reset
        sequencer.reset();
        expect_event(
            &mut events,
            SequencerEvent::StatusChanged(CaptureStatus::Cancelled),
        )
        .await;
        sequencer.start(1, TICK).unwrap();
        assert_eq!(sequencer.status(), CaptureStatus::CountingDown);
    }

    #[tokio::test(start_paused = true)]
    async fn session_snapshot_tracks_remaining_ticks() {
        let (sequencer, mut events) = CaptureSequencer::new();
        sequencer.start(3, TICK).unwrap();

        expect_event(
            &mut events,
            SequencerEvent::StatusChanged(CaptureStatus::CountingDown),
        )
        .await;
        expect_event(&mut events, SequencerEvent::CountdownTick { remaining: 3 }).await;

        let session = sequencer.session().expect("session should exist");
        assert_eq!(session.remaining_ticks, 3);
        assert_eq!(session.status, CaptureStatus::CountingDown);
    }
}
