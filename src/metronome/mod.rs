//! Tap-tempo estimation core.
//!
//! Pure logic, no clocks and no pins: callers feed in millisecond
//! timestamps from whatever timebase they own, and read tempo back out.
//! The device loop and the HTTP surface both sit on top of this module.
//!
//! ```text
//!            toggle                summary
//!   ┌──────┐ ------> ┌────────┐ -----------> history (4 slots)
//!   | Idle |         | Timing |                 |
//!   └──────┘ <------ └────────┘                 v
//!      ^      toggle      |               bpm / min / max
//!      |                  | tap(now)
//!      └──────────────────┘
//! ```
//!
//! A timing session only yields a sample when it saw at least
//! [`MIN_SESSION_TAPS`] taps; shorter sessions are discarded without
//! touching the history. A session whose taps all share one timestamp
//! records an [`Sample::Invalid`] slot instead of dividing by zero.

pub mod history;

pub use history::{BpmHistory, Extreme, Sample, HISTORY_SLOTS};

/// Minimum taps a session must collect before it produces a sample.
pub const MIN_SESSION_TAPS: u32 = 4;

// ---------------------------------------------------------------------------
// Tap session
// ---------------------------------------------------------------------------

/// Accumulator for the taps of one timing session.
///
/// Only the first and last timestamps matter for the estimate; the
/// intermediate taps contribute to the count alone.
#[derive(Debug, Clone, Default)]
pub struct TapSession {
    first_tap_ms: Option<u64>,
    last_tap_ms: u64,
    taps: u32,
}

impl TapSession {
    fn reset(&mut self) {
        self.first_tap_ms = None;
        self.last_tap_ms = 0;
        self.taps = 0;
    }

    fn record(&mut self, now_ms: u64) {
        if self.first_tap_ms.is_none() {
            self.first_tap_ms = Some(now_ms);
        }
        self.last_tap_ms = now_ms;
        self.taps += 1;
    }

    pub fn taps(&self) -> u32 {
        self.taps
    }

    /// Milliseconds between the first and last tap, `None` before any tap.
    /// Saturates at zero if the caller's clock ever steps backwards.
    pub fn span_ms(&self) -> Option<u64> {
        self.first_tap_ms
            .map(|first| self.last_tap_ms.saturating_sub(first))
    }
}

// ---------------------------------------------------------------------------
// Stop outcome
// ---------------------------------------------------------------------------

/// What ending a timing session produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// Enough taps over a positive span; the value is now the newest sample.
    Recorded(u32),
    /// Enough taps but zero elapsed time; an invalid slot was recorded.
    Degenerate,
    /// Fewer than [`MIN_SESSION_TAPS`] taps; the history is untouched.
    InsufficientTaps { taps: u32 },
}

// ---------------------------------------------------------------------------
// Metronome
// ---------------------------------------------------------------------------

/// The tempo estimator: one live tap session plus the rolling history.
#[derive(Debug, Clone, Default)]
pub struct Metronome {
    timing: bool,
    session: TapSession,
    history: BpmHistory,
}

impl Metronome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_timing(&self) -> bool {
        self.timing
    }

    /// Taps collected by the current session. Zero while idle.
    pub fn session_taps(&self) -> u32 {
        self.session.taps()
    }

    pub fn history(&self) -> &BpmHistory {
        &self.history
    }

    /// Enter timing mode with a fresh session. Caller must be idle.
    pub fn start_timing(&mut self) {
        debug_assert!(!self.timing, "start_timing while already timing");
        self.session.reset();
        self.timing = true;
        log::debug!("tap session opened");
    }

    /// Record one tap at `now_ms`. Caller must be timing.
    pub fn tap(&mut self, now_ms: u64) {
        debug_assert!(self.timing, "tap outside a timing session");
        self.session.record(now_ms);
        log::debug!("tap {} at {} ms", self.session.taps(), now_ms);
    }

    /// Leave timing mode and fold the session into the history.
    ///
    /// The estimate divides the tap count by the first-to-last span:
    /// `round(taps * 60000 / span_ms)`. All taps count, including the
    /// first, so four taps over 1500 ms read as 160 BPM.
    pub fn stop_timing(&mut self) -> StopOutcome {
        debug_assert!(self.timing, "stop_timing while idle");
        self.timing = false;

        let taps = self.session.taps();
        if taps < MIN_SESSION_TAPS {
            log::warn!("session discarded: only {taps} tap(s)");
            return StopOutcome::InsufficientTaps { taps };
        }

        // span is Some here: taps >= MIN_SESSION_TAPS implies taps > 0.
        let span_ms = self.session.span_ms().unwrap_or(0);
        if span_ms == 0 {
            self.history.push(Sample::Invalid);
            log::warn!("session degenerate: {taps} taps in zero span");
            return StopOutcome::Degenerate;
        }

        let bpm = (f64::from(taps) * 60_000.0 / span_ms as f64).round() as u32;
        self.history.push(Sample::Bpm(bpm));
        log::info!("recorded {bpm} BPM from {taps} taps over {span_ms} ms");
        StopOutcome::Recorded(bpm)
    }

    /// The newest sample's numeric value. Zero until something is recorded.
    pub fn current_bpm(&self) -> u32 {
        self.history.newest().value()
    }

    pub fn min_bpm(&self) -> u32 {
        self.history.extreme_value(Extreme::Min)
    }

    pub fn max_bpm(&self) -> u32 {
        self.history.extreme_value(Extreme::Max)
    }

    /// Clear every slot holding the requested extreme. Returns the value
    /// that was cleared and how many slots held it.
    pub fn delete_extreme(&mut self, which: Extreme) -> (u32, usize) {
        let value = self.history.extreme_value(which);
        let cleared = self.history.clear_value(value);
        log::info!("cleared {cleared} slot(s) holding {value} BPM");
        (value, cleared)
    }

    /// Push an externally supplied tempo as the newest sample.
    pub fn set_bpm(&mut self, bpm: u32) {
        self.history.push(Sample::Bpm(bpm));
        log::info!("tempo override: {bpm} BPM");
    }
}
