//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to serial, push over the
//! network, record in a test harness.

use crate::metronome::Extreme;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The application service has started (carries the initial tempo,
    /// zero on a cold boot).
    Started { bpm: u32 },

    /// A timing session opened; taps are now being collected.
    TimingStarted,

    /// A timing session closed with enough taps; `bpm` is now the newest
    /// sample.
    SampleRecorded { bpm: u32, taps: u32 },

    /// A timing session closed with too few taps and was discarded.
    SessionDiscarded { taps: u32 },

    /// A timing session closed with zero elapsed time; an invalid slot
    /// was recorded in its place.
    DegenerateSample { taps: u32 },

    /// The tempo was overridden from outside (HTTP PUT).
    TempoOverridden { bpm: u32 },

    /// An extreme was cleared from the history (HTTP DELETE).
    ExtremeCleared {
        which: Extreme,
        bpm: u32,
        slots: usize,
    },
}
