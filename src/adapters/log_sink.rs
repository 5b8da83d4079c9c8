//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future network-push adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { bpm } => {
                info!("START | bpm={bpm}");
            }
            AppEvent::TimingStarted => {
                info!("SESSION | timing started");
            }
            AppEvent::SampleRecorded { bpm, taps } => {
                info!("SESSION | recorded bpm={bpm} taps={taps}");
            }
            AppEvent::SessionDiscarded { taps } => {
                warn!("SESSION | discarded, only {taps} tap(s)");
            }
            AppEvent::DegenerateSample { taps } => {
                warn!("SESSION | degenerate, {taps} taps in zero span");
            }
            AppEvent::TempoOverridden { bpm } => {
                info!("TEMPO | override bpm={bpm}");
            }
            AppEvent::ExtremeCleared { which, bpm, slots } => {
                info!("TEMPO | cleared {which:?} bpm={bpm} slots={slots}");
            }
        }
    }
}
