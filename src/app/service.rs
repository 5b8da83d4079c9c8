//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the metronome, the input poller, and the blink
//! scheduling.  It exposes a clean, hardware-agnostic API.  All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!   InputPort ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!                 │        AppService        │
//! IndicatorPort ◀─│  poller · tempo · blink  │ ◀── AppCommand (HTTP)
//!                 └─────────────────────────┘
//! ```
//!
//! The device loop drives [`tick`](AppService::tick) at the poll
//! interval; the HTTP adapter calls the query methods and
//! [`handle_command`](AppService::handle_command) under the same mutex.

use log::info;

use crate::config::SystemConfig;
use crate::drivers::blinker::{BlinkEngine, OneShotPulse};
use crate::drivers::button::{InputAction, InputPoller};
use crate::metronome::{Extreme, Metronome, StopOutcome};

use super::commands::{AppCommand, CommandReply};
use super::events::AppEvent;
use super::ports::{EventSink, IndicatorPort, InputPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    metronome: Metronome,
    poller: InputPoller,
    blink: BlinkEngine,
    tap_flash: OneShotPulse,
}

impl AppService {
    /// Construct the service from configuration.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            metronome: Metronome::new(),
            poller: InputPoller::new(u64::from(config.settle_delay_ms)),
            blink: BlinkEngine::new(u64::from(config.pulse_hold_ms)),
            tap_flash: OneShotPulse::new(u64::from(config.pulse_hold_ms)),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce startup. The tempo is zero until the first session.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        let bpm = self.metronome.current_bpm();
        sink.emit(&AppEvent::Started { bpm });
        info!("AppService started at {bpm} BPM");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: sample buttons → classify → act →
    /// drive LEDs.
    ///
    /// The `hw` parameter satisfies **both** [`InputPort`] and
    /// [`IndicatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl InputPort + IndicatorPort),
        sink: &mut impl EventSink,
    ) {
        // 1. Sample both button levels via InputPort
        let mode_level = hw.mode_pressed();
        let tap_level = hw.tap_pressed();

        // 2. Classify and act
        let action = self
            .poller
            .poll(now_ms, mode_level, tap_level, self.metronome.is_timing());
        match action {
            Some(InputAction::ToggleMode) => self.toggle_mode(sink),
            Some(InputAction::Tap) => {
                self.metronome.tap(now_ms);
                self.tap_flash.trigger(now_ms);
            }
            None => {}
        }

        // 3. Drive both LEDs via IndicatorPort
        let beat = self.blink.tick(now_ms, self.metronome.is_timing());
        hw.set_beat_led(beat);
        hw.set_tap_led(self.tap_flash.level(now_ms));
    }

    /// Flip between idle and timing, folding a finished session into the
    /// history and retuning the blink engine from the newest sample.
    fn toggle_mode(&mut self, sink: &mut impl EventSink) {
        if !self.metronome.is_timing() {
            self.metronome.start_timing();
            sink.emit(&AppEvent::TimingStarted);
            return;
        }

        let taps = self.metronome.session_taps();
        let event = match self.metronome.stop_timing() {
            StopOutcome::Recorded(bpm) => AppEvent::SampleRecorded { bpm, taps },
            StopOutcome::Degenerate => AppEvent::DegenerateSample { taps },
            StopOutcome::InsufficientTaps { taps } => AppEvent::SessionDiscarded { taps },
        };
        // The blink always re-reads the newest sample, even after a
        // discarded session: an earlier tempo keeps blinking, and a
        // degenerate one silences the beat.
        self.blink.set_tempo(self.metronome.current_bpm());
        sink.emit(&event);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (from the HTTP adapter).
    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) -> CommandReply {
        match cmd {
            AppCommand::OverrideTempo(bpm) => {
                self.metronome.set_bpm(bpm);
                self.blink.set_tempo(self.metronome.current_bpm());
                sink.emit(&AppEvent::TempoOverridden { bpm });
                CommandReply::TempoSet
            }
            AppCommand::ClearExtreme(which) => {
                let (bpm, slots) = self.metronome.delete_extreme(which);
                self.blink.set_tempo(self.metronome.current_bpm());
                sink.emit(&AppEvent::ExtremeCleared { which, bpm, slots });
                CommandReply::ExtremeCleared { bpm, slots }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Newest sample's value; zero until something is recorded.
    pub fn current_bpm(&self) -> u32 {
        self.metronome.current_bpm()
    }

    /// Smallest value in the history window.
    pub fn min_bpm(&self) -> u32 {
        self.metronome.min_bpm()
    }

    /// Largest value in the history window.
    pub fn max_bpm(&self) -> u32 {
        self.metronome.max_bpm()
    }

    /// Extreme value for `which`, one call shared by both query routes.
    pub fn extreme_bpm(&self, which: Extreme) -> u32 {
        match which {
            Extreme::Min => self.min_bpm(),
            Extreme::Max => self.max_bpm(),
        }
    }

    /// Whether a timing session is open.
    pub fn is_timing(&self) -> bool {
        self.metronome.is_timing()
    }
}
