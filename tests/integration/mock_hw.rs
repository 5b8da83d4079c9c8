//! Mock hardware adapter for integration tests.
//!
//! Stands in for the GPIO adapter on both sides of the port boundary:
//! tests script the button levels and read back every LED transition
//! without touching real registers.

use tapmetro::app::events::AppEvent;
use tapmetro::app::ports::{EventSink, IndicatorPort, InputPort};

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Scripted button levels, sampled by the service each tick.
    pub mode: bool,
    pub tap: bool,
    /// Last level written to each LED.
    pub beat_led: bool,
    pub tap_led: bool,
    /// Rising edges seen on each LED since construction.
    pub beat_rises: u32,
    pub tap_flashes: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            mode: false,
            tap: false,
            beat_led: false,
            tap_led: false,
            beat_rises: 0,
            tap_flashes: 0,
        }
    }

    pub fn release_buttons(&mut self) {
        self.mode = false;
        self.tap = false;
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for MockHardware {
    fn mode_pressed(&mut self) -> bool {
        self.mode
    }

    fn tap_pressed(&mut self) -> bool {
        self.tap
    }
}

impl IndicatorPort for MockHardware {
    fn set_beat_led(&mut self, on: bool) {
        if on && !self.beat_led {
            self.beat_rises += 1;
        }
        self.beat_led = on;
    }

    fn set_tap_led(&mut self, on: bool) {
        if on && !self.tap_led {
            self.tap_flashes += 1;
        }
        self.tap_led = on;
    }
}

// ── Event recorder ────────────────────────────────────────────

pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
