//! Integration tests for the button → session → indicator pipeline.
//!
//! Drives [`AppService::tick`] on a simulated 10 ms clock, the same
//! cadence the device loop uses, and asserts on LED levels and emitted
//! events. No real hardware involved.

use tapmetro::app::commands::AppCommand;
use tapmetro::app::events::AppEvent;
use tapmetro::app::service::AppService;
use tapmetro::config::SystemConfig;

use crate::mock_hw::{LogSink, MockHardware};

const TICK_MS: u64 = 10;

// ── Simulation rig ────────────────────────────────────────────

struct Rig {
    app: AppService,
    hw: MockHardware,
    sink: LogSink,
    now: u64,
}

impl Rig {
    fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    fn with_config(config: SystemConfig) -> Self {
        Self {
            app: AppService::new(&config),
            hw: MockHardware::new(),
            sink: LogSink::new(),
            now: 0,
        }
    }

    /// Advance one tick with the given button levels. After the call,
    /// `self.now` is the instant the tick ran at.
    fn step(&mut self, mode: bool, tap: bool) {
        self.now += TICK_MS;
        self.hw.mode = mode;
        self.hw.tap = tap;
        self.app.tick(self.now, &mut self.hw, &mut self.sink);
        self.hw.release_buttons();
    }

    /// Tick with released buttons until `self.now == until_ms`.
    fn idle_until(&mut self, until_ms: u64) {
        while self.now < until_ms {
            self.step(false, false);
        }
    }
}

// ── Full tap session ──────────────────────────────────────────

#[test]
fn full_tap_session_records_and_starts_the_beat() {
    let mut rig = Rig::new();

    rig.idle_until(90);
    rig.step(true, false); // mode press at 100
    assert!(rig.app.is_timing());

    for tap_at in [1_000, 1_500, 2_000, 2_500] {
        rig.idle_until(tap_at - TICK_MS);
        rig.step(false, true);
    }
    rig.idle_until(2_990);
    rig.step(true, false); // mode press at 3000 closes the session

    assert!(!rig.app.is_timing());
    // 4 taps over 1500 ms: all taps count, so 160 rather than 120.
    assert_eq!(rig.app.current_bpm(), 160);
    assert!(rig.sink.contains(&AppEvent::SampleRecorded { bpm: 160, taps: 4 }));
    assert_eq!(rig.hw.tap_flashes, 4);

    // 160 BPM is a 375 ms beat; on a 10 ms grid every pulse lands 380 ms
    // after the previous one.
    let mut rises = Vec::new();
    while rig.now < 5_000 {
        let lit = rig.hw.beat_led;
        rig.step(false, false);
        if rig.hw.beat_led && !lit {
            rises.push(rig.now);
        }
    }
    assert!(rises.len() >= 4, "beat LED should be pulsing, saw {rises:?}");
    for pair in rises.windows(2) {
        assert_eq!(pair[1] - pair[0], 380, "cadence must hold steady");
    }
}

// ── Held buttons ──────────────────────────────────────────────

#[test]
fn held_mode_button_retriggers_once_per_settle_period() {
    let mut rig = Rig::new();

    let mut toggles = Vec::new();
    while rig.now < 990 {
        let was_timing = rig.app.is_timing();
        rig.step(true, false); // held the whole second
        if rig.app.is_timing() != was_timing {
            toggles.push(rig.now);
        }
    }

    // First tick accepts, then once per 200 ms settle window.
    assert_eq!(toggles, vec![10, 210, 410, 610, 810]);
    assert!(rig.sink.contains(&AppEvent::SessionDiscarded { taps: 0 }));
}

#[test]
fn tap_while_idle_is_ignored_and_does_not_arm_the_settle() {
    let mut rig = Rig::new();

    for _ in 0..10 {
        rig.step(false, true); // tap held while idle
    }
    assert!(rig.sink.events.is_empty());
    assert_eq!(rig.hw.tap_flashes, 0);

    // The ignored taps must not delay a real mode press.
    rig.step(true, false);
    assert!(rig.app.is_timing());
    assert_eq!(rig.sink.events, vec![AppEvent::TimingStarted]);
}

#[test]
fn mode_wins_when_both_buttons_read_high() {
    let mut rig = Rig::new();

    rig.step(true, false); // start at 10
    rig.idle_until(500);
    rig.step(false, true); // one tap at 510
    rig.idle_until(1_000);
    rig.step(true, true); // both pressed: mode closes the session

    assert!(!rig.app.is_timing());
    assert!(rig.sink.contains(&AppEvent::SessionDiscarded { taps: 1 }));
    assert_eq!(rig.hw.tap_flashes, 1, "the losing tap must not register");
}

// ── Degenerate timing ─────────────────────────────────────────

#[test]
fn zero_span_session_silences_the_beat() {
    // With no settle delay the poller accepts a tap on every poll, so a
    // clock that stalls hands the session four identical timestamps.
    let config = SystemConfig {
        settle_delay_ms: 0,
        ..SystemConfig::default()
    };
    let mut app = AppService::new(&config);
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();

    hw.mode = true;
    app.tick(10, &mut hw, &mut sink);
    hw.release_buttons();

    hw.tap = true;
    for _ in 0..4 {
        app.tick(100, &mut hw, &mut sink);
    }
    hw.release_buttons();

    hw.mode = true;
    app.tick(200, &mut hw, &mut sink);
    hw.release_buttons();

    assert!(sink.contains(&AppEvent::DegenerateSample { taps: 4 }));
    assert_eq!(app.current_bpm(), 0);

    hw.beat_rises = 0;
    for t in (210..=2_000).step_by(10) {
        app.tick(t, &mut hw, &mut sink);
    }
    assert_eq!(hw.beat_rises, 0, "a zero tempo must not blink");
}

// ── Suppression and resume ────────────────────────────────────

#[test]
fn open_session_suppresses_the_beat_and_discard_resumes_it() {
    let mut rig = Rig::new();
    rig.app
        .handle_command(AppCommand::OverrideTempo(120), &mut rig.sink);

    rig.idle_until(1_000);
    assert!(rig.hw.beat_rises >= 2, "500 ms beat should have fired");

    rig.step(true, false); // open a session at 1010
    let while_open = rig.hw.beat_rises;
    rig.idle_until(3_000);
    assert_eq!(rig.hw.beat_rises, while_open, "beat must stay dark while timing");

    rig.step(true, false); // close with zero taps at 3010
    assert!(rig.sink.contains(&AppEvent::SessionDiscarded { taps: 0 }));
    assert_eq!(rig.app.current_bpm(), 120, "discarded session keeps the old tempo");

    // The beat restarts immediately and holds its 500 ms cadence.
    assert_eq!(rig.hw.beat_rises, while_open + 1);
    let mut rises = Vec::new();
    while rig.now < 5_000 {
        let lit = rig.hw.beat_led;
        rig.step(false, false);
        if rig.hw.beat_led && !lit {
            rises.push(rig.now);
        }
    }
    for pair in rises.windows(2) {
        assert_eq!(pair[1] - pair[0], 500);
    }
}

// ── Tap indicator ─────────────────────────────────────────────

#[test]
fn tap_led_pulse_is_one_tick_wide() {
    let mut rig = Rig::new();
    rig.step(true, false);
    rig.idle_until(500);
    rig.step(false, true);
    assert!(rig.hw.tap_led);

    rig.step(false, false); // 10 ms later the hold has expired
    assert!(!rig.hw.tap_led);
    assert_eq!(rig.hw.tap_flashes, 1);
}
