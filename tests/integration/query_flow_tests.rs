//! Integration tests for the HTTP query surface over real sessions.
//!
//! Exercises the full chain the device runs in production: button ticks
//! feed the estimator, then [`api::dispatch`] answers queries from the
//! same service instance. The ESP-IDF transport is a shim on top of
//! `dispatch`, so everything observable over the wire is covered here.

use tapmetro::api::{dispatch, Method, Request, Response, CORS_HEADER};
use tapmetro::app::events::AppEvent;
use tapmetro::app::service::AppService;
use tapmetro::config::SystemConfig;
use tapmetro::metronome::Extreme;

use crate::mock_hw::{LogSink, MockHardware};

// ── Helpers ───────────────────────────────────────────────────

fn app() -> AppService {
    AppService::new(&SystemConfig::default())
}

fn get(app: &mut AppService, path: &str) -> Response {
    dispatch(
        &Request { method: Method::Get, path, body: b"" },
        app,
        &mut LogSink::new(),
    )
}

fn put_bpm(app: &mut AppService, body: &[u8], sink: &mut LogSink) -> Response {
    dispatch(
        &Request { method: Method::Put, path: "/bpm", body },
        app,
        sink,
    )
}

fn delete(app: &mut AppService, path: &str, sink: &mut LogSink) -> Response {
    dispatch(
        &Request { method: Method::Delete, path, body: b"" },
        app,
        sink,
    )
}

/// Run one button-driven session: mode press, four taps `spacing_ms`
/// apart, mode press. Uses sparse ticks; the poller only needs a
/// monotonic clock.
fn run_session(app: &mut AppService, start_ms: u64, spacing_ms: u64) -> u64 {
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();

    let mut now = start_ms;
    hw.mode = true;
    app.tick(now, &mut hw, &mut sink);
    hw.release_buttons();

    for i in 0..4 {
        now = start_ms + 500 + i * spacing_ms;
        hw.tap = true;
        app.tick(now, &mut hw, &mut sink);
        hw.release_buttons();
    }

    now += 500;
    hw.mode = true;
    app.tick(now, &mut hw, &mut sink);
    hw.release_buttons();
    now
}

// ── Session → query ───────────────────────────────────────────

#[test]
fn queries_reflect_a_button_driven_session() {
    let mut app = app();
    // 4 taps, 500 ms apart: round(4 * 60000 / 1500) = 160.
    run_session(&mut app, 0, 500);

    assert_eq!(get(&mut app, "/bpm").body.as_deref(), Some("160"));
    assert_eq!(get(&mut app, "/bpm/max").body.as_deref(), Some("160"));
    // Three slots are still empty, so the minimum is the zero hole.
    assert_eq!(get(&mut app, "/bpm/min").body.as_deref(), Some("0"));
}

#[test]
fn window_rolls_across_sessions_and_overrides() {
    let mut app = app();
    let mut sink = LogSink::new();

    let end = run_session(&mut app, 0, 500); // 160
    run_session(&mut app, end + 1_000, 250); // 320
    put_bpm(&mut app, b"90", &mut sink);
    put_bpm(&mut app, b"110", &mut sink);

    // Window is now [160, 320, 90, 110].
    assert_eq!(get(&mut app, "/bpm").body.as_deref(), Some("110"));
    assert_eq!(get(&mut app, "/bpm/min").body.as_deref(), Some("90"));
    assert_eq!(get(&mut app, "/bpm/max").body.as_deref(), Some("320"));
}

// ── Extreme deletion lifecycle ────────────────────────────────

#[test]
fn deleting_extremes_walks_down_the_window() {
    let mut app = app();
    let mut sink = LogSink::new();
    for body in [&b"90"[..], b"120", b"100", b"110"] {
        put_bpm(&mut app, body, &mut sink);
    }

    // Deleting the minimum leaves a zero hole, which becomes the new
    // minimum — that is what the wire contract exposes.
    assert_eq!(get(&mut app, "/bpm/min").body.as_deref(), Some("90"));
    assert_eq!(delete(&mut app, "/bpm/min", &mut sink).status, 200);
    assert_eq!(get(&mut app, "/bpm/min").body.as_deref(), Some("0"));

    // The maximum is untouched by the hole and steps down on delete.
    assert_eq!(get(&mut app, "/bpm/max").body.as_deref(), Some("120"));
    assert_eq!(delete(&mut app, "/bpm/max", &mut sink).status, 200);
    assert_eq!(get(&mut app, "/bpm/max").body.as_deref(), Some("110"));
}

#[test]
fn deleting_the_only_tempo_silences_the_current_reading() {
    let mut app = app();
    let mut sink = LogSink::new();
    put_bpm(&mut app, b"150", &mut sink);

    delete(&mut app, "/bpm/max", &mut sink);
    assert_eq!(get(&mut app, "/bpm").body.as_deref(), Some("0"));
}

#[test]
fn delete_after_a_session_reports_the_session_value() {
    let mut app = app();
    let mut sink = LogSink::new();
    run_session(&mut app, 0, 500); // 160

    delete(&mut app, "/bpm/max", &mut sink);
    assert!(sink.contains(&AppEvent::ExtremeCleared {
        which: Extreme::Max,
        bpm: 160,
        slots: 1,
    }));
}

// ── Rejections ────────────────────────────────────────────────

#[test]
fn malformed_override_leaves_the_tempo_alone() {
    let mut app = app();
    let mut sink = LogSink::new();
    run_session(&mut app, 0, 500);

    assert_eq!(put_bpm(&mut app, b"allegro", &mut sink).status, 400);
    assert_eq!(get(&mut app, "/bpm").body.as_deref(), Some("160"));
    assert!(
        !sink.events.iter().any(|e| matches!(e, AppEvent::TempoOverridden { .. })),
        "a rejected override must not emit"
    );
}

// ── Wire contract ─────────────────────────────────────────────

#[test]
fn cors_header_is_the_open_wildcard() {
    // The transport attaches this to every response, errors included.
    assert_eq!(CORS_HEADER, ("Access-Control-Allow-Origin", "*"));
}
