//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (buttons, LEDs, event sinks) implement these traits.
//! The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never touches hardware directly.

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: raw button levels, sampled once per control tick.
///
/// Levels, not edges: debouncing and press classification happen in the
/// domain's [`InputPoller`](crate::drivers::button::InputPoller), so the
/// adapter stays a dumb pin reader.
pub trait InputPort {
    /// Current level of the mode button (true = pressed).
    fn mode_pressed(&mut self) -> bool;

    /// Current level of the tap button (true = pressed).
    fn tap_pressed(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain pushes LED levels out once per tick.
pub trait IndicatorPort {
    /// Drive the beat LED (pulses on the estimated tempo).
    fn set_beat_led(&mut self, on: bool);

    /// Drive the tap-feedback LED (flashes on each accepted tap).
    fn set_tap_led(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, a
/// future network push, a test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
