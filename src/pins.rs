//! GPIO pin assignments for the TapMetro board.
//!
//! Single source of truth — the hardware adapter references this module
//! rather than hard-coding pin numbers. Update these to match your wiring
//! before flashing; an input pin configured as an output can damage the
//! driver stage.

// ---------------------------------------------------------------------------
// Buttons (momentary, external pull-down — pressed = HIGH)
// ---------------------------------------------------------------------------

/// Mode button: toggles the estimator between idle and timing.
pub const BTN_MODE_GPIO: i32 = 16;
/// Tap button: records one beat while timing.
pub const BTN_TAP_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// Indicator LEDs (active HIGH through a series resistor)
// ---------------------------------------------------------------------------

/// Status LED: flashes on every derived beat.
pub const LED_STATUS_GPIO: i32 = 11;
/// Tap-confirmation LED: flashes once per recorded tap.
pub const LED_TAP_GPIO: i32 = 12;
