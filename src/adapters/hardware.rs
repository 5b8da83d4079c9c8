//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the four GPIO roles (two buttons in, two LEDs out), exposing
//! them through [`InputPort`] and [`IndicatorPort`].  This is the only
//! module in the system that touches actual pins.  On non-espidf
//! targets the underlying `hw_init` shims read released buttons and
//! swallow LED writes, so the binary's wiring can still be exercised
//! in simulation.

use crate::app::ports::{IndicatorPort, InputPort};
use crate::drivers::hw_init;
use crate::pins;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    /// Last level written per LED, so redundant register writes are
    /// skipped at the 10 ms tick rate.
    beat_led_on: bool,
    tap_led_on: bool,
}

impl HardwareAdapter {
    pub fn new() -> Self {
        Self {
            beat_led_on: false,
            tap_led_on: false,
        }
    }
}

impl Default for HardwareAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for HardwareAdapter {
    fn mode_pressed(&mut self) -> bool {
        hw_init::gpio_read(pins::BTN_MODE_GPIO)
    }

    fn tap_pressed(&mut self) -> bool {
        hw_init::gpio_read(pins::BTN_TAP_GPIO)
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl IndicatorPort for HardwareAdapter {
    fn set_beat_led(&mut self, on: bool) {
        if on != self.beat_led_on {
            hw_init::gpio_write(pins::LED_STATUS_GPIO, on);
            self.beat_led_on = on;
        }
    }

    fn set_tap_led(&mut self, on: bool) {
        if on != self.tap_led_on {
            hw_init::gpio_write(pins::LED_TAP_GPIO, on);
            self.tap_led_on = on;
        }
    }
}
