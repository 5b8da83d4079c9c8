//! System configuration parameters.
//!
//! All tunable timing and network parameters for the TapMetro firmware.
//! There is no config file and no persistence — values are fixed at
//! compile time, matching a device that is configured once at build.

/// Core system configuration.
#[derive(Debug, Clone)]
pub struct SystemConfig {
    // --- Input polling ---
    /// Button poll cadence (milliseconds).
    pub poll_interval_ms: u32,
    /// Settle delay applied after any accepted button action (milliseconds).
    /// This is the only debounce the inputs get: a held button re-fires
    /// once per settle period.
    pub settle_delay_ms: u32,

    // --- Indicators ---
    /// How long an LED pulse stays high (milliseconds).
    pub pulse_hold_ms: u32,

    // --- Network ---
    /// TCP port the HTTP query service listens on.
    pub http_port: u16,
    /// WiFi station credentials. Update before flashing.
    pub wifi_ssid: &'static str,
    pub wifi_password: &'static str,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Input polling
            poll_interval_ms: 10, // 100 Hz
            settle_delay_ms: 200,
            // Indicators
            pulse_hold_ms: 10,
            // Network
            http_port: 80,
            wifi_ssid: "tapmetro-lab",
            wifi_password: "change-me-before-flash",
        }
    }
}
