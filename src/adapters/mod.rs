//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to               |
//! |------------|---------------|---------------------------|
//! | `hardware` | InputPort     | ESP32 GPIO (buttons)      |
//! |            | IndicatorPort | ESP32 GPIO (LEDs)         |
//! | `http`     | —             | ESP-IDF HTTP server       |
//! | `log_sink` | EventSink     | Serial log output         |
//! | `time`     | —             | ESP32 system timer        |
//! | `wifi`     | —             | ESP-IDF WiFi STA          |
//!
//! `http` is target-gated: on the host the query surface is exercised
//! directly through `api::dispatch` in tests instead of over a socket.

pub mod hardware;
#[cfg(target_os = "espidf")]
pub mod http;
pub mod log_sink;
pub mod time;
pub mod wifi;
