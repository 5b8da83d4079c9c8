//! TapMetro Firmware — Main Entry Point
//!
//! Hexagonal architecture with a fixed-cadence polling loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter     LogEventSink    Esp32TimeAdapter          │
//! │  (Input+Indicator)   (EventSink)     (monotonic clock)         │
//! │  WifiAdapter         HTTP server                               │
//! │  (station + backoff) (query surface)                           │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Metronome · InputPoller · BlinkEngine                 │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The HTTP handlers run on the server's own tasks and share the
//! `AppService` with the control loop through one mutex; everything
//! else is single-threaded at a 10 ms cadence.
#![deny(unused_must_use)]

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use log::info;

use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use tapmetro::adapters::hardware::HardwareAdapter;
use tapmetro::adapters::http;
use tapmetro::adapters::log_sink::LogEventSink;
use tapmetro::adapters::time::Esp32TimeAdapter;
use tapmetro::adapters::wifi::WifiAdapter;
use tapmetro::app::service::AppService;
use tapmetro::config::SystemConfig;
use tapmetro::drivers::hw_init;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  TapMetro v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let config = SystemConfig::default();
    let time = Esp32TimeAdapter::new();

    // ── 3. Network bring-up ───────────────────────────────────
    let peripherals = Peripherals::take().context("peripherals already taken")?;
    let sysloop = EspSystemEventLoop::take().context("system event loop")?;
    let nvs = EspDefaultNvsPartition::take().ok();

    let mut wifi = WifiAdapter::new(peripherals.modem, sysloop, nvs)
        .map_err(|e| anyhow!("WiFi driver: {e}"))?;
    wifi.set_credentials(config.wifi_ssid, config.wifi_password)
        .map_err(|e| anyhow!("WiFi credentials: {e}"))?;
    // The device is useless without its query surface, so a dead AP at
    // boot is fatal. Drops after boot are retried from the loop below.
    wifi.connect(time.uptime_ms())
        .map_err(|e| anyhow!("WiFi connect: {e}"))?;

    // ── 4. App service + query surface ────────────────────────
    let mut log_sink = LogEventSink::new();
    let app = Arc::new(Mutex::new(AppService::new(&config)));
    {
        let mut app = app.lock().map_err(|_| anyhow!("state mutex poisoned"))?;
        app.start(&mut log_sink);
    }
    let _server = http::start(config.http_port, Arc::clone(&app))?;

    // ── 5. Control loop ───────────────────────────────────────
    let mut hw = HardwareAdapter::new();
    info!("System ready. Entering control loop.");

    loop {
        let now = time.uptime_ms();
        {
            let mut app = app.lock().map_err(|_| anyhow!("state mutex poisoned"))?;
            app.tick(now, &mut hw, &mut log_sink);
        }
        wifi.poll(now);
        thread::sleep(Duration::from_millis(u64::from(config.poll_interval_ms)));
    }
}
