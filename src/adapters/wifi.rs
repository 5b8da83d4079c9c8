//! WiFi station-mode adapter.
//!
//! Brings the device onto the network so the HTTP query surface is
//! reachable. Connection loss after boot is handled here with backoff;
//! the metronome itself keeps running offline, buttons and LEDs
//! included.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via
//!   `esp_idf_svc::wifi`. The boot-time [`connect`](WifiAdapter::connect)
//!   blocks until the netif is up (a dead AP at boot is fatal anyway);
//!   everything after boot is non-blocking.
//! - **all other targets**: simulation stubs for host-side tests. An
//!   SSID ending in `-offline` fails to connect, one ending in
//!   `-captive` associates but never brings the link up, so tests can
//!   drive every reconnect path deterministically.
//!
//! ## Reconnection policy
//!
//! On disconnect the adapter waits an exponential backoff (2 s → 4 s →
//! 8 s … capped at 60 s) before retrying. A retry only *issues* the
//! connect command; association and DHCP are observed from later polls,
//! bounded by a join window, so the 10 ms control loop never stalls on
//! the radio and buttons stay live throughout.

use core::fmt;
use log::{error, info, warn};

// ───────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectivityError {
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    DriverInit,
    ConnectionFailed,
    AlreadyConnected,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::DriverInit => write!(f, "WiFi driver init failed"),
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
            Self::AlreadyConnected => write!(f, "already connected to AP"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Connection state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    Disconnected,
    Connecting,
    Connected,
    /// Connect command issued; waiting for association and DHCP.
    Joining { attempt: u32 },
    Reconnecting { attempt: u32 },
}

const INITIAL_BACKOFF_SECS: u32 = 2;
const MAX_BACKOFF_SECS: u32 = 60;
/// How long a rejoin may sit without a link before it counts as failed.
const JOIN_TIMEOUT_MS: u64 = 15_000;

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        // Open network.
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    state: WifiState,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    backoff_secs: u32,
    next_retry_ms: u64,
    join_deadline_ms: u64,
    #[cfg(target_os = "espidf")]
    wifi: esp_idf_svc::wifi::BlockingWifi<esp_idf_svc::wifi::EspWifi<'static>>,
    #[cfg(not(target_os = "espidf"))]
    sim_link_up: bool,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(
        modem: esp_idf_hal::modem::Modem,
        sysloop: esp_idf_svc::eventloop::EspSystemEventLoop,
        nvs: Option<esp_idf_svc::nvs::EspDefaultNvsPartition>,
    ) -> Result<Self, ConnectivityError> {
        let esp_wifi = esp_idf_svc::wifi::EspWifi::new(modem, sysloop.clone(), nvs)
            .map_err(|_| ConnectivityError::DriverInit)?;
        let wifi = esp_idf_svc::wifi::BlockingWifi::wrap(esp_wifi, sysloop)
            .map_err(|_| ConnectivityError::DriverInit)?;
        Ok(Self {
            state: WifiState::Disconnected,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            backoff_secs: INITIAL_BACKOFF_SECS,
            next_retry_ms: 0,
            join_deadline_ms: 0,
            wifi,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            state: WifiState::Disconnected,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            backoff_secs: INITIAL_BACKOFF_SECS,
            next_retry_ms: 0,
            join_deadline_ms: 0,
            sim_link_up: false,
        }
    }

    pub fn state(&self) -> WifiState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.platform_link_up()
    }

    /// Validate and store credentials without touching the radio.
    pub fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        self.ssid.clear();
        self.ssid
            .push_str(ssid)
            .map_err(|_| ConnectivityError::InvalidSsid)?;
        self.password.clear();
        self.password
            .push_str(password)
            .map_err(|_| ConnectivityError::InvalidPassword)?;
        info!("WiFi: credentials updated (SSID='{}')", self.ssid);
        Ok(())
    }

    /// Connect now. Boot path: a failure here leaves the adapter in
    /// reconnect state but is reported to the caller, who decides
    /// whether it is fatal.
    pub fn connect(&mut self, now_ms: u64) -> Result<(), ConnectivityError> {
        if self.ssid.is_empty() {
            return Err(ConnectivityError::NoCredentials);
        }
        if self.state == WifiState::Connected {
            return Err(ConnectivityError::AlreadyConnected);
        }

        info!("WiFi: connecting to '{}'", self.ssid);
        self.state = WifiState::Connecting;

        match self.platform_connect() {
            Ok(()) => {
                self.state = WifiState::Connected;
                self.backoff_secs = INITIAL_BACKOFF_SECS;
                info!("WiFi: connected");
                Ok(())
            }
            Err(e) => {
                error!("WiFi: connection failed: {e}");
                self.enter_reconnect(0, now_ms);
                Err(e)
            }
        }
    }

    pub fn disconnect(&mut self) {
        self.platform_disconnect();
        self.state = WifiState::Disconnected;
        info!("WiFi: disconnected");
    }

    /// Drive reconnection from the control loop. Never blocks: a due
    /// retry issues the connect command and hands back; association and
    /// DHCP are observed on later polls, bounded by the join window.
    pub fn poll(&mut self, now_ms: u64) {
        if let WifiState::Reconnecting { attempt } = self.state {
            if now_ms >= self.next_retry_ms {
                info!("WiFi: reconnect attempt {attempt}");
                match self.platform_begin_rejoin() {
                    Ok(()) => {
                        self.state = WifiState::Joining { attempt };
                        self.join_deadline_ms = now_ms + JOIN_TIMEOUT_MS;
                    }
                    Err(_) => self.enter_reconnect(attempt + 1, now_ms),
                }
            }
        }

        match self.state {
            WifiState::Joining { attempt } => {
                if self.platform_link_up() {
                    self.state = WifiState::Connected;
                    self.backoff_secs = INITIAL_BACKOFF_SECS;
                    info!("WiFi: reconnected");
                } else if now_ms >= self.join_deadline_ms {
                    warn!("WiFi: join timed out without a link");
                    self.platform_abort_join();
                    self.enter_reconnect(attempt + 1, now_ms);
                }
            }
            WifiState::Connected => {
                if !self.platform_link_up() {
                    warn!("WiFi: connection lost, entering reconnect");
                    self.enter_reconnect(0, now_ms);
                }
            }
            _ => {}
        }
    }

    fn enter_reconnect(&mut self, attempt: u32, now_ms: u64) {
        self.next_retry_ms = now_ms + u64::from(self.backoff_secs) * 1_000;
        self.backoff_secs = (self.backoff_secs * 2).min(MAX_BACKOFF_SECS);
        self.state = WifiState::Reconnecting { attempt };
    }

    // ── Platform-specific ─────────────────────────────────────

    // Boot path only: blocks until the netif is up, because main()
    // treats a dead AP at boot as fatal anyway.
    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};

        let auth_method = if self.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let config = Configuration::Client(ClientConfiguration {
            ssid: self
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidSsid)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidPassword)?,
            auth_method,
            ..Default::default()
        });

        self.wifi
            .set_configuration(&config)
            .map_err(|_| ConnectivityError::ConnectionFailed)?;
        self.wifi
            .start()
            .map_err(|_| ConnectivityError::ConnectionFailed)?;
        self.wifi
            .connect()
            .map_err(|_| ConnectivityError::ConnectionFailed)?;
        self.wifi
            .wait_netif_up()
            .map_err(|_| ConnectivityError::ConnectionFailed)?;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        self.platform_begin_rejoin()?;
        if !self.sim_link_up {
            warn!("WiFi(sim): no link on '{}'", self.ssid);
            return Err(ConnectivityError::ConnectionFailed);
        }
        info!("WiFi(sim): connected to '{}'", self.ssid);
        Ok(())
    }

    // Runtime path: issue the connect command and return; the driver
    // stays started after boot, so association runs in the background
    // and poll() watches for the link.
    #[cfg(target_os = "espidf")]
    fn platform_begin_rejoin(&mut self) -> Result<(), ConnectivityError> {
        self.wifi
            .wifi_mut()
            .connect()
            .map_err(|_| ConnectivityError::ConnectionFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_begin_rejoin(&mut self) -> Result<(), ConnectivityError> {
        if self.ssid.as_str().ends_with("-offline") {
            warn!("WiFi(sim): '{}' unreachable", self.ssid);
            return Err(ConnectivityError::ConnectionFailed);
        }
        // A captive AP associates but the link never comes up.
        self.sim_link_up = !self.ssid.as_str().ends_with("-captive");
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_abort_join(&mut self) {
        let _ = self.wifi.wifi_mut().disconnect();
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_abort_join(&mut self) {
        self.sim_link_up = false;
    }

    #[cfg(target_os = "espidf")]
    fn platform_disconnect(&mut self) {
        let _ = self.wifi.disconnect();
        let _ = self.wifi.stop();
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_disconnect(&mut self) {
        self.sim_link_up = false;
        info!("WiFi(sim): disconnected");
    }

    #[cfg(target_os = "espidf")]
    fn platform_link_up(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false)
            && self.wifi.wifi().sta_netif().is_up().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_link_up(&self) -> bool {
        self.sim_link_up
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
