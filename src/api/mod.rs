//! HTTP query surface — dispatches requests to the AppService.
//!
//! **Transport-decoupled**: this module does not own a server. Callers
//! feed a parsed [`Request`] into [`dispatch`] and relay the returned
//! [`Response`] however they like; the device binds it to the ESP-IDF
//! HTTP server in [`adapters::http`](crate::adapters::http), tests call
//! it directly.
//!
//! ## Routes
//!
//! | Method | Path       | Action                       | Response    |
//! |--------|------------|------------------------------|-------------|
//! | GET    | `/bpm`     | newest sample                | JSON number |
//! | PUT    | `/bpm`     | override tempo from body     | empty 200   |
//! | GET    | `/bpm/min` | smallest sample in window    | JSON number |
//! | GET    | `/bpm/max` | largest sample in window     | JSON number |
//! | DELETE | `/bpm/min` | clear every minimum slot     | empty 200   |
//! | DELETE | `/bpm/max` | clear every maximum slot     | empty 200   |
//!
//! A PUT body is decimal text (surrounding whitespace tolerated); a body
//! that is not an unsigned integer, or longer than [`MAX_BODY_BYTES`],
//! earns a 400, never a panic. Unknown paths 404, known paths with the
//! wrong method 405. The transport must attach [`CORS_HEADER`] to
//! **every** response, errors included — the surface is open by design,
//! with no auth and no rate limiting.

use core::fmt;

use log::{info, warn};

use crate::app::commands::AppCommand;
use crate::app::ports::EventSink;
use crate::app::service::AppService;
use crate::metronome::Extreme;

/// Header every response carries: the surface is intended for browser
/// front-ends served from elsewhere.
pub const CORS_HEADER: (&str, &str) = ("Access-Control-Allow-Origin", "*");

/// Hard cap on an override body. A decimal u32 is at most ten digits,
/// so 64 bytes leaves ample room for whitespace padding; a longer body
/// is malformed no matter what it contains and is rejected whole, never
/// parsed from a prefix.
pub const MAX_BODY_BYTES: usize = 64;

// ───────────────────────────────────────────────────────────────
// Request / Response
// ───────────────────────────────────────────────────────────────

/// HTTP methods the surface understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A parsed request, borrowed from the transport's buffers.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub method: Method,
    pub path: &'a str,
    pub body: &'a [u8],
}

/// What the transport should send back. The body, when present, is
/// already-serialized JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Option<String>,
}

impl Response {
    fn json_number(value: u32) -> Self {
        Self {
            status: 200,
            body: Some(serde_json::Value::from(value).to_string()),
        }
    }

    fn empty_ok() -> Self {
        Self {
            status: 200,
            body: None,
        }
    }

    fn status_only(status: u16) -> Self {
        Self { status, body: None }
    }
}

// ───────────────────────────────────────────────────────────────
// Dispatch
// ───────────────────────────────────────────────────────────────

/// Route one request into the service. Mutations emit their events
/// through `sink`; the caller holds whatever lock guards `app`.
pub fn dispatch(
    req: &Request<'_>,
    app: &mut AppService,
    sink: &mut impl EventSink,
) -> Response {
    let response = route(req, app, sink);
    info!("{} {} -> {}", req.method, req.path, response.status);
    response
}

fn route(req: &Request<'_>, app: &mut AppService, sink: &mut impl EventSink) -> Response {
    match (req.method, req.path) {
        (Method::Get, "/bpm") => Response::json_number(app.current_bpm()),

        (Method::Put, "/bpm") => match parse_bpm_body(req.body) {
            Some(bpm) => {
                app.handle_command(AppCommand::OverrideTempo(bpm), sink);
                Response::empty_ok()
            }
            None => {
                warn!("rejected PUT /bpm body ({} bytes)", req.body.len());
                Response::status_only(400)
            }
        },

        (Method::Get, "/bpm/min") => Response::json_number(app.extreme_bpm(Extreme::Min)),
        (Method::Get, "/bpm/max") => Response::json_number(app.extreme_bpm(Extreme::Max)),

        (Method::Delete, "/bpm/min") => {
            app.handle_command(AppCommand::ClearExtreme(Extreme::Min), sink);
            Response::empty_ok()
        }
        (Method::Delete, "/bpm/max") => {
            app.handle_command(AppCommand::ClearExtreme(Extreme::Max), sink);
            Response::empty_ok()
        }

        (_, "/bpm" | "/bpm/min" | "/bpm/max") => Response::status_only(405),
        _ => Response::status_only(404),
    }
}

/// Strict decimal parse of an override body. Anything that is not a
/// plain unsigned integer within the size cap is a client error.
fn parse_bpm_body(body: &[u8]) -> Option<u32> {
    if body.len() > MAX_BODY_BYTES {
        return None;
    }
    let text = core::str::from_utf8(body).ok()?;
    text.trim().parse::<u32>().ok()
}
