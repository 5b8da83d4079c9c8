//! ESP-IDF HTTP server binding for the query surface.
//!
//! Thin transport shim: three wildcard handlers (one per supported
//! method) forward every request into [`api::dispatch`], which owns
//! routing, status codes, and body parsing. This module only moves
//! bytes and attaches the open CORS header the surface promises on
//! every response.
//!
//! Handlers run on the HTTP server's own tasks; they share the
//! [`AppService`] with the control loop through the same mutex.

use std::sync::{Arc, Mutex};

use esp_idf_svc::http::server::{Configuration, EspHttpServer};
use esp_idf_svc::http::Method as EspMethod;
use esp_idf_svc::io::{Read, Write};
use log::{info, warn};

use crate::adapters::log_sink::LogEventSink;
use crate::api::{self, Method, Request};
use crate::app::service::AppService;

/// Bind the query surface. The returned server stops serving when
/// dropped, so the caller must keep it alive.
pub fn start(
    port: u16,
    app: Arc<Mutex<AppService>>,
) -> anyhow::Result<EspHttpServer<'static>> {
    let config = Configuration {
        http_port: port,
        uri_match_wildcard: true,
        ..Default::default()
    };
    let mut server = EspHttpServer::new(&config)?;

    for (esp_method, method) in [
        (EspMethod::Get, Method::Get),
        (EspMethod::Put, Method::Put),
        (EspMethod::Delete, Method::Delete),
    ] {
        let app = Arc::clone(&app);
        server.fn_handler::<anyhow::Error, _>("/*", esp_method, move |mut req| {
            let mut body = [0u8; api::MAX_BODY_BYTES];
            let mut body_len = 0;
            let mut overflow = 0usize;
            loop {
                if body_len < body.len() {
                    let n = req.read(&mut body[body_len..])?;
                    if n == 0 {
                        break;
                    }
                    body_len += n;
                } else {
                    // Past the cap the request is already invalid;
                    // drain the rest so the connection stays usable.
                    let mut spill = [0u8; 64];
                    let n = req.read(&mut spill)?;
                    if n == 0 {
                        break;
                    }
                    overflow += n;
                }
            }

            let uri = req.uri().to_owned();
            let path = match uri.find('?') {
                Some(i) => &uri[..i],
                None => uri.as_str(),
            };

            let response = if overflow > 0 {
                warn!(
                    "{} {} rejected: body exceeds {} bytes",
                    method,
                    path,
                    api::MAX_BODY_BYTES
                );
                api::Response { status: 400, body: None }
            } else {
                let mut app = app
                    .lock()
                    .map_err(|_| anyhow::anyhow!("app state mutex poisoned"))?;
                let mut sink = LogEventSink::new();
                api::dispatch(
                    &Request {
                        method,
                        path,
                        body: &body[..body_len],
                    },
                    &mut app,
                    &mut sink,
                )
            };

            match response.body {
                Some(payload) => {
                    let mut out = req.into_response(
                        response.status,
                        None,
                        &[api::CORS_HEADER, ("Content-Type", "application/json")],
                    )?;
                    out.write_all(payload.as_bytes())?;
                }
                None => {
                    req.into_response(response.status, None, &[api::CORS_HEADER])?;
                }
            }
            Ok(())
        })?;
    }

    info!("HTTP: query surface on port {port}");
    Ok(server)
}
