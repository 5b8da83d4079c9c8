//! Fuzz target: `api::dispatch`
//!
//! Feeds arbitrary methods, paths, and bodies through the request
//! router and asserts it never panics and only ever answers with the
//! statuses the surface defines.
//!
//! cargo fuzz run fuzz_api_dispatch

#![no_main]

use libfuzzer_sys::fuzz_target;
use tapmetro::api::{dispatch, Method, Request};
use tapmetro::app::events::AppEvent;
use tapmetro::app::ports::EventSink;
use tapmetro::app::service::AppService;
use tapmetro::config::SystemConfig;

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let method = match selector % 3 {
        0 => Method::Get,
        1 => Method::Put,
        _ => Method::Delete,
    };

    // Path up to the first NUL, body after it. The transport only ever
    // hands us valid UTF-8 paths, so skip inputs that are not.
    let (path_bytes, body) = match rest.iter().position(|&b| b == 0) {
        Some(i) => (&rest[..i], &rest[i + 1..]),
        None => (rest, &[][..]),
    };
    let Ok(path) = core::str::from_utf8(path_bytes) else {
        return;
    };

    let mut app = AppService::new(&SystemConfig::default());
    let mut sink = NullSink;
    let response = dispatch(&Request { method, path, body }, &mut app, &mut sink);

    assert!(
        matches!(response.status, 200 | 400 | 404 | 405),
        "unexpected status {}",
        response.status
    );
    // Only successful reads carry a body.
    if response.status != 200 {
        assert!(response.body.is_none(), "error responses must be empty");
    }
});
