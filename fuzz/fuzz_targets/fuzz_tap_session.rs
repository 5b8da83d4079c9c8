//! Fuzz target: `Metronome` session lifecycle
//!
//! Interprets arbitrary bytes as an op stream (toggle, tap, delete
//! min/max) and asserts the estimator never panics and the history
//! window never changes size.
//!
//! cargo fuzz run fuzz_tap_session

#![no_main]

use libfuzzer_sys::fuzz_target;
use tapmetro::metronome::{Extreme, Metronome, HISTORY_SLOTS};

fuzz_target!(|data: &[u8]| {
    let mut m = Metronome::new();
    let mut now: u64 = 0;

    for &op in data {
        match op {
            0 => {
                if m.is_timing() {
                    let _ = m.stop_timing();
                } else {
                    m.start_timing();
                }
            }
            254 => {
                let _ = m.delete_extreme(Extreme::Min);
            }
            255 => {
                let _ = m.delete_extreme(Extreme::Max);
            }
            delta => {
                now += u64::from(delta);
                if m.is_timing() {
                    m.tap(now);
                }
            }
        }

        assert_eq!(m.history().values().len(), HISTORY_SLOTS);
        let (min, max) = (m.min_bpm(), m.max_bpm());
        assert!(min <= max, "min {min} above max {max}");
    }
});
