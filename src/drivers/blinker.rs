//! Tempo blink scheduling.
//!
//! Pure tick logic: the control loop calls [`BlinkEngine::tick`] every
//! poll interval and writes the returned level to the status LED. No
//! sleeping here; deadlines are computed against the caller's clock so
//! a blocked pulse can never stall input polling.
//!
//! The engine is quiescent until it has a tempo. `60000 / bpm` gives the
//! beat period in milliseconds (integer division, matching the query
//! surface's whole-BPM arithmetic); each beat lights the LED for a short
//! fixed hold. Timing sessions suppress the blink so the player is not
//! chasing a stale tempo while tapping a new one.

/// Beat-synchronised status LED pulse generator.
pub struct BlinkEngine {
    /// Beat period. `None` while no tempo is known.
    interval_ms: Option<u64>,
    pulse_hold_ms: u64,
    next_pulse_ms: u64,
    /// End of the pulse currently lit, 0 when dark.
    pulse_until_ms: u64,
}

impl BlinkEngine {
    pub fn new(pulse_hold_ms: u64) -> Self {
        Self {
            interval_ms: None,
            pulse_hold_ms,
            next_pulse_ms: 0,
            pulse_until_ms: 0,
        }
    }

    /// Adopt a new tempo. Zero means "no tempo": the engine goes dark
    /// until a non-zero tempo arrives. A non-zero tempo pulses on the
    /// next unsuppressed tick, then settles into the beat period.
    pub fn set_tempo(&mut self, bpm: u32) {
        if bpm == 0 {
            self.interval_ms = None;
        } else {
            self.interval_ms = Some(60_000 / u64::from(bpm));
            self.next_pulse_ms = 0;
        }
        self.pulse_until_ms = 0;
    }

    /// True while the engine knows a tempo to blink.
    pub fn has_tempo(&self) -> bool {
        self.interval_ms.is_some()
    }

    /// Advance to `now_ms` and return the LED level for this tick.
    ///
    /// `timing` suppresses pulses and pushes the schedule out, so the
    /// first pulse after a session lands one full beat after it ends.
    pub fn tick(&mut self, now_ms: u64, timing: bool) -> bool {
        let Some(interval) = self.interval_ms else {
            self.pulse_until_ms = 0;
            return false;
        };

        if timing {
            self.pulse_until_ms = 0;
            self.next_pulse_ms = now_ms + interval;
            return false;
        }

        if now_ms < self.pulse_until_ms {
            return true;
        }

        if now_ms >= self.next_pulse_ms {
            self.pulse_until_ms = now_ms + self.pulse_hold_ms;
            self.next_pulse_ms = now_ms + interval;
            return true;
        }

        false
    }
}

// ---------------------------------------------------------------------------
// One-shot pulse
// ---------------------------------------------------------------------------

/// Fixed-length LED flash, retriggerable. Drives the tap-feedback LED.
pub struct OneShotPulse {
    hold_ms: u64,
    until_ms: u64,
}

impl OneShotPulse {
    pub fn new(hold_ms: u64) -> Self {
        Self {
            hold_ms,
            until_ms: 0,
        }
    }

    /// Start (or restart) the flash at `now_ms`.
    pub fn trigger(&mut self, now_ms: u64) {
        self.until_ms = now_ms + self.hold_ms;
    }

    /// LED level at `now_ms`.
    pub fn level(&self, now_ms: u64) -> bool {
        now_ms < self.until_ms
    }
}
