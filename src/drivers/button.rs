//! Level-polled two-button input with a shared settle delay.
//!
//! ## Hardware
//!
//! Two active-high momentary switches with external pull-downs, sampled
//! by level (not edge) from the main loop at poll-tick rate. No ISR: at
//! a 10 ms poll interval a human press spans many ticks, and the settle
//! delay below swallows both contact bounce and the extra ticks.
//!
//! ## Actions
//!
//! | Button | Condition                    | Action       |
//! |--------|------------------------------|--------------|
//! | Mode   | level high, settle elapsed   | `ToggleMode` |
//! | Tap    | level high, settle elapsed, timing | `Tap`  |
//!
//! One action per poll at most; Mode wins when both levels are high.
//! Every accepted action arms a single settle deadline covering *both*
//! buttons, so a tap right after a mode press is swallowed too. A button
//! held past the settle window fires again — level polling cannot tell
//! "still held" from "pressed again", and the settle window is the only
//! thing standing between a held button and an action per tick.

/// Debounced actions the poller reports to the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Mode button: toggle between idle and timing.
    ToggleMode,
    /// Tap button during a timing session.
    Tap,
}

pub struct InputPoller {
    settle_delay_ms: u64,
    /// Both inputs are ignored until this deadline passes.
    settle_until_ms: u64,
}

impl InputPoller {
    pub fn new(settle_delay_ms: u64) -> Self {
        Self {
            settle_delay_ms,
            settle_until_ms: 0,
        }
    }

    /// Classify one sample of the two button levels.
    ///
    /// `timing` gates the tap button: taps outside a timing session are
    /// ignored without arming the settle delay.
    pub fn poll(
        &mut self,
        now_ms: u64,
        mode_level: bool,
        tap_level: bool,
        timing: bool,
    ) -> Option<InputAction> {
        if now_ms < self.settle_until_ms {
            return None;
        }

        let action = if mode_level {
            InputAction::ToggleMode
        } else if tap_level && timing {
            InputAction::Tap
        } else {
            return None;
        };

        self.settle_until_ms = now_ms + self.settle_delay_ms;
        Some(action)
    }
}
