//! Inbound commands to the application service.
//!
//! These represent mutations requested by the outside world (today the
//! HTTP adapter, tomorrow perhaps serial) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.
//! Read-only queries go straight to the service's query methods.

use crate::metronome::Extreme;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Push an externally supplied tempo as the newest sample.
    OverrideTempo(u32),

    /// Clear every history slot holding the given extreme.
    ClearExtreme(Extreme),
}

/// What a command produced, for the adapter to relay back to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandReply {
    /// The override was recorded.
    TempoSet,

    /// The extreme that was cleared and how many slots held it.
    ExtremeCleared { bpm: u32, slots: usize },
}
