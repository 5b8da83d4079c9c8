//! Rolling BPM sample history.
//!
//! A fixed ring of [`HISTORY_SLOTS`] samples, oldest first. Pushing a new
//! sample evicts the oldest in O(1) by rotating a head index — no shifting.
//! The window size is a hardware constant of the product, not a tunable.
//!
//! Slots are typed: an empty slot and an invalid (degenerate-timing) slot
//! both *read* as 0 at the query surface, so callers cannot tell "no tempo
//! yet" from "tempo measured as zero". That ambiguity is part of the wire
//! contract; the distinction only exists internally.

/// Number of samples the history retains. Fixed, never resized.
pub const HISTORY_SLOTS: usize = 4;

// ---------------------------------------------------------------------------
// Sample
// ---------------------------------------------------------------------------

/// One slot of the BPM history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sample {
    /// Never written, or cleared by an extreme deletion.
    #[default]
    Empty,
    /// Produced by a session whose elapsed time was not positive.
    /// Reads as 0 but is distinguishable from a real measurement.
    Invalid,
    /// A measured or overridden tempo.
    Bpm(u32),
}

impl Sample {
    /// The numeric value this slot contributes to queries.
    /// `Empty` and `Invalid` both read as 0.
    pub const fn value(self) -> u32 {
        match self {
            Self::Empty | Self::Invalid => 0,
            Self::Bpm(v) => v,
        }
    }
}

// ---------------------------------------------------------------------------
// Extreme selector
// ---------------------------------------------------------------------------

/// Which end of the sample range an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Min,
    Max,
}

// ---------------------------------------------------------------------------
// BpmHistory
// ---------------------------------------------------------------------------

/// Fixed-capacity rolling record of recent BPM samples.
///
/// Always holds exactly [`HISTORY_SLOTS`] entries; new samples evict the
/// oldest. Freshly constructed, every slot is [`Sample::Empty`] and the
/// history reads as four zeros.
#[derive(Debug, Clone)]
pub struct BpmHistory {
    slots: [Sample; HISTORY_SLOTS],
    /// Index of the oldest slot; the newest lives just behind it.
    head: usize,
}

impl BpmHistory {
    pub const fn new() -> Self {
        Self {
            slots: [Sample::Empty; HISTORY_SLOTS],
            head: 0,
        }
    }

    /// Append `sample` as the newest entry, evicting the oldest.
    pub fn push(&mut self, sample: Sample) {
        self.slots[self.head] = sample;
        self.head = (self.head + 1) % HISTORY_SLOTS;
    }

    /// The most recently pushed sample.
    pub fn newest(&self) -> Sample {
        self.slots[(self.head + HISTORY_SLOTS - 1) % HISTORY_SLOTS]
    }

    /// Samples in push order, oldest first.
    pub fn oldest_first(&self) -> [Sample; HISTORY_SLOTS] {
        let mut out = [Sample::Empty; HISTORY_SLOTS];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.slots[(self.head + i) % HISTORY_SLOTS];
        }
        out
    }

    /// Numeric values in push order, oldest first.
    pub fn values(&self) -> [u32; HISTORY_SLOTS] {
        self.oldest_first().map(Sample::value)
    }

    /// The extreme numeric value currently held. Ties resolve to the
    /// first-encountered slot scanning oldest to newest, which only
    /// matters to callers pairing this with [`clear_value`].
    ///
    /// [`clear_value`]: Self::clear_value
    pub fn extreme_value(&self, which: Extreme) -> u32 {
        let values = self.values();
        let mut ans = values[0];
        for &v in &values[1..] {
            let better = match which {
                Extreme::Min => v < ans,
                Extreme::Max => v > ans,
            };
            if better {
                ans = v;
            }
        }
        ans
    }

    /// Clear **every** slot whose numeric value equals `value`, returning
    /// how many slots were cleared. Multiple slots sharing the extreme all
    /// go in one call — deletion is by value, not by position.
    pub fn clear_value(&mut self, value: u32) -> usize {
        let mut cleared = 0;
        for slot in &mut self.slots {
            if slot.value() == value {
                *slot = Sample::Empty;
                cleared += 1;
            }
        }
        cleared
    }
}

impl Default for BpmHistory {
    fn default() -> Self {
        Self::new()
    }
}
