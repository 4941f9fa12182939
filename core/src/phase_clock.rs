use serde::{Deserialize, Serialize};

use crate::Phase;

/// Disperse duration applied from a given level upward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisperseTier {
    /// First level the tier applies to.
    pub from_level: u32,
    /// Disperse duration in ticks.
    pub ticks: u64,
}

/// Timing table mapping timed phases to durations in ticks.
///
/// Disperse shrinks as the level rises and is looked up through
/// [`DisperseTier`] entries; the highest tier whose `from_level` does not
/// exceed the current level wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseClock {
    disperse: Vec<DisperseTier>,
    pursue_ticks: u64,
    vulnerable_ticks: u64,
}

impl PhaseClock {
    /// Creates a timing table from explicit durations.
    #[must_use]
    pub fn new(disperse: Vec<DisperseTier>, pursue_ticks: u64, vulnerable_ticks: u64) -> Self {
        Self {
            disperse,
            pursue_ticks,
            vulnerable_ticks,
        }
    }

    /// Disperse duration for `level`.
    ///
    /// Levels below every tier fall back to the lowest tier. An empty table
    /// yields zero.
    #[must_use]
    pub fn disperse_ticks(&self, level: u32) -> u64 {
        self.disperse
            .iter()
            .filter(|tier| tier.from_level <= level)
            .max_by_key(|tier| tier.from_level)
            .or_else(|| self.disperse.iter().min_by_key(|tier| tier.from_level))
            .map_or(0, |tier| tier.ticks)
    }

    /// Duration of `phase` at `level`, or `None` for event-terminated phases.
    #[must_use]
    pub fn duration(&self, phase: Phase, level: u32) -> Option<u64> {
        match phase {
            Phase::Disperse => Some(self.disperse_ticks(level)),
            Phase::Pursue => Some(self.pursue_ticks),
            Phase::Vulnerable => Some(self.vulnerable_ticks),
            Phase::Captured => None,
        }
    }

    /// Tick at which `phase`, entered at tick `now`, expires.
    #[must_use]
    pub fn expiry(&self, phase: Phase, level: u32, now: u64) -> Option<u64> {
        self.duration(phase, level)
            .map(|duration| now.saturating_add(duration))
    }
}

impl Default for PhaseClock {
    fn default() -> Self {
        Self {
            disperse: vec![
                DisperseTier {
                    from_level: 1,
                    ticks: 7 * 60,
                },
                DisperseTier {
                    from_level: 2,
                    ticks: 3,
                },
                DisperseTier {
                    from_level: 6,
                    ticks: 1,
                },
            ],
            pursue_ticks: 20 * 60,
            vulnerable_ticks: 10 * 60,
        }
    }
}
