#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bonus item placement system.
//!
//! Once the world reports the bonus as eligible, the placer proposes a random
//! cell at the end of every tick until the world accepts one.

use maze_chase_core::{BonusView, CellCoord, Command, Event};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pure system that proposes cells for the bonus item.
#[derive(Debug)]
pub struct BonusPlacer {
    rng: ChaCha8Rng,
}

impl BonusPlacer {
    /// Creates a placer whose candidates derive from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Emits a placement proposal after each completed tick that still lacks one.
    pub fn handle(&mut self, events: &[Event], view: &BonusView, out: &mut Vec<Command>) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TickEnded { .. }))
        {
            return;
        }
        if !view.awaiting_placement || view.columns == 0 || view.rows == 0 {
            return;
        }

        let cell = CellCoord::new(
            self.rng.gen_range(0..view.columns),
            self.rng.gen_range(0..view.rows),
        );
        out.push(Command::PlaceBonus { cell });
    }
}
