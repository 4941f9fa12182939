use maze_chase_core::{ActorId, CellCoord, Direction, Phase, PhaseClock};

use crate::maze::Maze;

/// Grid-bound actor shared by the player and every pursuer.
#[derive(Clone, Debug)]
pub(crate) struct Actor {
    pub(crate) id: ActorId,
    pub(crate) cell: CellCoord,
    pub(crate) facing: Direction,
    pub(crate) phase: Phase,
    pub(crate) expires_at: Option<u64>,
    cadence: u64,
    spawn: CellCoord,
    spawn_facing: Direction,
}

impl Actor {
    pub(crate) fn spawn(
        id: ActorId,
        spawn: CellCoord,
        spawn_facing: Direction,
        cadence: u64,
        clock: &PhaseClock,
        level: u32,
        now: u64,
    ) -> Self {
        Self {
            id,
            cell: spawn,
            facing: spawn_facing,
            phase: Phase::Disperse,
            expires_at: clock.expiry(Phase::Disperse, level, now),
            cadence,
            spawn,
            spawn_facing,
        }
    }

    /// Enters `phase`, returning the phase that was left.
    pub(crate) fn enter_phase(
        &mut self,
        phase: Phase,
        clock: &PhaseClock,
        level: u32,
        now: u64,
    ) -> Phase {
        let previous = self.phase;
        self.phase = phase;
        self.expires_at = clock.expiry(phase, level, now);
        previous
    }

    /// Phase the actor should move to at tick `now`, if any.
    pub(crate) fn next_phase(&self, maze: &Maze, now: u64) -> Option<Phase> {
        if self.phase.is_timed() {
            match self.expires_at {
                Some(expiry) if now >= expiry => self.phase.successor(),
                _ => None,
            }
        } else if maze.view().is_den(self.cell) {
            Some(Phase::Disperse)
        } else {
            None
        }
    }

    pub(crate) fn is_due(&self, tick: u64) -> bool {
        self.cadence != 0 && tick % self.cadence == 0
    }

    /// Returns the actor to its spawn cell in a fresh disperse window.
    pub(crate) fn respawn(&mut self, clock: &PhaseClock, level: u32, now: u64) {
        self.cell = self.spawn;
        self.facing = self.spawn_facing;
        let _ = self.enter_phase(Phase::Disperse, clock, level, now);
    }
}
