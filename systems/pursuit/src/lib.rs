#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure pursuer AI: picks a target per pursuer and steers toward it.

mod strategy;

use maze_chase_core::{
    CellCoord, Command, Direction, Event, MazeView, Phase, PursuerSnapshot, PursuitView,
    TargetPoint,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pure system that reacts to tick events and emits pursuer steering commands.
#[derive(Debug)]
pub struct Pursuit {
    rng: ChaCha8Rng,
}

impl Pursuit {
    /// Creates a pursuit system whose flee targets derive from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Consumes world events and the pursuit view to emit steering commands.
    ///
    /// Only ticks reported as playing produce commands, and only for pursuers
    /// whose cadence is due.
    pub fn handle(&mut self, events: &[Event], view: &PursuitView<'_>, out: &mut Vec<Command>) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TickStarted { playing: true, .. }))
        {
            return;
        }

        for pursuer in view.pursuers().filter(|pursuer| pursuer.due) {
            let target = self.target(pursuer, view);
            let direction = choose_direction(view.maze(), pursuer.cell, pursuer.facing, target);
            out.push(Command::SteerPursuer {
                pursuer: pursuer.id,
                direction,
            });
        }
    }

    fn target(&mut self, pursuer: &PursuerSnapshot, view: &PursuitView<'_>) -> TargetPoint {
        if view.maze().is_den(pursuer.cell) {
            return view.den_exit().to_point();
        }

        match pursuer.phase {
            Phase::Captured => view.den_target().to_point(),
            Phase::Vulnerable => self.flee_target(view.maze()),
            Phase::Disperse => pursuer.corner,
            Phase::Pursue => strategy::pursue_target(pursuer, view),
        }
    }

    fn flee_target(&mut self, maze: MazeView<'_>) -> TargetPoint {
        let (columns, rows) = maze.dimensions();
        let column = self.rng.gen_range(0..columns.max(1));
        let row = self.rng.gen_range(0..rows.max(1));
        CellCoord::new(column, row).to_point()
    }
}

/// Picks the direction whose neighbouring cell lies closest to `target`.
///
/// The reverse of `facing` is never considered, and neither are walls.
/// Ties go to the earlier direction in [`Direction::CARDINALS`]. Returns
/// [`Direction::Stop`] when no candidate remains.
#[must_use]
pub fn choose_direction(
    maze: MazeView<'_>,
    cell: CellCoord,
    facing: Direction,
    target: TargetPoint,
) -> Direction {
    let reverse = facing.reverse();
    let mut best: Option<(i64, Direction)> = None;

    for direction in Direction::CARDINALS {
        if direction == reverse {
            continue;
        }
        let Some(candidate) = maze.neighbor(cell, direction) else {
            continue;
        };
        if maze.is_wall(candidate) {
            continue;
        }

        let distance = candidate.to_point().distance_squared(target);
        if best.map_or(true, |(closest, _)| distance < closest) {
            best = Some((distance, direction));
        }
    }

    best.map_or(Direction::Stop, |(_, direction)| direction)
}
