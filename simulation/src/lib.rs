#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-step tick loop wiring the world to the pure systems.
//!
//! Each call to [`Simulation::step`] runs one full tick: phase evaluation,
//! pursuer steering from a snapshot taken before any movement, player
//! steering, collision and level resolution, and finally bonus placement.

use maze_chase_core::{Command, Direction, Event};
use maze_chase_system_bonus::BonusPlacer;
use maze_chase_system_pursuit::Pursuit;
use maze_chase_world::{self as world, query, MazeError, World, WorldConfig};
use tracing::trace;

const BONUS_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// One play session: the world plus the systems that steer it.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    pursuit: Pursuit,
    bonus: BonusPlacer,
    commands: Vec<Command>,
}

impl Simulation {
    /// Builds a fresh session from `config`, seeding every random stream from `seed`.
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, MazeError> {
        Ok(Self::from_world(World::new(config)?, seed))
    }

    /// Wraps an existing world.
    #[must_use]
    pub fn from_world(world: World, seed: u64) -> Self {
        Self {
            world,
            pursuit: Pursuit::new(seed),
            bonus: BonusPlacer::new(seed ^ BONUS_SEED_SALT),
            commands: Vec::new(),
        }
    }

    /// Read-only access to the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Reports whether the player has run out of lives.
    #[must_use]
    pub fn is_over(&self) -> bool {
        query::session(&self.world).ended
    }

    /// Advances the session by one tick, appending every emitted event to `out`.
    pub fn step(&mut self, requested: Direction, out: &mut Vec<Event>) {
        let first = out.len();
        world::apply(&mut self.world, Command::BeginTick, out);

        let view = query::pursuit_view(&self.world);
        self.pursuit.handle(&out[first..], &view, &mut self.commands);
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, out);
        }

        world::apply(&mut self.world, Command::SteerPlayer { requested }, out);

        let closing = out.len();
        world::apply(&mut self.world, Command::EndTick, out);
        let bonus_view = query::bonus_view(&self.world);
        self.bonus
            .handle(&out[closing..], &bonus_view, &mut self.commands);
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, out);
        }

        trace!(
            tick = query::session(&self.world).tick,
            events = out.len() - first,
            "tick complete"
        );
    }
}
