#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Chase.
//!
//! The world owns the maze, every actor and the session counters. All
//! mutation flows through [`apply`], which executes a [`Command`] and reports
//! what happened as [`Event`] values. Read-only access is provided by the
//! [`query`] module.

mod actor;
mod collision;
mod maze;

pub use maze::{Maze, MazeError, MazeLayout, PursuerLayout};

use maze_chase_core::{ActorId, CellCoord, Command, Direction, Event, PhaseClock, PursuerId, Tile};
use tracing::{debug, trace};

use crate::actor::Actor;

const DEFAULT_PLAYER_CADENCE: u64 = 8;
const DEFAULT_PURSUER_CADENCE: u64 = 10;
const DEFAULT_STARTING_LIVES: u32 = 3;
const DEFAULT_READY_TICKS: u64 = 240;

const PLAYER_INDEX: usize = 4;

/// Tunables used to construct a [`World`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    /// Maze layout and markers.
    pub layout: MazeLayout,
    /// Phase timing table.
    pub phase_clock: PhaseClock,
    /// Ticks between player moves.
    pub player_cadence: u64,
    /// Ticks between pursuer moves.
    pub pursuer_cadence: u64,
    /// Lives granted at session start.
    pub starting_lives: u32,
    /// Ticks at session start during which no actor acts.
    pub ready_ticks: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            layout: MazeLayout::classic(),
            phase_clock: PhaseClock::default(),
            player_cadence: DEFAULT_PLAYER_CADENCE,
            pursuer_cadence: DEFAULT_PURSUER_CADENCE,
            starting_lives: DEFAULT_STARTING_LIVES,
            ready_ticks: DEFAULT_READY_TICKS,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct BonusState {
    eligible: bool,
    placed: Option<CellCoord>,
    collected: bool,
}

impl BonusState {
    const fn awaiting_placement(&self) -> bool {
        self.eligible && self.placed.is_none() && !self.collected
    }
}

#[derive(Clone, Debug)]
struct Session {
    score: u64,
    lives: u32,
    level: u32,
    tick: u64,
    capture_streak: u32,
    bonus: BonusState,
    ended: bool,
}

impl Session {
    fn new(lives: u32) -> Self {
        Self {
            score: 0,
            lives,
            level: 1,
            tick: 0,
            capture_streak: 0,
            bonus: BonusState::default(),
            ended: false,
        }
    }
}

/// Represents the authoritative Maze Chase world state.
#[derive(Debug)]
pub struct World {
    layout: MazeLayout,
    maze: Maze,
    clock: PhaseClock,
    actors: Vec<Actor>,
    ready_ticks: u64,
    session: Session,
}

impl World {
    /// Creates a new world with a fresh session.
    pub fn new(config: WorldConfig) -> Result<Self, MazeError> {
        let maze = config.layout.build()?;
        let session = Session::new(config.starting_lives);
        let mut actors = Vec::with_capacity(ActorId::ALL.len());
        for id in PursuerId::ALL {
            let markers = config.layout.pursuer(id);
            actors.push(Actor::spawn(
                ActorId::Pursuer(id),
                markers.spawn,
                markers.facing,
                config.pursuer_cadence,
                &config.phase_clock,
                session.level,
                session.tick,
            ));
        }
        actors.push(Actor::spawn(
            ActorId::Player,
            config.layout.player_spawn,
            Direction::Stop,
            config.player_cadence,
            &config.phase_clock,
            session.level,
            session.tick,
        ));

        Ok(Self {
            layout: config.layout,
            maze,
            clock: config.phase_clock,
            actors,
            ready_ticks: config.ready_ticks,
            session,
        })
    }

    fn is_playing(&self) -> bool {
        !self.session.ended && self.session.tick >= self.ready_ticks
    }

    fn actor(&self, id: ActorId) -> &Actor {
        &self.actors[actor_index(id)]
    }

    fn player(&self) -> &Actor {
        &self.actors[PLAYER_INDEX]
    }

    fn begin_tick(&mut self, out_events: &mut Vec<Event>) {
        let tick = self.session.tick;
        if tick == 0 {
            out_events.push(Event::SessionStarted {
                lives: self.session.lives,
            });
        }
        if self.ready_ticks > 0 && tick == self.ready_ticks {
            out_events.push(Event::ReadyEnded);
        }

        let playing = self.is_playing();
        out_events.push(Event::TickStarted { tick, playing });
        if playing {
            self.evaluate_phases(out_events);
        }
    }

    fn evaluate_phases(&mut self, out_events: &mut Vec<Event>) {
        let tick = self.session.tick;
        let level = self.session.level;
        for actor in &mut self.actors {
            if actor.id == ActorId::Player {
                continue;
            }
            if let Some(next) = actor.next_phase(&self.maze, tick) {
                let from = actor.enter_phase(next, &self.clock, level, tick);
                trace!(actor = ?actor.id, ?from, to = ?next, tick, "phase expired");
                out_events.push(Event::PhaseChanged {
                    actor: actor.id,
                    from,
                    to: next,
                });
            }
        }
    }

    fn steer(&mut self, id: ActorId, direction: Direction, out_events: &mut Vec<Event>) {
        let maze = self.maze.view();
        let actor = &mut self.actors[actor_index(id)];
        let from = actor.cell;
        let resolution = maze.resolve(from, direction);
        assert!(
            !maze.is_wall(resolution.cell),
            "{id:?} resolved onto a wall at {:?}",
            resolution.cell
        );

        actor.cell = resolution.cell;
        actor.facing = resolution.facing;
        if resolution.facing != Direction::Stop {
            out_events.push(Event::ActorMoved {
                actor: id,
                from,
                to: resolution.cell,
            });
        } else if direction != Direction::Stop {
            out_events.push(Event::ActorStopped {
                actor: id,
                cell: from,
            });
        }
    }

    fn steer_pursuer(&mut self, pursuer: PursuerId, direction: Direction, out_events: &mut Vec<Event>) {
        let id = ActorId::Pursuer(pursuer);
        if !self.is_playing() || !self.actor(id).is_due(self.session.tick) {
            trace!(?pursuer, tick = self.session.tick, "steer ignored");
            return;
        }
        self.steer(id, direction, out_events);
    }

    fn steer_player(&mut self, requested: Direction, out_events: &mut Vec<Event>) {
        if !self.is_playing() || !self.player().is_due(self.session.tick) {
            return;
        }

        let player = self.player();
        let maze = self.maze.view();
        let open = requested != Direction::Stop
            && maze
                .neighbor(player.cell, requested)
                .map_or(false, |cell| !maze.is_wall(cell));
        let direction = if open { requested } else { player.facing };
        self.steer(ActorId::Player, direction, out_events);
    }

    fn place_bonus(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        if !self.is_playing() || !self.session.bonus.awaiting_placement() {
            return;
        }

        if self.maze.tile(cell) == Some(Tile::Empty) {
            self.session.bonus.placed = Some(cell);
            debug!(?cell, level = self.session.level, "bonus placed");
            out_events.push(Event::BonusPlaced { cell });
        } else {
            out_events.push(Event::BonusPlacementRejected { cell });
        }
    }

    fn end_tick(&mut self, out_events: &mut Vec<Event>) {
        if self.is_playing() {
            self.resolve_collisions(out_events);
            if !self.session.ended && self.maze.remaining_collectibles() == 0 {
                self.advance_level(out_events);
            }
            if !self.session.ended
                && !self.session.bonus.eligible
                && self.session.score > collision::BONUS_THRESHOLD
            {
                self.session.bonus.eligible = true;
                out_events.push(Event::BonusEligible);
            }
        }

        self.session.tick = self.session.tick.saturating_add(1);
        out_events.push(Event::TickEnded {
            tick: self.session.tick,
        });
    }

    fn advance_level(&mut self, out_events: &mut Vec<Event>) {
        self.session.level = self.session.level.saturating_add(1);
        self.session.bonus = BonusState::default();
        self.maze.reload();
        self.respawn_all();
        debug!(
            level = self.session.level,
            score = self.session.score,
            "level advanced"
        );
        out_events.push(Event::LevelAdvanced {
            level: self.session.level,
        });
    }

    fn respawn_all(&mut self) {
        let level = self.session.level;
        let tick = self.session.tick;
        for actor in &mut self.actors {
            actor.respawn(&self.clock, level, tick);
        }
    }
}

fn actor_index(id: ActorId) -> usize {
    match id {
        ActorId::Pursuer(pursuer) => pursuer.index(),
        ActorId::Player => PLAYER_INDEX,
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the session has ended every command is ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.session.ended {
        return;
    }

    match command {
        Command::BeginTick => world.begin_tick(out_events),
        Command::SteerPursuer { pursuer, direction } => {
            world.steer_pursuer(pursuer, direction, out_events);
        }
        Command::SteerPlayer { requested } => world.steer_player(requested, out_events),
        Command::PlaceBonus { cell } => world.place_bonus(cell, out_events),
        Command::EndTick => world.end_tick(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_chase_core::{
        ActorId, BonusView, CellCoord, Direction, Phase, PhaseClock, PlayerSnapshot,
        PursuerSnapshot, PursuitView,
    };

    use super::{Maze, MazeLayout, World};

    /// Provides read-only access to the maze.
    #[must_use]
    pub fn maze(world: &World) -> &Maze {
        &world.maze
    }

    /// Layout the world was built from.
    #[must_use]
    pub fn layout(world: &World) -> &MazeLayout {
        &world.layout
    }

    /// Phase timing table in use.
    #[must_use]
    pub fn phase_clock(world: &World) -> &PhaseClock {
        &world.clock
    }

    /// Captures the session counters.
    #[must_use]
    pub fn session(world: &World) -> SessionSnapshot {
        let session = &world.session;
        SessionSnapshot {
            score: session.score,
            lives: session.lives,
            level: session.level,
            tick: session.tick,
            remaining_collectibles: world.maze.remaining_collectibles(),
            capture_streak: session.capture_streak,
            playing: world.is_playing(),
            ended: session.ended,
        }
    }

    /// Captures a single actor.
    #[must_use]
    pub fn actor(world: &World, id: ActorId) -> ActorSnapshot {
        let actor = world.actor(id);
        ActorSnapshot {
            id: actor.id,
            cell: actor.cell,
            facing: actor.facing,
            phase: actor.phase,
            expires_at: actor.expires_at,
        }
    }

    /// Captures every actor in update order.
    #[must_use]
    pub fn actors(world: &World) -> Vec<ActorSnapshot> {
        ActorId::ALL.iter().map(|id| actor(world, *id)).collect()
    }

    /// Snapshot consumed by pursuer targeting.
    #[must_use]
    pub fn pursuit_view(world: &World) -> PursuitView<'_> {
        let tick = world.session.tick;
        let playing = world.is_playing();
        let pursuers = world
            .actors
            .iter()
            .filter_map(|actor| match actor.id {
                ActorId::Pursuer(id) => Some(PursuerSnapshot {
                    id,
                    cell: actor.cell,
                    facing: actor.facing,
                    phase: actor.phase,
                    corner: world.layout.pursuer(id).corner,
                    due: playing && actor.is_due(tick),
                }),
                ActorId::Player => None,
            })
            .collect();
        let player = world.player();

        PursuitView::new(
            world.maze.view(),
            pursuers,
            PlayerSnapshot {
                cell: player.cell,
                facing: player.facing,
            },
            world.layout.den_target,
            world.layout.den_exit,
        )
    }

    /// Snapshot consumed by bonus placement.
    #[must_use]
    pub fn bonus_view(world: &World) -> BonusView {
        BonusView {
            columns: world.maze.columns(),
            rows: world.maze.rows(),
            awaiting_placement: world.is_playing() && world.session.bonus.awaiting_placement(),
            placed: world.session.bonus.placed,
        }
    }

    /// Cell holding the bonus item, if one is placed.
    #[must_use]
    pub fn bonus(world: &World) -> Option<CellCoord> {
        world.session.bonus.placed
    }

    /// Read-only copy of the session counters.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SessionSnapshot {
        /// Points accumulated so far.
        pub score: u64,
        /// Lives left.
        pub lives: u32,
        /// Level in play, starting at one.
        pub level: u32,
        /// Global tick counter.
        pub tick: u64,
        /// Dots and power items still in the maze.
        pub remaining_collectibles: u32,
        /// Pursuers captured since the last power item.
        pub capture_streak: u32,
        /// Whether the ready period has elapsed and the session is live.
        pub playing: bool,
        /// Whether the player ran out of lives.
        pub ended: bool,
    }

    /// Read-only copy of a single actor.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ActorSnapshot {
        /// Identity of the actor.
        pub id: ActorId,
        /// Cell currently occupied.
        pub cell: CellCoord,
        /// Current facing.
        pub facing: Direction,
        /// Current phase.
        pub phase: Phase,
        /// Tick at which the current phase expires, if timed.
        pub expires_at: Option<u64>,
    }
}

/// Direct state manipulation used to stage test scenarios.
#[cfg(any(test, feature = "scenario_scaffolding"))]
pub mod scaffolding {
    use maze_chase_core::{ActorId, CellCoord, Direction, Phase, TargetPoint, Tile};

    use super::{actor_index, MazeLayout, PursuerLayout, World};

    /// Teleports an actor without emitting events.
    pub fn place_actor(world: &mut World, id: ActorId, cell: CellCoord, facing: Direction) {
        let actor = &mut world.actors[actor_index(id)];
        actor.cell = cell;
        actor.facing = facing;
    }

    /// Forces an actor into `phase` with an expiry computed from the current tick.
    pub fn enter_phase(world: &mut World, id: ActorId, phase: Phase) {
        let level = world.session.level;
        let tick = world.session.tick;
        let _ = world.actors[actor_index(id)].enter_phase(phase, &world.clock, level, tick);
    }

    /// Overwrites a maze tile, recounting the collectibles.
    pub fn set_tile(world: &mut World, cell: CellCoord, tile: Tile) {
        world.maze.set_tile(cell, tile);
    }

    /// Overwrites the score.
    pub fn set_score(world: &mut World, score: u64) {
        world.session.score = score;
    }

    /// Seven by five layout with four collectibles along the top corridor.
    ///
    /// ```text
    /// #######
    /// #*@**_#
    /// #_###_#
    /// #__G__#
    /// #######
    /// ```
    ///
    /// The player spawns at (5, 2); pursuers spawn along the bottom corridor.
    #[must_use]
    pub fn compact_layout() -> MazeLayout {
        let pursuer = |column: u32, corner: TargetPoint| PursuerLayout {
            spawn: CellCoord::new(column, 3),
            facing: Direction::Stop,
            corner,
        };
        MazeLayout {
            rows: ["#######", "#*@**_#", "#_###_#", "#__G__#", "#######"]
                .iter()
                .map(|row| (*row).to_owned())
                .collect(),
            player_spawn: CellCoord::new(5, 2),
            chaser: pursuer(1, TargetPoint::new(8, -1)),
            ambusher: pursuer(2, TargetPoint::new(-1, -1)),
            flanker: pursuer(4, TargetPoint::new(8, 5)),
            skulker: pursuer(5, TargetPoint::new(-1, 5)),
            den_target: CellCoord::new(3, 3),
            den_exit: CellCoord::new(3, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::Phase;

    fn compact_world(ready_ticks: u64) -> World {
        World::new(WorldConfig {
            layout: scaffolding::compact_layout(),
            ready_ticks,
            ..WorldConfig::default()
        })
        .expect("compact layout")
    }

    fn run_tick(world: &mut World, commands: &[Command]) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::BeginTick, &mut events);
        for command in commands {
            apply(world, *command, &mut events);
        }
        apply(world, Command::EndTick, &mut events);
        events
    }

    #[test]
    fn classic_world_starts_at_level_one() {
        let world = World::new(WorldConfig::default()).expect("classic world");
        let session = query::session(&world);
        assert_eq!(session.level, 1);
        assert_eq!(session.lives, 3);
        assert_eq!(session.score, 0);
        assert!(!session.playing);

        let chaser = query::actor(&world, ActorId::Pursuer(PursuerId::Chaser));
        assert_eq!(chaser.cell, CellCoord::new(11, 10));
        assert_eq!(chaser.facing, Direction::Up);
        assert_eq!(chaser.phase, Phase::Disperse);
        assert_eq!(chaser.expires_at, Some(420));
        assert_eq!(
            query::actor(&world, ActorId::Player).cell,
            CellCoord::new(11, 18)
        );
    }

    #[test]
    fn invalid_layout_is_rejected() {
        let mut layout = scaffolding::compact_layout();
        layout.den_exit = CellCoord::new(0, 0);
        let error = World::new(WorldConfig {
            layout,
            ..WorldConfig::default()
        })
        .expect_err("den exit on a wall");
        assert!(matches!(error, MazeError::BlockedMarker { .. }));
    }

    #[test]
    fn ready_period_holds_every_actor() {
        let mut world = compact_world(2);

        let first = run_tick(
            &mut world,
            &[Command::SteerPlayer {
                requested: Direction::Up,
            }],
        );
        assert_eq!(first[0], Event::SessionStarted { lives: 3 });
        assert!(first.contains(&Event::TickStarted {
            tick: 0,
            playing: false
        }));
        assert_eq!(
            query::actor(&world, ActorId::Player).cell,
            CellCoord::new(5, 2)
        );

        let _ = run_tick(&mut world, &[]);
        let third = run_tick(&mut world, &[]);
        assert!(third.contains(&Event::ReadyEnded));
        assert!(third.contains(&Event::TickStarted {
            tick: 2,
            playing: true
        }));
    }

    #[test]
    fn player_falls_back_to_its_facing_when_blocked() {
        let mut world = compact_world(0);
        scaffolding::place_actor(
            &mut world,
            ActorId::Player,
            CellCoord::new(1, 2),
            Direction::Up,
        );

        let events = run_tick(
            &mut world,
            &[Command::SteerPlayer {
                requested: Direction::Right,
            }],
        );
        assert!(events.contains(&Event::ActorMoved {
            actor: ActorId::Player,
            from: CellCoord::new(1, 2),
            to: CellCoord::new(1, 1),
        }));
        let player = query::actor(&world, ActorId::Player);
        assert_eq!(player.facing, Direction::Up);
    }

    #[test]
    fn player_only_moves_on_its_cadence() {
        let mut world = compact_world(0);
        let steer = [Command::SteerPlayer {
            requested: Direction::Up,
        }];

        let _ = run_tick(&mut world, &steer);
        assert_eq!(
            query::actor(&world, ActorId::Player).cell,
            CellCoord::new(5, 1)
        );

        for _ in 1..8 {
            let _ = run_tick(&mut world, &steer);
        }
        assert_eq!(
            query::actor(&world, ActorId::Player).cell,
            CellCoord::new(5, 1)
        );
        assert_eq!(query::actor(&world, ActorId::Player).facing, Direction::Up);

        let _ = run_tick(&mut world, &steer);
        let player = query::actor(&world, ActorId::Player);
        assert_eq!(player.cell, CellCoord::new(5, 1));
        assert_eq!(player.facing, Direction::Stop);
    }

    #[test]
    fn pursuer_steering_respects_cadence_and_walls() {
        let mut world = compact_world(0);
        let chaser = ActorId::Pursuer(PursuerId::Chaser);

        let blocked = run_tick(
            &mut world,
            &[Command::SteerPursuer {
                pursuer: PursuerId::Chaser,
                direction: Direction::Down,
            }],
        );
        assert!(blocked.contains(&Event::ActorStopped {
            actor: chaser,
            cell: CellCoord::new(1, 3),
        }));

        let idle = run_tick(
            &mut world,
            &[Command::SteerPursuer {
                pursuer: PursuerId::Chaser,
                direction: Direction::Up,
            }],
        );
        assert!(!idle
            .iter()
            .any(|event| matches!(event, Event::ActorMoved { .. })));
        assert_eq!(query::actor(&world, chaser).cell, CellCoord::new(1, 3));
    }

    #[test]
    fn stop_leaves_a_pursuer_in_place() {
        let mut world = compact_world(0);
        let chaser = ActorId::Pursuer(PursuerId::Chaser);
        scaffolding::place_actor(&mut world, chaser, CellCoord::new(2, 3), Direction::Left);

        let events = run_tick(
            &mut world,
            &[Command::SteerPursuer {
                pursuer: PursuerId::Chaser,
                direction: Direction::Stop,
            }],
        );
        assert!(!events.iter().any(|event| matches!(
            event,
            Event::ActorMoved { actor, .. } | Event::ActorStopped { actor, .. } if *actor == chaser
        )));
        let snapshot = query::actor(&world, chaser);
        assert_eq!(snapshot.cell, CellCoord::new(2, 3));
        assert_eq!(snapshot.facing, Direction::Stop);
    }

    #[test]
    fn phase_timers_only_apply_to_pursuers() {
        let mut world = World::new(WorldConfig {
            layout: scaffolding::compact_layout(),
            ready_ticks: 0,
            player_cadence: 0,
            pursuer_cadence: 0,
            ..WorldConfig::default()
        })
        .expect("world");

        let mut changes = Vec::new();
        for _ in 0..=420 {
            for event in run_tick(&mut world, &[]) {
                if let Event::PhaseChanged { actor, to, .. } = event {
                    changes.push((actor, to));
                }
            }
        }
        assert!(changes.contains(&(ActorId::Pursuer(PursuerId::Chaser), Phase::Pursue)));
        assert!(changes.iter().all(|(actor, _)| *actor != ActorId::Player));
    }

    #[test]
    fn bonus_only_lands_on_empty_cells_after_threshold() {
        let mut world = compact_world(0);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceBonus {
                cell: CellCoord::new(5, 1),
            },
            &mut events,
        );
        assert!(events.is_empty());

        scaffolding::set_score(&mut world, 701);
        let eligible = run_tick(&mut world, &[]);
        assert!(eligible.contains(&Event::BonusEligible));
        assert!(query::bonus_view(&world).awaiting_placement);

        let rejected = run_tick(
            &mut world,
            &[Command::PlaceBonus {
                cell: CellCoord::new(1, 1),
            }],
        );
        assert!(rejected.contains(&Event::BonusPlacementRejected {
            cell: CellCoord::new(1, 1)
        }));

        let placed = run_tick(
            &mut world,
            &[Command::PlaceBonus {
                cell: CellCoord::new(1, 2),
            }],
        );
        assert!(placed.contains(&Event::BonusPlaced {
            cell: CellCoord::new(1, 2)
        }));
        assert_eq!(query::bonus(&world), Some(CellCoord::new(1, 2)));
        assert!(!query::bonus_view(&world).awaiting_placement);
    }

    #[test]
    fn ended_sessions_ignore_commands() {
        let mut world = World::new(WorldConfig {
            layout: scaffolding::compact_layout(),
            ready_ticks: 0,
            starting_lives: 1,
            ..WorldConfig::default()
        })
        .expect("world");
        scaffolding::place_actor(
            &mut world,
            ActorId::Pursuer(PursuerId::Chaser),
            CellCoord::new(5, 2),
            Direction::Stop,
        );

        let events = run_tick(&mut world, &[]);
        assert!(events.contains(&Event::SessionEnded { score: 0, level: 1 }));
        assert!(query::session(&world).ended);

        let after = run_tick(&mut world, &[]);
        assert!(after.is_empty());
        assert_eq!(query::session(&world).tick, 1);
    }
}
