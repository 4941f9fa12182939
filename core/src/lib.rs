#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The simulation submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values. Systems read
//! immutable views such as [`PursuitView`] and respond exclusively with new
//! command batches.

mod phase_clock;

pub use phase_clock::{DisperseTier, PhaseClock};

use serde::{Deserialize, Serialize};

/// Movement directions available to every actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
    /// No movement; the actor is stationary.
    Stop,
}

impl Direction {
    /// Moving directions in the enumeration order used for tie-breaking.
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Signed unit vector `(dx, dy)` of the direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Stop => (0, 0),
        }
    }

    /// Opposite direction. [`Direction::Stop`] maps to itself.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Stop => Self::Stop,
        }
    }

    /// Resolves held input into a single requested direction.
    ///
    /// When several directions are held at once the first one in
    /// [`Direction::CARDINALS`] order wins. Returns [`Direction::Stop`] when
    /// nothing is held.
    #[must_use]
    pub fn from_held<F>(is_held: F) -> Self
    where
        F: Fn(Direction) -> bool,
    {
        Self::CARDINALS
            .into_iter()
            .find(|direction| is_held(*direction))
            .unwrap_or(Self::Stop)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Neighbouring cell in `direction`, wrapping each axis independently
    /// around a grid of the provided dimensions.
    ///
    /// Returns `None` when either dimension is zero.
    #[must_use]
    pub fn offset_wrapped(self, direction: Direction, columns: u32, rows: u32) -> Option<Self> {
        let (dx, dy) = direction.delta();
        let column = wrap_axis(self.column, dx, columns)?;
        let row = wrap_axis(self.row, dy, rows)?;
        Some(Self::new(column, row))
    }

    /// Signed point located at the centre of this cell.
    #[must_use]
    pub fn to_point(self) -> TargetPoint {
        TargetPoint::new(
            i32::try_from(self.column).unwrap_or(i32::MAX),
            i32::try_from(self.row).unwrap_or(i32::MAX),
        )
    }
}

fn wrap_axis(value: u32, delta: i32, bound: u32) -> Option<u32> {
    if bound == 0 {
        return None;
    }
    let wrapped = (i64::from(value) + i64::from(delta)).rem_euclid(i64::from(bound));
    u32::try_from(wrapped).ok()
}

/// Signed grid point used as a steering target.
///
/// Targets may lie outside the grid, for example the disperse corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetPoint {
    column: i32,
    row: i32,
}

impl TargetPoint {
    /// Creates a new target point.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Column component of the point.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Row component of the point.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Point displaced `tiles` steps along `direction`.
    #[must_use]
    pub const fn ahead(self, direction: Direction, tiles: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.column + dx * tiles, self.row + dy * tiles)
    }

    /// Squared Euclidean distance between two points.
    #[must_use]
    pub fn distance_squared(self, other: TargetPoint) -> i64 {
        let dx = i64::from(self.column) - i64::from(other.column);
        let dy = i64::from(self.row) - i64::from(other.row);
        dx * dx + dy * dy
    }
}

/// Contents of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Impassable wall.
    Wall,
    /// Walkable cell that never held a collectible.
    Open,
    /// Walkable cell holding a minor collectible.
    Dot,
    /// Walkable cell holding a power item.
    PowerItem,
    /// Walkable cell whose collectible was taken (or never placed).
    Empty,
    /// Walkable cell belonging to the pursuer den.
    Den,
}

impl Tile {
    /// Parses a layout glyph.
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '#' => Some(Self::Wall),
            ' ' => Some(Self::Open),
            '*' => Some(Self::Dot),
            '@' => Some(Self::PowerItem),
            '_' => Some(Self::Empty),
            'G' => Some(Self::Den),
            _ => None,
        }
    }

    /// Layout glyph for the tile.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Open => ' ',
            Self::Dot => '*',
            Self::PowerItem => '@',
            Self::Empty => '_',
            Self::Den => 'G',
        }
    }

    /// Reports whether actors are blocked by the tile.
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Reports whether the tile holds a dot or a power item.
    #[must_use]
    pub const fn is_collectible(self) -> bool {
        matches!(self, Self::Dot | Self::PowerItem)
    }
}

/// Behaviour phase shared by every actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Pursuers head for their corners.
    Disperse,
    /// Pursuers hunt the player.
    Pursue,
    /// Pursuers flee and can be captured by the player.
    Vulnerable,
    /// Pursuer was captured and returns to the den.
    Captured,
}

impl Phase {
    /// Reports whether the phase ends on a timer rather than an event.
    #[must_use]
    pub const fn is_timed(self) -> bool {
        !matches!(self, Self::Captured)
    }

    /// Phase entered once a timed phase expires.
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        match self {
            Self::Disperse => Some(Self::Pursue),
            Self::Pursue => Some(Self::Disperse),
            Self::Vulnerable => Some(Self::Pursue),
            Self::Captured => None,
        }
    }
}

/// Identity of a pursuer, selecting its targeting behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PursuerId {
    /// Targets the player's cell directly.
    Chaser,
    /// Targets four tiles ahead of the player.
    Ambusher,
    /// Reflects the chaser through a point two tiles ahead of the player.
    Flanker,
    /// Chases from afar but retreats to its corner when close.
    Skulker,
}

impl PursuerId {
    /// All pursuers in actor update order.
    pub const ALL: [PursuerId; 4] = [
        PursuerId::Chaser,
        PursuerId::Ambusher,
        PursuerId::Flanker,
        PursuerId::Skulker,
    ];

    /// Zero-based position of the pursuer in [`PursuerId::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Chaser => 0,
            Self::Ambusher => 1,
            Self::Flanker => 2,
            Self::Skulker => 3,
        }
    }
}

/// Identity of any grid-bound actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActorId {
    /// One of the four pursuers.
    Pursuer(PursuerId),
    /// The externally controlled player.
    Player,
}

impl ActorId {
    /// All actors in update order: pursuers by identity, player last.
    pub const ALL: [ActorId; 5] = [
        ActorId::Pursuer(PursuerId::Chaser),
        ActorId::Pursuer(PursuerId::Ambusher),
        ActorId::Pursuer(PursuerId::Flanker),
        ActorId::Pursuer(PursuerId::Skulker),
        ActorId::Player,
    ];
}

/// Discrete trigger forwarded to the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// A new session started.
    Intro,
    /// The player collected a dot.
    CollectDot,
    /// The player collected a power item.
    CollectPowerItem,
    /// The player collected the bonus item.
    CollectBonus,
    /// The player captured a vulnerable pursuer.
    EatPursuer,
    /// The player was caught.
    PlayerDeath,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Opens a tick: evaluates phase transitions for every actor.
    BeginTick,
    /// Steers a pursuer whose cadence is due this tick.
    SteerPursuer {
        /// Pursuer being steered.
        pursuer: PursuerId,
        /// Direction chosen by the pursuer's strategy.
        direction: Direction,
    },
    /// Steers the player using the direction requested by input.
    SteerPlayer {
        /// Direction currently held, or [`Direction::Stop`] when none is held.
        requested: Direction,
    },
    /// Proposes a cell for the bonus item.
    PlaceBonus {
        /// Candidate cell for the bonus item.
        cell: CellCoord,
    },
    /// Closes a tick: resolves collisions, checks level completion and
    /// advances the tick counter.
    EndTick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// A new session started.
    SessionStarted {
        /// Lives granted to the player.
        lives: u32,
    },
    /// A tick opened.
    TickStarted {
        /// Value of the global tick counter.
        tick: u64,
        /// Whether actors act this tick (false during the ready period).
        playing: bool,
    },
    /// The ready period elapsed and actors begin acting.
    ReadyEnded,
    /// An actor entered a new phase.
    PhaseChanged {
        /// Actor whose phase changed.
        actor: ActorId,
        /// Phase the actor left.
        from: Phase,
        /// Phase the actor entered.
        to: Phase,
    },
    /// An actor moved between two cells.
    ActorMoved {
        /// Actor that moved.
        actor: ActorId,
        /// Cell occupied before moving.
        from: CellCoord,
        /// Cell occupied after moving.
        to: CellCoord,
    },
    /// An actor's move was rejected and it became stationary.
    ActorStopped {
        /// Actor that stopped.
        actor: ActorId,
        /// Cell the actor remains in.
        cell: CellCoord,
    },
    /// The player took a dot or power item.
    CollectibleTaken {
        /// Cell that held the collectible.
        cell: CellCoord,
        /// Kind of collectible taken.
        tile: Tile,
        /// Points awarded.
        points: u64,
        /// Collectibles left in the maze.
        remaining: u32,
    },
    /// The player captured a vulnerable pursuer.
    PursuerCaptured {
        /// Pursuer that was captured.
        pursuer: PursuerId,
        /// Captures since the last power item, including this one.
        streak: u32,
        /// Points awarded.
        points: u64,
    },
    /// A pursuer caught the player.
    PlayerCaught {
        /// Lives left after the catch.
        lives_remaining: u32,
    },
    /// The score crossed the bonus threshold for this level.
    BonusEligible,
    /// The bonus item was placed.
    BonusPlaced {
        /// Cell holding the bonus item.
        cell: CellCoord,
    },
    /// A bonus placement was rejected because the cell was not empty.
    BonusPlacementRejected {
        /// Rejected candidate cell.
        cell: CellCoord,
    },
    /// The player collected the bonus item.
    BonusCollected {
        /// Cell that held the bonus item.
        cell: CellCoord,
        /// Points awarded.
        points: u64,
    },
    /// Every collectible was taken and the next level began.
    LevelAdvanced {
        /// Level now in play.
        level: u32,
    },
    /// A tick closed.
    TickEnded {
        /// Value of the tick counter after advancing.
        tick: u64,
    },
    /// The player ran out of lives.
    SessionEnded {
        /// Final score.
        score: u64,
        /// Level reached.
        level: u32,
    },
}

impl Event {
    /// Audio cue associated with the event, if any.
    #[must_use]
    pub const fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            Self::SessionStarted { .. } => Some(SoundCue::Intro),
            Self::CollectibleTaken {
                tile: Tile::PowerItem,
                ..
            } => Some(SoundCue::CollectPowerItem),
            Self::CollectibleTaken { .. } => Some(SoundCue::CollectDot),
            Self::BonusCollected { .. } => Some(SoundCue::CollectBonus),
            Self::PursuerCaptured { .. } => Some(SoundCue::EatPursuer),
            Self::PlayerCaught { .. } => Some(SoundCue::PlayerDeath),
            _ => None,
        }
    }
}

/// Outcome of resolving a single move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Cell occupied after the move.
    pub cell: CellCoord,
    /// Facing after the move; [`Direction::Stop`] when the move was blocked.
    pub facing: Direction,
}

/// Read-only view into the maze tiles.
#[derive(Clone, Copy, Debug)]
pub struct MazeView<'a> {
    tiles: &'a [Tile],
    columns: u32,
    rows: u32,
}

impl<'a> MazeView<'a> {
    /// Captures a new maze view backed by the provided row-major tile slice.
    #[must_use]
    pub fn new(tiles: &'a [Tile], columns: u32, rows: u32) -> Self {
        Self {
            tiles,
            columns,
            rows,
        }
    }

    /// Provides the dimensions of the underlying grid as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Returns the tile stored at `cell`, if it lies within the grid.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<Tile> {
        self.index(cell)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Reports whether `cell` blocks movement. Cells outside the grid block.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        self.tile(cell).map_or(true, Tile::is_wall)
    }

    /// Reports whether `cell` belongs to the pursuer den.
    #[must_use]
    pub fn is_den(&self, cell: CellCoord) -> bool {
        self.tile(cell) == Some(Tile::Den)
    }

    /// Neighbouring cell in `direction` with toroidal wrap-around.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        cell.offset_wrapped(direction, self.columns, self.rows)
    }

    /// Resolves a move from `cell` toward `direction`.
    ///
    /// A wall candidate leaves the position unchanged and stops the actor;
    /// an open candidate becomes the new position with `direction` as facing.
    #[must_use]
    pub fn resolve(&self, cell: CellCoord, direction: Direction) -> Resolution {
        match self.neighbor(cell, direction) {
            Some(candidate) if !self.is_wall(candidate) => Resolution {
                cell: candidate,
                facing: direction,
            },
            _ => Resolution {
                cell,
                facing: Direction::Stop,
            },
        }
    }

    /// Iterator over all tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + 'a {
        self.tiles.iter().copied()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Immutable representation of a single pursuer used for targeting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PursuerSnapshot {
    /// Identity of the pursuer.
    pub id: PursuerId,
    /// Grid cell currently occupied by the pursuer.
    pub cell: CellCoord,
    /// Current facing.
    pub facing: Direction,
    /// Current phase.
    pub phase: Phase,
    /// Corner targeted while dispersing.
    pub corner: TargetPoint,
    /// Whether the pursuer's cadence permits a move this tick.
    pub due: bool,
}

/// Immutable representation of the player used for targeting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSnapshot {
    /// Grid cell currently occupied by the player.
    pub cell: CellCoord,
    /// Current facing.
    pub facing: Direction,
}

/// Read-only world snapshot handed to pursuer targeting.
///
/// Captured before any movement of the current tick, so every position is
/// the one reached at the end of the previous tick.
#[derive(Clone, Debug)]
pub struct PursuitView<'a> {
    maze: MazeView<'a>,
    pursuers: Vec<PursuerSnapshot>,
    player: PlayerSnapshot,
    den_target: CellCoord,
    den_exit: CellCoord,
}

impl<'a> PursuitView<'a> {
    /// Creates a new pursuit view. Pursuers are ordered by identity.
    #[must_use]
    pub fn new(
        maze: MazeView<'a>,
        mut pursuers: Vec<PursuerSnapshot>,
        player: PlayerSnapshot,
        den_target: CellCoord,
        den_exit: CellCoord,
    ) -> Self {
        pursuers.sort_by_key(|snapshot| snapshot.id);
        Self {
            maze,
            pursuers,
            player,
            den_target,
            den_exit,
        }
    }

    /// Maze tiles.
    #[must_use]
    pub const fn maze(&self) -> MazeView<'a> {
        self.maze
    }

    /// Iterator over the pursuer snapshots in identity order.
    pub fn pursuers(&self) -> impl Iterator<Item = &PursuerSnapshot> {
        self.pursuers.iter()
    }

    /// Snapshot of a specific pursuer.
    #[must_use]
    pub fn pursuer(&self, id: PursuerId) -> Option<&PursuerSnapshot> {
        self.pursuers.iter().find(|snapshot| snapshot.id == id)
    }

    /// Snapshot of the player.
    #[must_use]
    pub const fn player(&self) -> PlayerSnapshot {
        self.player
    }

    /// Den cell targeted by captured pursuers.
    #[must_use]
    pub const fn den_target(&self) -> CellCoord {
        self.den_target
    }

    /// Cell above the den targeted by pursuers still inside it.
    #[must_use]
    pub const fn den_exit(&self) -> CellCoord {
        self.den_exit
    }
}

/// Read-only snapshot of the bonus item consumed by bonus placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BonusView {
    /// Number of columns in the maze.
    pub columns: u32,
    /// Number of rows in the maze.
    pub rows: u32,
    /// Whether the bonus is eligible and still waits for a valid cell.
    pub awaiting_placement: bool,
    /// Cell holding the bonus item, if placed.
    pub placed: Option<CellCoord>,
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Direction, Event, MazeView, Phase, SoundCue, TargetPoint, Tile};
    use proptest::prelude::*;

    const CORRIDOR: [Tile; 15] = [
        Tile::Wall,
        Tile::Wall,
        Tile::Wall,
        Tile::Wall,
        Tile::Wall,
        Tile::Open,
        Tile::Dot,
        Tile::Open,
        Tile::Dot,
        Tile::Open,
        Tile::Wall,
        Tile::Wall,
        Tile::Wall,
        Tile::Wall,
        Tile::Wall,
    ];

    #[test]
    fn reverse_of_stop_is_stop() {
        assert_eq!(Direction::Stop.reverse(), Direction::Stop);
    }

    #[test]
    fn held_input_prefers_enumeration_order() {
        let held = [Direction::Right, Direction::Down];
        let requested = Direction::from_held(|direction| held.contains(&direction));
        assert_eq!(requested, Direction::Down);
        assert_eq!(Direction::from_held(|_| false), Direction::Stop);
    }

    #[test]
    fn offset_wraps_negative_results_to_the_last_index() {
        let cell = CellCoord::new(0, 0);
        assert_eq!(
            cell.offset_wrapped(Direction::Left, 5, 3),
            Some(CellCoord::new(4, 0))
        );
        assert_eq!(
            cell.offset_wrapped(Direction::Up, 5, 3),
            Some(CellCoord::new(0, 2))
        );
        assert_eq!(cell.offset_wrapped(Direction::Up, 0, 3), None);
    }

    #[test]
    fn resolve_wraps_through_open_edges() {
        let maze = MazeView::new(&CORRIDOR, 5, 3);
        let resolution = maze.resolve(CellCoord::new(0, 1), Direction::Left);
        assert_eq!(resolution.cell, CellCoord::new(4, 1));
        assert_eq!(resolution.facing, Direction::Left);
    }

    #[test]
    fn resolve_into_wall_stops_in_place() {
        let maze = MazeView::new(&CORRIDOR, 5, 3);
        let resolution = maze.resolve(CellCoord::new(2, 1), Direction::Up);
        assert_eq!(resolution.cell, CellCoord::new(2, 1));
        assert_eq!(resolution.facing, Direction::Stop);
    }

    #[test]
    fn wrapping_into_a_wall_is_rejected() {
        let maze = MazeView::new(&CORRIDOR, 5, 3);
        let resolution = maze.resolve(CellCoord::new(1, 1), Direction::Down);
        assert_eq!(resolution.cell, CellCoord::new(1, 1));
        assert_eq!(resolution.facing, Direction::Stop);
    }

    #[test]
    fn timed_phases_cycle_and_captured_waits_for_den() {
        assert_eq!(Phase::Disperse.successor(), Some(Phase::Pursue));
        assert_eq!(Phase::Pursue.successor(), Some(Phase::Disperse));
        assert_eq!(Phase::Vulnerable.successor(), Some(Phase::Pursue));
        assert_eq!(Phase::Captured.successor(), None);
        assert!(!Phase::Captured.is_timed());
    }

    #[test]
    fn glyphs_map_back_to_tiles() {
        for glyph in ['#', ' ', '*', '@', '_', 'G'] {
            let tile = Tile::from_glyph(glyph).expect("known glyph");
            assert_eq!(tile.glyph(), glyph);
        }
        assert_eq!(Tile::from_glyph('x'), None);
    }

    #[test]
    fn target_points_measure_squared_distance() {
        let origin = TargetPoint::new(1, 1);
        assert_eq!(origin.distance_squared(TargetPoint::new(4, 5)), 25);
        assert_eq!(
            origin.ahead(Direction::Left, 4),
            TargetPoint::new(-3, 1)
        );
    }

    #[test]
    fn power_items_have_their_own_cue() {
        let event = Event::CollectibleTaken {
            cell: CellCoord::new(1, 1),
            tile: Tile::PowerItem,
            points: 50,
            remaining: 3,
        };
        assert_eq!(event.sound_cue(), Some(SoundCue::CollectPowerItem));
        assert_eq!(Event::ReadyEnded.sound_cue(), None);
    }

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
            Just(Direction::Stop),
        ]
    }

    proptest! {
        #[test]
        fn reverse_is_an_involution(direction in any_direction()) {
            prop_assert_eq!(direction.reverse().reverse(), direction);
        }

        #[test]
        fn resolve_never_lands_on_a_wall(
            column in 0u32..5,
            direction in any_direction(),
        ) {
            let maze = MazeView::new(&CORRIDOR, 5, 3);
            let start = CellCoord::new(column, 1);
            let resolution = maze.resolve(start, direction);
            prop_assert!(!maze.is_wall(resolution.cell));
            if resolution.facing == Direction::Stop {
                prop_assert_eq!(resolution.cell, start);
            }
        }
    }
}
