#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Maze Chase adapters.
//!
//! Adapters receive a read-only [`Scene`] once per tick, sound cues through an
//! [`AudioSink`], and provide held directions through an [`InputSource`].

use anyhow::Result as AnyResult;
use maze_chase_core::{ActorId, CellCoord, Direction, Phase, PursuerId, SoundCue, Tile};
use std::{error::Error, fmt, io::Write};

const BONUS_GLYPH: char = '%';
const CAPTURED_GLYPH: char = '~';

/// Actor as drawn in a single frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneActor {
    /// Identity of the actor.
    pub id: ActorId,
    /// Cell occupied by the actor.
    pub cell: CellCoord,
    /// Facing of the actor.
    pub facing: Direction,
    /// Phase of the actor.
    pub phase: Phase,
}

impl SceneActor {
    /// Glyph used by text backends.
    #[must_use]
    pub const fn glyph(&self) -> char {
        let glyph = match self.id {
            ActorId::Player => return 'P',
            ActorId::Pursuer(PursuerId::Chaser) => 'C',
            ActorId::Pursuer(PursuerId::Ambusher) => 'A',
            ActorId::Pursuer(PursuerId::Flanker) => 'F',
            ActorId::Pursuer(PursuerId::Skulker) => 'S',
        };
        match self.phase {
            Phase::Vulnerable => glyph.to_ascii_lowercase(),
            Phase::Captured => CAPTURED_GLYPH,
            Phase::Disperse | Phase::Pursue => glyph,
        }
    }
}

/// Scene description handed to rendering backends after each tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Number of columns in the maze.
    pub columns: u32,
    /// Number of rows in the maze.
    pub rows: u32,
    /// Row-major maze tiles.
    pub tiles: Vec<Tile>,
    /// Actors in update order.
    pub actors: Vec<SceneActor>,
    /// Cell holding the bonus item, if placed.
    pub bonus: Option<CellCoord>,
    /// Current score.
    pub score: u64,
    /// Lives left.
    pub lives: u32,
    /// Level in play.
    pub level: u32,
    /// Global tick counter.
    pub tick: u64,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        columns: u32,
        rows: u32,
        tiles: Vec<Tile>,
        actors: Vec<SceneActor>,
        bonus: Option<CellCoord>,
        score: u64,
        lives: u32,
        level: u32,
        tick: u64,
    ) -> Self {
        Self {
            columns,
            rows,
            tiles,
            actors,
            bonus,
            score,
            lives,
            level,
            tick,
        }
    }

    /// Maze rows with actors and the bonus drawn over the tiles.
    ///
    /// Later actors overwrite earlier ones, so the player is always visible.
    #[must_use]
    pub fn text_rows(&self) -> Vec<String> {
        let width = usize::try_from(self.columns).unwrap_or(0);
        if width == 0 {
            return Vec::new();
        }

        let mut glyphs: Vec<char> = self.tiles.iter().map(|tile| tile.glyph()).collect();
        let mut stamp = |cell: CellCoord, glyph: char| {
            let (Ok(column), Ok(row)) = (usize::try_from(cell.column()), usize::try_from(cell.row()))
            else {
                return;
            };
            if column < width {
                if let Some(slot) = glyphs.get_mut(row * width + column) {
                    *slot = glyph;
                }
            }
        };

        if let Some(cell) = self.bonus {
            stamp(cell, BONUS_GLYPH);
        }
        for actor in &self.actors {
            stamp(actor.cell, actor.glyph());
        }

        glyphs
            .chunks(width)
            .map(|row| row.iter().collect())
            .collect()
    }
}

/// Rendering backend capable of presenting Maze Chase scenes.
pub trait RenderingBackend {
    /// Presents a single frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Backend that writes each frame as plain text.
#[derive(Debug)]
pub struct TextBackend<W> {
    writer: W,
}

impl<W: Write> TextBackend<W> {
    /// Creates a backend writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Releases the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        writeln!(
            self.writer,
            "score {} lives {} level {} tick {}",
            scene.score, scene.lives, scene.level, scene.tick
        )?;
        for row in scene.text_rows() {
            writeln!(self.writer, "{row}")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Receives sound cues. Playback is fire-and-forget.
pub trait AudioSink {
    /// Plays or queues `cue`.
    fn play(&mut self, cue: SoundCue);
}

/// Audio sink that discards every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Source of held directions, sampled once per tick.
pub trait InputSource {
    /// Reports whether `direction` is currently held.
    fn is_requested(&self, direction: Direction) -> bool;

    /// Reports whether the user asked to stop the run.
    fn quit_requested(&self) -> bool {
        false
    }

    /// Moves the source on to the next tick.
    fn advance(&mut self);
}

/// Input source replaying a fixed script of moves.
///
/// Scripts use `U`, `D`, `L`, `R` for directions and `.` for no input.
/// Whitespace is ignored. Every entry is held for `hold` ticks and the script
/// repeats once exhausted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedInput {
    moves: Vec<Direction>,
    hold: u64,
    step: u64,
}

impl ScriptedInput {
    /// Parses a move script.
    pub fn parse(script: &str, hold: u64) -> Result<Self, ScriptError> {
        if hold == 0 {
            return Err(ScriptError::ZeroHold);
        }

        let moves = script
            .chars()
            .filter(|symbol| !symbol.is_whitespace())
            .enumerate()
            .map(|(position, symbol)| match symbol.to_ascii_uppercase() {
                'U' => Ok(Direction::Up),
                'D' => Ok(Direction::Down),
                'L' => Ok(Direction::Left),
                'R' => Ok(Direction::Right),
                '.' => Ok(Direction::Stop),
                _ => Err(ScriptError::UnknownMove { symbol, position }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            moves,
            hold,
            step: 0,
        })
    }

    /// Direction held at the current step.
    #[must_use]
    pub fn current(&self) -> Direction {
        let len = u64::try_from(self.moves.len()).unwrap_or(u64::MAX);
        if len == 0 {
            return Direction::Stop;
        }
        usize::try_from((self.step / self.hold) % len)
            .ok()
            .and_then(|index| self.moves.get(index).copied())
            .unwrap_or(Direction::Stop)
    }
}

impl InputSource for ScriptedInput {
    fn is_requested(&self, direction: Direction) -> bool {
        direction != Direction::Stop && self.current() == direction
    }

    fn advance(&mut self) {
        self.step = self.step.saturating_add(1);
    }
}

/// Errors raised while parsing a move script.
#[derive(Debug, PartialEq, Eq)]
pub enum ScriptError {
    /// Entries must be held for at least one tick.
    ZeroHold,
    /// The script contained a symbol outside `UDLR.`.
    UnknownMove {
        /// Offending symbol.
        symbol: char,
        /// Zero-based position among non-whitespace symbols.
        position: usize,
    },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroHold => write!(f, "moves must be held for at least one tick"),
            Self::UnknownMove { symbol, position } => {
                write!(f, "unknown move {symbol:?} at position {position}")
            }
        }
    }
}

impl Error for ScriptError {}
