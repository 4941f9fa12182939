//! Tile grid parsed from a text layout, plus the markers the engine needs.

use maze_chase_core::{CellCoord, Direction, MazeView, PursuerId, TargetPoint, Tile};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CLASSIC_ROWS: [&str; 25] = [
    "#######################",
    "#**********#**********#",
    "#@###*####*#*####*###@#",
    "#*###*####*#*####*###*#",
    "#*********************#",
    "#*###*#*#######*#*###*#",
    "#*****#*#######*#*****#",
    "#####*#****#****#*#####",
    "#####*#### # ####*#####",
    "#####*#*********#*#####",
    "#####*#_###G###_#*#####",
    "_____*__#GGGGG#__*_____",
    "#####*#_#######_#*#####",
    "#####*#*********#*#####",
    "#####*#_#######_#*#####",
    "#####*#_#######_#*#####",
    "#**********#**********#",
    "#*###*####*#*####*###*#",
    "#@**#******_******#**@#",
    "###*#*#*#######*#*#*###",
    "#*****#****#****#*****#",
    "#*########*#*########*#",
    "#*########*#*########*#",
    "#*********************#",
    "#######################",
];

/// Spawn and steering markers for a single pursuer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PursuerLayout {
    /// Cell the pursuer occupies at level start and after a catch.
    pub spawn: CellCoord,
    /// Facing assigned on spawn.
    #[serde(default = "stationary")]
    pub facing: Direction,
    /// Target used while dispersing. May lie outside the grid.
    pub corner: TargetPoint,
}

fn stationary() -> Direction {
    Direction::Stop
}

/// Text layout of a maze together with its non-glyph markers.
///
/// Rows use `#` for walls, `*` for dots, `@` for power items, `_` for empty
/// walkable cells, a space for open cells and `G` for the den.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MazeLayout {
    /// Layout rows, top to bottom.
    pub rows: Vec<String>,
    /// Player spawn cell.
    pub player_spawn: CellCoord,
    /// Markers for [`PursuerId::Chaser`].
    pub chaser: PursuerLayout,
    /// Markers for [`PursuerId::Ambusher`].
    pub ambusher: PursuerLayout,
    /// Markers for [`PursuerId::Flanker`].
    pub flanker: PursuerLayout,
    /// Markers for [`PursuerId::Skulker`].
    pub skulker: PursuerLayout,
    /// Den cell captured pursuers head for.
    pub den_target: CellCoord,
    /// Cell above the den that pursuers inside it head for.
    pub den_exit: CellCoord,
}

impl MazeLayout {
    /// The built-in 23 x 25 arcade layout.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            rows: CLASSIC_ROWS.iter().map(|row| (*row).to_owned()).collect(),
            player_spawn: CellCoord::new(11, 18),
            chaser: PursuerLayout {
                spawn: CellCoord::new(11, 10),
                facing: Direction::Up,
                corner: TargetPoint::new(24, 1),
            },
            ambusher: PursuerLayout {
                spawn: CellCoord::new(11, 11),
                facing: Direction::Stop,
                corner: TargetPoint::new(1, 1),
            },
            flanker: PursuerLayout {
                spawn: CellCoord::new(10, 11),
                facing: Direction::Stop,
                corner: TargetPoint::new(24, 22),
            },
            skulker: PursuerLayout {
                spawn: CellCoord::new(12, 11),
                facing: Direction::Stop,
                corner: TargetPoint::new(1, 22),
            },
            den_target: CellCoord::new(11, 11),
            den_exit: CellCoord::new(11, 4),
        }
    }

    /// Markers for the provided pursuer.
    #[must_use]
    pub const fn pursuer(&self, id: PursuerId) -> &PursuerLayout {
        match id {
            PursuerId::Chaser => &self.chaser,
            PursuerId::Ambusher => &self.ambusher,
            PursuerId::Flanker => &self.flanker,
            PursuerId::Skulker => &self.skulker,
        }
    }

    /// Parses the rows and checks that every marker sits on a walkable cell.
    pub fn build(&self) -> Result<Maze, MazeError> {
        let maze = Maze::parse(&self.rows)?;
        let mut markers = vec![
            ("player spawn", self.player_spawn),
            ("den target", self.den_target),
            ("den exit", self.den_exit),
        ];
        for id in PursuerId::ALL {
            markers.push(("pursuer spawn", self.pursuer(id).spawn));
        }

        for (marker, cell) in markers {
            if maze.view().is_wall(cell) {
                return Err(MazeError::BlockedMarker {
                    marker,
                    column: cell.column(),
                    row: cell.row(),
                });
            }
        }

        Ok(maze)
    }
}

impl Default for MazeLayout {
    fn default() -> Self {
        Self::classic()
    }
}

/// Reasons a maze layout may be rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    /// The layout has no rows or no columns.
    #[error("maze layout is empty")]
    Empty,
    /// A row's width differs from the first row.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: u32,
        /// Width of the offending row.
        found: u32,
        /// Width of the first row.
        expected: u32,
    },
    /// A glyph outside the layout alphabet was found.
    #[error("unknown glyph {glyph:?} at column {column}, row {row}")]
    UnknownGlyph {
        /// Offending character.
        glyph: char,
        /// Column of the glyph.
        column: u32,
        /// Row of the glyph.
        row: u32,
    },
    /// A marker lies on a wall or outside the grid.
    #[error("{marker} at column {column}, row {row} is not walkable")]
    BlockedMarker {
        /// Name of the marker.
        marker: &'static str,
        /// Column of the marker.
        column: u32,
        /// Row of the marker.
        row: u32,
    },
}

/// Static wall layout plus the mutable collectible layer.
#[derive(Clone, Debug)]
pub struct Maze {
    columns: u32,
    rows: u32,
    initial: Vec<Tile>,
    tiles: Vec<Tile>,
    remaining: u32,
}

impl Maze {
    /// Parses rows of layout glyphs into a maze.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, MazeError> {
        let expected = rows
            .first()
            .map(|row| row.as_ref().chars().count())
            .unwrap_or(0);
        if expected == 0 {
            return Err(MazeError::Empty);
        }

        let mut tiles = Vec::with_capacity(expected * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let row_index = to_u32(row_index);
            let found = row.as_ref().chars().count();
            if found != expected {
                return Err(MazeError::RaggedRow {
                    row: row_index,
                    found: to_u32(found),
                    expected: to_u32(expected),
                });
            }

            for (column, glyph) in row.as_ref().chars().enumerate() {
                let tile = Tile::from_glyph(glyph).ok_or(MazeError::UnknownGlyph {
                    glyph,
                    column: to_u32(column),
                    row: row_index,
                })?;
                tiles.push(tile);
            }
        }

        let remaining = count_collectibles(&tiles);
        Ok(Self {
            columns: to_u32(expected),
            rows: to_u32(rows.len()),
            initial: tiles.clone(),
            tiles,
            remaining,
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Read-only view over the current tiles.
    #[must_use]
    pub fn view(&self) -> MazeView<'_> {
        MazeView::new(&self.tiles, self.columns, self.rows)
    }

    /// Tile currently stored at `cell`.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<Tile> {
        self.view().tile(cell)
    }

    /// Dots and power items still in the maze.
    #[must_use]
    pub const fn remaining_collectibles(&self) -> u32 {
        self.remaining
    }

    /// Removes the collectible at `cell`, leaving an empty tile behind.
    pub(crate) fn take_collectible(&mut self, cell: CellCoord) -> Option<Tile> {
        let index = self.index(cell)?;
        let tile = self.tiles[index];
        if !tile.is_collectible() {
            return None;
        }

        assert!(self.remaining > 0, "collectible count underflow at {cell:?}");
        self.tiles[index] = Tile::Empty;
        self.remaining -= 1;
        Some(tile)
    }

    /// Restores every collectible from the initial layout.
    pub(crate) fn reload(&mut self) {
        self.tiles.clone_from(&self.initial);
        self.remaining = count_collectibles(&self.tiles);
    }

    #[cfg(any(test, feature = "scenario_scaffolding"))]
    pub(crate) fn set_tile(&mut self, cell: CellCoord, tile: Tile) {
        if let Some(index) = self.index(cell) {
            self.tiles[index] = tile;
            self.remaining = count_collectibles(&self.tiles);
        }
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

fn count_collectibles(tiles: &[Tile]) -> u32 {
    to_u32(tiles.iter().filter(|tile| tile.is_collectible()).count())
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
