//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{CELL_SIZE, MAP_CELLS, TICK_RATE};

/// Stable unit identifier. Allocated from 1 upward and never reused within a session.
/// The value 0 is reserved to mean "no unit" in dense buffers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    pub const NONE: UnitId = UnitId(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Integer cell coordinate on the 128×128 grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the coordinate lies on the full 128×128 grid.
    pub fn on_grid(self) -> bool {
        (0..MAP_CELLS).contains(&self.x) && (0..MAP_CELLS).contains(&self.y)
    }

    /// Row-major index into dense grid buffers. `None` off the grid.
    pub fn index(self) -> Option<usize> {
        if self.on_grid() {
            Some((self.y * MAP_CELLS + self.x) as usize)
        } else {
            None
        }
    }

    /// Inverse of [`CellCoord::index`]; scenario files address cells this way.
    pub fn from_index(index: usize) -> Self {
        let i = index as i32;
        Self::new(i % MAP_CELLS, i / MAP_CELLS)
    }

    /// World-space centre of the cell.
    pub fn center(self) -> Vec2 {
        Vec2::new(
            (self.x as f32 + 0.5) * CELL_SIZE,
            (self.y as f32 + 0.5) * CELL_SIZE,
        )
    }

    /// Cell containing a world-space point.
    pub fn from_world(pos: Vec2) -> Self {
        Self::new(
            (pos.x / CELL_SIZE).floor() as i32,
            (pos.y / CELL_SIZE).floor() as i32,
        )
    }

    /// Chebyshev (king-move) distance in cells.
    pub fn chebyshev(self, other: CellCoord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Straight-line distance in cells.
    pub fn distance(self, other: CellCoord) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// True when `other` is one of the 8 neighbours (not the cell itself).
    pub fn is_adjacent(self, other: CellCoord) -> bool {
        self != other && self.chebyshev(other) == 1
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// World-space position component (cell = 24 units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn cell(&self) -> CellCoord {
        CellCoord::from_world(self.0)
    }

    /// Distance to another position in cells.
    pub fn cells_to(&self, other: &Position) -> f32 {
        self.0.distance(other.0) / CELL_SIZE
    }
}

/// One of eight compass directions, 0 = north, increasing clockwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Facing(pub u8);

impl Facing {
    pub const STEPS: u8 = 8;

    /// Facing from a scenario byte (0..=255, 0 = north, clockwise).
    pub fn from_byte(raw: u8) -> Self {
        Self(((raw as u16 + 16) / 32 % Self::STEPS as u16) as u8)
    }

    /// Direction from `from` toward `to`. Returns `None` for coincident points.
    pub fn toward(from: Vec2, to: Vec2) -> Option<Self> {
        let d = to - from;
        if d.length_squared() < f32::EPSILON {
            return None;
        }
        // y grows southward on the grid, so north is -y.
        let angle = d.x.atan2(-d.y).rem_euclid(std::f32::consts::TAU);
        let step = (angle / (std::f32::consts::TAU / Self::STEPS as f32)).round() as u8;
        Some(Self(step % Self::STEPS))
    }

    /// Signed number of steps (-3..=4) to rotate from `self` to `target`.
    pub fn steps_to(self, target: Facing) -> i8 {
        let diff = (target.0 as i8 - self.0 as i8).rem_euclid(Self::STEPS as i8);
        if diff > 4 {
            diff - Self::STEPS as i8
        } else {
            diff
        }
    }

    /// Rotate one step toward `target`. Returns true once aligned.
    pub fn rotate_toward(&mut self, target: Facing) -> bool {
        match self.steps_to(target) {
            0 => true,
            s if s > 0 => {
                self.0 = (self.0 + 1) % Self::STEPS;
                self.0 == target.0
            }
            _ => {
                self.0 = (self.0 + Self::STEPS - 1) % Self::STEPS;
                self.0 == target.0
            }
        }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Playable sub-rectangle of the grid, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl MapBounds {
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.x >= self.x
            && cell.y >= self.y
            && cell.x < self.x + self.width
            && cell.y < self.y + self.height
    }
}

impl Default for MapBounds {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: MAP_CELLS,
            height: MAP_CELLS,
        }
    }
}
