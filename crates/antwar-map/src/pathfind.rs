//! A* pathfinding over the 8-connected cell grid.
//!
//! Step costs are 10 (orthogonal) and 14 (diagonal), scaled by the terrain
//! speed multiplier of the cell being entered. Diagonal moves never cut
//! corners. Occupied cells cost extra by default so crowds route around each
//! other without ever making a goal unreachable.

use antwar_core::constants::*;
use antwar_core::enums::SpeedClass;
use antwar_core::types::CellCoord;

use crate::grid::WorldMap;

/// How a search treats cells occupied by other units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupancyRule {
    /// Occupancy is ignored.
    Ignore,
    /// Occupied cells cost `penalty` extra.
    Soft { penalty: u32 },
    /// Occupied cells other than the goal are impassable.
    Strict,
}

/// Full set of search parameters.
#[derive(Debug, Clone, Copy)]
pub struct PathQuery {
    pub start: CellCoord,
    pub goal: CellCoord,
    pub is_naval: bool,
    pub speed_class: SpeedClass,
    pub occupancy: OccupancyRule,
    pub max_expansions: usize,
}

impl PathQuery {
    pub fn new(start: CellCoord, goal: CellCoord, is_naval: bool, speed_class: SpeedClass) -> Self {
        Self {
            start,
            goal,
            is_naval,
            speed_class,
            occupancy: OccupancyRule::Soft {
                penalty: OCCUPANCY_PENALTY,
            },
            max_expansions: MAX_PATH_EXPANSIONS,
        }
    }
}

/// Find a path from `start` to `goal`.
///
/// The result excludes `start` and ends at `goal`. It is empty when
/// `start == goal`, the goal is not enterable, or no route was found within the
/// expansion ceiling.
pub fn find_path(
    map: &WorldMap,
    start: CellCoord,
    goal: CellCoord,
    ignore_occupancy: bool,
    is_naval: bool,
    speed_class: SpeedClass,
) -> Vec<CellCoord> {
    let mut query = PathQuery::new(start, goal, is_naval, speed_class);
    if ignore_occupancy {
        query.occupancy = OccupancyRule::Ignore;
    }
    find_path_with(map, &query)
}

const NEIGHBORS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Octile distance scaled down by the fastest terrain factor so it never overestimates.
fn heuristic(a: CellCoord, b: CellCoord) -> u32 {
    let dx = (a.x - b.x).unsigned_abs();
    let dy = (a.y - b.y).unsigned_abs();
    let (long, short) = if dx > dy { (dx, dy) } else { (dy, dx) };
    let octile = MOVE_COST_STRAIGHT * (long - short) + MOVE_COST_DIAGONAL * short;
    (octile as f32 / ROAD_SPEED_FACTOR).floor() as u32
}

/// Run a search with explicit parameters.
pub fn find_path_with(map: &WorldMap, query: &PathQuery) -> Vec<CellCoord> {
    let PathQuery {
        start,
        goal,
        is_naval,
        speed_class,
        occupancy,
        max_expansions,
    } = *query;

    if start == goal || !map.is_traversable(goal, is_naval, speed_class) {
        return Vec::new();
    }
    let (Some(start_idx), Some(goal_idx)) = (start.index(), goal.index()) else {
        return Vec::new();
    };

    let enterable = |cell: CellCoord| map.is_traversable(cell, is_naval, speed_class);

    let mut g_cost = vec![u32::MAX; MAP_CELL_COUNT];
    let mut parent = vec![usize::MAX; MAP_CELL_COUNT];
    let mut closed = vec![false; MAP_CELL_COUNT];
    // (cell index, f, h). Linear scan for the minimum f; ties go to lower h.
    let mut open: Vec<(usize, u32, u32)> = Vec::new();

    g_cost[start_idx] = 0;
    let h0 = heuristic(start, goal);
    open.push((start_idx, h0, h0));

    let mut expansions = 0;
    while !open.is_empty() {
        let best = open
            .iter()
            .enumerate()
            .min_by_key(|(_, entry)| (entry.1, entry.2))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let (current_idx, _, _) = open.swap_remove(best);
        if closed[current_idx] {
            continue;
        }
        if current_idx == goal_idx {
            return reconstruct(&parent, start_idx, goal_idx);
        }
        closed[current_idx] = true;

        expansions += 1;
        if expansions > max_expansions {
            break;
        }

        let current = CellCoord::from_index(current_idx);
        for (dx, dy) in NEIGHBORS {
            let next = current.offset(dx, dy);
            let Some(next_idx) = next.index() else {
                continue;
            };
            if closed[next_idx] || !enterable(next) {
                continue;
            }
            let diagonal = dx != 0 && dy != 0;
            if diagonal && (!enterable(current.offset(dx, 0)) || !enterable(current.offset(0, dy))) {
                continue;
            }

            let occupied = map.occupant(next).is_some();
            if occupancy == OccupancyRule::Strict && occupied && next != goal {
                continue;
            }
            let mut step = if diagonal {
                MOVE_COST_DIAGONAL
            } else {
                MOVE_COST_STRAIGHT
            };
            let speed = map.speed_multiplier(next, speed_class);
            if speed <= 0.0 {
                continue;
            }
            step = ((step as f32 / speed).round() as u32).max(1);
            if let OccupancyRule::Soft { penalty } = occupancy {
                if occupied {
                    step += penalty;
                }
            }

            let tentative = g_cost[current_idx].saturating_add(step);
            if tentative < g_cost[next_idx] {
                g_cost[next_idx] = tentative;
                parent[next_idx] = current_idx;
                let h = heuristic(next, goal);
                open.push((next_idx, tentative + h, h));
            }
        }
    }

    Vec::new()
}

fn reconstruct(parent: &[usize], start_idx: usize, goal_idx: usize) -> Vec<CellCoord> {
    let mut path = Vec::new();
    let mut idx = goal_idx;
    while idx != start_idx {
        path.push(CellCoord::from_index(idx));
        idx = parent[idx];
        if idx == usize::MAX {
            return Vec::new();
        }
    }
    path.reverse();
    path
}
