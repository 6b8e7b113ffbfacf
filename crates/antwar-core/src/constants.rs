//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 15;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Map geometry ---

/// Width and height of the logical cell grid.
pub const MAP_CELLS: i32 = 128;

/// Total number of cells in the grid.
pub const MAP_CELL_COUNT: usize = (MAP_CELLS * MAP_CELLS) as usize;

/// World units per cell edge.
pub const CELL_SIZE: f32 = 24.0;

/// Offset of the infantry sub-cell slots 1..=4 from the cell centre (world units).
pub const SUBCELL_OFFSET: f32 = 6.0;

/// Number of infantry sub-cell slots per cell (slot 0 is the centre).
pub const INFANTRY_SUBCELLS: u8 = 5;

// --- Terrain speed ---

/// Speed multiplier on road templates.
pub const ROAD_SPEED_FACTOR: f32 = 1.3;

/// Speed multiplier on tree cells for non-float units.
pub const TREE_SPEED_FACTOR: f32 = 0.85;

/// Speed multiplier on rough templates for non-float units.
pub const ROUGH_SPEED_FACTOR: f32 = 0.3;

/// Speed multiplier reported for land units on water (the cell is still impassable).
pub const WATER_LAND_SPEED_FACTOR: f32 = 0.1;

// --- Pathfinding ---

/// Cost of an orthogonal step (integer-scaled).
pub const MOVE_COST_STRAIGHT: u32 = 10;

/// Cost of a diagonal step (integer-scaled, ~10·√2).
pub const MOVE_COST_DIAGONAL: u32 = 14;

/// Extra cost for stepping through a cell occupied by another unit.
///
/// Tunable: occupancy is a soft cost, not a hard block, so crowded routes are
/// still found. Raising it makes units route around each other more eagerly.
pub const OCCUPANCY_PENALTY: u32 = 40;

/// Node-expansion ceiling for one search. Guarantees termination on unreachable goals.
pub const MAX_PATH_EXPANSIONS: usize = 4_000;

// --- Unit behaviour ---

/// Ticks between hostile scans for idle (guarding) units.
pub const GUARD_SCAN_INTERVAL: u64 = 10;

/// Extra acquisition radius (cells) for units on area guard.
pub const AREA_GUARD_BONUS_CELLS: f32 = 3.0;

/// Minimum ticks between path recomputations when the next cell is blocked.
pub const REPATH_COOLDOWN_TICKS: u64 = 15;

/// Ticks between re-paths while hunting a moving target.
pub const HUNT_REPATH_INTERVAL: u64 = 30;

/// Ticks a dead unit lingers (death animation) before removal.
pub const DEATH_LINGER_TICKS: u32 = 45;

/// Duration of the CLOAKING and UNCLOAKING transitions (ticks).
pub const CLOAK_TRANSITION_TICKS: u32 = 15;

/// Ticks a sonar pulse keeps a vessel from starting to cloak.
pub const SONAR_PULSE_TICKS: u32 = 90;

/// Ticks an uncloaked vessel waits without combat before it cloaks again.
pub const CLOAK_REARM_TICKS: u32 = 30;

// --- Scripting ---

/// Ticks between trigger evaluations (~1 second).
pub const TRIGGER_EVAL_INTERVAL: u64 = 15;

/// Ticks between team-mission script steps.
pub const TEAM_MISSION_INTERVAL: u64 = 8;

/// Scenario time unit in seconds (TIME events and GUARD durations count in these).
pub const SCENARIO_TIME_UNIT_SECS: u64 = 6;

/// Scenario time unit in ticks.
pub const SCENARIO_TIME_UNIT_TICKS: u64 = SCENARIO_TIME_UNIT_SECS * TICK_RATE as u64;

/// Radius (cells) around a team waypoint searched for player units to attack.
pub const TEAM_ATTACK_SEARCH_CELLS: f32 = 12.0;

/// Maximum jitter (world units) applied to team members spawned at a waypoint.
pub const SPAWN_JITTER: f32 = 8.0;

// --- Orchestration ---

/// Default grace window (ticks) during which victory and defeat are not evaluated.
pub const VICTORY_GRACE_TICKS: u64 = 75;

/// Default cap on a single host frame delta (seconds), before the turbo multiplier.
pub const MAX_FRAME_DELTA_SECS: f32 = 0.25;

/// Upper bound for the turbo multiplier.
pub const MAX_TURBO: f32 = 32.0;

// --- Effects ---

/// Lifetime of a muzzle flash record (ticks).
pub const MUZZLE_LIFETIME_TICKS: u32 = 3;

/// Lifetime of an explosion record (ticks).
pub const EXPLOSION_LIFETIME_TICKS: u32 = 8;

/// Projectile travel speed used to size projectile lifetimes (world units per tick).
pub const PROJECTILE_SPEED: f32 = 40.0;

// --- Economy ---

/// Credits yielded per harvest step on a gold ore cell.
pub const GOLD_YIELD: u32 = 25;

/// Credits yielded per harvest step on a gem cell.
pub const GEM_YIELD: u32 = 50;
