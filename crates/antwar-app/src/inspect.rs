//! Plain-text views of a decoded scenario, for the `inspect` subcommand.

use std::collections::BTreeMap;
use std::fmt::Write;

use antwar_core::enums::{House, Terrain};
use antwar_core::types::CellCoord;
use antwar_map::WorldMap;
use antwar_scenario::ScenarioData;

/// Multi-line description of the mission: header, forces per house, scripts.
pub fn summary(data: &ScenarioData) -> String {
    let mut out = String::new();
    let b = data.bounds;
    let _ = writeln!(out, "mission: {}", display_name(&data.name));
    let _ = writeln!(out, "player:  {}", data.player_house.name());
    if !data.theater.is_empty() {
        let _ = writeln!(out, "theater: {}", data.theater);
    }
    let _ = writeln!(out, "bounds:  {}x{} at ({}, {})", b.width, b.height, b.x, b.y);
    let _ = writeln!(
        out,
        "layers:  map {} / overlay {}",
        present(data.map_layers.is_some()),
        present(data.overlay.is_some())
    );

    let mut forces: BTreeMap<House, BTreeMap<&'static str, u32>> = BTreeMap::new();
    for unit in &data.units {
        *forces
            .entry(unit.house)
            .or_default()
            .entry(unit.kind.code())
            .or_default() += 1;
    }
    let _ = writeln!(out, "units:   {}", data.units.len());
    for (house, kinds) in &forces {
        let listed: Vec<String> = kinds.iter().map(|(code, n)| format!("{n}x{code}")).collect();
        let _ = writeln!(out, "  {:<8} {}", house.name(), listed.join(" "));
    }

    let _ = writeln!(out, "waypoints: {}", data.waypoints.len());
    let _ = writeln!(out, "teams:   {}", data.team_types.len());
    for team in &data.team_types {
        let members: u32 = team.members.iter().map(|m| m.count).sum();
        let _ = writeln!(
            out,
            "  {:<8} {} members, {} orders, from waypoint {}",
            team.name,
            members,
            team.missions.len(),
            team.origin_waypoint
        );
    }
    let _ = writeln!(out, "triggers: {}", data.triggers.len());
    for trigger in &data.triggers {
        let _ = writeln!(
            out,
            "  {:<8} {:?} {:?} -> {:?}",
            trigger.name, trigger.persistence, trigger.event1.kind, trigger.action1.kind
        );
    }
    if !data.cell_triggers.is_empty() {
        let _ = writeln!(out, "cell triggers: {}", data.cell_triggers.len());
    }
    out
}

/// ASCII map of the playable area, one character per cell.
///
/// `.` clear, `~` water, `#` rock, `T` tree, `W` wall. Placed units are drawn
/// over terrain as `P` for the player, `E` for hostiles and `n` for neutrals.
pub fn render_terrain(map: &WorldMap, data: &ScenarioData) -> String {
    let bounds = map.bounds();
    let mut markers: BTreeMap<CellCoord, char> = BTreeMap::new();
    for unit in &data.units {
        let mark = if unit.house == data.player_house {
            'P'
        } else if unit.house.is_hostile_to(data.player_house) {
            'E'
        } else {
            'n'
        };
        markers.entry(unit.cell).or_insert(mark);
    }

    let width = usize::try_from(bounds.width).unwrap_or(0);
    let height = usize::try_from(bounds.height).unwrap_or(0);
    let mut out = String::with_capacity((width + 1) * height);
    for y in bounds.y..bounds.y + bounds.height {
        for x in bounds.x..bounds.x + bounds.width {
            let cell = CellCoord::new(x, y);
            let glyph = markers
                .get(&cell)
                .copied()
                .unwrap_or_else(|| terrain_glyph(map.terrain(cell)));
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn terrain_glyph(terrain: Terrain) -> char {
    match terrain {
        Terrain::Clear => '.',
        Terrain::Water => '~',
        Terrain::Rock => '#',
        Terrain::Tree => 'T',
        Terrain::Wall => 'W',
    }
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "(unnamed)"
    } else {
        name
    }
}

fn present(yes: bool) -> &'static str {
    if yes {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antwar_core::enums::{Mission, UnitCategory, UnitKind};
    use antwar_core::types::{Facing, MapBounds};
    use antwar_scenario::data::{TerrainFeature, UnitPlacement};

    fn small() -> ScenarioData {
        let unit = |house, kind, x, y| UnitPlacement {
            house,
            kind,
            category: UnitCategory::Vehicle,
            strength: 256,
            cell: CellCoord::new(x, y),
            facing: Facing::default(),
            mission: Mission::Guard,
            sub_cell: None,
            trigger: None,
        };
        ScenarioData {
            name: "scg01ea".to_string(),
            player_house: House::Greece,
            bounds: MapBounds {
                x: 10,
                y: 20,
                width: 4,
                height: 3,
            },
            units: vec![
                unit(House::Greece, UnitKind::LightTank, 10, 20),
                unit(House::USSR, UnitKind::WarriorAnt, 13, 22),
                unit(House::USSR, UnitKind::WarriorAnt, 12, 22),
                unit(House::Neutral, UnitKind::Building, 11, 21),
            ],
            terrain: vec![
                TerrainFeature {
                    cell: CellCoord::new(12, 20),
                    terrain: Terrain::Tree,
                },
                TerrainFeature {
                    cell: CellCoord::new(13, 20),
                    terrain: Terrain::Rock,
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_render_marks_units_over_terrain() {
        let data = small();
        let mut map = WorldMap::new(data.bounds);
        for feature in &data.terrain {
            map.set_terrain(feature.cell, feature.terrain);
        }
        assert_eq!(render_terrain(&map, &data), "P.T#\n.n..\n..EE\n");
    }

    #[test]
    fn test_summary_groups_forces_by_house() {
        let text = summary(&small());
        assert!(text.contains("mission: scg01ea"));
        assert!(text.contains("units:   4"));
        assert!(text.contains("2xANT1"), "{text}");
        assert!(text.contains("1x1TNK"), "{text}");
        assert!(text.contains("layers:  map no / overlay no"));
    }
}
