//! INI text -> `ScenarioData`.
//!
//! Only `[Map]` is mandatory. Every other section is optional and every row is
//! decoded on its own: a bad row is logged and skipped, never fatal.

use std::path::Path;

use tracing::{debug, info, warn};

use antwar_core::enums::{House, Mission, Terrain, UnitCategory, UnitKind};
use antwar_core::types::{CellCoord, Facing, MapBounds};

use crate::data::*;
use crate::error::ScenarioError;
use crate::ini::{IniFile, IniSection};
use crate::mappack::{decode_map_pack, decode_overlay_pack, join_pack_rows};

/// Read and decode a scenario file.
pub fn load_scenario(path: &Path) -> Result<ScenarioData, ScenarioError> {
    let text = std::fs::read_to_string(path)?;
    parse_scenario(&text)
}

/// Decode scenario text.
pub fn parse_scenario(text: &str) -> Result<ScenarioData, ScenarioError> {
    let ini = IniFile::parse(text);
    let map = ini
        .section("Map")
        .ok_or_else(|| ScenarioError::MissingSection("Map".to_string()))?;

    let bounds = MapBounds {
        x: map_number(map, "X", 0)?,
        y: map_number(map, "Y", 0)?,
        width: map_number(map, "Width", MapBounds::default().width)?,
        height: map_number(map, "Height", MapBounds::default().height)?,
    };
    let theater = map.get("Theater").unwrap_or("TEMPERATE").to_string();

    let basic = ini.section("Basic");
    let name = basic
        .and_then(|b| b.get("Name"))
        .unwrap_or_default()
        .to_string();
    let player_house = basic
        .and_then(|b| b.get("Player"))
        .and_then(|p| p.parse::<House>().ok())
        .unwrap_or_default();

    let mut units = Vec::new();
    for (section, category) in [
        ("STRUCTURES", UnitCategory::Structure),
        ("UNITS", UnitCategory::Vehicle),
        ("SHIPS", UnitCategory::Vessel),
        ("INFANTRY", UnitCategory::Infantry),
    ] {
        for (key, value) in ini.entries(section) {
            match parse_placement(value, category) {
                Some(p) => units.push(p),
                None => debug!(section, key = key.as_str(), row = value.as_str(), "skipping placement row"),
            }
        }
    }

    let terrain = ini
        .entries("TERRAIN")
        .iter()
        .filter_map(|(k, v)| parse_terrain(k, v))
        .collect();

    let waypoints = ini
        .entries("Waypoints")
        .iter()
        .filter_map(|(k, v)| {
            let id = k.parse::<u32>().ok()?;
            let cell = parse_cell(v)?;
            Some((id, cell))
        })
        .collect();

    let (team_types, team_slots) = keep_rows(ini.entries("TeamTypes"), "TeamTypes", parse_team_type);
    let (mut triggers, trigger_slots) = keep_rows(ini.entries("Trigs"), "Trigs", parse_trigger);
    resolve_references(&mut triggers, &team_slots, &trigger_slots);

    let cell_triggers = ini
        .entries("CellTriggers")
        .iter()
        .filter_map(|(k, v)| {
            Some(CellTrigger {
                cell: parse_cell(k)?,
                trigger: v.clone(),
            })
        })
        .collect();

    let map_layers = ini.section("MapPack").and_then(|s| {
        decode_map_pack(&join_pack_rows(s))
            .map_err(|e| warn!(error = %e, "MapPack undecodable, using clear terrain"))
            .ok()
    });
    let overlay = ini.section("OverlayPack").and_then(|s| {
        decode_overlay_pack(&join_pack_rows(s))
            .map_err(|e| warn!(error = %e, "OverlayPack undecodable, ignoring overlay"))
            .ok()
    });

    let data = ScenarioData {
        name,
        player_house,
        theater,
        bounds,
        units,
        terrain,
        waypoints,
        team_types,
        triggers,
        cell_triggers,
        map_layers,
        overlay,
    };
    warn_dangling(&data);
    info!(
        name = data.name.as_str(),
        units = data.units.len(),
        teams = data.team_types.len(),
        triggers = data.triggers.len(),
        "scenario decoded"
    );
    Ok(data)
}

fn map_number(section: &IniSection, key: &str, default: i32) -> Result<i32, ScenarioError> {
    match section.get(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ScenarioError::MalformedNumber {
            section: section.name.clone(),
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_cell(text: &str) -> Option<CellCoord> {
    let index = text.trim().parse::<usize>().ok()?;
    let cell = CellCoord::from_index(index);
    cell.on_grid().then_some(cell)
}

fn parse_trigger_name(text: Option<&&str>) -> Option<String> {
    text.map(|t| t.trim())
        .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case("None"))
        .map(str::to_string)
}

/// `house,type,strength,cell,...` with the trailing layout depending on the section.
fn parse_placement(row: &str, section: UnitCategory) -> Option<UnitPlacement> {
    let f: Vec<&str> = row.split(',').map(str::trim).collect();
    if f.len() < 4 {
        return None;
    }
    let house = f[0].parse::<House>().ok()?;
    let kind = f[1].parse::<UnitKind>().ok()?;
    let strength = f[2].parse::<u32>().ok()?.min(256);
    let cell = parse_cell(f[3])?;
    let byte = |i: usize| f.get(i).and_then(|v| v.parse::<u8>().ok()).unwrap_or(0);

    let (facing, mission, sub_cell, trigger) = match section {
        UnitCategory::Infantry => (
            Facing::from_byte(byte(6)),
            f.get(5).map(|m| Mission::from_name(m)).unwrap_or_default(),
            Some(byte(4).min(4)),
            parse_trigger_name(f.get(7)),
        ),
        UnitCategory::Structure => (
            Facing::from_byte(byte(4)),
            Mission::Guard,
            None,
            parse_trigger_name(f.get(5)),
        ),
        _ => (
            Facing::from_byte(byte(4)),
            f.get(5).map(|m| Mission::from_name(m)).unwrap_or_default(),
            None,
            parse_trigger_name(f.get(6)),
        ),
    };

    Some(UnitPlacement {
        house,
        kind,
        category: section,
        strength,
        cell,
        facing,
        mission,
        sub_cell,
        trigger,
    })
}

/// `cell=T01` style rows. Trees and rocks only; other features are cosmetic.
fn parse_terrain(key: &str, value: &str) -> Option<TerrainFeature> {
    let cell = parse_cell(key)?;
    let code = value.trim().to_ascii_uppercase();
    let terrain = if code.starts_with("ROCK") {
        Terrain::Rock
    } else if code.starts_with('T') {
        Terrain::Tree
    } else {
        return None;
    };
    Some(TerrainFeature { cell, terrain })
}

/// `house,flags,recruit,init,max,waypoint,trigger,N,type:count...,M,opcode:param...`
fn parse_team_type(name: &str, row: &str) -> Option<TeamType> {
    let f: Vec<&str> = row.split(',').map(str::trim).collect();
    let house = f.first()?.parse::<House>().ok()?;
    let origin_waypoint = f.get(5)?.parse::<i32>().ok()?;

    let member_count = f.get(7)?.parse::<usize>().ok()?;
    let mut members = Vec::with_capacity(member_count);
    for entry in f.get(8..8 + member_count)? {
        let (code, count) = entry.split_once(':')?;
        match code.parse::<UnitKind>() {
            Ok(kind) => members.push(TeamMember {
                kind,
                count: count.trim().parse().ok()?,
            }),
            Err(e) => debug!(team = name, error = %e, "dropping team member"),
        }
    }

    let mission_start = 8 + member_count;
    let mission_count = f
        .get(mission_start)
        .and_then(|m| m.parse::<usize>().ok())
        .unwrap_or(0);
    let mut missions = Vec::with_capacity(mission_count);
    for entry in f
        .get(mission_start + 1..mission_start + 1 + mission_count)
        .unwrap_or(&[])
    {
        let Some((op, param)) = entry.split_once(':') else {
            continue;
        };
        let (Ok(op), Ok(param)) = (op.trim().parse::<i64>(), param.trim().parse::<i32>()) else {
            continue;
        };
        match TeamMissionOp::from_id(op) {
            Some(op) => missions.push(TeamMission { op, param }),
            None => debug!(team = name, opcode = op, "dropping unsupported team mission"),
        }
    }

    Some(TeamType {
        name: name.to_string(),
        house,
        origin_waypoint,
        members,
        missions,
    })
}

/// 18 integers: persistence, house, event control, action control,
/// event1 (type, team, data), event2 (...), action1 (type, team, trigger, data), action2 (...).
fn parse_trigger(name: &str, row: &str) -> Option<Trigger> {
    let n: Vec<i64> = row
        .split(',')
        .map(|v| v.trim().parse::<i64>())
        .collect::<Result<_, _>>()
        .ok()?;
    if n.len() < 18 {
        return None;
    }

    let event = |i: usize| -> Option<TriggerEvent> {
        Some(TriggerEvent {
            kind: EventKind::from_id(n[i])?,
            team: n[i + 1] as i32,
            data: n[i + 2] as i32,
        })
    };
    let action = |i: usize| TriggerAction {
        kind: ActionKind::from_id(n[i]),
        team: n[i + 1] as i32,
        trigger: n[i + 2] as i32,
        data: n[i + 3] as i32,
    };

    let event_control = match n[2] {
        1 => EventControl::And,
        2 => EventControl::Or,
        _ => EventControl::Only,
    };
    let event1 = event(4)?;
    let event2 = match event_control {
        EventControl::Only => event(7).unwrap_or_default(),
        EventControl::And | EventControl::Or => event(7)?,
    };

    Some(Trigger {
        name: name.to_string(),
        persistence: Persistence::from_id(n[0]),
        house: House::from_id(n[1]).unwrap_or(House::Neutral),
        event_control,
        action_control: if n[3] == 1 {
            ActionControl::And
        } else {
            ActionControl::Only
        },
        event1,
        event2,
        action1: action(10),
        action2: action(14),
    })
}

/// Decode every row of a script section. `slots[row]` is the position of that
/// row in the returned list, `None` when it was skipped.
fn keep_rows<T>(
    rows: &[(String, String)],
    section: &'static str,
    parse: impl Fn(&str, &str) -> Option<T>,
) -> (Vec<T>, Vec<Option<usize>>) {
    let mut kept = Vec::with_capacity(rows.len());
    let mut slots = Vec::with_capacity(rows.len());
    for (k, v) in rows {
        match parse(k.as_str(), v.as_str()) {
            Some(item) => {
                slots.push(Some(kept.len()));
                kept.push(item);
            }
            None => {
                debug!(section, name = k.as_str(), "skipping script row");
                slots.push(None);
            }
        }
    }
    (kept, slots)
}

/// Rewrite the row numbers in trigger actions to positions in the decoded
/// lists. References to skipped or missing rows become -1.
fn resolve_references(
    triggers: &mut [Trigger],
    team_slots: &[Option<usize>],
    trigger_slots: &[Option<usize>],
) {
    for trigger in triggers.iter_mut() {
        let name = trigger.name.clone();
        for action in [&mut trigger.action1, &mut trigger.action2] {
            let team = remap(team_slots, action.team);
            if action.kind.spawns_team() && team < 0 {
                warn!(trigger = name.as_str(), team = action.team, "trigger references a missing team");
            }
            let target = remap(trigger_slots, action.trigger);
            if action.kind == ActionKind::ForceTrigger && target < 0 {
                warn!(trigger = name.as_str(), target = action.trigger, "trigger forces a missing trigger");
            }
            action.team = team;
            action.trigger = target;
        }
        for event in [&mut trigger.event1, &mut trigger.event2] {
            event.team = remap(team_slots, event.team);
        }
    }
}

fn remap(slots: &[Option<usize>], row: i32) -> i32 {
    usize::try_from(row)
        .ok()
        .and_then(|i| slots.get(i).copied().flatten())
        .and_then(|i| i32::try_from(i).ok())
        .unwrap_or(-1)
}

fn warn_dangling(data: &ScenarioData) {
    for team in &data.team_types {
        if data.waypoint(team.origin_waypoint).is_none() {
            warn!(team = team.name.as_str(), waypoint = team.origin_waypoint, "team origin waypoint is undefined");
        }
    }
}
