//! Visual/audio effect records emitted by the simulation.
//!
//! The core never draws or plays anything. Combat appends descriptors here
//! and the renderer/audio layers consume them from the snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{UnitKind, WeaponKind};
use crate::types::UnitId;

/// What an effect record represents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EffectKind {
    /// Flash at the firing unit's muzzle.
    Muzzle { weapon: WeaponKind },
    /// Projectile travelling from `from` to `to` over the record's lifetime.
    Projectile { weapon: WeaponKind },
    /// Impact explosion at `to`.
    Explosion { weapon: WeaponKind },
    /// A unit died at `to`.
    Death { kind: UnitKind },
    /// A unit was crushed at `to`.
    Crush,
}

/// One short-lived effect descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectRecord {
    pub kind: EffectKind,
    pub source: Option<UnitId>,
    pub from: Vec2,
    pub to: Vec2,
    /// Ticks since the record was emitted.
    pub age: u32,
    /// Ticks the record stays alive.
    pub lifetime: u32,
}

impl EffectRecord {
    pub fn new(kind: EffectKind, source: Option<UnitId>, from: Vec2, to: Vec2, lifetime: u32) -> Self {
        Self {
            kind,
            source,
            from,
            to,
            age: 0,
            lifetime: lifetime.max(1),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }
}
