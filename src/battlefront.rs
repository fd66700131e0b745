//! # Battlefront model
//!
//! Reference lines that split the map into "own" and "enemy" halves:
//!
//! - one map-wide line (the anti-diagonal from the top-left to the
//!   bottom-right corner) used by positioning and forward-kill scoring,
//! - one line per lane role used by the gank gate.
//!
//! The constants are derived from map landmark coordinates on the
//! 14870 × 14980 summoner's rift and are configuration data; they can be
//! recalibrated from `config/scoring.toml` for another map scale.
//!
//! Lines may shift over game time (`LineShift`): the last shift whose
//! `from_minute` is ≤ the queried minute offsets the intercept.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::geometry::{self, Position};

pub const MAP_WIDTH: f64 = 14870.0;
pub const MAP_HEIGHT: f64 = 14980.0;
pub const MAP_CENTER: (f64, f64) = (7435.0, 7490.0);
/// Half of the map diagonal.
pub const HALF_DIAGONAL: f64 = 10553.64;

/// Canonical lane role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Top,
    Jungle,
    Middle,
    Bottom,
    Support,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Top,
        Role::Jungle,
        Role::Middle,
        Role::Bottom,
        Role::Support,
    ];
}

static ROLE_TABLE: Lazy<HashMap<(&'static str, &'static str), Role>> = Lazy::new(|| {
    HashMap::from([
        (("MIDDLE", "SOLO"), Role::Middle),
        (("TOP", "SOLO"), Role::Top),
        (("JUNGLE", "NONE"), Role::Jungle),
        (("BOTTOM", "DUO_CARRY"), Role::Bottom),
        (("BOTTOM", "SOLO"), Role::Bottom),
        (("BOTTOM", "DUO_SUPPORT"), Role::Support),
        (("MIDDLE", "DUO"), Role::Middle),
        (("NONE", "DUO_SUPPORT"), Role::Support),
    ])
});

/// Map a raw `(lane, role)` pair onto a canonical role.
/// Combinations outside the fixed table are unrecognized (`None`).
pub fn canonical_role(lane: &str, role: &str) -> Option<Role> {
    let lane = lane.trim().to_ascii_uppercase();
    let role = role.trim().to_ascii_uppercase();
    ROLE_TABLE.get(&(lane.as_str(), role.as_str())).copied()
}

/// `gradient·x + bias·y + intercept = 0` plus the side that counts as forward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattlefrontLine {
    pub gradient: f64,
    #[serde(default = "default_bias")]
    pub bias: f64,
    pub intercept: f64,
    /// `+1` / `-1`: which sign of the distance is forward; `0`: no direction.
    #[serde(default)]
    pub forward_sign: i8,
}

fn default_bias() -> f64 {
    1.0
}

impl BattlefrontLine {
    pub fn distance(&self, p: Position) -> f64 {
        geometry::distance(p.x, p.y, self.gradient, self.intercept, self.bias)
    }

    /// Lane gate: directional lines need `distance·sign ≥ threshold`,
    /// undirected lines need `|distance| ≤ threshold`.
    pub fn passes(&self, distance: f64, threshold: f64) -> bool {
        if self.forward_sign == 0 {
            distance.abs() <= threshold
        } else {
            distance * f64::from(self.forward_sign) >= threshold
        }
    }

    fn shifted(mut self, offset: f64) -> Self {
        self.intercept += offset;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineShift {
    pub from_minute: u32,
    pub intercept_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattlefrontModel {
    #[serde(default = "default_map_line")]
    pub map: BattlefrontLine,
    #[serde(default = "default_top_line")]
    pub top: BattlefrontLine,
    #[serde(default = "default_mid_line")]
    pub middle: BattlefrontLine,
    /// Shared by bottom and support.
    #[serde(default = "default_bot_line")]
    pub bottom: BattlefrontLine,
    /// Sorted by `from_minute`.
    #[serde(default)]
    pub shifts: Vec<LineShift>,
}

fn default_map_line() -> BattlefrontLine {
    BattlefrontLine {
        gradient: MAP_HEIGHT / MAP_WIDTH,
        bias: 1.0,
        intercept: -MAP_HEIGHT,
        forward_sign: 1,
    }
}

fn default_top_line() -> BattlefrontLine {
    BattlefrontLine {
        gradient: 6712.0 / 6431.0,
        bias: -1.0,
        intercept: 5120.93,
        forward_sign: -1,
    }
}

fn default_mid_line() -> BattlefrontLine {
    BattlefrontLine {
        gradient: MAP_CENTER.1 / MAP_CENTER.0,
        bias: -1.0,
        intercept: 0.0,
        forward_sign: 0,
    }
}

fn default_bot_line() -> BattlefrontLine {
    BattlefrontLine {
        gradient: 6743.0 / 6408.0,
        bias: -1.0,
        intercept: -5797.71,
        forward_sign: 1,
    }
}

impl Default for BattlefrontModel {
    fn default() -> Self {
        Self {
            map: default_map_line(),
            top: default_top_line(),
            middle: default_mid_line(),
            bottom: default_bot_line(),
            shifts: Vec::new(),
        }
    }
}

impl BattlefrontModel {
    /// Lane line of a role. Jungle has none.
    pub fn role_line(&self, role: Role) -> Option<BattlefrontLine> {
        match role {
            Role::Top => Some(self.top),
            Role::Middle => Some(self.middle),
            Role::Bottom | Role::Support => Some(self.bottom),
            Role::Jungle => None,
        }
    }

    pub fn line_at(&self, role: Role, minute: u32) -> Option<BattlefrontLine> {
        let offset = self.offset_at(minute);
        self.role_line(role).map(|l| l.shifted(offset))
    }

    pub fn map_line_at(&self, minute: u32) -> BattlefrontLine {
        self.map.shifted(self.offset_at(minute))
    }

    fn offset_at(&self, minute: u32) -> f64 {
        self.shifts
            .iter()
            .filter(|s| s.from_minute <= minute)
            .max_by_key(|s| s.from_minute)
            .map(|s| s.intercept_offset)
            .unwrap_or(0.0)
    }
}
