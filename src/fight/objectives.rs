// src/fight/objectives.rs
//! Objectives secured shortly after a fight.

use serde::{Deserialize, Serialize};

use crate::model::{Monster, Objective, ObjectiveEvent, TurretTier, MINUTE_MS};

/// Point value per objective kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveValues {
    #[serde(default = "two")]
    pub elemental_dragon: f64,
    #[serde(default = "four")]
    pub elder_dragon: f64,
    #[serde(default = "two")]
    pub rift_herald: f64,
    #[serde(default = "five")]
    pub baron_nashor: f64,
    #[serde(default = "one")]
    pub outer_turret: f64,
    #[serde(default = "two")]
    pub inner_turret: f64,
    #[serde(default = "three")]
    pub base_turret: f64,
    #[serde(default = "four")]
    pub nexus_turret: f64,
}

fn one() -> f64 {
    1.0
}
fn two() -> f64 {
    2.0
}
fn three() -> f64 {
    3.0
}
fn four() -> f64 {
    4.0
}
fn five() -> f64 {
    5.0
}

impl Default for ObjectiveValues {
    fn default() -> Self {
        Self {
            elemental_dragon: 2.0,
            elder_dragon: 4.0,
            rift_herald: 2.0,
            baron_nashor: 5.0,
            outer_turret: 1.0,
            inner_turret: 2.0,
            base_turret: 3.0,
            nexus_turret: 4.0,
        }
    }
}

impl ObjectiveValues {
    pub fn value(&self, objective: Objective) -> f64 {
        match objective {
            Objective::EliteMonsterKill(Monster::ElementalDragon) => self.elemental_dragon,
            Objective::EliteMonsterKill(Monster::ElderDragon) => self.elder_dragon,
            Objective::EliteMonsterKill(Monster::RiftHerald) => self.rift_herald,
            Objective::EliteMonsterKill(Monster::BaronNashor) => self.baron_nashor,
            Objective::BuildingKill(TurretTier::OuterTurret) => self.outer_turret,
            Objective::BuildingKill(TurretTier::InnerTurret) => self.inner_turret,
            Objective::BuildingKill(TurretTier::BaseTurret) => self.base_turret,
            Objective::BuildingKill(TurretTier::NexusTurret) => self.nexus_turret,
        }
    }
}

/// Sum of objective values in the open window
/// `(last_kill, last_kill + window_min)`.
///
/// `objectives` must be time-ordered: events up to the last kill are
/// skipped and the scan stops at the first event at or past the window end.
pub fn fight_objectives(
    last_kill_ts: u64,
    objectives: &[ObjectiveEvent],
    values: &ObjectiveValues,
    window_min: f64,
) -> f64 {
    let end = last_kill_ts as f64 + window_min * MINUTE_MS;
    let mut total = 0.0;
    for ev in objectives {
        if ev.timestamp <= last_kill_ts {
            continue;
        }
        if ev.timestamp as f64 >= end {
            break;
        }
        total += values.value(ev.objective);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(ts: u64, objective: Objective) -> ObjectiveEvent {
        ObjectiveEvent {
            timestamp: ts,
            objective,
            team_id: 100,
        }
    }

    #[test]
    fn window_is_open_on_both_ends() {
        let v = ObjectiveValues::default();
        let objs = vec![
            ev(600_000, Objective::EliteMonsterKill(Monster::BaronNashor)),
            ev(630_000, Objective::BuildingKill(TurretTier::OuterTurret)),
            ev(700_000, Objective::EliteMonsterKill(Monster::ElementalDragon)),
            ev(720_000, Objective::EliteMonsterKill(Monster::ElderDragon)),
        ];
        assert_eq!(fight_objectives(600_000, &objs, &v, 2.0), 3.0);
    }

    #[test]
    fn nothing_after_the_fight() {
        let v = ObjectiveValues::default();
        assert_eq!(fight_objectives(600_000, &[], &v, 2.0), 0.0);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let v: ObjectiveValues = toml::from_str("baron_nashor = 8.0").unwrap();
        assert_eq!(v.baron_nashor, 8.0);
        assert_eq!(v.rift_herald, 2.0);
    }
}
