// tests/duo_report.rs
mod common;

use common::*;
use duo_behavior_analyzer::battlefront::Role;
use duo_behavior_analyzer::classify::{ClassKind, Classifier, ClusterAssignment, DuoType, MatchType};
use duo_behavior_analyzer::config::calibration::CalibrationTable;
use duo_behavior_analyzer::engine::{score_game, DuoGameMetrics};
use duo_behavior_analyzer::geometry::Position;
use duo_behavior_analyzer::model::{Monster, Objective};
use duo_behavior_analyzer::{score_games, DuoGame, DuoReport, Normalizer, ScoringConfig};

/// Splits on the first feature; stands in for a fitted model.
struct ThresholdModel;

impl Classifier for ThresholdModel {
    fn classify(&self, features: [f64; 2]) -> ClusterAssignment {
        ClusterAssignment {
            cluster: usize::from(features[0] > 0.5),
            centroids: vec![[0.25, 0.25], [0.75, 0.75]],
        }
    }

    fn name(&self) -> &'static str {
        "threshold"
    }
}

const CALIBRATION: &str = r#"
[kill_participation]
mean = 0.5
variance = 0.04

[kda]
mean = 3.0
variance = 9.0

[gold_share]
mean = 0.2
variance = 0.0025

[gold_diff]
mean = 0.0
variance = 250000.0

[creep_share]
mean = 0.2
variance = 0.0025

[creep_score_diff]
mean = 0.0
variance = 100.0

[win_rate]
mean = 0.5
variance = 0.01

[fight_worth]
mean = 0.0
variance = 1.0

[fight_objectives]
mean = 2.0
variance = 4.0
"#;

/// Duo 3 (mid) + 2 (jungle) ganking together; `win` for blue.
fn game(game_id: u64, win: bool) -> DuoGame {
    let lane = Position::new(7435.0, 7490.0);
    let mut frames = Vec::new();
    for minute in 1..=12u64 {
        // 2 and 3 side by side every minute
        frames.extend(minute_frames(minute, lane, &[2, 3]));
    }
    for f in frames.iter_mut() {
        f.total_gold = 500 * (f.timestamp / MINUTE) as u32 + f.participant_id;
        f.minions_killed = 8 * (f.timestamp / MINUTE) as u32;
    }
    // minute 5 kill: 2 + 3 on 8 with 7 nearby → 4 members, gank
    if let Some(f) = frames
        .iter_mut()
        .find(|f| f.timestamp == 5 * MINUTE && f.participant_id == 7)
    {
        f.position = Some(Position::new(lane.x + 200.0, lane.y));
    }
    let kills = vec![
        kill(5 * MINUTE, 3, 8, &[2], Some(lane)),
        kill(9 * MINUTE, 6, 1, &[], Some(home(1))),
    ];

    let mut rec = record(game_id, frames, kills);
    for p in rec.participants.iter_mut() {
        p.champion = match p.id {
            3 => Some("Ahri".into()),
            2 => Some("Lee Sin".into()),
            _ => None,
        };
    }
    rec.objectives = vec![objective(
        6 * MINUTE,
        Objective::EliteMonsterKill(Monster::RiftHerald),
        100,
    )];
    rec.stats = (1..=10)
        .map(|id| {
            let blue = id <= 5;
            stats(id, u32::from(id == 3), u32::from(id == 8), u32::from(id == 2), blue == win)
        })
        .collect();

    DuoGame {
        record: rec,
        first: 3,
        second: 2,
    }
}

fn normalizer() -> Normalizer {
    Normalizer::new(toml::from_str::<CalibrationTable>(CALIBRATION).unwrap())
}

#[test]
fn per_game_metrics() {
    let cfg = ScoringConfig::default();
    let m: DuoGameMetrics = score_game(&game(1, true), &cfg);
    let mid = m.first.as_ref().unwrap();
    let jungle = m.second.as_ref().unwrap();

    // the minute 9 kill belongs to red
    assert_eq!(mid.kill_participation, Some(1.0));
    assert_eq!(mid.kda, Some(1.0));
    // the only blue kill is at minute 5
    assert_eq!(mid.kill_participation_phases.early, Some(1.0));
    assert_eq!(mid.kill_participation_phases.mid, None);
    assert_eq!(mid.minions_killed, Some(130));
    assert_eq!(mid.ganking, 1.0);
    assert_eq!(jungle.ganking, 1.0);
    assert_eq!(mid.tactician.fights, 1);
    assert_eq!(mid.tactician.objectives, Some(2.0));
    assert_eq!(mid.win, Some(true));
    // gold of 3 and 8 differs only by the participant-id offset
    assert_eq!(mid.gold_diff.overall, Some(-5.0));
    assert_eq!(m.together, Some(1.0));
}

#[test]
fn report_over_batch() {
    let cfg = ScoringConfig::default();
    let mut games = vec![game(1, true), game(2, true), game(3, false), game(4, true)];
    // 3 filled in as bottom carry once
    if let Some(p) = games[3].record.participants.iter_mut().find(|p| p.id == 3) {
        p.lane = "BOTTOM".into();
        p.role = "DUO_CARRY".into();
    }
    let scored = score_games(&games, &cfg);
    assert_eq!(scored.iter().map(|g| g.game_id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);

    let n = normalizer();
    let report = DuoReport::build(&scored, &n);
    assert_eq!(report.games, 4);
    assert_eq!(report.win_rate, Some(0.75));
    assert_eq!(report.match_type, Some(MatchType::PerfectMatch));
    assert_eq!(report.duo_type, Some(DuoType::Lovers));

    assert_eq!(report.first.games, 4);
    assert_eq!(report.first.role, Some(Role::Middle));
    assert_eq!(report.second.role, Some(Role::Jungle));
    assert_eq!(report.first.minions_by_role.get(&Role::Middle), Some(&130.0));
    assert_eq!(report.first.minions_by_role.get(&Role::Bottom), Some(&130.0));
    assert_eq!(report.first.kill_participation_phases.early, Some(1.0));
    assert_eq!(report.first.kill_participation_phases.late, None);
    assert!(report.first.features.contains_key("murderous_duo"));
    assert!(report.first.features.contains_key("tactician"));
    assert!(report.first.standardized.contains_key("kill_participation"));
    // no calibration for positioning → not standardized
    assert!(!report.first.standardized.contains_key("positioning"));

    let c = report.classify(ClassKind::MurderousDuo, &ThresholdModel);
    assert_eq!(c.first.as_ref().map(|a| a.cluster), Some(1));
    assert_eq!(c.first.unwrap().centroids.len(), 2);

    assert_eq!(report.champion_combos.len(), 1);
    let combo = &report.champion_combos[0];
    assert_eq!((combo.first.as_str(), combo.second.as_str()), ("Ahri", "Lee Sin"));
    assert_eq!((combo.wins, combo.total), (3, 4));

    // report is plain JSON
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["duo_type"], serde_json::json!("lovers"));
}

#[test]
fn empty_batch_is_all_missing() {
    let report = DuoReport::build(&[], &normalizer());
    assert_eq!(report.games, 0);
    assert_eq!(report.win_rate, None);
    assert_eq!(report.duo_type, None);
    assert_eq!(report.match_type, None);
    assert!(report.first.features.is_empty());
    assert!(report.champion_combos.is_empty());
    assert_eq!(report.first.role, None);
    assert!(report.first.minions_by_role.is_empty());
}
