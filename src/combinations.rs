// src/combinations.rs
//! # Champion Combinations
//! Win rate of every champion pairing the duo played together.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::stats::Ratio;

/// Champions picked by the two players in one game, in duo order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionPair {
    pub first: String,
    pub second: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionCombo {
    pub first: String,
    pub second: String,
    pub wins: u32,
    pub total: u32,
    pub win_rate: f64,
}

/// Aggregate `(pair, won)` per game. Sorted by win rate, best first; ties
/// keep the alphabetical order of the pair.
pub fn champion_combos<'a, I>(games: I) -> Vec<ChampionCombo>
where
    I: IntoIterator<Item = (&'a ChampionPair, bool)>,
{
    let mut by_pair: BTreeMap<(&str, &str), Ratio> = BTreeMap::new();
    for (pair, won) in games {
        by_pair
            .entry((pair.first.as_str(), pair.second.as_str()))
            .or_default()
            .record(won);
    }

    let mut out: Vec<ChampionCombo> = by_pair
        .into_iter()
        .map(|((first, second), r)| ChampionCombo {
            first: first.to_string(),
            second: second.to_string(),
            wins: r.hits,
            total: r.total,
            win_rate: r.or_zero(),
        })
        .collect();
    out.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> ChampionPair {
        ChampionPair {
            first: a.into(),
            second: b.into(),
        }
    }

    #[test]
    fn grouped_and_sorted_by_win_rate() {
        let ahri_lee = pair("Ahri", "Lee Sin");
        let zed_elise = pair("Zed", "Elise");
        let games = [
            (&ahri_lee, false),
            (&zed_elise, true),
            (&ahri_lee, true),
            (&zed_elise, true),
        ];
        let combos = champion_combos(games);
        assert_eq!(combos.len(), 2);
        assert_eq!(combos[0].first, "Zed");
        assert_eq!((combos[0].wins, combos[0].total), (2, 2));
        assert_eq!(combos[1].win_rate, 0.5);
    }

    #[test]
    fn pair_order_matters() {
        let a = pair("Ahri", "Lee Sin");
        let b = pair("Lee Sin", "Ahri");
        assert_eq!(champion_combos([(&a, true), (&b, true)]).len(), 2);
    }
}
