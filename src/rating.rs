use serde::Serialize;

use crate::merge::{LongitudinalRow, LongitudinalTable};
use crate::normalize::NormalizedSeasonRow;
use crate::numeric::round2;
use crate::season::{NUM_SEASONS, SeasonIndex};

const THREE_PT_WEIGHT: f64 = 3.0;
const TWO_PT_WEIGHT: f64 = 2.0;
const FT_WEIGHT: f64 = 1.0;
const REBOUND_WEIGHT: f64 = 1.2;
const ASSIST_WEIGHT: f64 = 1.5;
const BLOCK_WEIGHT: f64 = 2.0;
const STEAL_WEIGHT: f64 = 2.0;
const TURNOVER_WEIGHT: f64 = -1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRatingRow {
    pub name: String,
    /// 0 when the player is absent that season.
    pub ratings: [f64; NUM_SEASONS],
}

impl PlayerRatingRow {
    pub fn rating(&self, season: SeasonIndex) -> f64 {
        self.ratings[season.slot()]
    }
}

/// Each weighted term is rounded to 2 decimals before summing.
pub fn season_rating(row: &NormalizedSeasonRow) -> f64 {
    let shooting = round2(THREE_PT_WEIGHT * (row.three_pt_pct * row.three_pt_att))
        + round2(TWO_PT_WEIGHT * (row.two_pt_pct * row.two_pt_att))
        + round2(FT_WEIGHT * (row.ft_pct * row.ft_att));
    let counting = round2(REBOUND_WEIGHT * row.rebounds_pg)
        + round2(ASSIST_WEIGHT * row.assists_pg)
        + round2(BLOCK_WEIGHT * row.blocks_pg)
        + round2(STEAL_WEIGHT * row.steals_pg)
        + round2(TURNOVER_WEIGHT * row.turnovers_pg);
    round2(shooting + counting)
}

pub fn rate_player(row: &LongitudinalRow) -> PlayerRatingRow {
    let mut ratings = [0.0; NUM_SEASONS];
    let mut name: Option<&str> = None;
    for (season, played) in row.seasons_played() {
        name.get_or_insert(played.full_name.as_str());
        ratings[season.slot()] = season_rating(played);
    }
    PlayerRatingRow {
        name: name.unwrap_or(row.key()).to_string(),
        ratings,
    }
}

/// One rating row per longitudinal row, in the same order.
pub fn rate_players(table: &LongitudinalTable) -> Vec<PlayerRatingRow> {
    table.rows.iter().map(rate_player).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shooter_only() -> NormalizedSeasonRow {
        NormalizedSeasonRow {
            full_name: "Shooter".to_string(),
            team: "Gsw".to_string(),
            position: "G".to_string(),
            age: 27,
            games_played: 70,
            minutes_per_game: 34.0,
            three_pt_pct: 0.4,
            three_pt_att: 5.0,
            two_pt_pct: 0.0,
            two_pt_att: 0.0,
            ft_pct: 0.0,
            ft_att: 0.0,
            rebounds_pg: 0.0,
            blocks_pg: 0.0,
            assists_pg: 0.0,
            steals_pg: 0.0,
            turnovers_pg: 0.0,
        }
    }

    #[test]
    fn three_point_term_counts_triple_the_makes() {
        assert_eq!(season_rating(&shooter_only()), 6.0);
    }

    #[test]
    fn full_formula_matches_hand_computation() {
        let row = NormalizedSeasonRow {
            three_pt_pct: 0.367,
            three_pt_att: 6.3,
            two_pt_pct: 0.512,
            two_pt_att: 11.7,
            ft_pct: 0.845,
            ft_att: 4.4,
            rebounds_pg: 5.3,
            blocks_pg: 0.4,
            assists_pg: 6.1,
            steals_pg: 1.2,
            turnovers_pg: 2.7,
            ..shooter_only()
        };
        // round(3 * 2.3121) + round(2 * 5.9904) + 3.72 + 6.36 + 9.15 + 0.8 + 2.4 - 2.7
        let expected = 6.94 + 11.98 + 3.72 + 6.36 + 9.15 + 0.8 + 2.4 - 2.7;
        assert!((season_rating(&row) - expected).abs() < 1e-9);
    }

    #[test]
    fn shooting_terms_round_after_weighting() {
        let row = NormalizedSeasonRow {
            three_pt_pct: 0.367,
            three_pt_att: 6.3,
            ..shooter_only()
        };
        // 3 * 2.3121 = 6.9363; rounding the product first would give 6.93.
        assert_eq!(season_rating(&row), 6.94);
    }
}
