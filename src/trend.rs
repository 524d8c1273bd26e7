use serde::Serialize;
use tracing::{debug, warn};

use crate::merge::LongitudinalTable;
use crate::numeric::round2;
use crate::rating::PlayerRatingRow;
use crate::season::{NUM_SEASONS, SeasonIndex};

/// Consecutive lower ratings needed to call a decline.
pub const DECLINE_STREAK: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovementRow {
    pub name: String,
    pub improvement_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclineRow {
    pub name: String,
    pub decline_age: u32,
    pub season: SeasonIndex,
}

/// Mean of the non-zero year-over-year deltas, rounded to 2 decimals.
pub fn improvement_rating(ratings: &[f64; NUM_SEASONS]) -> Option<f64> {
    let deltas: Vec<f64> = ratings
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|d| *d != 0.0)
        .collect();
    if deltas.is_empty() {
        return None;
    }
    Some(round2(deltas.iter().sum::<f64>() / deltas.len() as f64))
}

pub fn decline_season(ratings: &[f64; NUM_SEASONS]) -> Option<SeasonIndex> {
    let mut previous = 0.0;
    let mut streak = 0u32;
    for season in SeasonIndex::all() {
        let current = ratings[season.slot()];
        // unplayed
        if current <= 0.0 {
            continue;
        }
        if current < previous {
            streak += 1;
        } else {
            streak = 1;
        }
        previous = current;
        if streak == DECLINE_STREAK {
            return Some(season);
        }
    }
    None
}

pub fn improvement_ratings(players: &[PlayerRatingRow]) -> Vec<ImprovementRow> {
    players
        .iter()
        .map(|p| {
            let improvement_rating = improvement_rating(&p.ratings);
            if improvement_rating.is_none() {
                warn!("no non-zero rating change for {}, improvement rating undefined", p.name);
            }
            ImprovementRow {
                name: p.name.clone(),
                improvement_rating,
            }
        })
        .collect()
}

/// `players` must be the rating rows produced from `table`, in the same order.
pub fn decline_ages(table: &LongitudinalTable, players: &[PlayerRatingRow]) -> Vec<DeclineRow> {
    let mut out = Vec::new();
    for (row, player) in table.rows.iter().zip(players) {
        let Some(season) = decline_season(&player.ratings) else {
            continue;
        };
        let ages = row.ages();
        match ages[season.slot()] {
            Some(decline_age) => {
                debug!(season = %season, age = decline_age, "decline detected for {}", player.name);
                out.push(DeclineRow {
                    name: player.name.clone(),
                    decline_age,
                    season,
                });
            }
            None => warn!(
                "{} declined in season {season} but has no age recorded there",
                player.name
            ),
        }
    }
    out
}
