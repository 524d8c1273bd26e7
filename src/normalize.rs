use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PipelineError, Result};
use crate::numeric::{Cell, parse_cell, round2, to_count};
use crate::season::SeasonIndex;
use crate::season_loader::RawSeason;

/// Player-seasons with this many games or fewer are not eligible.
pub const ELIGIBILITY_FLOOR: u32 = 41;

const NAME_COL: &str = "FULL NAME";
const TEAM_COL: &str = "TEAM";
const POS_COL: &str = "POS";
const AGE_COL: &str = "AGE";
const GP_COL: &str = "GP";
const TOPG_COL: &str = "TOPG";
const TOR_COL: &str = "TOr";

const STAT_COLS: [&str; STAT_COUNT] = [
    "MPG", "3P%", "3PA", "2P%", "2PA", "FT%", "FTA", "RPG", "BPG", "APG", "SPG", TOPG_COL,
];
const STAT_COUNT: usize = 12;
const TWO_PA: usize = 4;
const THREE_PA: usize = 2;
const FTA: usize = 6;
const TOPG: usize = 11;

pub const COLUMN_NAMES: [&str; 17] = [
    "full_name",
    "team",
    "position",
    "age",
    "games_played",
    "minutes_per_game",
    "three_pt_pct",
    "three_pt_att",
    "two_pt_pct",
    "two_pt_att",
    "ft_pct",
    "ft_att",
    "rebounds_pg",
    "blocks_pg",
    "assists_pg",
    "steals_pg",
    "turnovers_pg",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSeasonRow {
    pub full_name: String,
    pub team: String,
    pub position: String,
    pub age: u32,
    pub games_played: u32,
    pub minutes_per_game: f64,
    pub three_pt_pct: f64,
    pub three_pt_att: f64,
    pub two_pt_pct: f64,
    pub two_pt_att: f64,
    pub ft_pct: f64,
    pub ft_att: f64,
    pub rebounds_pg: f64,
    pub blocks_pg: f64,
    pub assists_pg: f64,
    pub steals_pg: f64,
    pub turnovers_pg: f64,
}

impl NormalizedSeasonRow {
    fn from_stint(stint: Stint) -> Self {
        let [mpg, tp_pct, tp_att, two_pct, two_att, ft_pct, ft_att, rpg, bpg, apg, spg, topg] =
            stint.stats;
        Self {
            full_name: stint.name,
            team: stint.team,
            position: stint.position,
            age: stint.age,
            games_played: stint.games_played,
            minutes_per_game: mpg,
            three_pt_pct: tp_pct,
            three_pt_att: tp_att,
            two_pt_pct: two_pct,
            two_pt_att: two_att,
            ft_pct,
            ft_att,
            rebounds_pg: rpg,
            blocks_pg: bpg,
            assists_pg: apg,
            steals_pg: spg,
            turnovers_pg: topg,
        }
    }

    pub fn cells(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.team.clone(),
            self.position.clone(),
            self.age.to_string(),
            self.games_played.to_string(),
            self.minutes_per_game.to_string(),
            self.three_pt_pct.to_string(),
            self.three_pt_att.to_string(),
            self.two_pt_pct.to_string(),
            self.two_pt_att.to_string(),
            self.ft_pct.to_string(),
            self.ft_att.to_string(),
            self.rebounds_pg.to_string(),
            self.blocks_pg.to_string(),
            self.assists_pg.to_string(),
            self.steals_pg.to_string(),
            self.turnovers_pg.to_string(),
        ]
    }
}

/// One season's eligible players with a single row per name.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedSeason {
    pub season: SeasonIndex,
    pub rows: Vec<NormalizedSeasonRow>,
}

impl NormalizedSeason {
    pub fn column_names(&self) -> Vec<String> {
        COLUMN_NAMES
            .iter()
            .map(|c| self.season.suffixed(c))
            .collect()
    }
}

#[derive(Debug, Clone)]
struct Stint {
    name: String,
    team: String,
    position: String,
    age: u32,
    games_played: u32,
    stats: [f64; STAT_COUNT],
}

#[derive(Debug, Clone, Copy)]
enum TurnoverSource {
    PerGame(usize),
    Rate(usize),
}

struct ColumnMap {
    name: usize,
    team: usize,
    position: usize,
    age: usize,
    games_played: usize,
    stats: [usize; STAT_COUNT - 1],
    turnovers: TurnoverSource,
}

fn resolve_columns(raw: &RawSeason) -> Result<ColumnMap> {
    let mut missing = Vec::new();
    let mut lookup = |name: &str| {
        let idx = raw.column_index(name);
        if idx.is_none() {
            missing.push(name.to_string());
        }
        idx.unwrap_or(usize::MAX)
    };

    let name = lookup(NAME_COL);
    let team = lookup(TEAM_COL);
    let position = lookup(POS_COL);
    let age = lookup(AGE_COL);
    let games_played = lookup(GP_COL);
    let mut stats = [usize::MAX; STAT_COUNT - 1];
    for (slot, col) in stats.iter_mut().zip(STAT_COLS.iter()) {
        *slot = lookup(col);
    }

    // Older seasons only publish a turnover rate; per-game wins when both exist.
    let turnovers = match (raw.column_index(TOPG_COL), raw.column_index(TOR_COL)) {
        (Some(idx), _) => TurnoverSource::PerGame(idx),
        (None, Some(idx)) => TurnoverSource::Rate(idx),
        (None, None) => {
            missing.push(TOPG_COL.to_string());
            TurnoverSource::PerGame(usize::MAX)
        }
    };

    if !missing.is_empty() {
        return Err(PipelineError::Schema {
            season: raw.season,
            missing,
        });
    }

    Ok(ColumnMap {
        name,
        team,
        position,
        age,
        games_played,
        stats,
        turnovers,
    })
}

/// `rate / (100 - rate) * (2PA + 3PA + 0.44 * FTA)`, rounded to 2 decimals.
pub fn turnovers_from_rate(rate: f64, two_pt_att: f64, three_pt_att: f64, ft_att: f64) -> Option<f64> {
    let value = rate / (100.0 - rate) * (two_pt_att + three_pt_att + 0.44 * ft_att);
    value.is_finite().then(|| round2(value))
}

fn read_number(raw: &RawSeason, row: usize, col: usize, column: &'static str) -> Result<Option<f64>> {
    let text = raw.cell(row, col);
    match parse_cell(text) {
        Cell::Invalid => Err(PipelineError::InvalidValue {
            season: raw.season,
            row: row + 1,
            column,
            value: text.to_string(),
        }),
        cell => Ok(cell.value()),
    }
}

fn read_stint(raw: &RawSeason, cols: &ColumnMap, row: usize) -> Result<Option<Stint>> {
    let name = raw.cell(row, cols.name).trim();
    if name.is_empty() {
        warn!(season = %raw.season, "skipping row {} with blank player name", row + 1);
        return Ok(None);
    }

    let mut stats: [Option<f64>; STAT_COUNT] = [None; STAT_COUNT];
    for (i, col) in cols.stats.iter().enumerate() {
        stats[i] = read_number(raw, row, *col, STAT_COLS[i])?;
    }
    stats[TOPG] = match cols.turnovers {
        TurnoverSource::PerGame(col) => read_number(raw, row, col, TOPG_COL)?,
        TurnoverSource::Rate(col) => {
            let rate = read_number(raw, row, col, TOR_COL)?;
            match (rate, stats[TWO_PA], stats[THREE_PA], stats[FTA]) {
                (Some(rate), Some(two), Some(three), Some(ft)) => {
                    turnovers_from_rate(rate, two, three, ft)
                }
                _ => None,
            }
        }
    };

    let age = read_number(raw, row, cols.age, AGE_COL)?.unwrap_or(0.0);
    let games_played = read_number(raw, row, cols.games_played, GP_COL)?.unwrap_or(0.0);

    Ok(Some(Stint {
        name: name.to_string(),
        team: raw.cell(row, cols.team).trim().to_string(),
        position: raw.cell(row, cols.position).trim().to_string(),
        age: to_count(age),
        games_played: to_count(games_played),
        stats: stats.map(|v| v.unwrap_or(0.0)),
    }))
}

fn consolidate(stints: &[Stint]) -> Stint {
    let games_played: u32 = stints.iter().map(|s| s.games_played).sum();
    let total = f64::from(games_played);
    let mut stats = [0.0; STAT_COUNT];
    if games_played > 0 {
        for (i, slot) in stats.iter_mut().enumerate() {
            let weighted: f64 = stints
                .iter()
                .map(|s| s.stats[i] * f64::from(s.games_played))
                .sum();
            *slot = round2(weighted / total);
        }
    }

    let first = &stints[0];
    Stint {
        name: first.name.clone(),
        team: stints.iter().map(|s| s.team.clone()).max().unwrap_or_default(),
        position: stints
            .iter()
            .map(|s| s.position.clone())
            .max()
            .unwrap_or_default(),
        age: stints.iter().map(|s| s.age).max().unwrap_or_default(),
        games_played,
        stats,
    }
}

/// Traded players are consolidated before the eligibility filter.
pub fn normalize_season(raw: &RawSeason, eligibility_floor: u32) -> Result<NormalizedSeason> {
    let cols = resolve_columns(raw)?;

    let mut stints = Vec::with_capacity(raw.rows.len());
    for row in 0..raw.rows.len() {
        if let Some(stint) = read_stint(raw, &cols, row)? {
            stints.push(stint);
        }
    }

    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    for (idx, stint) in stints.iter().enumerate() {
        let entry = groups.entry(stint.name.as_str()).or_default();
        if entry.is_empty() {
            first_seen.push(stint.name.as_str());
        }
        entry.push(idx);
    }

    let mut merged: Vec<Stint> = Vec::with_capacity(first_seen.len());
    let mut traded: Vec<Stint> = Vec::new();
    for name in &first_seen {
        let idxs = &groups[name];
        if idxs.len() == 1 {
            merged.push(stints[idxs[0]].clone());
        } else {
            let parts: Vec<Stint> = idxs.iter().map(|i| stints[*i].clone()).collect();
            debug!(season = %raw.season, stints = parts.len(), "consolidating traded player {name}");
            traded.push(consolidate(&parts));
        }
    }
    merged.extend(traded);

    let total = merged.len();
    let rows: Vec<NormalizedSeasonRow> = merged
        .into_iter()
        .filter(|s| s.games_played > eligibility_floor)
        .map(NormalizedSeasonRow::from_stint)
        .collect();
    debug!(
        season = %raw.season,
        eligible = rows.len(),
        dropped = total - rows.len(),
        "normalized season"
    );

    Ok(NormalizedSeason {
        season: raw.season,
        rows,
    })
}
