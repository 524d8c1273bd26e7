use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::normalize::{COLUMN_NAMES, NormalizedSeason, NormalizedSeasonRow};
use crate::season::{NUM_SEASONS, SeasonIndex};

/// One player across every season; `None` means the player did not appear.
#[derive(Debug, Clone, Serialize)]
pub struct LongitudinalRow {
    key: String,
    seasons: [Option<NormalizedSeasonRow>; NUM_SEASONS],
}

impl LongitudinalRow {
    fn new(key: String) -> Self {
        Self {
            key,
            seasons: std::array::from_fn(|_| None),
        }
    }

    /// Join key: the first-season name, or the name from the season that introduced the row.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn season(&self, season: SeasonIndex) -> Option<&NormalizedSeasonRow> {
        self.seasons[season.slot()].as_ref()
    }

    pub fn name_in(&self, season: SeasonIndex) -> Option<&str> {
        self.season(season).map(|r| r.full_name.as_str())
    }

    pub fn ages(&self) -> [Option<u32>; NUM_SEASONS] {
        std::array::from_fn(|slot| self.seasons[slot].as_ref().map(|r| r.age))
    }

    pub fn seasons_played(&self) -> impl Iterator<Item = (SeasonIndex, &NormalizedSeasonRow)> {
        SeasonIndex::all().filter_map(|s| self.season(s).map(|row| (s, row)))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LongitudinalTable {
    pub seasons: Vec<SeasonIndex>,
    pub rows: Vec<LongitudinalRow>,
}

impl LongitudinalTable {
    /// Suffixed column names for every merged season, in season order.
    pub fn column_names(&self) -> Vec<String> {
        self.seasons
            .iter()
            .flat_map(|s| COLUMN_NAMES.iter().map(move |c| s.suffixed(c)))
            .collect()
    }

    pub fn find(&self, key: &str) -> Option<&LongitudinalRow> {
        self.rows.iter().find(|r| r.key == key)
    }
}

fn check_unique_names(table: &NormalizedSeason) -> Result<()> {
    let mut seen = HashSet::with_capacity(table.rows.len());
    for row in &table.rows {
        if !seen.insert(row.full_name.as_str()) {
            return Err(PipelineError::JoinKeyDrift(format!(
                "season {} lists {:?} more than once",
                table.season, row.full_name
            )));
        }
    }
    Ok(())
}

/// Outer-join normalized seasons on player name, folding left to right.
///
/// Seasons must arrive in strictly increasing order; the first table fixes
/// the join key for every row it contributes.
pub fn merge_seasons(tables: &[NormalizedSeason]) -> Result<LongitudinalTable> {
    for pair in tables.windows(2) {
        if pair[1].season <= pair[0].season {
            return Err(PipelineError::JoinKeyDrift(format!(
                "season {} follows season {}; seasons must be merged in order",
                pair[1].season, pair[0].season
            )));
        }
    }

    let Some((first, rest)) = tables.split_first() else {
        return Ok(LongitudinalTable::default());
    };

    check_unique_names(first)?;
    let mut rows: Vec<LongitudinalRow> = Vec::with_capacity(first.rows.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(first.rows.len());
    for row in &first.rows {
        let mut merged = LongitudinalRow::new(row.full_name.clone());
        merged.seasons[first.season.slot()] = Some(row.clone());
        index.insert(row.full_name.clone(), rows.len());
        rows.push(merged);
    }

    for table in rest {
        check_unique_names(table)?;
        let slot = table.season.slot();
        let mut added = 0usize;
        for row in &table.rows {
            match index.get(&row.full_name) {
                Some(&at) => rows[at].seasons[slot] = Some(row.clone()),
                None => {
                    let mut merged = LongitudinalRow::new(row.full_name.clone());
                    merged.seasons[slot] = Some(row.clone());
                    index.insert(row.full_name.clone(), rows.len());
                    rows.push(merged);
                    added += 1;
                }
            }
        }
        debug!(season = %table.season, new_players = added, total = rows.len(), "merged season");
    }

    rows.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(LongitudinalTable {
        seasons: tables.iter().map(|t| t.season).collect(),
        rows,
    })
}
