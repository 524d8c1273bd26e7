use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{PipelineError, Result};
use crate::season::SeasonIndex;

/// One season's records exactly as read: header names and string cells in source order.
#[derive(Debug, Clone)]
pub struct RawSeason {
    pub season: SeasonIndex,
    pub source: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawSeason {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell text, treating short rows as missing trailing cells.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

pub fn load_season_from_reader<R: Read>(
    rdr: R,
    season: SeasonIndex,
    source: PathBuf,
) -> std::result::Result<RawSeason, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }
    Ok(RawSeason {
        season,
        source,
        headers,
        rows,
    })
}

pub fn load_season_file(path: &Path, season: SeasonIndex) -> Result<RawSeason> {
    let file = fs::File::open(path).map_err(|e| PipelineError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let raw = load_season_from_reader(file, season, path.to_path_buf()).map_err(|e| {
        PipelineError::Csv {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    debug!(
        season = %season,
        rows = raw.rows.len(),
        columns = raw.headers.len(),
        "loaded season file {}",
        path.display()
    );
    Ok(raw)
}

/// Load every season file in `dir`, ordered 1 through 10.
pub fn load_season_dir(dir: &Path) -> Result<Vec<RawSeason>> {
    let entries = fs::read_dir(dir).map_err(|e| PipelineError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut by_season: BTreeMap<SeasonIndex, PathBuf> = BTreeMap::new();
    for entry in entries {
        let entry = entry.map_err(|e| PipelineError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            continue;
        }
        let Some(season) = SeasonIndex::from_file_name(&path) else {
            warn!("skipping {}: no season index in file name", path.display());
            continue;
        };
        if let Some(first) = by_season.get(&season) {
            return Err(PipelineError::DuplicateSeason {
                season,
                first: first.clone(),
                second: path,
            });
        }
        by_season.insert(season, path);
    }

    if let Some(missing) = SeasonIndex::all().find(|s| !by_season.contains_key(s)) {
        return Err(PipelineError::MissingSeason(missing));
    }

    let seasons = by_season
        .iter()
        .map(|(season, path)| load_season_file(path, *season))
        .collect::<Result<Vec<_>>>()?;
    info!("loaded {} season files from {}", seasons.len(), dir.display());
    Ok(seasons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_preserves_headers_and_row_order() {
        let csv = "FULL NAME , TEAM,GP\nB Player,Bos,50\nA Player,Lal,60\n";
        let season = SeasonIndex::new(2).unwrap();
        let raw = load_season_from_reader(csv.as_bytes(), season, PathBuf::from("year_2.csv"))
            .expect("csv should parse");
        assert_eq!(raw.headers, vec!["FULL NAME", "TEAM", "GP"]);
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.cell(0, 0), "B Player");
        assert_eq!(raw.cell(1, 2), "60");
        assert_eq!(raw.cell(1, 7), "");
    }

    #[test]
    fn dir_requires_all_ten_seasons() {
        let dir = tempfile::tempdir().unwrap();
        for n in 1..=9 {
            fs::write(dir.path().join(format!("year_{n}.csv")), "FULL NAME\nA\n").unwrap();
        }
        fs::write(dir.path().join("readme.txt"), "ignored").unwrap();
        let err = load_season_dir(dir.path()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingSeason(s) if s.number() == 10));
    }

    #[test]
    fn dir_rejects_two_files_for_one_season() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("year_3.csv"), "FULL NAME\nA\n").unwrap();
        fs::write(dir.path().join("season_3.csv"), "FULL NAME\nB\n").unwrap();
        let err = load_season_dir(dir.path()).unwrap_err();
        match err {
            PipelineError::DuplicateSeason { season, first, second } => {
                assert_eq!(season.number(), 3);
                assert_ne!(first, second);
            }
            other => panic!("expected duplicate season, got {other:?}"),
        }
    }

    #[test]
    fn dir_loads_seasons_in_order() {
        let dir = tempfile::tempdir().unwrap();
        for n in (1..=10).rev() {
            fs::write(
                dir.path().join(format!("year_{n}.csv")),
                format!("FULL NAME,GP\nP{n},50\n"),
            )
            .unwrap();
        }
        let seasons = load_season_dir(dir.path()).expect("all seasons present");
        let order: Vec<u8> = seasons.iter().map(|s| s.season.number()).collect();
        assert_eq!(order, (1..=10).collect::<Vec<_>>());
        assert_eq!(seasons[4].cell(0, 0), "P5");
    }
}
