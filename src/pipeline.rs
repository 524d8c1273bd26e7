use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::merge::{LongitudinalTable, merge_seasons};
use crate::normalize::{NormalizedSeason, normalize_season};
use crate::rankings::{TrendReport, build_report};
use crate::rating::{PlayerRatingRow, rate_players};
use crate::season_loader::{RawSeason, load_season_dir};
use crate::trend::{DeclineRow, ImprovementRow, decline_ages, improvement_ratings};

/// Every table the pipeline derives, each produced once and never mutated after.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    #[serde(skip)]
    pub seasons: Vec<NormalizedSeason>,
    #[serde(skip)]
    pub longitudinal: LongitudinalTable,
    pub ratings: Vec<PlayerRatingRow>,
    pub improvement: Vec<ImprovementRow>,
    pub decline: Vec<DeclineRow>,
    pub report: TrendReport,
}

pub fn normalize_all(raw: &[RawSeason], config: &Config) -> Result<Vec<NormalizedSeason>> {
    let floor = config.eligibility_floor;
    if config.parallel {
        // Collecting an indexed parallel iterator keeps season order.
        raw.par_iter()
            .map(|season| normalize_season(season, floor))
            .collect()
    } else {
        raw.iter()
            .map(|season| normalize_season(season, floor))
            .collect()
    }
}

/// Normalize, merge, rate and trend seasons that are already loaded.
pub fn run_seasons(raw: &[RawSeason], config: &Config) -> Result<PipelineOutput> {
    let seasons = normalize_all(raw, config)?;
    let longitudinal = merge_seasons(&seasons)?;
    info!(
        seasons = seasons.len(),
        players = longitudinal.rows.len(),
        "merged longitudinal table"
    );

    let ratings = rate_players(&longitudinal);
    let improvement = improvement_ratings(&ratings);
    let decline = decline_ages(&longitudinal, &ratings);
    info!(
        rated = ratings.len(),
        undefined_improvement = improvement
            .iter()
            .filter(|r| r.improvement_rating.is_none())
            .count(),
        declining = decline.len(),
        "computed trends"
    );

    let report = build_report(&improvement, &decline, config.rankings);
    Ok(PipelineOutput {
        seasons,
        longitudinal,
        ratings,
        improvement,
        decline,
        report,
    })
}

pub fn run(config: &Config) -> Result<PipelineOutput> {
    let raw = load_season_dir(&config.data_dir)?;
    run_seasons(&raw, config)
}
