use std::collections::BTreeMap;

use serde::Serialize;

use crate::trend::{DeclineRow, ImprovementRow};

#[derive(Debug, Clone, Copy)]
pub struct RankingSizes {
    pub improvement: usize,
    pub decline: usize,
}

impl Default for RankingSizes {
    fn default() -> Self {
        Self {
            improvement: 10,
            decline: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclineSummary {
    pub players: usize,
    pub average_age: Option<f64>,
    /// Number of players first declining at each age.
    pub age_counts: BTreeMap<u32, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    pub most_improved: Vec<ImprovementRow>,
    pub least_improved: Vec<ImprovementRow>,
    pub youngest_decliners: Vec<DeclineRow>,
    pub oldest_decliners: Vec<DeclineRow>,
    pub decline_summary: DeclineSummary,
}

fn rated(rows: &[ImprovementRow]) -> Vec<(f64, &ImprovementRow)> {
    rows.iter()
        .filter_map(|r| r.improvement_rating.map(|v| (v, r)))
        .collect()
}

/// Highest improvement ratings first. Ties keep table order.
pub fn most_improved(rows: &[ImprovementRow], n: usize) -> Vec<ImprovementRow> {
    let mut scored = rated(rows);
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(n).map(|(_, r)| r.clone()).collect()
}

pub fn least_improved(rows: &[ImprovementRow], n: usize) -> Vec<ImprovementRow> {
    let mut scored = rated(rows);
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    scored.into_iter().take(n).map(|(_, r)| r.clone()).collect()
}

pub fn youngest_decliners(rows: &[DeclineRow], n: usize) -> Vec<DeclineRow> {
    let mut sorted: Vec<&DeclineRow> = rows.iter().collect();
    sorted.sort_by_key(|r| r.decline_age);
    sorted.into_iter().take(n).cloned().collect()
}

pub fn oldest_decliners(rows: &[DeclineRow], n: usize) -> Vec<DeclineRow> {
    let mut sorted: Vec<&DeclineRow> = rows.iter().collect();
    sorted.sort_by_key(|r| std::cmp::Reverse(r.decline_age));
    sorted.into_iter().take(n).cloned().collect()
}

pub fn decline_summary(rows: &[DeclineRow]) -> DeclineSummary {
    let mut age_counts = BTreeMap::new();
    for row in rows {
        *age_counts.entry(row.decline_age).or_insert(0usize) += 1;
    }
    let average_age = if rows.is_empty() {
        None
    } else {
        let total: u64 = rows.iter().map(|r| u64::from(r.decline_age)).sum();
        Some(total as f64 / rows.len() as f64)
    };
    DeclineSummary {
        players: rows.len(),
        average_age,
        age_counts,
    }
}

pub fn build_report(
    improvement: &[ImprovementRow],
    decline: &[DeclineRow],
    sizes: RankingSizes,
) -> TrendReport {
    TrendReport {
        most_improved: most_improved(improvement, sizes.improvement),
        least_improved: least_improved(improvement, sizes.improvement),
        youngest_decliners: youngest_decliners(decline, sizes.decline),
        oldest_decliners: oldest_decliners(decline, sizes.decline),
        decline_summary: decline_summary(decline),
    }
}
