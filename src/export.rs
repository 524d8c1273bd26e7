use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::merge::LongitudinalTable;
use crate::normalize::COLUMN_NAMES;
use crate::pipeline::PipelineOutput;
use crate::season::SeasonIndex;
use crate::trend::{DeclineRow, ImprovementRow};

pub struct ExportReport {
    pub players: usize,
    pub improvement_rows: usize,
    pub decline_rows: usize,
}

pub fn write_workbook(path: &Path, output: &PipelineOutput) -> Result<ExportReport> {
    let longitudinal_rows = longitudinal_rows(&output.longitudinal);

    let mut ratings_rows = vec![
        std::iter::once("Name".to_string())
            .chain(SeasonIndex::all().map(|s| s.suffixed("rating")))
            .collect::<Vec<_>>(),
    ];
    for player in &output.ratings {
        let mut row = vec![player.name.clone()];
        row.extend(player.ratings.iter().map(|r| format!("{r:.2}")));
        ratings_rows.push(row);
    }

    let mut improvement_rows = vec![vec!["Name".to_string(), "Improvement Rating".to_string()]];
    improvement_rows.extend(output.improvement.iter().map(improvement_row));

    let mut decline_rows = vec![vec![
        "Name".to_string(),
        "Decline Age".to_string(),
        "Season".to_string(),
    ]];
    decline_rows.extend(output.decline.iter().map(decline_row));

    let mut ranking_rows = vec![vec![
        "List".to_string(),
        "Rank".to_string(),
        "Name".to_string(),
        "Value".to_string(),
    ]];
    let report = &output.report;
    for (label, rows) in [
        ("Most Improved", &report.most_improved),
        ("Least Improved", &report.least_improved),
    ] {
        for (rank, row) in rows.iter().enumerate() {
            let mut cells = improvement_row(row);
            cells.insert(0, (rank + 1).to_string());
            cells.insert(0, label.to_string());
            ranking_rows.push(cells);
        }
    }
    for (label, rows) in [
        ("Youngest Decline", &report.youngest_decliners),
        ("Oldest Decline", &report.oldest_decliners),
    ] {
        for (rank, row) in rows.iter().enumerate() {
            ranking_rows.push(vec![
                label.to_string(),
                (rank + 1).to_string(),
                row.name.clone(),
                row.decline_age.to_string(),
            ]);
        }
    }

    let summary = &report.decline_summary;
    let mut summary_rows = vec![
        vec!["Generated".to_string(), chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()],
        vec!["Players".to_string(), output.ratings.len().to_string()],
        vec!["Declining Players".to_string(), summary.players.to_string()],
        vec![
            "Average Decline Age".to_string(),
            summary
                .average_age
                .map(|v| format!("{v:.2}"))
                .unwrap_or_else(|| "-".to_string()),
        ],
        vec!["Decline Age".to_string(), "Players".to_string()],
    ];
    for (age, count) in &summary.age_counts {
        summary_rows.push(vec![age.to_string(), count.to_string()]);
    }

    let mut workbook = Workbook::new();
    for (name, rows) in [
        ("Longitudinal", &longitudinal_rows),
        ("Ratings", &ratings_rows),
        ("Improvement", &improvement_rows),
        ("Decline", &decline_rows),
        ("Rankings", &ranking_rows),
        ("Summary", &summary_rows),
    ] {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name)?;
        write_rows(sheet, rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        players: output.ratings.len(),
        improvement_rows: output.improvement.len(),
        decline_rows: output.decline.len(),
    })
}

pub fn to_json(output: &PipelineOutput) -> Result<String> {
    serde_json::to_string_pretty(output).context("serialize pipeline output")
}

/// Header plus one row per player; absent seasons are left blank.
fn longitudinal_rows(table: &LongitudinalTable) -> Vec<Vec<String>> {
    let mut rows = vec![table.column_names()];
    for row in &table.rows {
        let mut cells = Vec::with_capacity(table.seasons.len() * COLUMN_NAMES.len());
        for season in &table.seasons {
            match row.season(*season) {
                Some(played) => cells.extend(played.cells()),
                None => cells.extend(std::iter::repeat_n(String::new(), COLUMN_NAMES.len())),
            }
        }
        rows.push(cells);
    }
    rows
}

fn improvement_row(row: &ImprovementRow) -> Vec<String> {
    vec![
        row.name.clone(),
        row.improvement_rating
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "-".to_string()),
    ]
}

fn decline_row(row: &DeclineRow) -> Vec<String> {
    vec![
        row.name.clone(),
        row.decline_age.to_string(),
        row.season.to_string(),
    ]
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
