use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;
use rand::rngs::ThreadRng;

use hoops_trend::season::SeasonIndex;

const LEGACY_SEASONS: u8 = 5;
const TEAMS: [&str; 8] = ["ATL", "BOS", "CHI", "DEN", "LAL", "MIA", "NYK", "PHX"];
const POSITIONS: [&str; 5] = ["G", "G-F", "F", "F-C", "C"];

#[derive(Debug, Clone)]
struct SynthPlayer {
    name: String,
    debut: u8,
    career_len: u8,
    debut_age: u32,
    skill: f64,
    peak_age: u32,
    team: usize,
    position: usize,
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    let players = std::env::args()
        .nth(2)
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(300)
        .max(1);

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("create output dir {}", out_dir.display()))?;

    let mut rng = rand::thread_rng();
    let pool: Vec<SynthPlayer> = (0..players).map(|idx| seed_player(&mut rng, idx)).collect();

    for season in SeasonIndex::all() {
        let path = out_dir.join(format!("year_{}.csv", season.number()));
        let rows = write_season(&path, season, &pool, &mut rng)?;
        println!("{}: {rows} rows", path.display());
    }
    Ok(())
}

fn seed_player(rng: &mut ThreadRng, idx: usize) -> SynthPlayer {
    SynthPlayer {
        name: format!("Player {:03}", idx + 1),
        debut: rng.gen_range(1..=10),
        career_len: rng.gen_range(1..=10),
        debut_age: rng.gen_range(19..=24),
        skill: rng.gen_range(0.6..1.4),
        peak_age: rng.gen_range(25..=29),
        team: rng.gen_range(0..TEAMS.len()),
        position: rng.gen_range(0..POSITIONS.len()),
    }
}

fn write_season(
    path: &Path,
    season: SeasonIndex,
    pool: &[SynthPlayer],
    rng: &mut ThreadRng,
) -> Result<usize> {
    let legacy = season.number() <= LEGACY_SEASONS;
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    let mut header = vec![
        "FULL NAME", "TEAM", "POS", "AGE", "GP", "MPG", "3P%", "3PA", "2P%", "2PA", "FT%", "FTA",
        "RPG", "BPG", "APG", "SPG",
    ];
    header.push(if legacy { "TOr" } else { "TOPG" });
    writer.write_record(&header)?;

    let mut rows = 0usize;
    for player in pool {
        let n = season.number();
        if n < player.debut || n >= player.debut.saturating_add(player.career_len) {
            continue;
        }
        let age = player.debut_age + u32::from(n - player.debut);
        let years_off_peak = (age as f64 - player.peak_age as f64).abs();
        let form = (player.skill * (1.0 - 0.06 * years_off_peak)).max(0.2);

        // Roughly one in twelve players gets traded mid-season.
        let stints = if rng.gen_bool(1.0 / 12.0) { 2 } else { 1 };
        let total_gp: u32 = rng.gen_range(20..=82);
        let mut remaining = total_gp;
        for stint in 0..stints {
            let gp = if stint + 1 == stints {
                remaining
            } else {
                rng.gen_range(1..remaining.max(2))
            };
            remaining = remaining.saturating_sub(gp);
            let team = TEAMS[(player.team + stint) % TEAMS.len()];

            let three_att = 5.0 * form * rng.gen_range(0.7..1.3);
            let two_att = 9.0 * form * rng.gen_range(0.7..1.3);
            let ft_att = 4.0 * form * rng.gen_range(0.7..1.3);
            let turnovers = if legacy {
                rng.gen_range(8.0..16.0)
            } else {
                2.0 * form * rng.gen_range(0.7..1.3)
            };
            let record = vec![
                player.name.clone(),
                team.to_string(),
                POSITIONS[player.position].to_string(),
                age.to_string(),
                gp.to_string(),
                format!("{:.1}", 30.0 * form.min(1.2)),
                format!("{:.3}", rng.gen_range(0.28..0.42)),
                format!("{three_att:.1}"),
                format!("{:.3}", rng.gen_range(0.44..0.60)),
                format!("{two_att:.1}"),
                format!("{:.3}", rng.gen_range(0.65..0.92)),
                format!("{ft_att:.1}"),
                format!("{:.1}", 6.0 * form * rng.gen_range(0.7..1.3)),
                format!("{:.1}", 0.8 * form * rng.gen_range(0.5..1.5)),
                format!("{:.1}", 3.5 * form * rng.gen_range(0.7..1.3)),
                format!("{:.1}", 1.0 * form * rng.gen_range(0.7..1.3)),
                format!("{turnovers:.1}"),
            ];
            writer.write_record(&record)?;
            rows += 1;
        }
    }
    writer.flush()?;
    Ok(rows)
}
