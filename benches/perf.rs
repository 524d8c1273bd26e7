use std::path::PathBuf;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use hoops_trend::config::Config;
use hoops_trend::merge::merge_seasons;
use hoops_trend::normalize::{ELIGIBILITY_FLOOR, normalize_season};
use hoops_trend::pipeline::{normalize_all, run_seasons};
use hoops_trend::rating::rate_players;
use hoops_trend::season::SeasonIndex;
use hoops_trend::season_loader::{RawSeason, load_season_from_reader};

const PLAYERS: usize = 450;

fn sample_seasons() -> Vec<RawSeason> {
    SeasonIndex::all()
        .map(|season| {
            let n = season.number() as usize;
            let legacy = n <= 5;
            let mut csv = String::from(
                "FULL NAME,TEAM,POS,AGE,GP,MPG,3P%,3PA,2P%,2PA,FT%,FTA,RPG,BPG,APG,SPG,",
            );
            csv.push_str(if legacy { "TOr\n" } else { "TOPG\n" });
            for idx in 0..PLAYERS {
                // Each player appears for a rolling window of seasons.
                if (idx + n) % 7 == 0 {
                    continue;
                }
                let form = 0.6 + ((idx * 37 + n * 11) % 80) as f64 / 100.0;
                let gp = 30 + (idx * 13 + n * 5) % 53;
                let turnovers = if legacy { 12.0 } else { 2.0 * form };
                csv.push_str(&format!(
                    "Player {idx},T{},G,{},{gp},30,0.36,{:.1},0.52,{:.1},0.78,{:.1},{:.1},{:.1},{:.1},{:.1},{:.1}\n",
                    idx % 30,
                    20 + (idx % 12) + n,
                    5.0 * form,
                    9.0 * form,
                    4.0 * form,
                    6.0 * form,
                    0.8 * form,
                    3.5 * form,
                    1.0 * form,
                    turnovers,
                ));
                // A slice of the league gets traded mid-season.
                if idx % 25 == 0 {
                    csv.push_str(&format!(
                        "Player {idx},T{},G,{},20,22,0.33,3.0,0.50,6.0,0.70,2.0,4.0,0.5,2.0,0.8,{:.1}\n",
                        (idx + 1) % 30,
                        20 + (idx % 12) + n,
                        if legacy { 11.0 } else { 1.5 },
                    ));
                }
            }
            load_season_from_reader(csv.as_bytes(), season, PathBuf::from(format!("year_{n}.csv")))
                .expect("valid bench csv")
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let raw = sample_seasons();
    c.bench_function("normalize_season", |b| {
        b.iter(|| {
            let out = normalize_season(black_box(&raw[0]), ELIGIBILITY_FLOOR).unwrap();
            black_box(out.rows.len());
        })
    });
}

fn bench_merge_and_rate(c: &mut Criterion) {
    let raw = sample_seasons();
    let config = Config::default();
    let seasons = normalize_all(&raw, &config).unwrap();
    c.bench_function("merge_and_rate", |b| {
        b.iter(|| {
            let merged = merge_seasons(black_box(&seasons)).unwrap();
            let ratings = rate_players(&merged);
            black_box(ratings.len());
        })
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let raw = sample_seasons();
    let parallel = Config::default();
    let sequential = Config {
        parallel: false,
        ..Config::default()
    };
    c.bench_function("pipeline_parallel", |b| {
        b.iter(|| {
            let out = run_seasons(black_box(&raw), &parallel).unwrap();
            black_box(out.decline.len());
        })
    });
    c.bench_function("pipeline_sequential", |b| {
        b.iter(|| {
            let out = run_seasons(black_box(&raw), &sequential).unwrap();
            black_box(out.decline.len());
        })
    });
}

criterion_group!(benches, bench_normalize, bench_merge_and_rate, bench_full_pipeline);
criterion_main!(benches);
