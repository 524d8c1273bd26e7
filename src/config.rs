use std::env;
use std::path::PathBuf;

use crate::normalize::ELIGIBILITY_FLOOR;
use crate::rankings::RankingSizes;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub export_path: Option<PathBuf>,
    /// Player-seasons need strictly more games than this.
    pub eligibility_floor: u32,
    pub rankings: RankingSizes,
    /// Normalize seasons on the rayon pool instead of one after another.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            export_path: None,
            eligibility_floor: ELIGIBILITY_FLOOR,
            rankings: RankingSizes::default(),
            parallel: true,
        }
    }
}

impl Config {
    /// Defaults overridden by `.env.local`, `.env` and `HOOPS_*` variables.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");

        let defaults = Self::default();
        let data_dir = env::var("HOOPS_DATA_DIR")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let export_path = env::var("HOOPS_EXPORT_PATH")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .map(PathBuf::from);
        let eligibility_floor = env::var("HOOPS_MIN_GAMES")
            .ok()
            .and_then(|val| val.trim().parse::<u32>().ok())
            .unwrap_or(defaults.eligibility_floor);
        let improvement = env::var("HOOPS_TOP_IMPROVED")
            .ok()
            .and_then(|val| val.trim().parse::<usize>().ok())
            .unwrap_or(defaults.rankings.improvement)
            .max(1);
        let decline = env::var("HOOPS_TOP_DECLINE")
            .ok()
            .and_then(|val| val.trim().parse::<usize>().ok())
            .unwrap_or(defaults.rankings.decline)
            .max(1);
        let parallel = env::var("HOOPS_PARALLEL")
            .map(|val| !matches!(val.trim(), "0" | "false" | "no"))
            .unwrap_or(defaults.parallel);

        Self {
            data_dir,
            export_path,
            eligibility_floor,
            rankings: RankingSizes {
                improvement,
                decline,
            },
            parallel,
        }
    }
}
