use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const NUM_SEASONS: usize = 10;

/// One of the ten tracked seasons, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SeasonIndex(u8);

impl SeasonIndex {
    pub const FIRST: SeasonIndex = SeasonIndex(1);
    pub const LAST: SeasonIndex = SeasonIndex(NUM_SEASONS as u8);

    pub fn new(n: u8) -> Option<Self> {
        if (1..=NUM_SEASONS as u8).contains(&n) {
            Some(Self(n))
        } else {
            None
        }
    }

    pub fn all() -> impl DoubleEndedIterator<Item = SeasonIndex> + ExactSizeIterator {
        (1..=NUM_SEASONS as u8).map(SeasonIndex)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based position for indexing per-season arrays.
    pub fn slot(self) -> usize {
        usize::from(self.0) - 1
    }

    /// Parses the trailing `_<n>` of a file stem, e.g. `year_3.csv` is season 3.
    pub fn from_file_name(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;
        let (_, suffix) = stem.rsplit_once('_')?;
        let n = suffix.trim().parse::<u8>().ok()?;
        Self::new(n)
    }

    /// Column name with this season's suffix, e.g. `full_name_3`.
    pub fn suffixed(self, column: &str) -> String {
        format!("{column}_{}", self.0)
    }
}

impl fmt::Display for SeasonIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for SeasonIndex {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("season index {value} outside 1..={NUM_SEASONS}"))
    }
}

impl From<SeasonIndex> for u8 {
    fn from(value: SeasonIndex) -> Self {
        value.0
    }
}
