/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Outcome of reading one raw numeric cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Value(f64),
    Missing,
    Invalid,
}

impl Cell {
    pub fn value(self) -> Option<f64> {
        match self {
            Cell::Value(v) => Some(v),
            Cell::Missing | Cell::Invalid => None,
        }
    }
}

pub fn parse_cell(raw: &str) -> Cell {
    let s = raw.trim();
    if s.is_empty() || s == "-" || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("nan") {
        return Cell::Missing;
    }
    // Percent columns sometimes arrive with a trailing sign.
    let s = s.trim_end_matches('%').replace(',', "");
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Value(v),
        Ok(_) => Cell::Missing,
        Err(_) => Cell::Invalid,
    }
}

/// Nearest whole number for count-like columns (age, games played).
pub fn to_count(value: f64) -> u32 {
    value.round().max(0.0) as u32
}
