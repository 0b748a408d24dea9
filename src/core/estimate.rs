use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Start of the current VED regime (first-year rate plus flat standard rate).
pub const MODERN_START: NaiveDate = ymd(2017, 4, 1);
/// Start of the CO2-banded regime.
pub const LEGACY_START: NaiveDate = ymd(2001, 3, 1);
/// Rates were uprated on this date.
pub const APRIL_2025: NaiveDate = ymd(2025, 4, 1);

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid regime boundary date"),
    }
}

/// VED regime a vehicle falls under, decided by its registration date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Registered on or after 1 April 2017
    Modern,
    /// Registered between 1 March 2001 and 31 March 2017
    Legacy,
    /// Registered before 1 March 2001 (engine size based)
    #[serde(rename = "pre_2001")]
    Pre2001,
    /// No usable registration date
    Unknown,
}

impl Regime {
    pub fn for_registration(registered: Option<NaiveDate>) -> Regime {
        match registered {
            None => Regime::Unknown,
            Some(date) if date >= MODERN_START => Regime::Modern,
            Some(date) if date >= LEGACY_START => Regime::Legacy,
            Some(_) => Regime::Pre2001,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::Modern => "modern",
            Regime::Legacy => "legacy",
            Regime::Pre2001 => "pre_2001",
            Regime::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Road tax (VED) estimate. All amounts are whole pounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RoadTaxEstimate {
    pub regime: Regime,
    pub band_code: Option<char>,
    pub band_label: Option<String>,
    /// Only set for the modern regime (or when it was assumed)
    pub first_year_rate: Option<u32>,
    pub annual_rate: Option<u32>,
    /// `annual_rate` plus any expensive car supplement
    pub total_annual: Option<u32>,
    pub expensive_car_supplement: Option<u32>,
    /// Caveats in the order they were decided
    pub notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn regime_boundaries() {
        assert_eq!(Regime::for_registration(None), Regime::Unknown);
        assert_eq!(Regime::for_registration(date(2017, 4, 1)), Regime::Modern);
        assert_eq!(Regime::for_registration(date(2017, 3, 31)), Regime::Legacy);
        assert_eq!(Regime::for_registration(date(2001, 3, 1)), Regime::Legacy);
        assert_eq!(Regime::for_registration(date(2001, 2, 28)), Regime::Pre2001);
        assert_eq!(Regime::for_registration(date(1985, 1, 1)), Regime::Pre2001);
    }

    #[test]
    fn regime_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Regime::Pre2001).unwrap(), "\"pre_2001\"");
        assert_eq!(serde_json::to_string(&Regime::Modern).unwrap(), "\"modern\"");
        assert_eq!(Regime::Unknown.to_string(), "unknown");
    }
}
