use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Rate due in the first year for a car registered from 1 April 2017, in whole pounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstYearRate(pub u32);

/// Annual rate for a car registered between 1 March 2001 and 31 March 2017, in whole pounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnualRate(pub u32);

impl fmt::Display for FirstYearRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "£{}", self.0)
    }
}

impl fmt::Display for AnnualRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "£{}", self.0)
    }
}

/// A CO2 emissions band, in whole grams per kilometre.
///
/// `max` is inclusive. The top band of each table has no `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band<R> {
    pub code: char,
    pub min: u32,
    pub max: Option<u32>,
    pub rate: R,
    pub label: &'static str,
}

impl<R> Band<R> {
    pub fn contains(&self, grams: u32) -> bool {
        grams >= self.min && self.max.is_none_or(|max| grams <= max)
    }
}

const fn band<R>(code: char, min: u32, max: Option<u32>, rate: R, label: &'static str) -> Band<R> {
    Band {
        code,
        min,
        max,
        rate,
        label,
    }
}

/// First-year rates for cars registered from 1 April 2017 (rates from 1 April 2025).
pub static FIRST_YEAR_BANDS: [Band<FirstYearRate>; 13] = [
    band('A', 0, Some(0), FirstYearRate(10), "0 g/km"),
    band('B', 1, Some(50), FirstYearRate(100), "1-50 g/km"),
    band('C', 51, Some(75), FirstYearRate(130), "51-75 g/km"),
    band('D', 76, Some(90), FirstYearRate(270), "76-90 g/km"),
    band('E', 91, Some(100), FirstYearRate(350), "91-100 g/km"),
    band('F', 101, Some(110), FirstYearRate(390), "101-110 g/km"),
    band('G', 111, Some(130), FirstYearRate(440), "111-130 g/km"),
    band('H', 131, Some(150), FirstYearRate(540), "131-150 g/km"),
    band('I', 151, Some(170), FirstYearRate(1360), "151-170 g/km"),
    band('J', 171, Some(190), FirstYearRate(2190), "171-190 g/km"),
    band('K', 191, Some(225), FirstYearRate(3300), "191-225 g/km"),
    band('L', 226, Some(255), FirstYearRate(4680), "226-255 g/km"),
    band('M', 256, None, FirstYearRate(5490), "Over 255 g/km"),
];

/// Annual rates for cars registered between 1 March 2001 and 31 March 2017.
pub static LEGACY_BANDS: [Band<AnnualRate>; 13] = [
    band('A', 0, Some(100), AnnualRate(20), "Up to 100 g/km"),
    band('B', 101, Some(110), AnnualRate(20), "101-110 g/km"),
    band('C', 111, Some(120), AnnualRate(35), "111-120 g/km"),
    band('D', 121, Some(130), AnnualRate(165), "121-130 g/km"),
    band('E', 131, Some(140), AnnualRate(195), "131-140 g/km"),
    band('F', 141, Some(150), AnnualRate(215), "141-150 g/km"),
    band('G', 151, Some(165), AnnualRate(265), "151-165 g/km"),
    band('H', 166, Some(175), AnnualRate(315), "166-175 g/km"),
    band('I', 176, Some(185), AnnualRate(345), "176-185 g/km"),
    band('J', 186, Some(200), AnnualRate(395), "186-200 g/km"),
    band('K', 201, Some(225), AnnualRate(430), "201-225 g/km"),
    band('L', 226, Some(255), AnnualRate(735), "226-255 g/km"),
    band('M', 256, None, AnnualRate(760), "Over 255 g/km"),
];

/// Find the first band containing the CO2 figure.
///
/// Fractional figures are rounded to the nearest gram first so that values
/// between two integer band edges still land in a band. Negative figures
/// match nothing.
pub fn find_band<R>(table: &[Band<R>], co2: Decimal) -> Option<&Band<R>> {
    let grams = whole_grams(co2)?;
    table.iter().find(|band| band.contains(grams))
}

fn whole_grams(co2: Decimal) -> Option<u32> {
    if co2.is_sign_negative() && !co2.is_zero() {
        return None;
    }
    let rounded = co2.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    // anything beyond u32 is comfortably in the open top band
    Some(rounded.to_u32().unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn code<R>(table: &[Band<R>], co2: Decimal) -> Option<char> {
        find_band(table, co2).map(|b| b.code)
    }

    fn assert_contiguous<R>(table: &[Band<R>]) {
        assert_eq!(table[0].min, 0);
        for pair in table.windows(2) {
            let max = pair[0].max.expect("only the last band is open");
            assert_eq!(pair[1].min, max + 1, "gap after band {}", pair[0].code);
        }
        assert!(table[table.len() - 1].max.is_none());
    }

    fn assert_single_match<R>(table: &[Band<R>]) {
        for grams in 0..=400u32 {
            let matches = table.iter().filter(|b| b.contains(grams)).count();
            assert_eq!(matches, 1, "{grams} g/km matched {matches} bands");
        }
    }

    #[test]
    fn tables_are_contiguous_and_ordered() {
        assert_contiguous(&FIRST_YEAR_BANDS);
        assert_contiguous(&LEGACY_BANDS);
    }

    #[test]
    fn every_gram_maps_to_exactly_one_band() {
        assert_single_match(&FIRST_YEAR_BANDS);
        assert_single_match(&LEGACY_BANDS);
    }

    #[test]
    fn first_year_band_edges() {
        assert_eq!(code(&FIRST_YEAR_BANDS, dec!(0)), Some('A'));
        assert_eq!(code(&FIRST_YEAR_BANDS, dec!(1)), Some('B'));
        assert_eq!(code(&FIRST_YEAR_BANDS, dec!(50)), Some('B'));
        assert_eq!(code(&FIRST_YEAR_BANDS, dec!(75)), Some('C'));
        assert_eq!(code(&FIRST_YEAR_BANDS, dec!(76)), Some('D'));
        assert_eq!(code(&FIRST_YEAR_BANDS, dec!(255)), Some('L'));
        assert_eq!(code(&FIRST_YEAR_BANDS, dec!(256)), Some('M'));
        assert_eq!(code(&FIRST_YEAR_BANDS, dec!(9999)), Some('M'));
    }

    #[test]
    fn legacy_band_edges() {
        assert_eq!(code(&LEGACY_BANDS, dec!(0)), Some('A'));
        assert_eq!(code(&LEGACY_BANDS, dec!(100)), Some('A'));
        assert_eq!(code(&LEGACY_BANDS, dec!(101)), Some('B'));
        assert_eq!(code(&LEGACY_BANDS, dec!(125)), Some('D'));
        assert_eq!(code(&LEGACY_BANDS, dec!(165)), Some('G'));
        assert_eq!(code(&LEGACY_BANDS, dec!(166)), Some('H'));
        assert_eq!(code(&LEGACY_BANDS, dec!(300)), Some('M'));
    }

    #[test]
    fn fractional_co2_rounds_to_nearest_gram() {
        assert_eq!(code(&FIRST_YEAR_BANDS, dec!(50.4)), Some('B'));
        assert_eq!(code(&FIRST_YEAR_BANDS, dec!(50.5)), Some('C'));
        assert_eq!(code(&LEGACY_BANDS, dec!(100.49)), Some('A'));
    }

    #[test]
    fn negative_co2_has_no_band() {
        assert_eq!(code(&FIRST_YEAR_BANDS, dec!(-1)), None);
        assert_eq!(code(&LEGACY_BANDS, dec!(-0.1)), None);
    }

    #[test]
    fn huge_co2_is_top_band() {
        assert_eq!(code(&LEGACY_BANDS, dec!(99999999999)), Some('M'));
    }

    #[test]
    fn rates_match_tables() {
        assert_eq!(
            find_band(&FIRST_YEAR_BANDS, dec!(75)).map(|b| b.rate),
            Some(FirstYearRate(130))
        );
        assert_eq!(
            find_band(&FIRST_YEAR_BANDS, dec!(256)).map(|b| b.rate),
            Some(FirstYearRate(5490))
        );
        assert_eq!(find_band(&LEGACY_BANDS, dec!(125)).map(|b| b.rate), Some(AnnualRate(165)));
        assert_eq!(find_band(&LEGACY_BANDS, dec!(256)).map(|b| b.rate), Some(AnnualRate(760)));
    }

    #[test]
    fn rates_display_in_pounds() {
        assert_eq!(FIRST_YEAR_BANDS[0].rate.to_string(), "£10");
        assert_eq!(LEGACY_BANDS[12].rate.to_string(), "£760");
    }
}
