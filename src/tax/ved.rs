//! Vehicle Excise Duty (road tax) estimate for cars.
//!
//! The estimate never fails. Missing or unusable data leaves the affected
//! fields empty and adds a note saying what was assumed.

use crate::core::{
    find_band, Band, FirstYearRate, Regime, RoadTaxEstimate, VehicleTaxInput, APRIL_2025,
    FIRST_YEAR_BANDS, LEGACY_BANDS,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Flat standard rate for cars registered from 1 April 2017 (from 1 April 2025).
pub const STANDARD_RATE_2025: u32 = 195;
pub const EXPENSIVE_CAR_THRESHOLD: Decimal = dec!(40000);
pub const EXPENSIVE_CAR_SUPPLEMENT: u32 = 410;

pub const SUPPLEMENT_NOTE: &str = "List price is £40,000 or more, so the expensive car \
    supplement of £410 a year applies for five years from the second tax payment.";
pub const DIESEL_RDE2_NOTE: &str = "Diesel cars that do not meet the RDE2 standard pay the \
    first-year rate of the next band up. RDE2 status is not known, so the band has not been adjusted.";
pub const NO_DATE_OR_CO2_NOTE: &str = "Registration date and CO2 emissions are both missing, \
    so only the standard annual rate is shown.";
pub const ASSUMED_MODERN_NOTE: &str = "Registration date is missing, so the rules for cars \
    registered from 1 April 2017 have been assumed from the CO2 figure.";
pub const CO2_MISSING_NOTE: &str =
    "CO2 emissions are missing, so the first-year rate cannot be worked out.";
pub const NO_BAND_NOTE: &str = "The CO2 figure could not be matched to a VED band.";
pub const UPRATE_NOTE: &str = "First-year rate uses the VED rates in force from 1 April 2025.";
pub const REFERENCE_ONLY_NOTE: &str = "Registered before 1 April 2025, so the first-year rate \
    has already been paid at the rates of the time. The figure is for reference only.";
pub const LEGACY_CO2_REQUIRED_NOTE: &str = "CO2 emissions are required to work out the rate \
    for cars registered between 1 March 2001 and 31 March 2017.";
pub const LEGACY_NO_SUPPLEMENT_NOTE: &str = "The expensive car supplement only applies to cars \
    registered from 1 April 2017, so it has not been added.";
pub const PRE_2001_ENGINE_SIZE_NOTE: &str = "Cars registered before 1 March 2001 are taxed on \
    engine size rather than CO2 emissions.";
pub const PRE_2001_TARIFF_NOTE: &str = "Engine size of 1549cc or less pays the lower engine size \
    rate and over 1549cc pays the higher rate. Check the current tariff on GOV.UK.";

/// Estimate road tax for a car.
pub fn calculate_vehicle_tax(input: &VehicleTaxInput) -> RoadTaxEstimate {
    let registered = input.registered_on();
    let regime = Regime::for_registration(registered);
    let mut notes: Vec<String> = Vec::new();

    let supplement = if is_expensive(input.list_price) {
        notes.push(SUPPLEMENT_NOTE.to_string());
        Some(EXPENSIVE_CAR_SUPPLEMENT)
    } else {
        None
    };

    if input.is_diesel() {
        notes.push(DIESEL_RDE2_NOTE.to_string());
    }

    log::debug!(
        "VED regime {} for registration {:?}, co2 {:?}",
        regime,
        registered,
        input.co2
    );

    match regime {
        Regime::Unknown => match input.co2 {
            None => {
                notes.push(NO_DATE_OR_CO2_NOTE.to_string());
                RoadTaxEstimate {
                    regime,
                    band_code: None,
                    band_label: None,
                    first_year_rate: None,
                    annual_rate: Some(STANDARD_RATE_2025),
                    total_annual: Some(with_supplement(STANDARD_RATE_2025, supplement)),
                    expensive_car_supplement: supplement,
                    notes,
                }
            }
            Some(co2) => {
                let band = find_band(&FIRST_YEAR_BANDS, co2);
                if band.is_none() {
                    notes.push(NO_BAND_NOTE.to_string());
                }
                notes.push(ASSUMED_MODERN_NOTE.to_string());
                modern_estimate(regime, band, supplement, notes)
            }
        },
        Regime::Modern => {
            let band = input.co2.and_then(|co2| find_band(&FIRST_YEAR_BANDS, co2));
            match (input.co2, band) {
                (None, _) => notes.push(CO2_MISSING_NOTE.to_string()),
                (Some(_), None) => notes.push(NO_BAND_NOTE.to_string()),
                (Some(_), Some(_)) => notes.push(UPRATE_NOTE.to_string()),
            }
            if registered.is_some_and(|date| date < APRIL_2025) {
                notes.push(REFERENCE_ONLY_NOTE.to_string());
            }
            modern_estimate(regime, band, supplement, notes)
        }
        Regime::Legacy => {
            let band = input.co2.and_then(|co2| find_band(&LEGACY_BANDS, co2));
            match (input.co2, band) {
                (None, _) => notes.push(LEGACY_CO2_REQUIRED_NOTE.to_string()),
                (Some(_), None) => notes.push(NO_BAND_NOTE.to_string()),
                (Some(_), Some(_)) => {}
            }
            // The supplement is a post-April 2017 rule, whatever the list price.
            if supplement.is_some() {
                notes.push(LEGACY_NO_SUPPLEMENT_NOTE.to_string());
            }
            let annual_rate = band.map(|b| b.rate.0);
            RoadTaxEstimate {
                regime,
                band_code: band.map(|b| b.code),
                band_label: band.map(|b| b.label.to_string()),
                first_year_rate: None,
                annual_rate,
                total_annual: annual_rate,
                expensive_car_supplement: None,
                notes,
            }
        }
        Regime::Pre2001 => {
            notes.push(PRE_2001_ENGINE_SIZE_NOTE.to_string());
            notes.push(PRE_2001_TARIFF_NOTE.to_string());
            RoadTaxEstimate {
                regime,
                band_code: None,
                band_label: None,
                first_year_rate: None,
                annual_rate: None,
                total_annual: None,
                expensive_car_supplement: None,
                notes,
            }
        }
    }
}

fn is_expensive(list_price: Option<Decimal>) -> bool {
    list_price.is_some_and(|price| price >= EXPENSIVE_CAR_THRESHOLD)
}

fn with_supplement(annual_rate: u32, supplement: Option<u32>) -> u32 {
    annual_rate + supplement.unwrap_or(0)
}

fn modern_estimate(
    regime: Regime,
    band: Option<&Band<FirstYearRate>>,
    supplement: Option<u32>,
    notes: Vec<String>,
) -> RoadTaxEstimate {
    if let Some(band) = band {
        log::debug!("First-year band {} ({}) at {}", band.code, band.label, band.rate);
    }
    RoadTaxEstimate {
        regime,
        band_code: band.map(|b| b.code),
        band_label: band.map(|b| b.label.to_string()),
        first_year_rate: band.map(|b| b.rate.0),
        annual_rate: Some(STANDARD_RATE_2025),
        total_annual: Some(with_supplement(STANDARD_RATE_2025, supplement)),
        expensive_car_supplement: supplement,
        notes,
    }
}
