//! Fallback ULEZ / clean air zone compliance estimate.
//!
//! Used when live scheme data cannot be fetched. The Euro stage is taken
//! from the vehicle's Euro status when it has one, otherwise inferred from
//! the registration year.

use crate::core::{AirQualityResult, EmissionsZoneInput, EuroStage, Scheme, ZoneStatus};
use chrono::Datelike;
use regex::Regex;
use std::sync::LazyLock;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid euro status pattern"));

/// (first registration year, stage) steps, newest first.
const DIESEL_STAGES: [(i32, u8); 4] = [(2015, 6), (2011, 5), (2006, 4), (2000, 3)];
const OTHER_STAGES: [(i32, u8); 4] = [(2014, 6), (2009, 5), (2005, 4), (2000, 3)];

pub const REQUIRED_DIESEL: EuroStage = EuroStage(6);
pub const REQUIRED_OTHER: EuroStage = EuroStage(4);

/// Estimated result for both schemes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneAssessment {
    pub ulez: AirQualityResult,
    pub caz: AirQualityResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StageSource {
    EuroStatus,
    RegistrationYear(i32),
}

pub fn assess_emissions_zones(input: &EmissionsZoneInput) -> ZoneAssessment {
    ZoneAssessment {
        ulez: assess_scheme(Scheme::Ulez, input),
        caz: assess_scheme(Scheme::Caz, input),
    }
}

fn assess_scheme(scheme: Scheme, input: &EmissionsZoneInput) -> AirQualityResult {
    if input.is_zero_emission() {
        return result(
            scheme,
            ZoneStatus::Compliant,
            format!("Zero emission vehicles (electric or hydrogen) are exempt from {scheme} charges."),
        );
    }

    let diesel = input.is_diesel();
    let Some((stage, source)) = derive_stage(input, diesel) else {
        return result(
            scheme,
            ZoneStatus::Unknown,
            format!(
                "Euro emissions standard could not be worked out from the Euro status or \
                 registration date. Check {scheme} compliance manually."
            ),
        );
    };

    let (required, fuel) = if diesel {
        (REQUIRED_DIESEL, "diesel")
    } else {
        (REQUIRED_OTHER, "petrol and other")
    };
    let derived = match source {
        StageSource::EuroStatus => format!("{stage} (from Euro status)"),
        StageSource::RegistrationYear(year) => format!("{stage} (estimated from {year} registration)"),
    };
    log::debug!("{scheme}: {derived}, {required} required");

    if stage >= required {
        result(
            scheme,
            ZoneStatus::Compliant,
            format!("{derived} meets the {required} standard {scheme} requires for {fuel} vehicles."),
        )
    } else {
        result(
            scheme,
            ZoneStatus::Chargeable,
            format!(
                "{derived} is below the {required} standard {scheme} requires for {fuel} vehicles, \
                 so a daily charge is likely."
            ),
        )
    }
}

fn result(scheme: Scheme, status: ZoneStatus, notes: String) -> AirQualityResult {
    AirQualityResult {
        scheme: scheme.name().to_string(),
        status,
        notes,
        reference_url: Some(scheme.reference_url().to_string()),
    }
}

fn derive_stage(input: &EmissionsZoneInput, diesel: bool) -> Option<(EuroStage, StageSource)> {
    if let Some(stage) = input.euro_status.as_deref().and_then(parse_euro_status) {
        return Some((stage, StageSource::EuroStatus));
    }
    let year = input.registered_on()?.year();
    infer_stage(year, diesel).map(|stage| (stage, StageSource::RegistrationYear(year)))
}

/// First number in a Euro status string, e.g. "Euro 6d" is stage 6.
pub fn parse_euro_status(status: &str) -> Option<EuroStage> {
    FIRST_NUMBER
        .find(status)
        .and_then(|m| m.as_str().parse::<u8>().ok())
        .map(EuroStage)
}

/// Typical Euro stage for a first registration year. Before 2000 there is no estimate.
pub fn infer_stage(year: i32, diesel: bool) -> Option<EuroStage> {
    let steps = if diesel { &DIESEL_STAGES } else { &OTHER_STAGES };
    steps
        .iter()
        .find(|(from, _)| year >= *from)
        .map(|(_, stage)| EuroStage(*stage))
}
