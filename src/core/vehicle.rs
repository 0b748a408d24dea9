use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use vedc_derive::CsvSchema;

/// Column description generated by `#[derive(CsvSchema)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// Vehicle attributes used by the road tax estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleTaxInput {
    pub co2: Option<Decimal>,
    pub registration_date: Option<String>,
    pub fuel_type: Option<String>,
    pub list_price: Option<Decimal>,
}

impl VehicleTaxInput {
    pub fn registered_on(&self) -> Option<NaiveDate> {
        self.registration_date
            .as_deref()
            .and_then(parse_registration_date)
    }

    pub fn is_diesel(&self) -> bool {
        fuel_contains(self.fuel_type.as_deref(), "diesel")
    }
}

/// Vehicle attributes used by the clean air zone heuristic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmissionsZoneInput {
    pub fuel_type: Option<String>,
    pub registration_date: Option<String>,
    pub euro_status: Option<String>,
}

impl EmissionsZoneInput {
    pub fn registered_on(&self) -> Option<NaiveDate> {
        self.registration_date
            .as_deref()
            .and_then(parse_registration_date)
    }

    pub fn is_diesel(&self) -> bool {
        fuel_contains(self.fuel_type.as_deref(), "diesel")
    }

    pub fn is_zero_emission(&self) -> bool {
        let fuel = self.fuel_type.as_deref();
        fuel_contains(fuel, "electric") || fuel_contains(fuel, "hydrogen")
    }
}

/// A vehicle as supplied by the registry lookup or an input file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, CsvSchema)]
pub struct VehicleRecord {
    /// Registration mark (number plate), used to label output rows
    #[serde(default)]
    pub registration: Option<String>,
    /// CO2 emissions in g/km
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub co2: Option<Decimal>,
    /// Date of first registration (YYYY-MM-DD)
    #[serde(default)]
    pub registration_date: Option<String>,
    /// Fuel type as reported by DVLA, e.g. DIESEL or PETROL/ELECTRIC HYBRID
    #[serde(default)]
    pub fuel_type: Option<String>,
    /// List price when new, in GBP
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub list_price: Option<Decimal>,
    /// Euro emissions standard, e.g. "Euro 6d"
    #[serde(default)]
    pub euro_status: Option<String>,
}

impl VehicleRecord {
    pub fn tax_input(&self) -> VehicleTaxInput {
        VehicleTaxInput {
            co2: self.co2,
            registration_date: self.registration_date.clone(),
            fuel_type: self.fuel_type.clone(),
            list_price: self.list_price,
        }
    }

    pub fn zone_input(&self) -> EmissionsZoneInput {
        EmissionsZoneInput {
            fuel_type: self.fuel_type.clone(),
            registration_date: self.registration_date.clone(),
            euro_status: self.euro_status.clone(),
        }
    }
}

/// Parse a registration date leniently.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 date-times and naive `YYYY-MM-DDThh:mm:ss`.
/// Date-times with an offset are taken as the UTC date. Anything else is
/// treated as missing.
pub fn parse_registration_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

fn fuel_contains(fuel_type: Option<&str>, needle: &str) -> bool {
    fuel_type.is_some_and(|f| f.to_lowercase().contains(needle))
}
