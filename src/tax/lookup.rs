use super::ved::calculate_vehicle_tax;
use super::zones::assess_emissions_zones;
use crate::core::{AirQualityResult, RoadTaxEstimate, Scheme, VehicleRecord};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Live compliance results already fetched by the caller, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LiveZoneData {
    #[serde(default)]
    pub ulez: Option<AirQualityResult>,
    #[serde(default)]
    pub caz: Option<AirQualityResult>,
}

/// Where a zone result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneSource {
    Live,
    Estimated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneResult {
    #[serde(flatten)]
    pub result: AirQualityResult,
    pub source: ZoneSource,
}

/// Road tax and zone compliance for one vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleLookup {
    pub registration: Option<String>,
    pub tax: RoadTaxEstimate,
    pub ulez: ZoneResult,
    pub caz: ZoneResult,
}

/// A lookup as archived, keyed by its fingerprint.
#[derive(Debug, Clone, Serialize)]
pub struct LookupSnapshot {
    pub fingerprint: String,
    #[serde(flatten)]
    pub lookup: VehicleLookup,
}

/// Combine the tax estimate with zone results, preferring live data per scheme.
pub fn lookup_vehicle(vehicle: &VehicleRecord, live: &LiveZoneData) -> VehicleLookup {
    let estimated = assess_emissions_zones(&vehicle.zone_input());
    let label = vehicle.registration.as_deref().unwrap_or("vehicle");

    VehicleLookup {
        registration: vehicle.registration.clone(),
        tax: calculate_vehicle_tax(&vehicle.tax_input()),
        ulez: resolve(Scheme::Ulez, label, &live.ulez, estimated.ulez),
        caz: resolve(Scheme::Caz, label, &live.caz, estimated.caz),
    }
}

fn resolve(
    scheme: Scheme,
    label: &str,
    live: &Option<AirQualityResult>,
    estimate: AirQualityResult,
) -> ZoneResult {
    match live {
        Some(result) => ZoneResult {
            result: result.clone(),
            source: ZoneSource::Live,
        },
        None => {
            log::warn!("No live {} data for {}, using estimate", scheme, label);
            ZoneResult {
                result: estimate,
                source: ZoneSource::Estimated,
            }
        }
    }
}

impl VehicleLookup {
    pub fn zones(&self) -> [&ZoneResult; 2] {
        [&self.ulez, &self.caz]
    }

    /// Messages for schemes shown from the estimate, each citing the reason.
    pub fn fallback_messages(&self) -> Vec<String> {
        self.zones()
            .into_iter()
            .filter(|z| z.source == ZoneSource::Estimated)
            .map(|z| {
                format!(
                    "Live {} data unavailable, showing estimate: {}",
                    z.result.scheme, z.result.notes
                )
            })
            .collect()
    }

    /// SHA-256 of the JSON serialisation, hex encoded.
    pub fn fingerprint(&self) -> serde_json::Result<String> {
        let json = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&json)))
    }

    pub fn snapshot(self) -> serde_json::Result<LookupSnapshot> {
        Ok(LookupSnapshot {
            fingerprint: self.fingerprint()?,
            lookup: self,
        })
    }
}
