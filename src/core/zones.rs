use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clean air zone compliance outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ZoneStatus {
    Compliant,
    Chargeable,
    Unknown,
}

impl fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ZoneStatus::Compliant => "Compliant",
            ZoneStatus::Chargeable => "Chargeable",
            ZoneStatus::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Compliance result for one scheme, from live data or the heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AirQualityResult {
    pub scheme: String,
    pub status: ZoneStatus,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// London Ultra Low Emission Zone
    Ulez,
    /// Clean Air Zones outside London
    Caz,
}

impl Scheme {
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::Ulez => "ULEZ",
            Scheme::Caz => "CAZ",
        }
    }

    pub fn reference_url(&self) -> &'static str {
        match self {
            Scheme::Ulez => "https://tfl.gov.uk/modes/driving/ulez",
            Scheme::Caz => "https://www.gov.uk/guidance/driving-in-a-clean-air-zone",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Euro emissions stage, e.g. 6 for Euro 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EuroStage(pub u8);

impl fmt::Display for EuroStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Euro {}", self.0)
    }
}
