pub mod bands;
pub mod estimate;
pub mod vehicle;
pub mod zones;

pub use bands::{find_band, Band, FirstYearRate, FIRST_YEAR_BANDS, LEGACY_BANDS};
pub use estimate::{Regime, RoadTaxEstimate, APRIL_2025};
pub use vehicle::{EmissionsZoneInput, VehicleRecord, VehicleTaxInput};
pub use zones::{AirQualityResult, EuroStage, Scheme, ZoneStatus};
