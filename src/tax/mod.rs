pub mod lookup;
pub mod ved;
pub mod zones;

pub use lookup::{lookup_vehicle, LiveZoneData, LookupSnapshot, VehicleLookup, ZoneResult, ZoneSource};
