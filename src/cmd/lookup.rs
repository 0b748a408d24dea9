//! Lookup command - road tax and clean air zone estimate for a single vehicle

use crate::core::{RoadTaxEstimate, VehicleRecord};
use crate::tax::{lookup_vehicle, LiveZoneData, VehicleLookup, ZoneSource};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct LookupCommand {
    /// Registration mark, used to label the output
    #[arg(long)]
    registration: Option<String>,

    /// CO2 emissions in g/km
    #[arg(short, long)]
    co2: Option<Decimal>,

    /// Date of first registration (YYYY-MM-DD)
    #[arg(short = 'd', long)]
    registration_date: Option<String>,

    /// Fuel type, e.g. PETROL, DIESEL, ELECTRIC
    #[arg(short, long)]
    fuel_type: Option<String>,

    /// List price when new, in GBP
    #[arg(short, long)]
    list_price: Option<Decimal>,

    /// Euro emissions standard, e.g. "Euro 6"
    #[arg(short, long)]
    euro_status: Option<String>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl LookupCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let vehicle = VehicleRecord {
            registration: self.registration.clone(),
            co2: self.co2,
            registration_date: self.registration_date.clone(),
            fuel_type: self.fuel_type.clone(),
            list_price: self.list_price,
            euro_status: self.euro_status.clone(),
        };
        let lookup = lookup_vehicle(&vehicle, &LiveZoneData::default());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&lookup.snapshot()?)?);
        } else {
            print_lookup(&lookup);
        }
        Ok(())
    }
}

fn print_lookup(lookup: &VehicleLookup) {
    let tax = &lookup.tax;

    println!();
    match &lookup.registration {
        Some(reg) => println!("ROAD TAX ESTIMATE ({}) - {} rules", reg.to_uppercase(), tax.regime),
        None => println!("ROAD TAX ESTIMATE - {} rules", tax.regime),
    }
    println!("  Band: {}", format_band(tax));
    println!("  First year: {}", format_rate(tax.first_year_rate));
    println!("  Annual: {}", format_rate(tax.annual_rate));
    if let Some(supplement) = tax.expensive_car_supplement {
        println!("  Expensive car supplement: {}", format_rate(Some(supplement)));
    }
    println!("  Total annual: {}", format_rate(tax.total_annual));
    println!();

    println!("CLEAN AIR ZONES");
    for zone in lookup.zones() {
        let source = match zone.source {
            ZoneSource::Live => "live",
            ZoneSource::Estimated => "estimated",
        };
        println!("  {}: {} ({})", zone.result.scheme, zone.result.status, source);
        println!("     {}", zone.result.notes);
        if let Some(url) = &zone.result.reference_url {
            println!("     {}", url);
        }
    }
    println!();

    let fallbacks = lookup.fallback_messages();
    if !tax.notes.is_empty() || !fallbacks.is_empty() {
        println!("NOTES");
        for note in tax.notes.iter().chain(fallbacks.iter()) {
            println!("  - {}", note);
        }
        println!();
    }
}

pub fn format_band(tax: &RoadTaxEstimate) -> String {
    match (tax.band_code, &tax.band_label) {
        (Some(code), Some(label)) => format!("{} ({})", code, label),
        (Some(code), None) => code.to_string(),
        _ => "-".to_string(),
    }
}

pub fn format_rate(rate: Option<u32>) -> String {
    rate.map_or("-".to_string(), |r| format!("£{}", r))
}
