//! Batch command - estimates for every vehicle in a CSV or JSON file

use super::lookup::{format_band, format_rate};
use crate::records::read_vehicles;
use crate::tax::{lookup_vehicle, LookupSnapshot, VehicleLookup, ZoneResult, ZoneSource};
use clap::Args;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// Vehicles file (CSV or JSON). Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Output as CSV instead of formatted table
    #[arg(long, conflicts_with = "json")]
    csv: bool,

    /// Output as JSON (one snapshot per vehicle)
    #[arg(long)]
    json: bool,
}

/// Row for the batch table and CSV output
#[derive(Debug, Clone, Tabled, serde::Serialize)]
pub struct BatchRow {
    #[tabled(rename = "Registration")]
    pub registration: String,

    #[tabled(rename = "Regime")]
    pub regime: String,

    #[tabled(rename = "Band")]
    pub band: String,

    #[tabled(rename = "First Year")]
    pub first_year_rate: String,

    #[tabled(rename = "Annual")]
    pub annual_rate: String,

    #[tabled(rename = "Supplement")]
    pub supplement: String,

    #[tabled(rename = "Total")]
    pub total_annual: String,

    #[tabled(rename = "ULEZ")]
    pub ulez: String,

    #[tabled(rename = "CAZ")]
    pub caz: String,

    #[tabled(skip)]
    pub notes: String,
}

impl From<&VehicleLookup> for BatchRow {
    fn from(lookup: &VehicleLookup) -> Self {
        let tax = &lookup.tax;
        let notes: Vec<String> = tax
            .notes
            .iter()
            .cloned()
            .chain(lookup.fallback_messages())
            .collect();
        BatchRow {
            registration: lookup.registration.clone().unwrap_or_default(),
            regime: tax.regime.to_string(),
            band: format_band(tax),
            first_year_rate: format_rate(tax.first_year_rate),
            annual_rate: format_rate(tax.annual_rate),
            supplement: format_rate(tax.expensive_car_supplement),
            total_annual: format_rate(tax.total_annual),
            ulez: zone_cell(&lookup.ulez),
            caz: zone_cell(&lookup.caz),
            notes: notes.join(" | "),
        }
    }
}

fn zone_cell(zone: &ZoneResult) -> String {
    match zone.source {
        ZoneSource::Live => zone.result.status.to_string(),
        ZoneSource::Estimated => format!("{}*", zone.result.status),
    }
}

impl BatchCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let entries = read_vehicles(&self.file)?;
        let lookups: Vec<VehicleLookup> = entries
            .iter()
            .map(|entry| lookup_vehicle(&entry.vehicle, &entry.live))
            .collect();

        if self.json {
            let snapshots = lookups
                .into_iter()
                .map(VehicleLookup::snapshot)
                .collect::<serde_json::Result<Vec<LookupSnapshot>>>()?;
            println!("{}", serde_json::to_string_pretty(&snapshots)?);
            return Ok(());
        }

        let rows: Vec<BatchRow> = lookups.iter().map(BatchRow::from).collect();
        if self.csv {
            self.write_csv(&rows)
        } else {
            self.print_table(&rows);
            Ok(())
        }
    }

    fn print_table(&self, rows: &[BatchRow]) {
        if rows.is_empty() {
            println!("No vehicles found");
            return;
        }

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!("* estimated, live data unavailable");
    }

    fn write_csv(&self, rows: &[BatchRow]) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(io::stdout());
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
