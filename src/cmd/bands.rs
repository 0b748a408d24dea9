//! Bands command - print the CO2 band tables

use crate::core::{Band, FIRST_YEAR_BANDS, LEGACY_BANDS};
use crate::tax::ved::{EXPENSIVE_CAR_SUPPLEMENT, EXPENSIVE_CAR_THRESHOLD, STANDARD_RATE_2025};
use clap::{Args, ValueEnum};
use std::fmt;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BandsCommand {
    /// Which band table to print
    #[arg(value_enum, default_value_t = BandTable::FirstYear)]
    table: BandTable,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum BandTable {
    /// First-year rates, cars registered from 1 April 2017
    #[default]
    FirstYear,
    /// Annual rates, cars registered 1 March 2001 to 31 March 2017
    Legacy,
}

#[derive(Tabled)]
struct BandRow {
    #[tabled(rename = "Band")]
    code: char,
    #[tabled(rename = "CO2")]
    label: &'static str,
    #[tabled(rename = "Rate")]
    rate: String,
}

impl<R: fmt::Display> From<&Band<R>> for BandRow {
    fn from(band: &Band<R>) -> Self {
        BandRow {
            code: band.code,
            label: band.label,
            rate: band.rate.to_string(),
        }
    }
}

impl BandsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (title, rows): (_, Vec<BandRow>) = match self.table {
            BandTable::FirstYear => (
                "FIRST YEAR RATES (from 1 April 2017)",
                FIRST_YEAR_BANDS.iter().map(BandRow::from).collect(),
            ),
            BandTable::Legacy => (
                "ANNUAL RATES (1 March 2001 to 31 March 2017)",
                LEGACY_BANDS.iter().map(BandRow::from).collect(),
            ),
        };
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
            .to_string();

        println!();
        println!("{}", title);
        println!("{}", table);
        if let BandTable::FirstYear = self.table {
            println!("Standard rate from the second year: £{}", STANDARD_RATE_2025);
            println!(
                "Expensive car supplement: £{} a year when the list price is £{} or more",
                EXPENSIVE_CAR_SUPPLEMENT, EXPENSIVE_CAR_THRESHOLD
            );
        }
        println!();
        Ok(())
    }
}
