use clap::{Parser, Subcommand};

use crate::cmd::{
    bands::BandsCommand, batch::BatchCommand, lookup::LookupCommand, schema::SchemaCommand,
};

mod cmd;
mod core;
mod records;
mod tax;

/// Estimate UK road tax (VED) and clean air zone compliance
#[derive(Parser, Debug)]
#[command(name = "vedc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate road tax and zone compliance for one vehicle
    Lookup(LookupCommand),
    /// Estimate every vehicle in a CSV or JSON file
    Batch(BatchCommand),
    /// Print a CO2 band table
    Bands(BandsCommand),
    /// Print the expected input formats
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    match Cli::parse().command {
        Command::Lookup(cmd) => cmd.exec(),
        Command::Batch(cmd) => cmd.exec(),
        Command::Bands(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
