//! Schema command - print expected input formats

use crate::core::VehicleRecord;
use crate::records::VehicleBatch;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the vehicles input
    JsonSchema,
    /// CSV header row with column names
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(VehicleBatch);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::CsvHeader => println!("{}", VehicleRecord::csv_header()),
            SchemaFormat::CsvFields => {
                println!("CSV Input Format");
                println!("================");
                println!();
                for field in VehicleRecord::csv_schema() {
                    let req = if field.required { "required" } else { "optional" };
                    println!("{:20} ({:8})  {}", field.name, req, field.description);
                }
                println!();
                println!("Empty cells are treated as missing. Live zone results are JSON only.");
            }
        }
        Ok(())
    }
}
