//! Export command: full consumption history as JSON or CSV.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use birrino_db::{ConsumptionExport, Database};

use crate::cli::ExportFormat;

/// JSON export envelope.
#[derive(Debug, Serialize)]
struct ExportData {
    export_date: DateTime<Utc>,
    version: &'static str,
    consumption: Vec<ConsumptionExport>,
}

const EXPORT_VERSION: &str = "1.0";

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    format: ExportFormat,
    now: DateTime<Utc>,
) -> Result<()> {
    let consumption = db.export_consumptions()?;

    match format {
        ExportFormat::Json => {
            let data = ExportData {
                export_date: now,
                version: EXPORT_VERSION,
                consumption,
            };
            serde_json::to_writer_pretty(&mut *writer, &data)?;
            writeln!(writer)?;
        }
        ExportFormat::Csv => {
            writeln!(writer, "date,drink,quantity,units")?;
            for record in consumption {
                writeln!(
                    writer,
                    "{},{},{},{:.2}",
                    record.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
                    escape_csv_field(&record.drink_name),
                    record.quantity,
                    record.units,
                )?;
            }
        }
    }
    Ok(())
}

/// Quotes a field per RFC 4180 when it contains a comma, quote or newline.
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
