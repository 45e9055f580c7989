use std::fs::File;
use std::io::{self, Read};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Writer};
use tracing::*;

use crate::{name_formula, NamingOptions};

/// A formula with its name, or `None` when it could not be named.
pub type NamedRecord = (String, Option<String>);

/// Column holding the formulas: the one headed `formula` (any case), else the first.
fn formula_column(headers: &StringRecord) -> usize {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("formula"))
        .unwrap_or(0)
}

/// Names every formula of a CSV document. Unreadable rows and rows with an
/// empty formula are skipped.
pub fn name_csv_records(csv_data: &str, options: &NamingOptions) -> Vec<NamedRecord> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());
    let column = match rdr.headers() {
        Ok(headers) => formula_column(headers),
        Err(e) => {
            warn!("Could not read CSV headers: {}", e);
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable record: {}", e);
                continue;
            }
        };
        let formula = record.get(column).unwrap_or("").trim().to_string();
        if formula.is_empty() {
            warn!("Skipping record with empty formula: {:?}", record);
            continue;
        }

        let name = match name_formula(&formula, options) {
            Ok(name) => Some(name),
            Err(e) => {
                warn!("Could not name '{}': {}", formula, e);
                None
            }
        };
        records.push((formula, name));
    }
    records
}

/// Writes `Formula,IUPAC_Name` rows; unnamed formulas get an empty name.
pub fn write_named_records<W: io::Write>(writer: W, records: &[NamedRecord]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["Formula", "IUPAC_Name"])?;
    for (formula, name) in records {
        wtr.write_record([formula.as_str(), name.as_deref().unwrap_or("")])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Names every formula in the CSV file `input` and writes the results to
/// `output`. Returns how many formulas got a name.
pub fn name_csv_database(input: &str, output: &str, options: &NamingOptions) -> Result<usize> {
    let mut csv_data = String::new();
    File::open(input)
        .with_context(|| format!("Failed to open {}", input))?
        .read_to_string(&mut csv_data)
        .with_context(|| format!("Failed to read {}", input))?;

    let records = name_csv_records(&csv_data, options);
    let file = File::create(output).with_context(|| format!("Failed to create {}", output))?;
    write_named_records(file, &records)?;

    let named = records.iter().filter(|(_, name)| name.is_some()).count();
    info!(
        "Named {} of {} formulas, written to {}",
        named,
        records.len(),
        output
    );
    Ok(named)
}
