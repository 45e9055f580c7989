use anyhow::{Context, Result};
use molname::*;

fn main() -> Result<()> {
    let level = std::env::var("MOLNAME_LOG").unwrap_or_else(|_| "info".to_string());
    init_logging(&level);

    let mut args = std::env::args().skip(1);
    let input_csv = args.next().context("usage: name-database <input.csv> <output.csv>")?;
    let output_csv = args.next().unwrap_or_else(|| "named-formulas.csv".to_string());
    name_csv_database(&input_csv, &output_csv, &NamingOptions::default())?;

    Ok(())
}
