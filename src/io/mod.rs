mod csv_io;
mod excel_io;
mod json_io;
mod records;

use std::path::Path;

use crate::config::{DecimalSeparator, OutputSettings};
use crate::error::DecayError;

pub use csv_io::{
    read_initial_values_csv, read_initial_values_csv_from_bytes, read_mortality_csv,
    read_mortality_csv_from_bytes, results_to_csv_string, write_results_csv, DELIMITER,
};
pub use excel_io::{read_initial_values_excel, read_mortality_excel, write_results_excel};
pub use json_io::{read_results_json, write_results_json};
pub use records::{InitialValuesRecord, MortalityRecord, OutputRow, OUTPUT_HEADERS, UNAVAILABLE};

/// Trait for reading simulation input records from a file.
pub trait RecordSource {
    fn read_mortality(&self, path: &Path) -> Result<Vec<MortalityRecord>, DecayError>;
    fn read_initial_values(&self, path: &Path) -> Result<Vec<InitialValuesRecord>, DecayError>;
}

/// Trait for writing simulation results to a file.
pub trait ResultWriter {
    fn write(&self, rows: &[OutputRow], path: &Path) -> Result<(), DecayError>;
}

/// Semicolon-delimited text format.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormat {
    pub decimal_separator: DecimalSeparator,
}

impl RecordSource for CsvFormat {
    fn read_mortality(&self, path: &Path) -> Result<Vec<MortalityRecord>, DecayError> {
        read_mortality_csv(path)
    }

    fn read_initial_values(&self, path: &Path) -> Result<Vec<InitialValuesRecord>, DecayError> {
        read_initial_values_csv(path)
    }
}

impl ResultWriter for CsvFormat {
    fn write(&self, rows: &[OutputRow], path: &Path) -> Result<(), DecayError> {
        write_results_csv(rows, path, self.decimal_separator)
    }
}

/// JSON output format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl ResultWriter for JsonFormat {
    fn write(&self, rows: &[OutputRow], path: &Path) -> Result<(), DecayError> {
        write_results_json(rows, path, self.pretty)
    }
}

/// Excel (.xlsx) format reader/writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelFormat;

impl RecordSource for ExcelFormat {
    fn read_mortality(&self, path: &Path) -> Result<Vec<MortalityRecord>, DecayError> {
        read_mortality_excel(path)
    }

    fn read_initial_values(&self, path: &Path) -> Result<Vec<InitialValuesRecord>, DecayError> {
        read_initial_values_excel(path)
    }
}

impl ResultWriter for ExcelFormat {
    fn write(&self, rows: &[OutputRow], path: &Path) -> Result<(), DecayError> {
        write_results_excel(rows, path)
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Pick an input reader by file extension. Anything that is not a workbook
/// is read as semicolon-delimited text.
pub fn source_for(path: &Path) -> Box<dyn RecordSource> {
    match extension(path).as_str() {
        "xlsx" | "xls" => Box::new(ExcelFormat),
        _ => Box::new(CsvFormat::default()),
    }
}

/// Pick a result writer by file extension.
pub fn writer_for(path: &Path, output: &OutputSettings) -> Result<Box<dyn ResultWriter>, DecayError> {
    match extension(path).as_str() {
        "csv" | "txt" | "" => Ok(Box::new(CsvFormat {
            decimal_separator: output.decimal_separator,
        })),
        "json" => Ok(Box::new(JsonFormat {
            pretty: output.pretty,
        })),
        "xlsx" => Ok(Box::new(ExcelFormat)),
        other => Err(DecayError::ValidationError(format!(
            "Unsupported output format: .{other}. Use .csv, .json, or .xlsx"
        ))),
    }
}
