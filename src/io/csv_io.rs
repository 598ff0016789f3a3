use std::io::Read;
use std::path::Path;

use crate::config::DecimalSeparator;
use crate::error::DecayError;

use super::records::{InitialValuesRecord, MortalityRecord, OutputRow, OUTPUT_HEADERS};

/// Field delimiter used by every input and output table.
pub const DELIMITER: u8 = b';';

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

/// Parse every data row, logging each invalid one. Any invalid row fails the
/// whole source.
pub(crate) fn collect_rows<T>(
    source: &str,
    rows: impl Iterator<Item = (u64, Result<T, DecayError>)>,
) -> Result<Vec<T>, DecayError> {
    let mut records = Vec::new();
    let mut invalid = 0usize;
    let mut first_error: Option<String> = None;

    for (line, result) in rows {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(source, line, error = %e, "invalid row");
                invalid += 1;
                if first_error.is_none() {
                    first_error = Some(format!("line {line}: {e}"));
                }
            }
        }
    }

    match first_error {
        Some(first) => Err(DecayError::ParseError(format!(
            "{source}: {invalid} invalid row(s), first at {first}"
        ))),
        None => {
            tracing::info!(source, rows = records.len(), "read input");
            Ok(records)
        }
    }
}

fn parse_records<R: Read, T>(
    rdr: &mut csv::Reader<R>,
    source: &str,
    parse: impl Fn(&csv::StringRecord) -> Result<T, DecayError>,
) -> Result<Vec<T>, DecayError> {
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push((line, parse(&record)));
    }
    collect_rows(source, rows.into_iter())
}

fn fields(record: &csv::StringRecord) -> Vec<&str> {
    record.iter().collect()
}

/// Read mortality rows from a semicolon-delimited file.
pub fn read_mortality_csv(path: impl AsRef<Path>) -> Result<Vec<MortalityRecord>, DecayError> {
    let path = path.as_ref();
    let mut rdr = reader_builder().from_path(path)?;
    parse_records(&mut rdr, &path.display().to_string(), |r| {
        MortalityRecord::from_fields(&fields(r))
    })
}

/// Read mortality rows from semicolon-delimited bytes.
pub fn read_mortality_csv_from_bytes(data: &[u8]) -> Result<Vec<MortalityRecord>, DecayError> {
    let mut rdr = reader_builder().from_reader(data);
    parse_records(&mut rdr, "mortality", |r| MortalityRecord::from_fields(&fields(r)))
}

/// Read initial-values rows from a semicolon-delimited file.
pub fn read_initial_values_csv(
    path: impl AsRef<Path>,
) -> Result<Vec<InitialValuesRecord>, DecayError> {
    let path = path.as_ref();
    let mut rdr = reader_builder().from_path(path)?;
    parse_records(&mut rdr, &path.display().to_string(), |r| {
        InitialValuesRecord::from_fields(&fields(r))
    })
}

/// Read initial-values rows from semicolon-delimited bytes.
pub fn read_initial_values_csv_from_bytes(
    data: &[u8],
) -> Result<Vec<InitialValuesRecord>, DecayError> {
    let mut rdr = reader_builder().from_reader(data);
    parse_records(&mut rdr, "initial values", |r| {
        InitialValuesRecord::from_fields(&fields(r))
    })
}

fn write_rows<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    rows: &[OutputRow],
    separator: DecimalSeparator,
) -> Result<(), DecayError> {
    wtr.write_record(OUTPUT_HEADERS)?;
    for row in rows {
        wtr.write_record(row.to_fields(separator))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write result rows to a semicolon-delimited file, replacing any existing file.
pub fn write_results_csv(
    rows: &[OutputRow],
    path: impl AsRef<Path>,
    separator: DecimalSeparator,
) -> Result<(), DecayError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_path(path.as_ref())?;
    write_rows(&mut wtr, rows, separator)
}

/// Render result rows as semicolon-delimited text.
pub fn results_to_csv_string(
    rows: &[OutputRow],
    separator: DecimalSeparator,
) -> Result<String, DecayError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(Vec::new());
    write_rows(&mut wtr, rows, separator)?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| DecayError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| DecayError::ParseError(format!("Invalid UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TreeSpecies;

    const MORTALITY: &str = "\
Period;Plot;Species;SizeClass;Stems;Volume;Biomass;Diameter
1;101;Pine;2;4;0,8;0,32;22
2;101;Spruce;3;0;1.0;0.4;25
2;102;Birch;1;7;0.5;0.225;14
";

    #[test]
    fn test_read_mortality_rows() {
        let rows = read_mortality_csv_from_bytes(MORTALITY.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].plot, "101");
        assert_eq!(rows[0].species, TreeSpecies::Pine);
        assert_eq!(rows[0].volume, 0.8);
        assert_eq!(rows[1].stems, 0.0);
        assert_eq!(rows[2].period, 2);
    }

    #[test]
    fn test_header_only_is_empty() {
        let rows = read_mortality_csv_from_bytes(b"Period;Plot;Species;SizeClass;Stems;Volume;Biomass;Diameter\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_one_bad_row_fails_source() {
        let data = format!("{MORTALITY}3;103;Oak;1;2;0.5;0.2;10\n");
        let err = read_mortality_csv_from_bytes(data.as_bytes()).unwrap_err();
        assert!(matches!(err, DecayError::ParseError(_)));
        assert!(err.to_string().contains("1 invalid row"));
        assert!(err.to_string().contains("line 5"));
    }

    #[test]
    fn test_short_row_fails_source() {
        let data = format!("{MORTALITY}3;103;Pine\n");
        assert!(read_mortality_csv_from_bytes(data.as_bytes()).is_err());
    }

    #[test]
    fn test_read_initial_values_unparseable_species_fails() {
        let data = "\
Plot;Species;SizeClass;Stems;Volume;Biomass;Diameter;DecayClass
101;Birch;1;3;1.0;0.45;15;0
101;Larch;1;3;1.0;0.45;15;0
";
        assert!(read_initial_values_csv_from_bytes(data.as_bytes()).is_err());
    }

    #[test]
    fn test_read_initial_values_legacy_layout() {
        let data = "\
Period;Plot;Species;SizeClass;Stems;Volume;Biomass;Diameter;DecayClass
0;101;Birch;1;3;1,0;0,45;15;0
";
        let rows = read_initial_values_csv_from_bytes(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].plot, "101");
        assert_eq!(rows[0].biomass, 0.45);
    }

    #[test]
    fn test_write_results_string() {
        let rows = vec![OutputRow {
            period: 5,
            plot: "101".to_string(),
            species: "Pine".to_string(),
            size_class: "2".to_string(),
            number_of_stems: 4.0,
            volume: 0.5,
            biomass: 0.25,
            average_dbh: Some(22.0),
            average_decay_class: None,
        }];
        let text = results_to_csv_string(&rows, DecimalSeparator::Point).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Period;Plot;Tree Species;Diameter class;Number of stems;Volume;Biomass;Average DBH;Average decay class"
        );
        assert_eq!(lines.next().unwrap(), "5;101;Pine;2;4;0.5;0.25;22;-1");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_write_results_comma_separator() {
        let rows = vec![OutputRow {
            period: 0,
            plot: "A".to_string(),
            species: "Birch".to_string(),
            size_class: "1".to_string(),
            number_of_stems: 2.0,
            volume: 1.5,
            biomass: 0.75,
            average_dbh: Some(12.5),
            average_decay_class: Some(1.75),
        }];
        let text = results_to_csv_string(&rows, DecimalSeparator::Comma).unwrap();
        assert!(text.contains("0;A;Birch;1;2;1,5;0,75;12,5;1,75"));
    }

    #[test]
    fn test_write_and_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mortality.csv");
        std::fs::write(&path, MORTALITY).unwrap();
        let rows = read_mortality_csv(&path).unwrap();
        assert_eq!(rows.len(), 3);

        let out = dir.path().join("out.csv");
        write_results_csv(&[], &out, DecimalSeparator::Point).unwrap();
        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("Period;Plot"));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(read_mortality_csv("/nonexistent/mortality.csv").is_err());
    }
}
