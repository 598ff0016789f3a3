use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;

use crate::error::DecayError;

use super::csv_io::collect_rows;
use super::records::{InitialValuesRecord, MortalityRecord, OutputRow, OUTPUT_HEADERS};

/// Text of every non-empty data row of the first sheet, with 1-based row numbers.
fn read_first_sheet(path: &Path) -> Result<Vec<(u64, Vec<String>)>, DecayError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| DecayError::Excel("No sheets found in workbook".to_string()))?;

    let range = workbook.worksheet_range(&sheet_name)?;

    let rows = range
        .rows()
        .enumerate()
        // Skip header row
        .skip(1)
        .filter(|(_, row)| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|(idx, row)| {
            let fields: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            (idx as u64 + 1, trim_trailing_empty(fields))
        })
        .collect();

    Ok(rows)
}

/// Calamine pads short rows to the sheet width; drop the padding so the
/// column-count checks see the row as written.
fn trim_trailing_empty(mut fields: Vec<String>) -> Vec<String> {
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Read mortality rows from the first sheet of an Excel (.xlsx) workbook.
///
/// Columns as in the CSV layout: period, plot, species, size class, stems,
/// volume, biomass, diameter.
pub fn read_mortality_excel(path: impl AsRef<Path>) -> Result<Vec<MortalityRecord>, DecayError> {
    let path = path.as_ref();
    let rows = read_first_sheet(path)?;
    collect_rows(
        &path.display().to_string(),
        rows.into_iter()
            .map(|(line, fields)| (line, MortalityRecord::from_fields(&fields))),
    )
}

/// Read initial-values rows from the first sheet of an Excel (.xlsx) workbook.
pub fn read_initial_values_excel(
    path: impl AsRef<Path>,
) -> Result<Vec<InitialValuesRecord>, DecayError> {
    let path = path.as_ref();
    let rows = read_first_sheet(path)?;
    collect_rows(
        &path.display().to_string(),
        rows.into_iter()
            .map(|(line, fields)| (line, InitialValuesRecord::from_fields(&fields))),
    )
}

/// Write result rows to an Excel (.xlsx) file. Unavailable averages are left blank.
pub fn write_results_excel(rows: &[OutputRow], path: impl AsRef<Path>) -> Result<(), DecayError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in OUTPUT_HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        worksheet.write_number(r, 0, row.period as f64)?;
        worksheet.write_string(r, 1, &row.plot)?;
        worksheet.write_string(r, 2, &row.species)?;
        worksheet.write_string(r, 3, &row.size_class)?;
        worksheet.write_number(r, 4, row.number_of_stems)?;
        worksheet.write_number(r, 5, row.volume)?;
        worksheet.write_number(r, 6, row.biomass)?;
        if let Some(dbh) = row.average_dbh {
            worksheet.write_number(r, 7, dbh)?;
        }
        if let Some(class) = row.average_decay_class {
            worksheet.write_number(r, 8, class)?;
        }
    }

    workbook.save(path.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TreeSpecies;

    fn write_sheet(path: &Path, rows: &[&[&str]]) {
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell.parse::<f64>() {
                    Ok(n) => ws.write_number(r as u32, c as u16, n).unwrap(),
                    Err(_) => ws.write_string(r as u32, c as u16, *cell).unwrap(),
                };
            }
        }
        workbook.save(path).unwrap();
    }

    #[test]
    fn test_read_mortality_excel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mortality.xlsx");
        write_sheet(
            &path,
            &[
                &["Period", "Plot", "Species", "SizeClass", "Stems", "Volume", "Biomass", "Diameter"],
                &["1", "P7", "Spruce", "3", "5", "1.5", "0.6", "24"],
            ],
        );
        let rows = read_mortality_excel(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].period, 1);
        assert_eq!(rows[0].plot, "P7");
        assert_eq!(rows[0].species, TreeSpecies::Spruce);
        assert_eq!(rows[0].volume, 1.5);
    }

    #[test]
    fn test_read_initial_values_excel_bad_species() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("initial.xlsx");
        write_sheet(
            &path,
            &[
                &["Plot", "Species", "SizeClass", "Stems", "Volume", "Biomass", "Diameter", "DecayClass"],
                &["P1", "Birch", "1", "3", "1", "0.45", "15", "0"],
                &["P1", "Elm", "1", "3", "1", "0.45", "15", "0"],
            ],
        );
        assert!(read_initial_values_excel(&path).is_err());
    }

    #[test]
    fn test_write_results_excel_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.xlsx");
        let rows = vec![OutputRow {
            period: 0,
            plot: "P1".to_string(),
            species: "Birch".to_string(),
            size_class: "1".to_string(),
            number_of_stems: 3.0,
            volume: 1.0,
            biomass: 0.45,
            average_dbh: Some(15.0),
            average_decay_class: None,
        }];
        write_results_excel(&rows, &path).unwrap();
        assert!(path.exists());
    }
}
