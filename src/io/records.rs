use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::DecimalSeparator;
use crate::error::DecayError;
use crate::models::{CohortInput, StandPeriodStats, TreeSpecies};

/// Column headers of the results table, in output order.
pub const OUTPUT_HEADERS: [&str; 9] = [
    "Period",
    "Plot",
    "Tree Species",
    "Diameter class",
    "Number of stems",
    "Volume",
    "Biomass",
    "Average DBH",
    "Average decay class",
];

/// Written in place of an unavailable average in delimited output.
pub const UNAVAILABLE: f64 = -1.0;

/// Parse one field, accepting either `,` or `.` as decimal separator.
fn parse_field<T: FromStr, S: AsRef<str>>(fields: &[S], idx: usize, name: &str) -> Result<T, DecayError> {
    let raw = fields
        .get(idx)
        .map(|f| f.as_ref().trim())
        .ok_or_else(|| DecayError::ParseError(format!("missing column '{name}'")))?;
    raw.replace(',', ".")
        .parse()
        .map_err(|_| DecayError::ParseError(format!("invalid {name} '{raw}'")))
}

fn text_field<S: AsRef<str>>(fields: &[S], idx: usize, name: &str) -> Result<String, DecayError> {
    fields
        .get(idx)
        .map(|f| f.as_ref().trim().to_string())
        .ok_or_else(|| DecayError::ParseError(format!("missing column '{name}'")))
}

fn species_field<S: AsRef<str>>(fields: &[S], idx: usize) -> Result<TreeSpecies, DecayError> {
    text_field(fields, idx, "species")?.parse()
}

/// Stems that died in one plot during one period.
///
/// Columns: period, plot, species, size class, stems, volume, biomass, diameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortalityRecord {
    pub period: i64,
    pub plot: String,
    pub species: TreeSpecies,
    pub size_class: String,
    pub stems: f64,
    pub volume: f64,
    pub biomass: f64,
    pub diameter: f64,
}

impl MortalityRecord {
    pub const COLUMNS: usize = 8;

    /// Parse the eight text fields of one mortality row.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, DecayError> {
        if fields.len() < Self::COLUMNS {
            return Err(DecayError::ParseError(format!(
                "expected {} columns, found {}",
                Self::COLUMNS,
                fields.len()
            )));
        }
        Ok(Self {
            period: parse_field(fields, 0, "period")?,
            plot: text_field(fields, 1, "plot")?,
            species: species_field(fields, 2)?,
            size_class: text_field(fields, 3, "size class")?,
            stems: parse_field(fields, 4, "stem count")?,
            volume: parse_field(fields, 5, "volume")?,
            biomass: parse_field(fields, 6, "biomass")?,
            diameter: parse_field(fields, 7, "diameter")?,
        })
    }

    pub fn cohort_input(&self) -> CohortInput {
        CohortInput {
            species: self.species,
            size_class: self.size_class.clone(),
            created_period: self.period,
            stems: self.stems,
            volume: self.volume,
            biomass: self.biomass,
            diameter: self.diameter,
        }
    }
}

/// Dead wood already present when the simulation starts.
///
/// Columns: plot, species, size class, stems, volume, biomass, diameter,
/// decomposition class hint. Always placed at [`InitialValuesRecord::PERIOD`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialValuesRecord {
    pub plot: String,
    pub species: TreeSpecies,
    pub size_class: String,
    pub stems: f64,
    pub volume: f64,
    pub biomass: f64,
    pub diameter: f64,
    pub decay_class_hint: f64,
}

impl InitialValuesRecord {
    pub const PERIOD: i64 = 0;
    pub const COLUMNS: usize = 8;

    /// Parse one initial-values row. A row with nine fields is the older
    /// layout with a leading period column, which is ignored.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, DecayError> {
        let fields = match fields.len() {
            n if n == Self::COLUMNS => fields,
            n if n == Self::COLUMNS + 1 => &fields[1..],
            n => {
                return Err(DecayError::ParseError(format!(
                    "expected {} or {} columns, found {n}",
                    Self::COLUMNS,
                    Self::COLUMNS + 1
                )))
            }
        };
        Ok(Self {
            plot: text_field(fields, 0, "plot")?,
            species: species_field(fields, 1)?,
            size_class: text_field(fields, 2, "size class")?,
            stems: parse_field(fields, 3, "stem count")?,
            volume: parse_field(fields, 4, "volume")?,
            biomass: parse_field(fields, 5, "biomass")?,
            diameter: parse_field(fields, 6, "diameter")?,
            decay_class_hint: parse_field(fields, 7, "decomposition class")?,
        })
    }

    pub fn cohort_input(&self) -> CohortInput {
        CohortInput {
            species: self.species,
            size_class: self.size_class.clone(),
            created_period: Self::PERIOD,
            stems: self.stems,
            volume: self.volume,
            biomass: self.biomass,
            diameter: self.diameter,
        }
    }
}

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub period: i64,
    pub plot: String,
    pub species: String,
    pub size_class: String,
    pub number_of_stems: f64,
    pub volume: f64,
    pub biomass: f64,
    pub average_dbh: Option<f64>,
    pub average_decay_class: Option<f64>,
}

impl OutputRow {
    /// Render as text fields in [`OUTPUT_HEADERS`] order.
    pub fn to_fields(&self, separator: DecimalSeparator) -> [String; 9] {
        [
            self.period.to_string(),
            self.plot.clone(),
            self.species.clone(),
            self.size_class.clone(),
            separator.format(self.number_of_stems),
            separator.format(self.volume),
            separator.format(self.biomass),
            separator.format(self.average_dbh.unwrap_or(UNAVAILABLE)),
            separator.format(self.average_decay_class.unwrap_or(UNAVAILABLE)),
        ]
    }
}

impl From<&StandPeriodStats> for OutputRow {
    fn from(stats: &StandPeriodStats) -> Self {
        Self {
            period: stats.period,
            plot: stats.plot.clone(),
            species: stats.species.to_string(),
            size_class: stats.size_class.clone(),
            number_of_stems: stats.number_of_stems(),
            volume: stats.volume(),
            biomass: stats.biomass(),
            average_dbh: stats.average_diameter(),
            average_decay_class: stats.average_decay_class(),
        }
    }
}
