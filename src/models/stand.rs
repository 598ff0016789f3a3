use serde::{Deserialize, Serialize};

use super::classifier::DecayClass;
use super::cohort::{Cohort, CohortSnapshot};
use super::species::{DecayModelVariant, TreeSpecies};
use crate::config::SimulationSettings;

/// Diameters at or below this value are treated as not measured.
pub const UNKNOWN_DIAMETER: f64 = -1.0;

/// Accumulated statistics for one (period, species, size class) combination
/// within a stand.
///
/// Averages are weighted by stem count. Only running sums are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandPeriodStats {
    pub period: i64,
    pub plot: String,
    pub species: TreeSpecies,
    pub size_class: String,
    contributions: usize,
    stems: f64,
    volume: f64,
    biomass: f64,
    weighted_decay_class: f64,
    weighted_diameter: f64,
    diameter_stems: f64,
}

impl StandPeriodStats {
    pub fn new(
        period: i64,
        plot: impl Into<String>,
        species: TreeSpecies,
        size_class: impl Into<String>,
    ) -> Self {
        Self {
            period,
            plot: plot.into(),
            species,
            size_class: size_class.into(),
            contributions: 0,
            stems: 0.0,
            volume: 0.0,
            biomass: 0.0,
            weighted_decay_class: 0.0,
            weighted_diameter: 0.0,
            diameter_stems: 0.0,
        }
    }

    /// Add one snapshot's contribution. `diameter` is the owning cohort's
    /// diameter at creation; a value at or below [`UNKNOWN_DIAMETER`] (or NaN)
    /// marks it as unknown and leaves it out of the diameter average.
    pub fn record(&mut self, snapshot: &CohortSnapshot, diameter: f64) {
        self.record_values(
            snapshot.stems,
            snapshot.volume,
            snapshot.biomass,
            snapshot.decay_class,
            diameter,
        );
    }

    pub fn record_values(
        &mut self,
        stems: f64,
        volume: f64,
        biomass: f64,
        decay_class: DecayClass,
        diameter: f64,
    ) {
        self.contributions += 1;
        self.stems += stems;
        self.volume += volume;
        self.biomass += biomass;
        self.weighted_decay_class += f64::from(decay_class) * stems;
        if diameter > UNKNOWN_DIAMETER {
            self.weighted_diameter += diameter * stems;
            self.diameter_stems += stems;
        }
    }

    pub fn contributions(&self) -> usize {
        self.contributions
    }

    pub fn number_of_stems(&self) -> f64 {
        self.stems
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn biomass(&self) -> f64 {
        self.biomass
    }

    /// Stem-weighted mean decomposition class, `None` without stems.
    pub fn average_decay_class(&self) -> Option<f64> {
        if self.contributions == 0 || self.stems <= 0.0 {
            return None;
        }
        Some(self.weighted_decay_class / self.stems)
    }

    /// Stem-weighted mean diameter at creation over contributions with a known
    /// diameter, `None` when none of them carry stems.
    pub fn average_diameter(&self) -> Option<f64> {
        if self.contributions == 0 || self.diameter_stems <= 0.0 {
            return None;
        }
        Some(self.weighted_diameter / self.diameter_stems)
    }
}

/// One plot's cohorts and their aggregated time series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stand {
    pub plot: String,
    pub max_time_step: i64,
    pub max_decay_class: DecayClass,
    pub model: DecayModelVariant,
    cohorts: Vec<Cohort>,
    statistics: Vec<StandPeriodStats>,
}

impl Stand {
    pub fn new(plot: impl Into<String>, settings: &SimulationSettings) -> Self {
        Self {
            plot: plot.into(),
            max_time_step: settings.max_time_step,
            max_decay_class: settings.max_decay_class,
            model: settings.model,
            cohorts: Vec::new(),
            statistics: Vec::new(),
        }
    }

    pub fn add_cohort(&mut self, cohort: Cohort) {
        self.cohorts.push(cohort);
    }

    pub fn cohorts(&self) -> &[Cohort] {
        &self.cohorts
    }

    pub fn num_cohorts(&self) -> usize {
        self.cohorts.len()
    }

    /// Aggregated statistics from the last aggregation, in first-seen order.
    pub fn statistics(&self) -> &[StandPeriodStats] {
        &self.statistics
    }

    /// Whether a snapshot falls inside this stand's reporting window.
    pub fn reports(&self, snapshot: &CohortSnapshot) -> bool {
        snapshot.decay_class <= self.max_decay_class && snapshot.period <= self.max_time_step
    }

    pub(crate) fn replace_statistics(&mut self, statistics: Vec<StandPeriodStats>) {
        self.statistics = statistics;
    }
}
