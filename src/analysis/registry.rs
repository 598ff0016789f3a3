use std::collections::HashMap;

use crate::analysis::aggregation::aggregate_stand;
use crate::config::SimulationSettings;
use crate::error::DecayError;
use crate::io::{InitialValuesRecord, MortalityRecord, OutputRow};
use crate::models::{Cohort, CohortInput, Stand};

/// Owns every stand of a simulation run and routes new cohorts to them by
/// plot identifier, creating stands on first sighting.
#[derive(Debug, Clone)]
pub struct StandRegistry {
    settings: SimulationSettings,
    stands: Vec<Stand>,
    index: HashMap<String, usize>,
}

impl StandRegistry {
    pub fn new(settings: SimulationSettings) -> Result<Self, DecayError> {
        settings.validate()?;
        Ok(Self {
            settings,
            stands: Vec::new(),
            index: HashMap::new(),
        })
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Simulate a cohort and attach it to the stand for `plot`.
    pub fn add_cohort(&mut self, plot: &str, input: CohortInput) -> &Cohort {
        let cohort = Cohort::new(plot, input, &self.settings);
        let idx = match self.index.get(plot) {
            Some(&idx) => idx,
            None => {
                tracing::debug!(plot, "creating stand");
                self.stands.push(Stand::new(plot, &self.settings));
                self.index.insert(plot.to_string(), self.stands.len() - 1);
                self.stands.len() - 1
            }
        };
        let stand = &mut self.stands[idx];
        stand.add_cohort(cohort);
        &stand.cohorts()[stand.num_cohorts() - 1]
    }

    /// Add one cohort per mortality record with a positive stem count.
    /// Returns the number of cohorts created.
    pub fn add_mortality(&mut self, records: &[MortalityRecord]) -> usize {
        let mut created = 0;
        for record in records {
            if record.stems <= 0.0 {
                continue;
            }
            self.add_cohort(&record.plot, record.cohort_input());
            created += 1;
        }
        tracing::info!(rows = records.len(), cohorts = created, "added mortality");
        created
    }

    /// Add one period-0 cohort per initial-values record with a positive stem
    /// count. Returns the number of cohorts created.
    pub fn add_initial_values(&mut self, records: &[InitialValuesRecord]) -> usize {
        let mut created = 0;
        for record in records {
            if record.stems <= 0.0 {
                continue;
            }
            let cohort = self.add_cohort(&record.plot, record.cohort_input());
            let class = f64::from(cohort.initial_decay_class());
            if (class - record.decay_class_hint).abs() > f64::EPSILON {
                tracing::debug!(
                    plot = %record.plot,
                    hint = record.decay_class_hint,
                    classified = class,
                    "decomposition class hint differs from density class"
                );
            }
            created += 1;
        }
        tracing::info!(rows = records.len(), cohorts = created, "added initial values");
        created
    }

    /// Recompute the statistics of every stand.
    pub fn aggregate_all(&mut self) {
        for stand in &mut self.stands {
            aggregate_stand(stand);
        }
    }

    /// Stands in first-seen order.
    pub fn stands(&self) -> &[Stand] {
        &self.stands
    }

    pub fn stand(&self, plot: &str) -> Option<&Stand> {
        self.index.get(plot).map(|&idx| &self.stands[idx])
    }

    pub fn num_stands(&self) -> usize {
        self.stands.len()
    }

    pub fn num_cohorts(&self) -> usize {
        self.stands.iter().map(|s| s.num_cohorts()).sum()
    }

    /// Result rows from the last aggregation, stand by stand.
    pub fn output_rows(&self) -> Vec<OutputRow> {
        self.stands
            .iter()
            .flat_map(|s| s.statistics().iter().map(OutputRow::from))
            .collect()
    }
}

/// Run a full simulation: initial values first, then mortality, then
/// aggregation of every stand.
pub fn run_simulation(
    settings: SimulationSettings,
    initial_values: Option<&[InitialValuesRecord]>,
    mortality: &[MortalityRecord],
) -> Result<StandRegistry, DecayError> {
    let mut registry = StandRegistry::new(settings)?;
    if let Some(initial) = initial_values {
        registry.add_initial_values(initial);
    }
    registry.add_mortality(mortality);
    registry.aggregate_all();
    Ok(registry)
}
