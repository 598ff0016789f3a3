use serde::{Deserialize, Serialize};

use super::classifier::{classify, DecayClass};
use super::parameters::DecayRates;
use super::species::{DecayModelVariant, TreeSpecies};
use crate::config::SimulationSettings;

/// Quantities that change as a cohort decays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayState {
    pub stems: f64,
    pub volume: f64,
    pub biomass: f64,
    pub density: f64,
}

impl DecayState {
    /// Advance by `step_length` periods. Stem count is not affected by decay.
    pub fn decayed(&self, rates: &DecayRates, step_length: f64) -> Self {
        Self {
            stems: self.stems,
            volume: self.volume * (-rates.volume * step_length).exp(),
            biomass: self.biomass * (-rates.biomass * step_length).exp(),
            density: self.density * (-rates.density * step_length).exp(),
        }
    }
}

/// State of one cohort at one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSnapshot {
    pub period: i64,
    pub species: TreeSpecies,
    pub model: DecayModelVariant,
    pub stems: f64,
    pub volume: f64,
    pub biomass: f64,
    pub density: f64,
    pub decay_class: DecayClass,
}

impl CohortSnapshot {
    fn new(period: i64, species: TreeSpecies, model: DecayModelVariant, state: DecayState) -> Self {
        Self {
            period,
            species,
            model,
            stems: state.stems,
            volume: state.volume,
            biomass: state.biomass,
            density: state.density,
            decay_class: classify(species, state.density),
        }
    }

    fn state(&self) -> DecayState {
        DecayState {
            stems: self.stems,
            volume: self.volume,
            biomass: self.biomass,
            density: self.density,
        }
    }
}

/// Simulate the decay of one cohort from its creation period.
///
/// The first snapshot holds the undecayed `initial` state at `created_period`.
/// Each further snapshot advances `step_length` periods. Simulation stops after
/// the first snapshot whose class reaches `max_decay_class`, or once another
/// step would pass `created_period + max_time_step`. Always returns at least
/// one snapshot.
pub fn simulate(
    species: TreeSpecies,
    settings: &SimulationSettings,
    created_period: i64,
    initial: DecayState,
) -> Vec<CohortSnapshot> {
    let rates = DecayRates::lookup(settings.model, species);
    let step = settings.step_length.max(1);
    let last_period = created_period.saturating_add(settings.max_time_step);

    let mut snapshots = vec![CohortSnapshot::new(created_period, species, settings.model, initial)];

    while let Some(last) = snapshots.last() {
        if last.decay_class >= settings.max_decay_class {
            break;
        }
        let next_period = match last.period.checked_add(step) {
            Some(p) if p <= last_period => p,
            _ => break,
        };
        let next = CohortSnapshot::new(
            next_period,
            species,
            settings.model,
            last.state().decayed(&rates, step as f64),
        );
        snapshots.push(next);
    }

    snapshots
}

/// Values a cohort is created from, one per mortality or initial-values row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortInput {
    pub species: TreeSpecies,
    pub size_class: String,
    pub created_period: i64,
    pub stems: f64,
    pub volume: f64,
    pub biomass: f64,
    pub diameter: f64,
}

impl CohortInput {
    /// Wood density derived from biomass per unit volume.
    pub fn density(&self) -> f64 {
        self.biomass / self.volume
    }
}

/// A batch of dead stems of one species and size class created in one plot
/// at one period, together with its full decay trajectory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cohort {
    pub plot: String,
    pub species: TreeSpecies,
    pub size_class: String,
    pub model: DecayModelVariant,
    pub created_period: i64,
    pub stems_created: f64,
    pub volume_created: f64,
    pub biomass_created: f64,
    /// Diameter at breast height when created; diameter does not decay
    pub diameter_created: f64,
    snapshots: Vec<CohortSnapshot>,
}

impl Cohort {
    /// Create a cohort and simulate its decay right away.
    pub fn new(plot: impl Into<String>, input: CohortInput, settings: &SimulationSettings) -> Self {
        let plot = plot.into();
        let initial = DecayState {
            stems: input.stems,
            volume: input.volume,
            biomass: input.biomass,
            density: input.density(),
        };
        let snapshots = simulate(input.species, settings, input.created_period, initial);
        tracing::debug!(
            plot = %plot,
            species = %input.species,
            size_class = %input.size_class,
            period = input.created_period,
            snapshots = snapshots.len(),
            "simulated cohort"
        );

        Self {
            plot,
            species: input.species,
            size_class: input.size_class,
            model: settings.model,
            created_period: input.created_period,
            stems_created: input.stems,
            volume_created: input.volume,
            biomass_created: input.biomass,
            diameter_created: input.diameter,
            snapshots,
        }
    }

    pub fn snapshots(&self) -> &[CohortSnapshot] {
        &self.snapshots
    }

    /// Decomposition class at creation.
    pub fn initial_decay_class(&self) -> DecayClass {
        self.snapshots[0].decay_class
    }
}
