//! Decay-rate constants.
//!
//! Each quantity decays as `X(t) = X0 * exp(-alpha * t)` with `t` in periods.
//! The rates are fixed per model variant and species; Aspen shares Birch's
//! column and unrecognized species get a rate of zero.

use serde::{Deserialize, Serialize};

use super::species::{DecayModelVariant, TreeSpecies};

/// Quantity a decay rate applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecayMetric {
    Volume,
    Biomass,
    Density,
}

impl DecayMetric {
    pub const ALL: [DecayMetric; 3] = [DecayMetric::Volume, DecayMetric::Biomass, DecayMetric::Density];

    fn row(self) -> usize {
        match self {
            DecayMetric::Volume => 0,
            DecayMetric::Biomass => 1,
            DecayMetric::Density => 2,
        }
    }
}

impl std::fmt::Display for DecayMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecayMetric::Volume => write!(f, "Volume"),
            DecayMetric::Biomass => write!(f, "Biomass"),
            DecayMetric::Density => write!(f, "Density"),
        }
    }
}

// [metric][species column], columns: Birch/Aspen, Spruce, Pine
const ONE_TIME_REGRESSION: [[f64; 3]; 3] = [
    [0.013, 0.013, 0.010],
    [0.046, 0.033, 0.035],
    [0.042, 0.027, 0.024],
];

const VECTOR: [[f64; 3]; 3] = [
    [0.025, 0.032, 0.039],
    [0.108, 0.067, 0.050],
    [0.083, 0.037, 0.019],
];

fn species_column(species: TreeSpecies) -> Option<usize> {
    match species {
        TreeSpecies::Birch | TreeSpecies::Aspen => Some(0),
        TreeSpecies::Spruce => Some(1),
        TreeSpecies::Pine => Some(2),
        TreeSpecies::Unrecognized(_) => None,
    }
}

/// Decay rate per period for one metric, model variant and species.
pub fn alpha(metric: DecayMetric, model: DecayModelVariant, species: TreeSpecies) -> f64 {
    let table = match model {
        DecayModelVariant::OneTimeRegression => &ONE_TIME_REGRESSION,
        DecayModelVariant::Vector => &VECTOR,
    };
    species_column(species)
        .map(|col| table[metric.row()][col])
        .unwrap_or(0.0)
}

/// The three decay rates for one species under one model variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayRates {
    pub volume: f64,
    pub biomass: f64,
    pub density: f64,
}

impl DecayRates {
    pub fn lookup(model: DecayModelVariant, species: TreeSpecies) -> Self {
        Self {
            volume: alpha(DecayMetric::Volume, model, species),
            biomass: alpha(DecayMetric::Biomass, model, species),
            density: alpha(DecayMetric::Density, model, species),
        }
    }
}
