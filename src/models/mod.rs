mod species;
mod parameters;
mod classifier;
mod cohort;
mod stand;

pub use species::{TreeSpecies, DecayModelVariant};
pub use parameters::{alpha, DecayMetric, DecayRates};
pub use classifier::{classify, density_thresholds, raw_class, DecayClass, MAX_DECAY_CLASS};
pub use cohort::{simulate, Cohort, CohortInput, CohortSnapshot, DecayState};
pub use stand::{Stand, StandPeriodStats, UNKNOWN_DIAMETER};
