pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

pub use analysis::{run_simulation, StandRegistry};
pub use config::{DecayConfig, SimulationSettings};
pub use error::DecayError;
pub use io::{RecordSource, ResultWriter};
pub use models::{Cohort, CohortSnapshot, DecayModelVariant, Stand, StandPeriodStats, TreeSpecies};
