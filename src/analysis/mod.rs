mod aggregation;
mod registry;
mod summary;

pub use aggregation::{aggregate_stand, compute_period_stats};
pub use registry::{run_simulation, StandRegistry};
pub use summary::{summarize_periods, PeriodSummary};
