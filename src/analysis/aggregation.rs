use std::collections::HashMap;

use crate::models::{Stand, StandPeriodStats, TreeSpecies};

type StatsKey<'a> = (i64, TreeSpecies, &'a str);

/// Build the stand's per-(period, species, size class) statistics from its
/// cohorts, without modifying the stand.
///
/// Only snapshots inside the stand's reporting window contribute. Output
/// order is the order in which each combination is first seen.
pub fn compute_period_stats(stand: &Stand) -> Vec<StandPeriodStats> {
    let mut stats: Vec<StandPeriodStats> = Vec::new();
    let mut index: HashMap<StatsKey<'_>, usize> = HashMap::new();

    for cohort in stand.cohorts() {
        for snapshot in cohort.snapshots().iter().filter(|s| stand.reports(s)) {
            let key = (snapshot.period, cohort.species, cohort.size_class.as_str());
            let idx = *index.entry(key).or_insert_with(|| {
                stats.push(StandPeriodStats::new(
                    snapshot.period,
                    stand.plot.as_str(),
                    cohort.species,
                    cohort.size_class.as_str(),
                ));
                stats.len() - 1
            });
            stats[idx].record(snapshot, cohort.diameter_created);
        }
    }

    stats
}

/// Recompute a stand's statistics from scratch. Safe to call repeatedly.
pub fn aggregate_stand(stand: &mut Stand) {
    let stats = compute_period_stats(stand);
    tracing::debug!(
        plot = %stand.plot,
        cohorts = stand.num_cohorts(),
        rows = stats.len(),
        "aggregated stand"
    );
    stand.replace_statistics(stats);
}
