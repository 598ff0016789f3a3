use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::models::Stand;

/// Dead-wood totals for one period across all stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period: i64,
    /// Stands reporting at least one row for this period
    pub plots: usize,
    pub stems: f64,
    pub volume: f64,
    pub biomass: f64,
    /// Mean total volume per reporting plot
    pub mean_plot_volume: f64,
    /// Sample standard deviation of plot volume, `None` with fewer than two plots
    pub plot_volume_std_dev: Option<f64>,
}

#[derive(Default)]
struct PlotTotals {
    stems: f64,
    volume: f64,
    biomass: f64,
}

/// Summarize aggregated stands by period, sorted by period.
///
/// Uses each stand's current statistics, so stands should be aggregated first.
pub fn summarize_periods(stands: &[Stand]) -> Vec<PeriodSummary> {
    let mut by_period: BTreeMap<i64, Vec<PlotTotals>> = BTreeMap::new();

    for stand in stands {
        let mut per_period: BTreeMap<i64, PlotTotals> = BTreeMap::new();
        for stats in stand.statistics() {
            let totals = per_period.entry(stats.period).or_default();
            totals.stems += stats.number_of_stems();
            totals.volume += stats.volume();
            totals.biomass += stats.biomass();
        }
        for (period, totals) in per_period {
            by_period.entry(period).or_default().push(totals);
        }
    }

    by_period
        .into_iter()
        .map(|(period, plots)| {
            let volumes: Vec<f64> = plots.iter().map(|p| p.volume).collect();
            let plot_volume_std_dev = if volumes.len() >= 2 {
                Some(volumes.iter().std_dev())
            } else {
                None
            };
            PeriodSummary {
                period,
                plots: plots.len(),
                stems: plots.iter().map(|p| p.stems).sum(),
                volume: volumes.iter().sum(),
                biomass: plots.iter().map(|p| p.biomass).sum(),
                mean_plot_volume: volumes.iter().mean(),
                plot_volume_std_dev,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate_stand;
    use crate::config::SimulationSettings;
    use crate::models::{Cohort, CohortInput, DecayModelVariant, TreeSpecies};
    use assert_approx_eq::assert_approx_eq;

    fn stand(plot: &str, volume: f64, settings: &SimulationSettings) -> Stand {
        let mut stand = Stand::new(plot, settings);
        stand.add_cohort(Cohort::new(
            plot,
            CohortInput {
                species: TreeSpecies::Pine,
                size_class: "1".to_string(),
                created_period: 0,
                stems: 2.0,
                volume,
                biomass: volume * 0.4,
                diameter: 20.0,
            },
            settings,
        ));
        aggregate_stand(&mut stand);
        stand
    }

    #[test]
    fn test_single_period_totals() {
        let settings = SimulationSettings::new(DecayModelVariant::Vector, 4, 0);
        let stands = vec![stand("A", 1.0, &settings), stand("B", 3.0, &settings)];
        let summary = summarize_periods(&stands);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].period, 0);
        assert_eq!(summary[0].plots, 2);
        assert_approx_eq!(summary[0].stems, 4.0, 1e-12);
        assert_approx_eq!(summary[0].volume, 4.0, 1e-12);
        assert_approx_eq!(summary[0].mean_plot_volume, 2.0, 1e-12);
        assert_approx_eq!(summary[0].plot_volume_std_dev.unwrap(), 2f64.sqrt(), 1e-12);
    }

    #[test]
    fn test_periods_sorted_and_single_plot_has_no_std_dev() {
        let settings = SimulationSettings::new(DecayModelVariant::Vector, 4, 10);
        let summary = summarize_periods(&[stand("A", 1.0, &settings)]);
        let periods: Vec<i64> = summary.iter().map(|s| s.period).collect();
        assert_eq!(periods, vec![0, 5, 10]);
        assert!(summary.iter().all(|s| s.plot_volume_std_dev.is_none()));
        assert!(summary[1].volume < summary[0].volume);
    }

    #[test]
    fn test_no_stands_no_summary() {
        assert!(summarize_periods(&[]).is_empty());
    }
}
