use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::analysis::PeriodSummary;
use crate::models::{alpha, density_thresholds, DecayMetric, DecayModelVariant, TreeSpecies};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format the per-period dead-wood summary as a string.
pub fn format_period_table(summaries: &[PeriodSummary]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Dead Wood by Period".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    if summaries.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let mut table = new_table();
    table.set_header(vec![
        "Period",
        "Plots",
        "Stems",
        "Volume",
        "Biomass",
        "Mean Plot Vol",
        "Plot Vol SD",
    ]);

    for s in summaries {
        table.add_row(vec![
            Cell::new(s.period),
            Cell::new(s.plots),
            Cell::new(format!("{:.1}", s.stems)),
            Cell::new(format!("{:.3}", s.volume)),
            Cell::new(format!("{:.3}", s.biomass)),
            Cell::new(format!("{:.3}", s.mean_plot_volume)),
            Cell::new(
                s.plot_volume_std_dev
                    .map(|sd| format!("{sd:.3}"))
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print the per-period dead-wood summary.
pub fn print_period_table(summaries: &[PeriodSummary]) {
    print!("{}", format_period_table(summaries));
}

/// Format the decay-rate constants of both model variants and the density
/// thresholds of the decomposition classes.
pub fn format_parameter_table() -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Decay Rates (per year)".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table();
    let mut header = vec!["Model".to_string(), "Metric".to_string()];
    header.extend(TreeSpecies::KNOWN.iter().map(|s| s.to_string()));
    table.set_header(header);

    for model in DecayModelVariant::ALL {
        for metric in DecayMetric::ALL {
            let mut row = vec![Cell::new(model), Cell::new(metric)];
            row.extend(
                TreeSpecies::KNOWN
                    .iter()
                    .map(|&sp| Cell::new(format!("{:.5}", alpha(metric, model, sp)))),
            );
            table.add_row(row);
        }
    }
    output.push_str(&format!("{table}\n"));

    output.push_str(&format!("\n{}\n", "Density Thresholds (raw class 0-9)".bold().green()));
    output.push_str(&format!(
        "{}\n",
        "Decomposition class = raw class / 2".dimmed()
    ));

    let mut thresholds = new_table();
    let mut header = vec!["Raw".to_string()];
    header.extend(TreeSpecies::KNOWN.iter().map(|s| s.to_string()));
    thresholds.set_header(header);

    for raw in 0..10 {
        let mut row = vec![Cell::new(raw)];
        row.extend(TreeSpecies::KNOWN.iter().map(|&sp| {
            match density_thresholds(sp) {
                Some(t) => Cell::new(format!("{:.4}", t[raw])),
                None => Cell::new("-"),
            }
        }));
        thresholds.add_row(row);
    }
    output.push_str(&format!("{thresholds}"));
    output
}

/// Print the decay-rate constants and class thresholds.
pub fn print_parameter_table() {
    print!("{}", format_parameter_table());
}
