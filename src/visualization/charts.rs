use colored::Colorize;

use crate::analysis::PeriodSummary;

/// Format a text bar chart of total dead-wood volume per period.
pub fn format_volume_chart(summaries: &[PeriodSummary]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Dead-wood Volume".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if summaries.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let max_volume = summaries.iter().map(|s| s.volume).fold(0.0f64, f64::max);

    let bar_width = 40;

    output.push_str(&format!("  {:>8}  {:>10}  Volume\n", "Period", "Total"));
    output.push_str(&format!("  {}\n", "-".repeat(64)));

    for s in summaries {
        let bar_len = if max_volume > 0.0 {
            ((s.volume / max_volume) * bar_width as f64).round() as usize
        } else {
            0
        };

        let bar = "\u{2588}".repeat(bar_len);

        output.push_str(&format!(
            "  {:>8}  {:>10.3}  {}\n",
            s.period,
            s.volume,
            bar.green()
        ));
    }

    output.push('\n');
    output
}

/// Print a text bar chart of total dead-wood volume per period.
pub fn print_volume_chart(summaries: &[PeriodSummary]) {
    print!("{}", format_volume_chart(summaries));
}
