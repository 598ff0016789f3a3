use std::path::Path;

use crate::error::DecayError;

use super::records::OutputRow;

/// Write result rows as a JSON array. Unavailable averages become `null`.
pub fn write_results_json(
    rows: &[OutputRow],
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), DecayError> {
    let content = if pretty {
        serde_json::to_string_pretty(rows)?
    } else {
        serde_json::to_string(rows)?
    };
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}

/// Read result rows previously written by [`write_results_json`].
pub fn read_results_json(path: impl AsRef<Path>) -> Result<Vec<OutputRow>, DecayError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}
