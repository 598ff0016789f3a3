use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DecayError;
use crate::models::{DecayClass, DecayModelVariant, MAX_DECAY_CLASS};

/// Parameters that control how every cohort is simulated and which snapshots
/// a stand reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Decay-rate table to use
    pub model: DecayModelVariant,
    /// Cohorts stop decaying once they reach this class, and stands only
    /// report snapshots at or below it
    pub max_decay_class: DecayClass,
    /// Last period simulated for a cohort (relative to its creation) and last
    /// period reported by a stand (absolute)
    pub max_time_step: i64,
    /// Periods advanced per simulation step; also the `t` in `exp(-alpha * t)`
    pub step_length: i64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            model: DecayModelVariant::Vector,
            max_decay_class: MAX_DECAY_CLASS,
            max_time_step: 20,
            step_length: 5,
        }
    }
}

impl SimulationSettings {
    pub fn new(model: DecayModelVariant, max_decay_class: DecayClass, max_time_step: i64) -> Self {
        Self {
            model,
            max_decay_class,
            max_time_step,
            ..Self::default()
        }
    }

    pub fn with_step_length(mut self, step_length: i64) -> Self {
        self.step_length = step_length;
        self
    }

    pub fn validate(&self) -> Result<(), DecayError> {
        if self.step_length <= 0 {
            return Err(DecayError::ValidationError(format!(
                "step_length must be positive, got {}",
                self.step_length
            )));
        }
        if self.max_time_step < 0 {
            return Err(DecayError::ValidationError(format!(
                "max_time_step must not be negative, got {}",
                self.max_time_step
            )));
        }
        Ok(())
    }
}

/// Decimal separator used when writing numbers to delimited output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecimalSeparator {
    #[default]
    Point,
    Comma,
}

impl DecimalSeparator {
    /// Format a number with this separator, shortest round-trip representation.
    pub fn format(&self, value: f64) -> String {
        let text = value.to_string();
        match self {
            DecimalSeparator::Point => text,
            DecimalSeparator::Comma => text.replace('.', ","),
        }
    }
}

impl std::str::FromStr for DecimalSeparator {
    type Err = DecayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "point" | "." | "dot" => Ok(DecimalSeparator::Point),
            "comma" | "," => Ok(DecimalSeparator::Comma),
            _ => Err(DecayError::ParseError(format!(
                "Unknown decimal separator: '{s}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub decimal_separator: DecimalSeparator,
    /// Pretty-print JSON output
    pub pretty: bool,
}

/// Top-level configuration file layout.
///
/// ```toml
/// [simulation]
/// model = "Vector"
/// max_decay_class = 4
/// max_time_step = 20
/// step_length = 5
///
/// [output]
/// decimal_separator = "comma"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    pub simulation: SimulationSettings,
    pub output: OutputSettings,
}

impl DecayConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, DecayError> {
        let config: DecayConfig = toml::from_str(content)?;
        config.simulation.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DecayError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loaded configuration");
        Self::from_toml_str(&content)
    }
}
