use serde::{Deserialize, Serialize};

use crate::error::DecayError;

/// Tree species handled by the decay models.
///
/// Aspen has no parameters of its own and decays exactly as Birch.
/// `Unrecognized` carries a numeric species code outside the known set; such
/// stems get no decay and are classified as fully decomposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeSpecies {
    Birch,
    Spruce,
    Aspen,
    Pine,
    Unrecognized(i32),
}

impl TreeSpecies {
    /// The four species with parameterized decay.
    pub const KNOWN: [TreeSpecies; 4] = [
        TreeSpecies::Birch,
        TreeSpecies::Spruce,
        TreeSpecies::Aspen,
        TreeSpecies::Pine,
    ];

    /// Map a numeric species code (0 = Birch, 1 = Spruce, 2 = Aspen, 3 = Pine).
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => TreeSpecies::Birch,
            1 => TreeSpecies::Spruce,
            2 => TreeSpecies::Aspen,
            3 => TreeSpecies::Pine,
            other => TreeSpecies::Unrecognized(other),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TreeSpecies::Unrecognized(_))
    }
}

impl std::fmt::Display for TreeSpecies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeSpecies::Birch => write!(f, "Birch"),
            TreeSpecies::Spruce => write!(f, "Spruce"),
            TreeSpecies::Aspen => write!(f, "Aspen"),
            TreeSpecies::Pine => write!(f, "Pine"),
            TreeSpecies::Unrecognized(code) => write!(f, "{code}"),
        }
    }
}

impl std::str::FromStr for TreeSpecies {
    type Err = DecayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "birch" => Ok(TreeSpecies::Birch),
            "spruce" => Ok(TreeSpecies::Spruce),
            "aspen" => Ok(TreeSpecies::Aspen),
            "pine" => Ok(TreeSpecies::Pine),
            _ => {
                let code: i32 = trimmed.parse().map_err(|_| {
                    DecayError::ParseError(format!("Unknown tree species: '{s}'"))
                })?;
                let species = TreeSpecies::from_code(code);
                if !species.is_known() {
                    tracing::warn!(
                        code,
                        "species code outside the known set; stems will not decay"
                    );
                }
                Ok(species)
            }
        }
    }
}

/// Which constant table the decay rates are taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DecayModelVariant {
    OneTimeRegression,
    #[default]
    Vector,
}

impl DecayModelVariant {
    pub const ALL: [DecayModelVariant; 2] =
        [DecayModelVariant::OneTimeRegression, DecayModelVariant::Vector];
}

impl std::fmt::Display for DecayModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecayModelVariant::OneTimeRegression => write!(f, "OneTimeRegression"),
            DecayModelVariant::Vector => write!(f, "Vector"),
        }
    }
}

impl std::str::FromStr for DecayModelVariant {
    type Err = DecayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "onetimeregression" | "one-time-regression" | "otr" | "0" => {
                Ok(DecayModelVariant::OneTimeRegression)
            }
            "vector" | "1" => Ok(DecayModelVariant::Vector),
            _ => Err(DecayError::ParseError(format!(
                "Unknown decay model: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_from_name() {
        assert_eq!("Birch".parse::<TreeSpecies>().unwrap(), TreeSpecies::Birch);
        assert_eq!("spruce".parse::<TreeSpecies>().unwrap(), TreeSpecies::Spruce);
        assert_eq!(" ASPEN ".parse::<TreeSpecies>().unwrap(), TreeSpecies::Aspen);
        assert_eq!("Pine".parse::<TreeSpecies>().unwrap(), TreeSpecies::Pine);
    }

    #[test]
    fn test_species_from_numeric_code() {
        assert_eq!("0".parse::<TreeSpecies>().unwrap(), TreeSpecies::Birch);
        assert_eq!("1".parse::<TreeSpecies>().unwrap(), TreeSpecies::Spruce);
        assert_eq!("2".parse::<TreeSpecies>().unwrap(), TreeSpecies::Aspen);
        assert_eq!("3".parse::<TreeSpecies>().unwrap(), TreeSpecies::Pine);
    }

    #[test]
    fn test_species_out_of_range_code_is_unrecognized() {
        let sp: TreeSpecies = "7".parse().unwrap();
        assert_eq!(sp, TreeSpecies::Unrecognized(7));
        assert!(!sp.is_known());
        assert_eq!(sp.to_string(), "7");
    }

    #[test]
    fn test_species_unparseable_is_error() {
        let err = "Oak".parse::<TreeSpecies>().unwrap_err();
        assert!(matches!(err, DecayError::ParseError(_)));
        assert!("".parse::<TreeSpecies>().is_err());
    }

    #[test]
    fn test_species_display_roundtrip() {
        for sp in TreeSpecies::KNOWN {
            assert_eq!(sp.to_string().parse::<TreeSpecies>().unwrap(), sp);
        }
    }

    #[test]
    fn test_model_variant_parse() {
        assert_eq!(
            "OneTimeRegression".parse::<DecayModelVariant>().unwrap(),
            DecayModelVariant::OneTimeRegression
        );
        assert_eq!(
            "vector".parse::<DecayModelVariant>().unwrap(),
            DecayModelVariant::Vector
        );
        assert!("linear".parse::<DecayModelVariant>().is_err());
    }

    #[test]
    fn test_model_variant_default_is_vector() {
        assert_eq!(DecayModelVariant::default(), DecayModelVariant::Vector);
    }
}
