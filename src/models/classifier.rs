//! Density to decomposition class conversion.
//!
//! Each species has ten density thresholds (raw classes 0-9, densest first).
//! A stem takes the first raw class whose threshold its density reaches, or
//! raw class 9 when it is below all of them. The raw class is halved and
//! rounded down, giving the reported classes 0-4.

use super::species::TreeSpecies;

/// Decomposition class, 0 (fresh) through [`MAX_DECAY_CLASS`].
pub type DecayClass = u8;

/// Highest reported decomposition class.
pub const MAX_DECAY_CLASS: DecayClass = 4;

const RAW_CLASS_COUNT: usize = 10;

const BIRCH_THRESHOLDS: [f64; RAW_CLASS_COUNT] = [
    0.4745, 0.41955, 0.3646, 0.31725, 0.2699, 0.2315, 0.1931, 0.1573, 0.1215, 0.09,
];

const SPRUCE_THRESHOLDS: [f64; RAW_CLASS_COUNT] = [
    0.3060, 0.2987, 0.2915, 0.26635, 0.2412, 0.208, 0.1748, 0.15295, 0.1311, 0.11,
];

const PINE_THRESHOLDS: [f64; RAW_CLASS_COUNT] = [
    0.3360, 0.3244, 0.3128, 0.28245, 0.2521, 0.23735, 0.2226, 0.19015, 0.1577, 0.13,
];

/// Density thresholds for raw classes 0-9, or `None` for an unrecognized species.
pub fn density_thresholds(species: TreeSpecies) -> Option<&'static [f64; RAW_CLASS_COUNT]> {
    match species {
        TreeSpecies::Birch | TreeSpecies::Aspen => Some(&BIRCH_THRESHOLDS),
        TreeSpecies::Spruce => Some(&SPRUCE_THRESHOLDS),
        TreeSpecies::Pine => Some(&PINE_THRESHOLDS),
        TreeSpecies::Unrecognized(_) => None,
    }
}

/// Raw ten-step class (0-9) for a wood density.
pub fn raw_class(species: TreeSpecies, density: f64) -> u8 {
    let last = (RAW_CLASS_COUNT - 1) as u8;
    density_thresholds(species)
        .and_then(|thresholds| thresholds.iter().position(|&t| density >= t))
        .map(|idx| idx as u8)
        .unwrap_or(last)
}

/// Decomposition class (0-4) for a wood density.
pub fn classify(species: TreeSpecies, density: f64) -> DecayClass {
    raw_class(species, density) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_wood_is_class_zero() {
        assert_eq!(classify(TreeSpecies::Birch, 0.60), 0);
        assert_eq!(classify(TreeSpecies::Spruce, 0.40), 0);
        assert_eq!(classify(TreeSpecies::Pine, 0.45), 0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(raw_class(TreeSpecies::Pine, 0.2521), 4);
        assert_eq!(raw_class(TreeSpecies::Pine, 0.2520), 5);
        assert_eq!(raw_class(TreeSpecies::Spruce, 0.3060), 0);
        assert_eq!(raw_class(TreeSpecies::Birch, 0.09), 9);
    }

    #[test]
    fn test_below_lowest_threshold_is_last_class() {
        assert_eq!(raw_class(TreeSpecies::Birch, 0.01), 9);
        assert_eq!(classify(TreeSpecies::Spruce, 0.0), 4);
    }

    #[test]
    fn test_raw_classes_are_halved() {
        // raw 2 and 3 both report class 1
        assert_eq!(classify(TreeSpecies::Birch, 0.37), 1);
        assert_eq!(classify(TreeSpecies::Birch, 0.32), 1);
        // raw 4 -> class 2
        assert_eq!(classify(TreeSpecies::Birch, 0.28), 2);
    }

    #[test]
    fn test_pine_decayed_density_example() {
        let density = 0.30 * (-0.019f64 * 5.0).exp();
        assert_eq!(raw_class(TreeSpecies::Pine, density), 4);
        assert_eq!(classify(TreeSpecies::Pine, density), 2);
    }

    #[test]
    fn test_aspen_uses_birch_thresholds() {
        for d in [0.5, 0.4, 0.3, 0.2, 0.1, 0.05] {
            assert_eq!(
                classify(TreeSpecies::Aspen, d),
                classify(TreeSpecies::Birch, d)
            );
        }
    }

    #[test]
    fn test_unrecognized_species_is_most_decayed() {
        assert_eq!(classify(TreeSpecies::Unrecognized(5), 0.9), MAX_DECAY_CLASS);
    }

    #[test]
    fn test_nan_density_is_most_decayed() {
        assert_eq!(classify(TreeSpecies::Birch, f64::NAN), MAX_DECAY_CLASS);
    }

    #[test]
    fn test_thresholds_descend() {
        for species in TreeSpecies::KNOWN {
            let t = density_thresholds(species).unwrap();
            assert!(t.windows(2).all(|w| w[0] > w[1]), "{species} not descending");
        }
    }

    #[test]
    fn test_class_non_increasing_in_density() {
        for species in TreeSpecies::KNOWN {
            let mut prev = classify(species, 1.0);
            let mut d = 1.0;
            while d > 0.0 {
                let c = classify(species, d);
                assert!(c >= prev);
                assert!(c <= MAX_DECAY_CLASS);
                prev = c;
                d -= 0.001;
            }
        }
    }
}
