use serde::{Deserialize, Serialize};

/// one visual classification bucket: edges whose frequency strictly exceeds
/// `threshold` (trips per hour) earn this color and stroke width, unless a
/// later tier also matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorTier {
    pub threshold: f64,
    pub color: String,
    pub width: f64,
}

impl ColorTier {
    pub fn new(threshold: f64, color: &str, width: f64) -> ColorTier {
        ColorTier {
            threshold,
            color: color.to_string(),
            width,
        }
    }
}

/// select the tier for a frequency. tiers are visited in their configured
/// order and each tier whose threshold is strictly exceeded overwrites the
/// selection; the first tier is the fallback, so any non-negative frequency
/// earns at least the lowest tier. ties at an exact threshold keep the
/// earlier selection (strict `>`, never `>=`). do not reorder tiers before
/// calling: the overwrite semantics are order-dependent.
pub fn select_tier(tiers: &[ColorTier], frequency: f64) -> Option<&ColorTier> {
    let mut selected = tiers.first()?;
    for tier in tiers {
        if frequency > tier.threshold {
            selected = tier;
        }
    }
    Some(selected)
}

#[cfg(test)]
mod test {
    use super::{select_tier, ColorTier};

    fn tiers() -> Vec<ColorTier> {
        vec![
            ColorTier::new(0.0, "#fdcc8a", 2.0),
            ColorTier::new(3.0, "#fc8d59", 4.0),
            ColorTier::new(8.0, "#d7301f", 6.0),
        ]
    }

    #[test]
    fn test_zero_frequency_earns_lowest_tier() {
        let tiers = tiers();
        assert_eq!(select_tier(&tiers, 0.0), Some(&tiers[0]));
    }

    #[test]
    fn test_exact_threshold_keeps_lower_tier() {
        let tiers = tiers();
        assert_eq!(select_tier(&tiers, 3.0), Some(&tiers[0]));
        assert_eq!(select_tier(&tiers, 8.0), Some(&tiers[1]));
    }

    #[test]
    fn test_just_above_threshold_advances() {
        let tiers = tiers();
        assert_eq!(select_tier(&tiers, 3.01), Some(&tiers[1]));
    }

    #[test]
    fn test_large_frequency_earns_highest_tier() {
        let tiers = tiers();
        assert_eq!(select_tier(&tiers, 100.0), Some(&tiers[2]));
    }

    #[test]
    fn test_empty_tier_list() {
        assert_eq!(select_tier(&[], 1.0), None);
    }
}
