//! # Typhoon Classification
//!
//! Maps an energy level to a typhoon category scale. Category thresholds are
//! wind speeds (km/h) scaled so the top category lines up with the gyro
//! magnitude that produces full rumble intensity.

use std::fmt;

/// Storm categories and their wind-speed thresholds in km/h, ascending
const STORM_CATEGORIES: [(&str, f32); 6] = [
    ("Tropical Depression", 41.0),
    ("Tropical Storm", 63.0),
    ("Severe Tropical Storm", 88.0),
    ("Typhoon", 118.0),
    ("Severe Typhoon", 150.0),
    ("Super Typhoon", 185.0),
];

/// Wind speed of the top category; `max_magnitude` maps onto this
const TOP_CATEGORY_WIND_KMH: f32 = 185.0;

/// Label for level 0
const CALM_LABEL: &str = "Calm";

/// A classified energy level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// 0 for calm, 1..=N ascending category levels
    pub level: usize,

    /// Human-facing category name
    pub label: &'static str,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Level {}/{}: {}",
            self.level,
            STORM_CATEGORIES.len(),
            self.label
        )
    }
}

/// Static ordered list of (label, threshold magnitude) pairs
///
/// Thresholds are monotonically increasing; the table is immutable for the
/// process lifetime.
#[derive(Debug, Clone)]
pub struct ClassificationTable {
    thresholds: Vec<(&'static str, f32)>,
}

impl ClassificationTable {
    /// Build the typhoon scale for a given maximum gyro magnitude
    ///
    /// Wind-speed thresholds are scaled by `max_magnitude / 185`, so the
    /// Super Typhoon threshold equals `max_magnitude` exactly.
    pub fn typhoon_scale(max_magnitude: f32) -> Self {
        let scale = max_magnitude / TOP_CATEGORY_WIND_KMH;
        Self {
            thresholds: STORM_CATEGORIES
                .iter()
                .map(|&(label, wind_kmh)| (label, wind_kmh * scale))
                .collect(),
        }
    }

    /// Number of storm levels, excluding calm
    pub fn levels(&self) -> usize {
        self.thresholds.len()
    }

    /// Classify a gyro magnitude (or energy level)
    ///
    /// Finds the first category whose threshold is at or above the magnitude.
    /// Magnitudes at or below zero are calm (level 0); magnitudes above every
    /// threshold saturate at the top category.
    pub fn classify(&self, magnitude: f32) -> Classification {
        if magnitude <= 0.0 {
            return Classification {
                level: 0,
                label: CALM_LABEL,
            };
        }

        for (index, &(label, threshold)) in self.thresholds.iter().enumerate() {
            if magnitude <= threshold {
                return Classification {
                    level: index + 1,
                    label,
                };
            }
        }

        let (label, _) = self.thresholds[self.thresholds.len() - 1];
        Classification {
            level: self.thresholds.len(),
            label,
        }
    }
}

/// Render a fixed-width console energy bar, e.g. `[######------]`
pub fn energy_bar(energy: f32, max_energy: f32, width: usize) -> String {
    if max_energy <= 0.0 {
        return "[ ]".to_string();
    }
    let fill = (energy / max_energy).clamp(0.0, 1.0);
    let filled = (fill * width as f32) as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: f32 = 25000.0;

    fn table() -> ClassificationTable {
        ClassificationTable::typhoon_scale(MAX)
    }

    #[test]
    fn test_zero_magnitude_is_calm() {
        let c = table().classify(0.0);
        assert_eq!(c.level, 0);
        assert_eq!(c.label, "Calm");
    }

    #[test]
    fn test_negative_magnitude_is_calm() {
        assert_eq!(table().classify(-100.0).level, 0);
    }

    #[test]
    fn test_top_threshold_equals_max_magnitude() {
        // The scale is anchored so Super Typhoon sits exactly at max
        let t = table();
        let c = t.classify(MAX);
        assert_eq!(c.level, 6);
        assert_eq!(c.label, "Super Typhoon");
    }

    #[test]
    fn test_above_top_saturates() {
        let t = table();
        let c = t.classify(MAX * 10.0);
        assert_eq!(c.level, t.levels());
        assert_eq!(c.label, "Super Typhoon");
    }

    #[test]
    fn test_small_magnitude_is_lowest_category() {
        let c = table().classify(1.0);
        assert_eq!(c.level, 1);
        assert_eq!(c.label, "Tropical Depression");
    }

    #[test]
    fn test_levels_are_ascending_in_magnitude() {
        let t = table();
        let mut last_level = 0;
        for i in 0..=100 {
            let mag = MAX * i as f32 / 100.0;
            let level = t.classify(mag).level;
            assert!(level >= last_level, "level dropped at magnitude {}", mag);
            last_level = level;
        }
        assert_eq!(last_level, t.levels());
    }

    #[test]
    fn test_mid_scale_category() {
        // 118 km/h scaled: magnitude just below it classifies as Typhoon
        let t = table();
        let typhoon_threshold = 118.0 * MAX / 185.0;
        let c = t.classify(typhoon_threshold - 1.0);
        assert_eq!(c.label, "Typhoon");
        assert_eq!(c.level, 4);
    }

    #[test]
    fn test_display_format() {
        let c = table().classify(MAX);
        assert_eq!(format!("{}", c), "Level 6/6: Super Typhoon");
        let calm = table().classify(0.0);
        assert_eq!(format!("{}", calm), "Level 0/6: Calm");
    }

    #[test]
    fn test_energy_bar_empty_and_full() {
        assert_eq!(energy_bar(0.0, MAX, 10), "[----------]");
        assert_eq!(energy_bar(MAX, MAX, 10), "[##########]");
    }

    #[test]
    fn test_energy_bar_half() {
        assert_eq!(energy_bar(MAX / 2.0, MAX, 10), "[#####-----]");
    }

    #[test]
    fn test_energy_bar_clamps_overflow() {
        assert_eq!(energy_bar(MAX * 2.0, MAX, 4), "[####]");
        assert_eq!(energy_bar(-50.0, MAX, 4), "[----]");
    }

    #[test]
    fn test_energy_bar_degenerate_max() {
        assert_eq!(energy_bar(100.0, 0.0, 10), "[ ]");
    }
}
