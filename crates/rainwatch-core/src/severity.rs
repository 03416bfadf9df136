//! Rainfall severity classification
//!
//! Maintains parity with the upstream agency's published intensity table.
//! Boundaries are closed intervals evaluated in ascending order; values in
//! the 0.05 mm gaps between bands (and negatives) fall through to `Unknown`.

use serde::{Deserialize, Serialize};

use crate::types::StationReading;

/// Discrete rainfall-intensity tier derived from the millimetre value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    None,
    Light,
    Moderate,
    Heavy,
    Storm,
    HeavyStorm,
    ExtremeStorm,
    Unknown,
}

impl Severity {
    /// Human-readable tier label
    pub fn label(&self) -> &'static str {
        match self {
            Severity::None => "No rain",
            Severity::Light => "Light rain",
            Severity::Moderate => "Moderate rain",
            Severity::Heavy => "Heavy rain",
            Severity::Storm => "Rainstorm",
            Severity::HeavyStorm => "Heavy rainstorm",
            Severity::ExtremeStorm => "Extreme rainstorm",
            Severity::Unknown => "Unknown",
        }
    }

    /// Fixed display color (hex), a static lookup rather than anything computed
    pub fn color(&self) -> &'static str {
        match self {
            Severity::None => "#6b7280",
            Severity::Light => "#16a34a",
            Severity::Moderate => "#ca8a04",
            Severity::Heavy => "#ea580c",
            Severity::Storm => "#dc2626",
            Severity::HeavyStorm => "#9333ea",
            Severity::ExtremeStorm => "#db2777",
            Severity::Unknown => "#6b7280",
        }
    }
}

/// Classify an accumulated rainfall value into its severity tier.
///
/// Total over all inputs: any value not covered by a band (negatives,
/// gap values such as 9.95) maps to `Severity::Unknown`.
pub fn classify(rain_mm: f64) -> Severity {
    if rain_mm == 0.0 {
        Severity::None
    } else if (0.1..=9.9).contains(&rain_mm) {
        Severity::Light
    } else if (10.0..=24.9).contains(&rain_mm) {
        Severity::Moderate
    } else if (25.0..=49.9).contains(&rain_mm) {
        Severity::Heavy
    } else if (50.0..=99.9).contains(&rain_mm) {
        Severity::Storm
    } else if (100.0..=249.9).contains(&rain_mm) {
        Severity::HeavyStorm
    } else if rain_mm >= 250.0 {
        Severity::ExtremeStorm
    } else {
        Severity::Unknown
    }
}

/// Per-tier tallies over a reading list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub total: usize,
    pub none: usize,
    pub light: usize,
    pub moderate: usize,
    pub heavy: usize,
    pub storm: usize,
    pub heavy_storm: usize,
    pub extreme_storm: usize,
    pub unknown: usize,
}

impl SeverityCounts {
    /// Tally severities over a reading list. One O(n) scan, no ordering
    /// requirement.
    pub fn tally(readings: &[StationReading]) -> Self {
        let mut counts = Self::default();
        for reading in readings {
            counts.total += 1;
            match classify(reading.rain) {
                Severity::None => counts.none += 1,
                Severity::Light => counts.light += 1,
                Severity::Moderate => counts.moderate += 1,
                Severity::Heavy => counts.heavy += 1,
                Severity::Storm => counts.storm += 1,
                Severity::HeavyStorm => counts.heavy_storm += 1,
                Severity::ExtremeStorm => counts.extreme_storm += 1,
                Severity::Unknown => counts.unknown += 1,
            }
        }
        counts
    }

    /// Combined ≥100 mm summary bucket
    pub fn torrential(&self) -> usize {
        self.heavy_storm + self.extreme_storm
    }

    /// Sum across every tier; always equals `total`
    pub fn sum(&self) -> usize {
        self.none
            + self.light
            + self.moderate
            + self.heavy
            + self.storm
            + self.heavy_storm
            + self.extreme_storm
            + self.unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(no: &str, rain: f64) -> StationReading {
        StationReading {
            station_no: no.to_string(),
            station_name: format!("Station {no}"),
            rec_time: "202401151230".to_string(),
            rain,
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(classify(0.0), Severity::None);
        assert_eq!(classify(0.1), Severity::Light);
        assert_eq!(classify(9.9), Severity::Light);
        assert_eq!(classify(10.0), Severity::Moderate);
        assert_eq!(classify(24.9), Severity::Moderate);
        assert_eq!(classify(25.0), Severity::Heavy);
        assert_eq!(classify(49.9), Severity::Heavy);
        assert_eq!(classify(50.0), Severity::Storm);
        assert_eq!(classify(99.9), Severity::Storm);
        assert_eq!(classify(100.0), Severity::HeavyStorm);
        assert_eq!(classify(249.9), Severity::HeavyStorm);
        assert_eq!(classify(250.0), Severity::ExtremeStorm);
        assert_eq!(classify(1000.0), Severity::ExtremeStorm);
    }

    #[test]
    fn test_negative_and_gap_values_are_unknown() {
        assert_eq!(classify(-1.0), Severity::Unknown);
        assert_eq!(classify(-0.1), Severity::Unknown);
        assert_eq!(classify(0.05), Severity::Unknown);
        assert_eq!(classify(9.95), Severity::Unknown);
    }

    #[test]
    fn test_labels_and_colors_are_static() {
        assert_eq!(Severity::None.label(), "No rain");
        assert_eq!(Severity::ExtremeStorm.label(), "Extreme rainstorm");
        assert_eq!(Severity::Light.color(), "#16a34a");
        assert_eq!(Severity::Unknown.color(), Severity::None.color());
    }

    #[test]
    fn test_severity_serde_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Severity::HeavyStorm).unwrap(),
            "\"heavy-storm\""
        );
    }

    #[test]
    fn test_counts_sum_to_list_length() {
        let readings = vec![
            reading("1", 0.0),
            reading("2", 5.0),
            reading("3", 12.0),
            reading("4", 30.0),
            reading("5", 75.0),
            reading("6", 120.0),
            reading("7", 300.0),
            reading("8", -2.0),
        ];
        let counts = SeverityCounts::tally(&readings);
        assert_eq!(counts.total, readings.len());
        assert_eq!(counts.sum(), readings.len());
        assert_eq!(counts.none, 1);
        assert_eq!(counts.light, 1);
        assert_eq!(counts.moderate, 1);
        assert_eq!(counts.unknown, 1);
        assert_eq!(counts.torrential(), 2);
    }

    #[test]
    fn test_counts_empty_list() {
        let counts = SeverityCounts::tally(&[]);
        assert_eq!(counts.total, 0);
        assert_eq!(counts.sum(), 0);
        assert_eq!(counts.torrential(), 0);
    }
}
