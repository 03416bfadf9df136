//! Core data types for rain-gauge station readings

use serde::{Deserialize, Serialize};

/// One rain gauge's latest reported rainfall and timestamp.
///
/// Readings are immutable once received and replaced wholesale on each
/// successful fetch. `station_no` is the uniqueness key; the upstream
/// guarantees at most one entry per station per payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationReading {
    /// Station identifier
    #[serde(rename = "stationNo")]
    pub station_no: String,

    /// Human-readable station name
    #[serde(rename = "stationName")]
    pub station_name: String,

    /// Compact recording timestamp, `YYYYMMDDHHMM`
    #[serde(rename = "recTime")]
    pub rec_time: String,

    /// Accumulated rainfall in millimetres
    pub rain: f64,
}

/// Upstream payload envelope: the station list plus a statistics block
/// that is passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RainApiResponse {
    pub count: u32,

    #[serde(default)]
    pub data: Vec<StationReading>,

    #[serde(default)]
    pub statistic_count: u32,

    #[serde(default)]
    pub statistic_data: Vec<serde_json::Value>,
}

/// Font-size display preference, persisted as a JSON-encoded string
/// under the `"fontSize"` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            FontSize::Small => "Small",
            FontSize::Medium => "Medium",
            FontSize::Large => "Large",
        }
    }
}
