//! Lead temperature classification

use serde::{Deserialize, Serialize};

use visa_crm_config::TemperatureThresholds;

/// Marker shown instead of the score for a disqualified lead
pub const DISQUALIFIED_SCORE_DISPLAY: &str = "✗";

/// Temperature tier of a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temperature {
    Disqualified,
    VeryHot,
    Hot,
    Warm,
    Cold,
    /// Score below the cold tier
    NotStarted,
}

impl Temperature {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Disqualified => "Disqualified",
            Self::VeryHot => "Very hot lead",
            Self::Hot => "Hot lead",
            Self::Warm => "Warm lead",
            Self::Cold => "Cold lead",
            Self::NotStarted => "Not started",
        }
    }

    pub fn color(&self) -> ColorTag {
        match self {
            Self::Disqualified | Self::Cold => ColorTag::Red,
            Self::VeryHot | Self::Hot => ColorTag::Green,
            Self::Warm => ColorTag::Amber,
            Self::NotStarted => ColorTag::Gray,
        }
    }
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Display colour category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTag {
    Green,
    Amber,
    Red,
    Gray,
}

/// Everything the score panel shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemperatureInfo {
    pub temperature: Temperature,
    pub label: &'static str,
    pub color: ColorTag,
    pub score_display: String,
}

/// Classify with the default tiers
pub fn classify(score: i32, disqualified: bool) -> TemperatureInfo {
    classify_with(&TemperatureThresholds::default(), score, disqualified)
}

pub fn classify_with(
    thresholds: &TemperatureThresholds,
    score: i32,
    disqualified: bool,
) -> TemperatureInfo {
    let temperature = if disqualified {
        Temperature::Disqualified
    } else if score >= thresholds.very_hot {
        Temperature::VeryHot
    } else if score >= thresholds.hot {
        Temperature::Hot
    } else if score >= thresholds.warm {
        Temperature::Warm
    } else if score >= thresholds.cold {
        Temperature::Cold
    } else {
        Temperature::NotStarted
    };

    let score_display = if disqualified {
        DISQUALIFIED_SCORE_DISPLAY.to_string()
    } else {
        score.to_string()
    };

    TemperatureInfo {
        temperature,
        label: temperature.label(),
        color: temperature.color(),
        score_display,
    }
}
