use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::config::FitConfig;
use super::rules::{ACTIVITY_CAP, GRADE_CAP, RANK_SPAN};
use crate::admissions::records::{BEST_RANK, WORST_RANK};

pub const MIN_PROBABILITY: f64 = 5.0;
pub const MAX_PROBABILITY: f64 = 95.0;

/// Width of the inner probability branches on either side of the threshold.
const CONFIDENCE_WINDOW: f64 = 10.0;

/// Ordinal admission fit. Variant order is the ranking order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FitTier {
    #[serde(alias = "unlikely")]
    Unlikely,
    #[serde(alias = "challenge")]
    Challenge,
    #[default]
    #[serde(alias = "fit")]
    Fit,
}

impl FitTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unlikely => "UNLIKELY",
            Self::Challenge => "CHALLENGE",
            Self::Fit => "FIT",
        }
    }
}

impl fmt::Display for FitTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fit tier '{0}' (expected FIT, CHALLENGE, or UNLIKELY)")]
pub struct ParseFitTierError(pub String);

impl FromStr for FitTier {
    type Err = ParseFitTierError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "FIT" => Ok(Self::Fit),
            "CHALLENGE" => Ok(Self::Challenge),
            "UNLIKELY" => Ok(Self::Unlikely),
            _ => Err(ParseFitTierError(value.to_string())),
        }
    }
}

/// Score a composite must reach to be classified FIT.
///
/// A published cutoff grade is mapped onto the grade-score scale plus the activity cap.
pub fn fit_threshold(cutoff_grade: Option<f64>, config: &FitConfig) -> f64 {
    match cutoff_grade {
        Some(cutoff) if cutoff.is_finite() => {
            let cutoff = cutoff.clamp(f64::from(BEST_RANK), f64::from(WORST_RANK));
            (f64::from(WORST_RANK) - cutoff) / RANK_SPAN * GRADE_CAP + ACTIVITY_CAP
        }
        _ => config.default_threshold,
    }
}

pub fn classify(score: f64, threshold: f64, challenge_band: f64) -> FitTier {
    if score >= threshold {
        FitTier::Fit
    } else if score >= threshold - challenge_band {
        FitTier::Challenge
    } else {
        FitTier::Unlikely
    }
}

/// Piecewise admission probability in percent, clamped to `[5, 95]`.
pub fn estimate_probability(score: f64, threshold: f64) -> f64 {
    let distance = score - threshold;

    let raw = if distance >= CONFIDENCE_WINDOW {
        (70.0 + (distance - CONFIDENCE_WINDOW) * 1.5).min(MAX_PROBABILITY)
    } else if distance >= 0.0 {
        50.0 + distance * 2.0
    } else if distance >= -CONFIDENCE_WINDOW {
        30.0 + (distance + CONFIDENCE_WINDOW) * 2.0
    } else {
        (30.0 + (distance + CONFIDENCE_WINDOW) * 2.0).max(MIN_PROBABILITY)
    };

    raw.clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}
