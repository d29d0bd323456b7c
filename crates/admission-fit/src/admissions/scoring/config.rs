use serde::{Deserialize, Serialize};

/// Tuning for the fit classifier and the improvement planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitConfig {
    /// Threshold used when a school has no published cutoff.
    pub default_threshold: f64,
    /// Width of the CHALLENGE band below the threshold.
    pub challenge_band: f64,
    /// Target score the planner aims for when the requested tier is UNLIKELY.
    pub unlikely_target_score: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            default_threshold: 60.0,
            challenge_band: 15.0,
            unlikely_target_score: 40.0,
        }
    }
}
