mod classifier;
mod config;
pub(crate) mod rules;

pub use classifier::{
    classify, estimate_probability, fit_threshold, FitTier, ParseFitTierError, MAX_PROBABILITY,
    MIN_PROBABILITY,
};
pub use config::FitConfig;
pub use rules::{ACTIVITY_CAP, ATTENDANCE_CAP, GRADE_CAP, VOLUNTEER_CAP};

use super::domain::StudentRecordSnapshot;
use serde::{Deserialize, Serialize};

/// The four independently capped components of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SubScores {
    pub grade: f64,
    pub activity: f64,
    pub volunteer: f64,
    pub attendance: f64,
}

impl SubScores {
    pub fn composite(&self) -> f64 {
        self.grade + self.activity + self.volunteer + self.attendance
    }

    pub(crate) fn rounded(&self) -> Self {
        Self {
            grade: round_one(self.grade),
            activity: round_one(self.activity),
            volunteer: round_one(self.volunteer),
            attendance: round_one(self.attendance),
        }
    }
}

/// Classifier output for one composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitAssessment {
    pub threshold: f64,
    pub tier: FitTier,
    pub probability: f64,
}

/// Display view of a scored profile. Every number is rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub sub_scores: SubScores,
    pub composite_score: f64,
    pub tier: FitTier,
    pub probability: f64,
}

impl ScoreView {
    pub(crate) fn new(sub_scores: &SubScores, assessment: &FitAssessment) -> Self {
        Self {
            sub_scores: sub_scores.rounded(),
            composite_score: round_one(sub_scores.composite()),
            tier: assessment.tier,
            probability: round_one(assessment.probability),
        }
    }
}

/// Stateless scorer that applies the fit configuration to snapshots and scores.
#[derive(Debug, Clone, Default)]
pub struct FitEngine {
    config: FitConfig,
}

impl FitEngine {
    pub fn new(config: FitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    pub fn score(&self, snapshot: &StudentRecordSnapshot) -> SubScores {
        rules::score_snapshot(snapshot)
    }

    pub fn threshold(&self, cutoff_grade: Option<f64>) -> f64 {
        fit_threshold(cutoff_grade, &self.config)
    }

    pub fn assess(&self, composite: f64, cutoff_grade: Option<f64>) -> FitAssessment {
        let threshold = self.threshold(cutoff_grade);
        FitAssessment {
            threshold,
            tier: classify(composite, threshold, self.config.challenge_band),
            probability: estimate_probability(composite, threshold),
        }
    }
}

pub(crate) fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
