//! What-if evaluation of hypothetical profile changes against the real baseline.

mod recommendations;

pub use recommendations::Recommendation;

use serde::{Deserialize, Serialize};

use super::domain::{StudentRecords, SubjectRank};
use super::records::{average_rank, clamp_rank, latest_ranked_grades, merge_ranks};
use super::scoring::rules::{activity_score, grade_score, volunteer_score};
use super::scoring::{round_one, FitAssessment, FitEngine, ScoreView, SubScores};
use recommendations::{recommend, RecommendationContext};

const UNCHANGED_EPSILON: f64 = 1e-9;

/// Caller-supplied overrides. Every field is optional; an absent field keeps the baseline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationInput {
    /// Per-subject ranks. Out-of-scale ranks are clamped into 1..=9.
    pub hypothetical_grades: Option<Vec<HypotheticalGrade>>,
    pub hypothetical_activities: Option<i64>,
    pub hypothetical_volunteer_hours: Option<f64>,
}

impl SimulationInput {
    pub fn is_empty(&self) -> bool {
        self.grade_overrides().is_none()
            && self.hypothetical_activities.is_none()
            && self.hypothetical_volunteer_hours.is_none()
    }

    fn grade_overrides(&self) -> Option<Vec<SubjectRank>> {
        let grades = self.hypothetical_grades.as_deref()?;
        if grades.is_empty() {
            return None;
        }

        Some(
            grades
                .iter()
                .map(|grade| SubjectRank {
                    subject: grade.subject.clone(),
                    rank: clamp_rank(grade.rank),
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HypotheticalGrade {
    pub subject: String,
    pub rank: i32,
}

impl From<SubjectRank> for HypotheticalGrade {
    fn from(value: SubjectRank) -> Self {
        Self {
            subject: value.subject,
            rank: i32::from(value.rank),
        }
    }
}

/// Overridable dimensions. Attendance is never overridable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCategory {
    Grades,
    Activities,
    Volunteer,
}

impl ChangeCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grades => "Grades",
            Self::Activities => "Activities",
            Self::Volunteer => "Volunteer",
        }
    }
}

/// A sub-score that moved under simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeFactor {
    pub category: ChangeCategory,
    pub impact: f64,
    pub description: String,
}

/// Display-ready simulation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub threshold: f64,
    pub baseline: ScoreView,
    pub simulated: ScoreView,
    pub score_delta: f64,
    pub level_changed: bool,
    pub change_factors: Vec<ChangeFactor>,
    pub recommendations: Vec<String>,
    pub probability: f64,
}

/// Full-precision simulation used for comparisons before rounding.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SimulationOutcome {
    pub(crate) baseline: SubScores,
    pub(crate) simulated: SubScores,
    pub(crate) baseline_fit: FitAssessment,
    pub(crate) simulated_fit: FitAssessment,
    pub(crate) change_factors: Vec<ChangeFactor>,
    pub(crate) recommendations: Vec<Recommendation>,
}

impl SimulationOutcome {
    pub(crate) fn improvement(&self) -> f64 {
        self.simulated.composite() - self.baseline.composite()
    }

    pub(crate) fn into_result(self) -> SimulationResult {
        let score_delta = round_one(self.improvement());
        let change_factors = self
            .change_factors
            .into_iter()
            .map(|factor| ChangeFactor {
                impact: round_one(factor.impact),
                ..factor
            })
            .collect();

        SimulationResult {
            threshold: round_one(self.baseline_fit.threshold),
            baseline: ScoreView::new(&self.baseline, &self.baseline_fit),
            simulated: ScoreView::new(&self.simulated, &self.simulated_fit),
            score_delta,
            level_changed: self.baseline_fit.tier != self.simulated_fit.tier,
            change_factors,
            recommendations: self
                .recommendations
                .iter()
                .map(Recommendation::message)
                .collect(),
            probability: round_one(self.simulated_fit.probability),
        }
    }
}

/// Runs `input` on top of the student's real records and reports the difference.
pub fn simulate(
    engine: &FitEngine,
    records: &StudentRecords,
    cutoff_grade: Option<f64>,
    input: &SimulationInput,
) -> SimulationResult {
    run(engine, records, cutoff_grade, input).into_result()
}

pub(crate) fn run(
    engine: &FitEngine,
    records: &StudentRecords,
    cutoff_grade: Option<f64>,
    input: &SimulationInput,
) -> SimulationOutcome {
    let snapshot = records.snapshot();
    let baseline = engine.score(&snapshot);
    let mut simulated = baseline;
    let mut change_factors = Vec::new();

    if let Some(overrides) = input.grade_overrides() {
        let latest = latest_ranked_grades(&records.grades);
        let simulated_rank = average_rank(&merge_ranks(&latest, &overrides));
        simulated.grade = grade_score(simulated_rank);
        push_change(
            &mut change_factors,
            ChangeCategory::Grades,
            baseline.grade,
            simulated.grade,
            || {
                format!(
                    "Average rank {} -> {}",
                    describe_rank(snapshot.average_rank),
                    describe_rank(simulated_rank)
                )
            },
        );
    }

    if let Some(count) = input.hypothetical_activities {
        let count = u32::try_from(count.max(0)).unwrap_or(u32::MAX);
        simulated.activity = activity_score(count);
        push_change(
            &mut change_factors,
            ChangeCategory::Activities,
            baseline.activity,
            simulated.activity,
            || format!("Activities {} -> {}", snapshot.activity_count, count),
        );
    }

    if let Some(hours) = input.hypothetical_volunteer_hours {
        let hours = if hours.is_finite() { hours.max(0.0) } else { 0.0 };
        simulated.volunteer = volunteer_score(hours);
        push_change(
            &mut change_factors,
            ChangeCategory::Volunteer,
            baseline.volunteer,
            simulated.volunteer,
            || {
                format!(
                    "Volunteer hours {:.1} -> {:.1}",
                    snapshot.volunteer_hours, hours
                )
            },
        );
    }

    let baseline_fit = engine.assess(baseline.composite(), cutoff_grade);
    let simulated_fit = engine.assess(simulated.composite(), cutoff_grade);

    let recommendations = recommend(&RecommendationContext {
        simulated: &simulated,
        baseline_tier: baseline_fit.tier,
        simulated_tier: simulated_fit.tier,
    });

    SimulationOutcome {
        baseline,
        simulated,
        baseline_fit,
        simulated_fit,
        change_factors,
        recommendations,
    }
}

fn push_change(
    factors: &mut Vec<ChangeFactor>,
    category: ChangeCategory,
    before: f64,
    after: f64,
    describe: impl FnOnce() -> String,
) {
    let impact = after - before;
    if impact.abs() > UNCHANGED_EPSILON {
        factors.push(ChangeFactor {
            category,
            impact,
            description: describe(),
        });
    }
}

fn describe_rank(rank: Option<f64>) -> String {
    match rank {
        Some(rank) => format!("{rank:.1}"),
        None => "n/a".to_string(),
    }
}
