use serde::{Deserialize, Serialize};

use super::domain::{GradeEntry, StudentRecords};
use super::records::{latest_ranked_grades, shift_ranks};
use super::scoring::{round_one, FitEngine, ScoreView};
use super::simulation::{self, HypotheticalGrade, SimulationInput, SimulationResult};

const GRADE_STEP: i32 = -1;
const EXTRA_ACTIVITIES: i64 = 3;
const EXTRA_VOLUNTEER_HOURS: f64 = 20.0;

/// Canned improvement bundles compared side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    GradeImprovement,
    ActivityGrowth,
    VolunteerGrowth,
    Combined,
}

impl ScenarioKind {
    /// Reporting order. Callers rely on positions, so this is never sorted by outcome.
    pub const fn ordered() -> [Self; 4] {
        [
            Self::GradeImprovement,
            Self::ActivityGrowth,
            Self::VolunteerGrowth,
            Self::Combined,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GradeImprovement => "Improve every subject by one grade level",
            Self::ActivityGrowth => "Add 3 extracurricular activities",
            Self::VolunteerGrowth => "Add 20 volunteer hours",
            Self::Combined => "All improvements combined",
        }
    }

    fn input(self, baseline: &ScenarioBaseline) -> SimulationInput {
        let grades = || Some(baseline.improved_grades.clone());
        let activities = || Some(baseline.activity_count + EXTRA_ACTIVITIES);
        let hours = || Some(baseline.volunteer_hours + EXTRA_VOLUNTEER_HOURS);

        match self {
            Self::GradeImprovement => SimulationInput {
                hypothetical_grades: grades(),
                ..SimulationInput::default()
            },
            Self::ActivityGrowth => SimulationInput {
                hypothetical_activities: activities(),
                ..SimulationInput::default()
            },
            Self::VolunteerGrowth => SimulationInput {
                hypothetical_volunteer_hours: hours(),
                ..SimulationInput::default()
            },
            Self::Combined => SimulationInput {
                hypothetical_grades: grades(),
                hypothetical_activities: activities(),
                hypothetical_volunteer_hours: hours(),
            },
        }
    }
}

struct ScenarioBaseline {
    improved_grades: Vec<HypotheticalGrade>,
    activity_count: i64,
    volunteer_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario: ScenarioKind,
    pub label: String,
    pub improvement: f64,
    pub result: SimulationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub threshold: f64,
    pub baseline: ScoreView,
    pub scenarios: Vec<ScenarioOutcome>,
}

/// Latest ranked grade per subject moved by `delta` tiers, clamped into 1..=9.
pub fn hypothetical_grades(grades: &[GradeEntry], delta: i32) -> Vec<HypotheticalGrade> {
    shift_ranks(&latest_ranked_grades(grades), delta)
        .into_iter()
        .map(HypotheticalGrade::from)
        .collect()
}

pub fn compare_scenarios(
    engine: &FitEngine,
    records: &StudentRecords,
    cutoff_grade: Option<f64>,
) -> ScenarioComparison {
    let snapshot = records.snapshot();
    let baseline = ScenarioBaseline {
        improved_grades: hypothetical_grades(&records.grades, GRADE_STEP),
        activity_count: i64::from(snapshot.activity_count),
        volunteer_hours: snapshot.volunteer_hours,
    };

    let baseline_scores = engine.score(&snapshot);
    let baseline_fit = engine.assess(baseline_scores.composite(), cutoff_grade);

    let scenarios = ScenarioKind::ordered()
        .into_iter()
        .map(|kind| {
            let outcome = simulation::run(engine, records, cutoff_grade, &kind.input(&baseline));
            ScenarioOutcome {
                scenario: kind,
                label: kind.label().to_string(),
                improvement: round_one(outcome.improvement()),
                result: outcome.into_result(),
            }
        })
        .collect();

    ScenarioComparison {
        threshold: round_one(baseline_fit.threshold),
        baseline: ScoreView::new(&baseline_scores, &baseline_fit),
        scenarios,
    }
}
