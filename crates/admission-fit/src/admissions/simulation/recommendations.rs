use serde::{Deserialize, Serialize};

use crate::admissions::scoring::{FitTier, SubScores};
use crate::admissions::scoring::rules::{HOURS_PER_VOLUNTEER_POINT, POINTS_PER_ACTIVITY};

const GRADE_FOCUS_BELOW: f64 = 40.0;
const ACTIVITY_TARGET: f64 = 20.0;
const VOLUNTEER_TARGET: f64 = 10.0;

/// Advice attached to a simulation, rendered to text at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Recommendation {
    FocusOnGrades,
    AddActivities { count: u32 },
    AddVolunteerHours { hours: u32 },
    ReachedFit,
    DroppedToUnlikely { from: FitTier },
}

impl Recommendation {
    pub fn message(&self) -> String {
        match self {
            Recommendation::FocusOnGrades => {
                "Prioritise study in core subjects: the academic score is still below 40 points."
                    .to_string()
            }
            Recommendation::AddActivities { count } => format!(
                "Join {count} more extracurricular {} to reach 20 activity points.",
                if *count == 1 { "activity" } else { "activities" }
            ),
            Recommendation::AddVolunteerHours { hours } => {
                format!("Log {hours} more volunteer hours to reach 10 volunteer points.")
            }
            Recommendation::ReachedFit => {
                "This plan moves you into the FIT tier for this school. Keep it up!".to_string()
            }
            Recommendation::DroppedToUnlikely { from } => format!(
                "Warning: this scenario drops you from {from} to UNLIKELY for this school."
            ),
        }
    }
}

pub(crate) struct RecommendationContext<'a> {
    pub(crate) simulated: &'a SubScores,
    pub(crate) baseline_tier: FitTier,
    pub(crate) simulated_tier: FitTier,
}

type Rule = fn(&RecommendationContext<'_>) -> Option<Recommendation>;

const RULES: [Rule; 5] = [
    grade_rule,
    activity_rule,
    volunteer_rule,
    reached_fit_rule,
    dropped_to_unlikely_rule,
];

pub(crate) fn recommend(context: &RecommendationContext<'_>) -> Vec<Recommendation> {
    RULES.iter().filter_map(|rule| rule(context)).collect()
}

fn grade_rule(context: &RecommendationContext<'_>) -> Option<Recommendation> {
    (context.simulated.grade < GRADE_FOCUS_BELOW).then_some(Recommendation::FocusOnGrades)
}

fn activity_rule(context: &RecommendationContext<'_>) -> Option<Recommendation> {
    let score = context.simulated.activity;
    (score < ACTIVITY_TARGET).then(|| Recommendation::AddActivities {
        count: ((ACTIVITY_TARGET - score) / POINTS_PER_ACTIVITY).ceil() as u32,
    })
}

fn volunteer_rule(context: &RecommendationContext<'_>) -> Option<Recommendation> {
    let score = context.simulated.volunteer;
    (score < VOLUNTEER_TARGET).then(|| Recommendation::AddVolunteerHours {
        hours: ((VOLUNTEER_TARGET - score) * HOURS_PER_VOLUNTEER_POINT).ceil() as u32,
    })
}

fn reached_fit_rule(context: &RecommendationContext<'_>) -> Option<Recommendation> {
    (context.simulated_tier == FitTier::Fit && context.baseline_tier < FitTier::Fit)
        .then_some(Recommendation::ReachedFit)
}

fn dropped_to_unlikely_rule(context: &RecommendationContext<'_>) -> Option<Recommendation> {
    (context.simulated_tier == FitTier::Unlikely && context.baseline_tier > FitTier::Unlikely)
        .then_some(Recommendation::DroppedToUnlikely {
            from: context.baseline_tier,
        })
}
