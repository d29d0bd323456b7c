//! Works backward from a target tier to the points a student still needs.

mod rules;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::StudentRecordSnapshot;
use super::scoring::{round_one, FitEngine, FitTier};
use super::simulation::ChangeCategory;
use rules::{PlanContext, Proposal, RULES};

const FIT_MARGIN: f64 = 10.0;
const CHALLENGE_MARGIN: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ImprovementAction {
    LowerAverageRank {
        rank_reduction: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        target_average_rank: Option<f64>,
    },
    AddActivities {
        count: u32,
    },
    AddVolunteerHours {
        hours: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "unit")]
pub enum TimeEstimate {
    Months { min: u32, max: u32 },
    Weeks { min: u32, max: u32 },
}

impl TimeEstimate {
    pub fn label(&self) -> String {
        match self {
            TimeEstimate::Months { min, max } => format!("{min}-{max} months"),
            TimeEstimate::Weeks { min, max } => format!("{min}-{max} weeks"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementSuggestion {
    pub priority: u8,
    pub category: ChangeCategory,
    pub current_score: f64,
    pub potential_gain: f64,
    pub action: ImprovementAction,
    pub difficulty: Difficulty,
    pub time_estimate: TimeEstimate,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementPlan {
    pub current_score: f64,
    pub current_tier: FitTier,
    pub target_tier: FitTier,
    pub threshold: f64,
    pub target_score: f64,
    pub gap: f64,
    pub suggestions: Vec<ImprovementSuggestion>,
    pub estimated_weeks: u32,
    pub projected_completion: NaiveDate,
}

pub fn target_score(engine: &FitEngine, threshold: f64, target: FitTier) -> f64 {
    match target {
        FitTier::Fit => threshold + FIT_MARGIN,
        FitTier::Challenge => threshold - CHALLENGE_MARGIN,
        FitTier::Unlikely => engine.config().unlikely_target_score,
    }
}

pub fn estimated_weeks(gap: f64) -> u32 {
    if gap > 20.0 {
        24
    } else if gap > 10.0 {
        12
    } else {
        6
    }
}

pub fn build_plan(
    engine: &FitEngine,
    snapshot: &StudentRecordSnapshot,
    cutoff_grade: Option<f64>,
    target: FitTier,
    as_of: NaiveDate,
) -> ImprovementPlan {
    let sub_scores = engine.score(snapshot);
    let current = sub_scores.composite();
    let assessment = engine.assess(current, cutoff_grade);
    let target_score = target_score(engine, assessment.threshold, target);
    let gap = (target_score - current).max(0.0);

    let context = PlanContext {
        sub_scores,
        average_rank: snapshot.average_rank,
        gap,
    };

    let mut proposals: Vec<Proposal> = RULES.iter().filter_map(|rule| rule(&context)).collect();
    proposals.sort_by(|a, b| b.potential_gain.total_cmp(&a.potential_gain));

    let suggestions = proposals
        .into_iter()
        .enumerate()
        .map(|(index, proposal)| suggestion(index, proposal))
        .collect();

    let weeks = estimated_weeks(gap);
    let projected_completion = as_of
        .checked_add_signed(Duration::weeks(i64::from(weeks)))
        .unwrap_or(NaiveDate::MAX);

    ImprovementPlan {
        current_score: round_one(current),
        current_tier: assessment.tier,
        target_tier: target,
        threshold: round_one(assessment.threshold),
        target_score: round_one(target_score),
        gap: round_one(gap),
        suggestions,
        estimated_weeks: weeks,
        projected_completion,
    }
}

fn suggestion(index: usize, proposal: Proposal) -> ImprovementSuggestion {
    let action = match proposal.action {
        ImprovementAction::LowerAverageRank {
            rank_reduction,
            target_average_rank,
        } => ImprovementAction::LowerAverageRank {
            rank_reduction: round_one(rank_reduction),
            target_average_rank: target_average_rank.map(round_one),
        },
        other => other,
    };
    let potential_gain = round_one(proposal.potential_gain);
    let description = describe(&action, potential_gain, &proposal.time_estimate);

    ImprovementSuggestion {
        priority: u8::try_from(index + 1).unwrap_or(u8::MAX),
        category: proposal.category,
        current_score: round_one(proposal.current_score),
        potential_gain,
        action,
        difficulty: proposal.difficulty,
        time_estimate: proposal.time_estimate,
        description,
    }
}

fn describe(action: &ImprovementAction, gain: f64, time: &TimeEstimate) -> String {
    let what = match action {
        ImprovementAction::LowerAverageRank {
            rank_reduction,
            target_average_rank: Some(target),
        } => format!("Lower your average rank by {rank_reduction:.1} (to about {target:.1})"),
        ImprovementAction::LowerAverageRank { rank_reduction, .. } => {
            format!("Lower your average rank by {rank_reduction:.1}")
        }
        ImprovementAction::AddActivities { count } => format!(
            "Take on {count} more extracurricular {}",
            if *count == 1 { "activity" } else { "activities" }
        ),
        ImprovementAction::AddVolunteerHours { hours } => {
            format!("Log {hours} more volunteer hours")
        }
    };

    format!("{what} for up to {gain:.1} points over {}", time.label())
}
