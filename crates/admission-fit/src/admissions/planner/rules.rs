use super::{Difficulty, ImprovementAction, TimeEstimate};
use crate::admissions::records::BEST_RANK;
use crate::admissions::scoring::rules::{
    rank_reduction_for_points, HOURS_PER_VOLUNTEER_POINT, POINTS_PER_ACTIVITY,
};
use crate::admissions::scoring::{SubScores, ACTIVITY_CAP, GRADE_CAP, VOLUNTEER_CAP};
use crate::admissions::simulation::ChangeCategory;

const GRADE_CEILING_FOR_ADVICE: f64 = 45.0;
const MAX_GRADE_GAIN: f64 = 15.0;
const GRADE_SHARE_OF_GAP: f64 = 0.5;
const ACTIVITY_EFFORT_LIMIT: u32 = 3;
const VOLUNTEER_EFFORT_LIMIT: u32 = 30;
const BRISK_HOURS_PER_WEEK: f64 = 5.0;
const RELAXED_HOURS_PER_WEEK: f64 = 2.0;

pub(super) struct PlanContext {
    pub(super) sub_scores: SubScores,
    pub(super) average_rank: Option<f64>,
    pub(super) gap: f64,
}

/// Unranked suggestion produced by a single rule.
pub(super) struct Proposal {
    pub(super) category: ChangeCategory,
    pub(super) current_score: f64,
    pub(super) potential_gain: f64,
    pub(super) action: ImprovementAction,
    pub(super) difficulty: Difficulty,
    pub(super) time_estimate: TimeEstimate,
}

type Rule = fn(&PlanContext) -> Option<Proposal>;

pub(super) const RULES: [Rule; 3] = [grade_proposal, activity_proposal, volunteer_proposal];

fn grade_proposal(context: &PlanContext) -> Option<Proposal> {
    let current = context.sub_scores.grade;
    if current >= GRADE_CEILING_FOR_ADVICE {
        return None;
    }

    // Zero once the gap is closed.
    let gain = (context.gap * GRADE_SHARE_OF_GAP)
        .min(MAX_GRADE_GAIN)
        .min(GRADE_CAP - current)
        .max(0.0);

    let rank_reduction = rank_reduction_for_points(gain);
    let difficulty = if gain > 10.0 {
        Difficulty::Hard
    } else if gain > 5.0 {
        Difficulty::Medium
    } else {
        Difficulty::Easy
    };

    Some(Proposal {
        category: ChangeCategory::Grades,
        current_score: current,
        potential_gain: gain,
        action: ImprovementAction::LowerAverageRank {
            rank_reduction,
            target_average_rank: context
                .average_rank
                .map(|rank| (rank - rank_reduction).max(f64::from(BEST_RANK))),
        },
        difficulty,
        time_estimate: TimeEstimate::Months { min: 3, max: 6 },
    })
}

fn activity_proposal(context: &PlanContext) -> Option<Proposal> {
    let current = context.sub_scores.activity;
    if current >= ACTIVITY_CAP {
        return None;
    }

    let headroom = ACTIVITY_CAP - current;
    let count = (headroom / POINTS_PER_ACTIVITY).ceil() as u32;

    Some(Proposal {
        category: ChangeCategory::Activities,
        current_score: current,
        potential_gain: headroom,
        action: ImprovementAction::AddActivities { count },
        difficulty: if count > ACTIVITY_EFFORT_LIMIT {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        },
        time_estimate: TimeEstimate::Weeks {
            min: count * 2,
            max: count * 4,
        },
    })
}

fn volunteer_proposal(context: &PlanContext) -> Option<Proposal> {
    let current = context.sub_scores.volunteer;
    if current >= VOLUNTEER_CAP {
        return None;
    }

    let headroom = VOLUNTEER_CAP - current;
    let hours = (headroom * HOURS_PER_VOLUNTEER_POINT).ceil() as u32;

    Some(Proposal {
        category: ChangeCategory::Volunteer,
        current_score: current,
        potential_gain: headroom,
        action: ImprovementAction::AddVolunteerHours { hours },
        difficulty: if hours > VOLUNTEER_EFFORT_LIMIT {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        },
        time_estimate: TimeEstimate::Weeks {
            min: (f64::from(hours) / BRISK_HOURS_PER_WEEK).ceil() as u32,
            max: (f64::from(hours) / RELAXED_HOURS_PER_WEEK).ceil() as u32,
        },
    })
}
