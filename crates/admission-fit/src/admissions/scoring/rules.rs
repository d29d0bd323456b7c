use crate::admissions::domain::StudentRecordSnapshot;
use crate::admissions::records::WORST_RANK;

pub const GRADE_CAP: f64 = 50.0;
pub const ACTIVITY_CAP: f64 = 25.0;
pub const VOLUNTEER_CAP: f64 = 15.0;
pub const ATTENDANCE_CAP: f64 = 10.0;

pub(crate) const POINTS_PER_ACTIVITY: f64 = 5.0;
pub(crate) const HOURS_PER_VOLUNTEER_POINT: f64 = 4.0;
pub(crate) const POINTS_PER_ATTENDANCE_INCIDENT: f64 = 2.0;

/// Width of the rank scale between the best and worst tier.
pub(crate) const RANK_SPAN: f64 = 8.0;

pub(crate) fn grade_score(average_rank: Option<f64>) -> f64 {
    match average_rank {
        Some(rank) if rank.is_finite() => {
            ((f64::from(WORST_RANK) - rank) / RANK_SPAN * GRADE_CAP).clamp(0.0, GRADE_CAP)
        }
        _ => 0.0,
    }
}

pub(crate) fn activity_score(activity_count: u32) -> f64 {
    (f64::from(activity_count) * POINTS_PER_ACTIVITY).min(ACTIVITY_CAP)
}

pub(crate) fn volunteer_score(volunteer_hours: f64) -> f64 {
    (volunteer_hours / HOURS_PER_VOLUNTEER_POINT).clamp(0.0, VOLUNTEER_CAP)
}

pub(crate) fn attendance_score(incidents: u32) -> f64 {
    (ATTENDANCE_CAP - f64::from(incidents) * POINTS_PER_ATTENDANCE_INCIDENT).max(0.0)
}

/// Converts a grade-score gain into the average-rank reduction that produces it.
pub(crate) fn rank_reduction_for_points(points: f64) -> f64 {
    points / GRADE_CAP * RANK_SPAN
}

pub(crate) fn score_snapshot(snapshot: &StudentRecordSnapshot) -> super::SubScores {
    super::SubScores {
        grade: grade_score(snapshot.average_rank),
        activity: activity_score(snapshot.activity_count),
        volunteer: volunteer_score(snapshot.volunteer_hours),
        attendance: attendance_score(snapshot.unexcused_absence_and_lateness_count),
    }
}
