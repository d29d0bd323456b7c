use proptest::prelude::*;

use crate::admissions::domain::{
    ActivityEntry, AttendanceEntry, GradeEntry, StudentRecordSnapshot, StudentRecords,
    VolunteerEntry,
};
use crate::admissions::records::clamp_rank;
use crate::admissions::scenarios::compare_scenarios;
use crate::admissions::scoring::{
    classify, estimate_probability, FitEngine, ACTIVITY_CAP, ATTENDANCE_CAP, GRADE_CAP,
    VOLUNTEER_CAP,
};
use crate::admissions::simulation::{simulate, SimulationInput};

const SUBJECTS: [&str; 5] = ["Math", "English", "Science", "History", "Music"];

fn records_strategy() -> impl Strategy<Value = StudentRecords> {
    (
        prop::collection::vec((0..SUBJECTS.len(), 1u8..=9, 2023i32..=2025, 1u8..=2), 0..10),
        0usize..8,
        0.0f64..80.0,
        0u32..6,
    )
        .prop_map(|(grades, activities, hours, absences)| StudentRecords {
            grades: grades
                .into_iter()
                .map(|(subject, rank, year, term)| GradeEntry {
                    subject: SUBJECTS[subject].to_string(),
                    rank: Some(rank),
                    year,
                    term,
                })
                .collect(),
            activities: (0..activities)
                .map(|index| ActivityEntry {
                    title: format!("Club {index}"),
                })
                .collect(),
            volunteer: vec![VolunteerEntry {
                organization: "Shelter".to_string(),
                hours,
            }],
            attendance: vec![AttendanceEntry {
                unexcused_absences: absences,
                lateness: 0,
            }],
        })
}

proptest! {
    #[test]
    fn sub_scores_stay_within_caps(
        rank in prop::option::of(-5.0f64..15.0),
        activities in 0u32..100,
        hours in -20.0f64..1000.0,
        incidents in 0u32..50,
    ) {
        let engine = FitEngine::default();
        let scores = engine.score(&StudentRecordSnapshot {
            average_rank: rank,
            activity_count: activities,
            volunteer_hours: hours,
            unexcused_absence_and_lateness_count: incidents,
        });

        prop_assert!((0.0..=GRADE_CAP).contains(&scores.grade));
        prop_assert!((0.0..=ACTIVITY_CAP).contains(&scores.activity));
        prop_assert!((0.0..=VOLUNTEER_CAP).contains(&scores.volunteer));
        prop_assert!((0.0..=ATTENDANCE_CAP).contains(&scores.attendance));
        prop_assert_eq!(
            scores.composite(),
            scores.grade + scores.activity + scores.volunteer + scores.attendance
        );
    }

    #[test]
    fn classification_is_monotonic(
        a in 0.0f64..100.0,
        b in 0.0f64..100.0,
        threshold in 25.0f64..75.0,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify(low, threshold, 15.0) <= classify(high, threshold, 15.0));
        prop_assert!(estimate_probability(low, threshold) <= estimate_probability(high, threshold));
    }

    #[test]
    fn probability_is_bounded(score in -50.0f64..150.0, threshold in 25.0f64..75.0) {
        let probability = estimate_probability(score, threshold);
        prop_assert!((5.0..=95.0).contains(&probability));
    }

    #[test]
    fn empty_simulation_changes_nothing(records in records_strategy()) {
        let result = simulate(&FitEngine::default(), &records, None, &SimulationInput::default());

        prop_assert_eq!(result.score_delta, 0.0);
        prop_assert!(!result.level_changed);
        prop_assert!(result.change_factors.is_empty());
    }

    #[test]
    fn combined_scenario_dominates(records in records_strategy(), cutoff in prop::option::of(1.0f64..9.0)) {
        let comparison = compare_scenarios(&FitEngine::default(), &records, cutoff);
        let combined = comparison.scenarios[3].improvement;

        for outcome in &comparison.scenarios[..3] {
            prop_assert!(outcome.improvement >= 0.0);
            prop_assert!(combined >= outcome.improvement);
        }
    }

    #[test]
    fn ranks_always_clamp_into_scale(rank in any::<i32>()) {
        prop_assert!((1..=9).contains(&clamp_rank(rank)));
    }
}

#[test]
fn probability_is_continuous_at_branch_edges() {
    for edge in [-10.0, 0.0, 10.0] {
        let below = estimate_probability(60.0 + edge - 1e-9, 60.0);
        let at = estimate_probability(60.0 + edge, 60.0);
        assert!((at - below).abs() < 1e-6, "jump at distance {edge}");
    }
}
