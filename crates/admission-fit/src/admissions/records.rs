use std::collections::BTreeMap;

use super::domain::{GradeEntry, StudentRecordSnapshot, StudentRecords, SubjectRank};

pub const BEST_RANK: u8 = 1;
pub const WORST_RANK: u8 = 9;

impl StudentRecords {
    pub fn snapshot(&self) -> StudentRecordSnapshot {
        let latest = latest_ranked_grades(&self.grades);

        StudentRecordSnapshot {
            average_rank: average_rank(&latest),
            activity_count: u32::try_from(self.activities.len()).unwrap_or(u32::MAX),
            volunteer_hours: self
                .volunteer
                .iter()
                .map(|entry| entry.hours.max(0.0))
                .sum(),
            unexcused_absence_and_lateness_count: self
                .attendance
                .iter()
                .map(|entry| entry.unexcused_absences.saturating_add(entry.lateness))
                .fold(0u32, u32::saturating_add),
        }
    }
}

/// Case and whitespace insensitive key used to match subjects and CSV headers.
pub(crate) fn normalize_key(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Latest ranked grade per subject, ordered by normalized subject name.
///
/// Recency is decided by year, then term. Entries without a rank are skipped so an
/// unranked recent term never hides an older ranked one.
pub fn latest_ranked_grades(grades: &[GradeEntry]) -> Vec<SubjectRank> {
    let mut latest: BTreeMap<String, (&GradeEntry, u8)> = BTreeMap::new();

    for entry in grades {
        let Some(rank) = entry.rank else {
            continue;
        };

        let key = normalize_key(&entry.subject);
        let newer = latest.get(&key).map_or(true, |(current, _)| {
            (entry.year, entry.term) > (current.year, current.term)
        });
        if newer {
            latest.insert(key, (entry, clamp_rank(i32::from(rank))));
        }
    }

    latest
        .into_values()
        .map(|(entry, rank)| SubjectRank {
            subject: entry.subject.clone(),
            rank,
        })
        .collect()
}

pub fn average_rank(ranks: &[SubjectRank]) -> Option<f64> {
    if ranks.is_empty() {
        return None;
    }

    let total: f64 = ranks.iter().map(|entry| f64::from(entry.rank)).sum();
    Some(total / ranks.len() as f64)
}

/// Applies `delta` to every rank, clamping into `[BEST_RANK, WORST_RANK]`.
pub fn shift_ranks(ranks: &[SubjectRank], delta: i32) -> Vec<SubjectRank> {
    ranks
        .iter()
        .map(|entry| SubjectRank {
            subject: entry.subject.clone(),
            rank: clamp_rank(i32::from(entry.rank).saturating_add(delta)),
        })
        .collect()
}

pub fn clamp_rank(rank: i32) -> u8 {
    rank.clamp(i32::from(BEST_RANK), i32::from(WORST_RANK)) as u8
}

/// Replaces baseline ranks with overrides for matching subjects; unmatched override
/// subjects are appended.
pub(crate) fn merge_ranks(baseline: &[SubjectRank], overrides: &[SubjectRank]) -> Vec<SubjectRank> {
    let mut merged: BTreeMap<String, SubjectRank> = baseline
        .iter()
        .map(|entry| (normalize_key(&entry.subject), entry.clone()))
        .collect();

    for entry in overrides {
        merged.insert(normalize_key(&entry.subject), entry.clone());
    }

    merged.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admissions::domain::{ActivityEntry, AttendanceEntry, VolunteerEntry};

    fn grade(subject: &str, rank: Option<u8>, year: i32, term: u8) -> GradeEntry {
        GradeEntry {
            subject: subject.to_string(),
            rank,
            year,
            term,
        }
    }

    #[test]
    fn latest_grade_prefers_year_then_term() {
        let grades = vec![
            grade("Math", Some(6), 2024, 2),
            grade("Math", Some(3), 2025, 1),
            grade("math ", Some(8), 2024, 1),
            grade("English", Some(4), 2025, 1),
            grade("English", Some(2), 2025, 2),
        ];

        let latest = latest_ranked_grades(&grades);

        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].subject, "English");
        assert_eq!(latest[0].rank, 2);
        assert_eq!(latest[1].subject, "Math");
        assert_eq!(latest[1].rank, 3);
    }

    #[test]
    fn unranked_entries_are_ignored() {
        let grades = vec![
            grade("Music", None, 2025, 2),
            grade("Music", Some(5), 2024, 2),
            grade("Art", None, 2025, 1),
        ];

        let latest = latest_ranked_grades(&grades);

        assert_eq!(
            latest,
            vec![SubjectRank {
                subject: "Music".to_string(),
                rank: 5
            }]
        );
    }

    #[test]
    fn snapshot_aggregates_all_record_kinds() {
        let records = StudentRecords {
            grades: vec![grade("Math", Some(4), 2025, 1), grade("Science", Some(6), 2025, 1)],
            activities: vec![
                ActivityEntry {
                    title: "Robotics club".to_string(),
                },
                ActivityEntry {
                    title: "Debate".to_string(),
                },
            ],
            volunteer: vec![
                VolunteerEntry {
                    organization: "Library".to_string(),
                    hours: 6.5,
                },
                VolunteerEntry {
                    organization: "Food bank".to_string(),
                    hours: -2.0,
                },
            ],
            attendance: vec![
                AttendanceEntry {
                    unexcused_absences: 1,
                    lateness: 2,
                },
                AttendanceEntry {
                    unexcused_absences: 0,
                    lateness: 1,
                },
            ],
        };

        let snapshot = records.snapshot();

        assert_eq!(snapshot.average_rank, Some(5.0));
        assert_eq!(snapshot.activity_count, 2);
        assert_eq!(snapshot.volunteer_hours, 6.5);
        assert_eq!(snapshot.unexcused_absence_and_lateness_count, 4);
    }

    #[test]
    fn empty_records_have_no_average_rank() {
        let snapshot = StudentRecords::default().snapshot();
        assert_eq!(snapshot.average_rank, None);
        assert_eq!(snapshot.activity_count, 0);
        assert_eq!(snapshot.volunteer_hours, 0.0);
    }

    #[test]
    fn shift_ranks_clamps_to_scale() {
        let ranks = vec![
            SubjectRank {
                subject: "Math".to_string(),
                rank: 1,
            },
            SubjectRank {
                subject: "Art".to_string(),
                rank: 9,
            },
        ];

        let better = shift_ranks(&ranks, -1);
        assert_eq!(better[0].rank, 1);
        assert_eq!(better[1].rank, 8);

        let worse = shift_ranks(&ranks, 3);
        assert_eq!(worse[0].rank, 4);
        assert_eq!(worse[1].rank, 9);
    }

    #[test]
    fn merge_replaces_matching_subjects_only() {
        let baseline = vec![
            SubjectRank {
                subject: "Math".to_string(),
                rank: 5,
            },
            SubjectRank {
                subject: "English".to_string(),
                rank: 3,
            },
        ];
        let overrides = vec![
            SubjectRank {
                subject: " MATH".to_string(),
                rank: 2,
            },
            SubjectRank {
                subject: "History".to_string(),
                rank: 4,
            },
        ];

        let merged = merge_ranks(&baseline, &overrides);

        assert_eq!(merged.len(), 3);
        assert_eq!(average_rank(&merged), Some(3.0));
    }
}
