use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for students resolved by the record reader.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for target schools resolved by the school reader.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchoolId(pub String);

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Approved grade entry. `rank` follows the 9-tier scale (1 best, 9 worst); unranked
/// subjects carry `None` and never contribute to the average rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeEntry {
    pub subject: String,
    pub rank: Option<u8>,
    pub year: i32,
    pub term: u8,
}

/// Approved extracurricular activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub title: String,
}

/// Approved volunteer service entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerEntry {
    pub organization: String,
    pub hours: f64,
}

/// Approved attendance summary for one reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub unexcused_absences: u32,
    pub lateness: u32,
}

/// Everything the record reader returns for one student.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudentRecords {
    pub grades: Vec<GradeEntry>,
    pub activities: Vec<ActivityEntry>,
    pub volunteer: Vec<VolunteerEntry>,
    pub attendance: Vec<AttendanceEntry>,
}

/// Per-call aggregate the score calculator consumes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudentRecordSnapshot {
    pub average_rank: Option<f64>,
    pub activity_count: u32,
    pub volunteer_hours: f64,
    pub unexcused_absence_and_lateness_count: u32,
}

/// Most recent ranked grade for a single subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRank {
    pub subject: String,
    pub rank: u8,
}

/// School metadata returned by the school reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolProfile {
    pub school_id: SchoolId,
    pub name: String,
    /// Cutoff grade of the most recently published admission cycle.
    pub cutoff_grade: Option<f64>,
}

/// Entry on a student's target list; lower `priority` is preferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSchool {
    pub school_id: SchoolId,
    pub priority: u8,
}
