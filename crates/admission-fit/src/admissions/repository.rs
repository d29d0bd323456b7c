use std::future::Future;

use super::domain::{
    ActivityEntry, AttendanceEntry, GradeEntry, SchoolId, SchoolProfile, StudentId, TargetSchool,
    VolunteerEntry,
};

/// Read access to a student's approved records. Approval filtering happens upstream.
pub trait StudentRecordReader: Send + Sync {
    fn grades(
        &self,
        student: &StudentId,
    ) -> impl Future<Output = Result<Vec<GradeEntry>, ReaderError>> + Send;

    fn activities(
        &self,
        student: &StudentId,
    ) -> impl Future<Output = Result<Vec<ActivityEntry>, ReaderError>> + Send;

    fn volunteer_entries(
        &self,
        student: &StudentId,
    ) -> impl Future<Output = Result<Vec<VolunteerEntry>, ReaderError>> + Send;

    fn attendance(
        &self,
        student: &StudentId,
    ) -> impl Future<Output = Result<Vec<AttendanceEntry>, ReaderError>> + Send;
}

/// Read access to school admission metadata.
pub trait SchoolReader: Send + Sync {
    /// Returns `None` when the school is unknown.
    fn school(
        &self,
        school: &SchoolId,
    ) -> impl Future<Output = Result<Option<SchoolProfile>, ReaderError>> + Send;
}

/// Read access to a student's ordered target list.
pub trait TargetListReader: Send + Sync {
    fn targets(
        &self,
        student: &StudentId,
    ) -> impl Future<Output = Result<Vec<TargetSchool>, ReaderError>> + Send;
}

/// Error enumeration for reader failures.
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error("record not found")]
    NotFound,
    #[error("reader unavailable: {0}")]
    Unavailable(String),
}
