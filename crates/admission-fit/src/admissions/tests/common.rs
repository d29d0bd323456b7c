use std::collections::HashMap;
use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::admissions::domain::{
    ActivityEntry, AttendanceEntry, GradeEntry, SchoolId, SchoolProfile, StudentId,
    StudentRecords, TargetSchool, VolunteerEntry,
};
use crate::admissions::repository::{
    ReaderError, SchoolReader, StudentRecordReader, TargetListReader,
};
use crate::admissions::{admission_router, AdmissionFitService, FitConfig, FitEngine};

pub(super) const STUDENT: &str = "stu-001";
pub(super) const OPEN_SCHOOL: &str = "hanbit-high";
pub(super) const SELECTIVE_SCHOOL: &str = "daehan-science";

pub(super) fn student() -> StudentId {
    StudentId(STUDENT.to_string())
}

pub(super) fn open_school() -> SchoolId {
    SchoolId(OPEN_SCHOOL.to_string())
}

pub(super) fn selective_school() -> SchoolId {
    SchoolId(SELECTIVE_SCHOOL.to_string())
}

pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date")
}

pub(super) fn grade(subject: &str, rank: Option<u8>, year: i32, term: u8) -> GradeEntry {
    GradeEntry {
        subject: subject.to_string(),
        rank,
        year,
        term,
    }
}

/// Average rank 5, two activities, eight volunteer hours, one unexcused absence.
///
/// Scores 25 + 10 + 2 + 8 = 45 against the default threshold of 60.
pub(super) fn challenge_records() -> StudentRecords {
    StudentRecords {
        grades: vec![
            grade("Math", Some(7), 2024, 2),
            grade("Math", Some(5), 2025, 1),
            grade("English", Some(5), 2025, 1),
            grade("Art", None, 2025, 1),
        ],
        activities: vec![
            ActivityEntry {
                title: "Science club".to_string(),
            },
            ActivityEntry {
                title: "School orchestra".to_string(),
            },
        ],
        volunteer: vec![VolunteerEntry {
            organization: "Community library".to_string(),
            hours: 8.0,
        }],
        attendance: vec![AttendanceEntry {
            unexcused_absences: 1,
            lateness: 0,
        }],
    }
}

pub(super) fn engine() -> FitEngine {
    FitEngine::new(FitConfig::default())
}

#[derive(Default, Clone)]
pub(super) struct MemoryRecords {
    students: Arc<HashMap<StudentId, StudentRecords>>,
}

impl MemoryRecords {
    pub(super) fn with(student: StudentId, records: StudentRecords) -> Self {
        let mut students = HashMap::new();
        students.insert(student, records);
        Self {
            students: Arc::new(students),
        }
    }

    fn lookup(&self, student: &StudentId) -> Result<&StudentRecords, ReaderError> {
        self.students.get(student).ok_or(ReaderError::NotFound)
    }
}

impl StudentRecordReader for MemoryRecords {
    async fn grades(&self, student: &StudentId) -> Result<Vec<GradeEntry>, ReaderError> {
        Ok(self.lookup(student)?.grades.clone())
    }

    async fn activities(&self, student: &StudentId) -> Result<Vec<ActivityEntry>, ReaderError> {
        Ok(self.lookup(student)?.activities.clone())
    }

    async fn volunteer_entries(
        &self,
        student: &StudentId,
    ) -> Result<Vec<VolunteerEntry>, ReaderError> {
        Ok(self.lookup(student)?.volunteer.clone())
    }

    async fn attendance(&self, student: &StudentId) -> Result<Vec<AttendanceEntry>, ReaderError> {
        Ok(self.lookup(student)?.attendance.clone())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySchools {
    schools: Arc<HashMap<SchoolId, SchoolProfile>>,
}

impl MemorySchools {
    pub(super) fn seeded() -> Self {
        let profiles = [
            SchoolProfile {
                school_id: open_school(),
                name: "Hanbit High School".to_string(),
                cutoff_grade: None,
            },
            SchoolProfile {
                school_id: selective_school(),
                name: "Daehan Science High School".to_string(),
                cutoff_grade: Some(3.0),
            },
        ];

        Self {
            schools: Arc::new(
                profiles
                    .into_iter()
                    .map(|profile| (profile.school_id.clone(), profile))
                    .collect(),
            ),
        }
    }
}

impl SchoolReader for MemorySchools {
    async fn school(&self, school: &SchoolId) -> Result<Option<SchoolProfile>, ReaderError> {
        Ok(self.schools.get(school).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryTargets {
    targets: Arc<HashMap<StudentId, Vec<TargetSchool>>>,
}

impl MemoryTargets {
    pub(super) fn with(student: StudentId, targets: Vec<TargetSchool>) -> Self {
        let mut by_student = HashMap::new();
        by_student.insert(student, targets);
        Self {
            targets: Arc::new(by_student),
        }
    }
}

impl TargetListReader for MemoryTargets {
    async fn targets(&self, student: &StudentId) -> Result<Vec<TargetSchool>, ReaderError> {
        self.targets
            .get(student)
            .cloned()
            .ok_or(ReaderError::NotFound)
    }
}

pub(super) struct UnavailableRecords;

impl StudentRecordReader for UnavailableRecords {
    async fn grades(&self, _student: &StudentId) -> Result<Vec<GradeEntry>, ReaderError> {
        Err(ReaderError::Unavailable("records offline".to_string()))
    }

    async fn activities(&self, _student: &StudentId) -> Result<Vec<ActivityEntry>, ReaderError> {
        Ok(Vec::new())
    }

    async fn volunteer_entries(
        &self,
        _student: &StudentId,
    ) -> Result<Vec<VolunteerEntry>, ReaderError> {
        Ok(Vec::new())
    }

    async fn attendance(&self, _student: &StudentId) -> Result<Vec<AttendanceEntry>, ReaderError> {
        Ok(Vec::new())
    }
}

pub(super) type MemoryService = AdmissionFitService<MemoryRecords, MemorySchools, MemoryTargets>;

pub(super) fn build_service() -> MemoryService {
    // Listed out of priority order on purpose.
    let targets = vec![
        TargetSchool {
            school_id: selective_school(),
            priority: 2,
        },
        TargetSchool {
            school_id: open_school(),
            priority: 1,
        },
    ];

    AdmissionFitService::new(
        Arc::new(MemoryRecords::with(student(), challenge_records())),
        Arc::new(MemorySchools::seeded()),
        Arc::new(MemoryTargets::with(student(), targets)),
        FitConfig::default(),
    )
}

pub(super) fn unavailable_service(
) -> AdmissionFitService<UnavailableRecords, MemorySchools, MemoryTargets> {
    AdmissionFitService::new(
        Arc::new(UnavailableRecords),
        Arc::new(MemorySchools::seeded()),
        Arc::new(MemoryTargets::default()),
        FitConfig::default(),
    )
}

pub(super) fn admission_router_with_service(service: MemoryService) -> axum::Router {
    admission_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
