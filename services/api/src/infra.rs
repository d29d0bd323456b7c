use admission_fit::admissions::{
    ActivityEntry, AttendanceEntry, GradeEntry, ReaderError, SchoolId, SchoolProfile,
    SchoolReader, StudentId, StudentRecordReader, StudentRecords, TargetListReader, TargetSchool,
    VolunteerEntry,
};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) const DEMO_STUDENT: &str = "stu-1001";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryStudentRecords {
    students: Arc<HashMap<StudentId, StudentRecords>>,
}

impl InMemoryStudentRecords {
    fn lookup(&self, student: &StudentId) -> Result<&StudentRecords, ReaderError> {
        self.students.get(student).ok_or(ReaderError::NotFound)
    }
}

impl StudentRecordReader for InMemoryStudentRecords {
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
pub(crate) struct InMemorySchoolDirectory {
    schools: Arc<HashMap<SchoolId, SchoolProfile>>,
}

impl SchoolReader for InMemorySchoolDirectory {
    async fn school(&self, school: &SchoolId) -> Result<Option<SchoolProfile>, ReaderError> {
        Ok(self.schools.get(school).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTargetLists {
    targets: Arc<HashMap<StudentId, Vec<TargetSchool>>>,
}

impl TargetListReader for InMemoryTargetLists {
    async fn targets(&self, student: &StudentId) -> Result<Vec<TargetSchool>, ReaderError> {
        self.targets
            .get(student)
            .cloned()
            .ok_or(ReaderError::NotFound)
    }
}

/// Readers pre-populated with one demo student and three target schools.
pub(crate) fn seeded_readers() -> (
    InMemoryStudentRecords,
    InMemorySchoolDirectory,
    InMemoryTargetLists,
) {
    let student = StudentId(DEMO_STUDENT.to_string());

    let schools = [
        ("seoul-global", "Seoul Global High School", Some(2.5)),
        ("hanbit-high", "Hanbit High School", Some(5.0)),
        ("riverside-arts", "Riverside Arts High School", None),
    ];
    let directory: HashMap<SchoolId, SchoolProfile> = schools
        .iter()
        .map(|(id, name, cutoff)| {
            let school_id = SchoolId((*id).to_string());
            (
                school_id.clone(),
                SchoolProfile {
                    school_id,
                    name: (*name).to_string(),
                    cutoff_grade: *cutoff,
                },
            )
        })
        .collect();

    let targets = schools
        .iter()
        .zip(1u8..)
        .map(|((id, _, _), priority)| TargetSchool {
            school_id: SchoolId((*id).to_string()),
            priority,
        })
        .collect();

    let mut records = HashMap::new();
    records.insert(student.clone(), demo_student_records());
    let mut target_lists = HashMap::new();
    target_lists.insert(student, targets);

    (
        InMemoryStudentRecords {
            students: Arc::new(records),
        },
        InMemorySchoolDirectory {
            schools: Arc::new(directory),
        },
        InMemoryTargetLists {
            targets: Arc::new(target_lists),
        },
    )
}

fn demo_student_records() -> StudentRecords {
    let grade = |subject: &str, rank: Option<u8>, year: i32, term: u8| GradeEntry {
        subject: subject.to_string(),
        rank,
        year,
        term,
    };

    StudentRecords {
        grades: vec![
            grade("Korean", Some(4), 2024, 2),
            grade("Korean", Some(3), 2025, 1),
            grade("Math", Some(5), 2025, 1),
            grade("English", Some(3), 2025, 1),
            grade("Science", Some(4), 2025, 1),
            grade("Social Studies", Some(4), 2025, 1),
            grade("Physical Education", None, 2025, 1),
        ],
        activities: ["Debate society", "Coding club"]
            .into_iter()
            .map(|title| ActivityEntry {
                title: title.to_string(),
            })
            .collect(),
        volunteer: vec![
            VolunteerEntry {
                organization: "Neighborhood library".to_string(),
                hours: 10.0,
            },
            VolunteerEntry {
                organization: "Animal shelter".to_string(),
                hours: 6.0,
            },
        ],
        attendance: vec![AttendanceEntry {
            unexcused_absences: 0,
            lateness: 1,
        }],
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
