use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{SchoolId, SchoolProfile, StudentId, StudentRecords};
use super::planner::{build_plan, ImprovementPlan};
use super::repository::{ReaderError, SchoolReader, StudentRecordReader, TargetListReader};
use super::scenarios::{compare_scenarios, ScenarioComparison};
use super::scoring::{FitConfig, FitEngine, FitTier};
use super::simulation::{simulate, SimulationInput, SimulationResult};

/// Service composing the injected readers with the fit engine.
pub struct AdmissionFitService<R, S, T> {
    records: Arc<R>,
    schools: Arc<S>,
    targets: Arc<T>,
    engine: Arc<FitEngine>,
}

/// One entry of a batch simulation across the student's target list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSimulation {
    pub school_id: SchoolId,
    pub school_name: String,
    pub priority: u8,
    pub result: SimulationResult,
}

impl<R, S, T> AdmissionFitService<R, S, T>
where
    R: StudentRecordReader + 'static,
    S: SchoolReader + 'static,
    T: TargetListReader + 'static,
{
    pub fn new(records: Arc<R>, schools: Arc<S>, targets: Arc<T>, config: FitConfig) -> Self {
        Self {
            records,
            schools,
            targets,
            engine: Arc::new(FitEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &FitEngine {
        &self.engine
    }

    /// Simulate hypothetical changes for one student against one school.
    pub async fn run_simulation(
        &self,
        student: &StudentId,
        school: &SchoolId,
        input: SimulationInput,
    ) -> Result<SimulationResult, FitServiceError> {
        debug!(%student, %school, empty_input = input.is_empty(), "running admission simulation");

        let profile = self.load_school(school).await?;
        let records = self.load_records(student).await?;

        Ok(simulate(
            &self.engine,
            &records,
            profile.cutoff_grade,
            &input,
        ))
    }

    /// Compare the canned improvement scenarios against the real baseline.
    pub async fn compare_scenarios(
        &self,
        student: &StudentId,
        school: &SchoolId,
    ) -> Result<ScenarioComparison, FitServiceError> {
        debug!(%student, %school, "comparing improvement scenarios");

        let profile = self.load_school(school).await?;
        let records = self.load_records(student).await?;

        Ok(compare_scenarios(
            &self.engine,
            &records,
            profile.cutoff_grade,
        ))
    }

    /// Build an improvement plan toward `target`, projected from `as_of`.
    pub async fn improvement_plan(
        &self,
        student: &StudentId,
        school: &SchoolId,
        target: FitTier,
        as_of: NaiveDate,
    ) -> Result<ImprovementPlan, FitServiceError> {
        debug!(%student, %school, %target, "building improvement plan");

        let profile = self.load_school(school).await?;
        let records = self.load_records(student).await?;

        Ok(build_plan(
            &self.engine,
            &records.snapshot(),
            profile.cutoff_grade,
            target,
            as_of,
        ))
    }

    /// Run the same simulation against every school on the student's target list.
    pub async fn simulate_all_targets(
        &self,
        student: &StudentId,
        input: SimulationInput,
    ) -> Result<Vec<TargetSimulation>, FitServiceError> {
        let mut targets = self
            .targets
            .targets(student)
            .await
            .map_err(|err| student_error(student, err))?;
        targets.sort_by_key(|target| target.priority);
        debug!(%student, targets = targets.len(), "simulating all target schools");

        let records = self.load_records(student).await?;
        let mut simulations = Vec::with_capacity(targets.len());
        for target in targets {
            let profile = self.load_school(&target.school_id).await?;
            simulations.push(TargetSimulation {
                result: simulate(&self.engine, &records, profile.cutoff_grade, &input),
                school_id: target.school_id,
                school_name: profile.name,
                priority: target.priority,
            });
        }

        Ok(simulations)
    }

    async fn load_school(&self, school: &SchoolId) -> Result<SchoolProfile, FitServiceError> {
        match self.schools.school(school).await {
            Ok(Some(profile)) => Ok(profile),
            Ok(None) | Err(ReaderError::NotFound) => {
                Err(FitServiceError::SchoolNotFound(school.clone()))
            }
            Err(err) => {
                warn!(%school, error = %err, "school reader failed");
                Err(err.into())
            }
        }
    }

    async fn load_records(&self, student: &StudentId) -> Result<StudentRecords, FitServiceError> {
        let (grades, activities, volunteer, attendance) = tokio::try_join!(
            self.records.grades(student),
            self.records.activities(student),
            self.records.volunteer_entries(student),
            self.records.attendance(student),
        )
        .map_err(|err| student_error(student, err))?;

        Ok(StudentRecords {
            grades,
            activities,
            volunteer,
            attendance,
        })
    }
}

fn student_error(student: &StudentId, err: ReaderError) -> FitServiceError {
    match err {
        ReaderError::NotFound => FitServiceError::StudentNotFound(student.clone()),
        other => {
            warn!(%student, error = %other, "student record reader failed");
            FitServiceError::Reader(other)
        }
    }
}

/// Error raised by the admission fit service.
#[derive(Debug, thiserror::Error)]
pub enum FitServiceError {
    #[error("school not found: {0}")]
    SchoolNotFound(SchoolId),
    #[error("student not found: {0}")]
    StudentNotFound(StudentId),
    #[error(transparent)]
    Reader(#[from] ReaderError),
}
