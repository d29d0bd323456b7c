//! Admission fit simulation: scoring, classification, what-if simulation, scenario
//! comparison, and improvement planning over read-only student and school records.

pub mod domain;
pub mod import;
pub mod planner;
pub(crate) mod records;
pub mod repository;
pub mod router;
pub mod scenarios;
pub mod scoring;
pub mod service;
pub mod simulation;

#[cfg(test)]
mod tests;

pub use domain::{
    ActivityEntry, AttendanceEntry, GradeEntry, SchoolId, SchoolProfile, StudentId,
    StudentRecordSnapshot, StudentRecords, SubjectRank, TargetSchool, VolunteerEntry,
};
pub use import::{GradeCsvImporter, RecordImportError};
pub use planner::{
    build_plan, Difficulty, ImprovementAction, ImprovementPlan, ImprovementSuggestion,
    TimeEstimate,
};
pub use records::{average_rank, clamp_rank, latest_ranked_grades, shift_ranks};
pub use repository::{ReaderError, SchoolReader, StudentRecordReader, TargetListReader};
pub use router::admission_router;
pub use scenarios::{
    compare_scenarios, hypothetical_grades, ScenarioComparison, ScenarioKind, ScenarioOutcome,
};
pub use scoring::{
    classify, estimate_probability, fit_threshold, FitAssessment, FitConfig, FitEngine, FitTier,
    ScoreView, SubScores,
};
pub use service::{AdmissionFitService, FitServiceError, TargetSimulation};
pub use simulation::{
    simulate, ChangeCategory, ChangeFactor, HypotheticalGrade, Recommendation, SimulationInput,
    SimulationResult,
};
