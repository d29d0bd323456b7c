use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{SchoolId, StudentId};
use super::repository::{ReaderError, SchoolReader, StudentRecordReader, TargetListReader};
use super::scoring::FitTier;
use super::service::{AdmissionFitService, FitServiceError};
use super::simulation::SimulationInput;

type SharedService<R, S, T> = Arc<AdmissionFitService<R, S, T>>;

/// Router builder exposing the simulation, scenario, and planning endpoints.
pub fn admission_router<R, S, T>(service: SharedService<R, S, T>) -> Router
where
    R: StudentRecordReader + 'static,
    S: SchoolReader + 'static,
    T: TargetListReader + 'static,
{
    Router::new()
        .route(
            "/api/v1/students/:student_id/simulations",
            post(simulate_targets_handler::<R, S, T>),
        )
        .route(
            "/api/v1/students/:student_id/simulations/:school_id",
            post(simulation_handler::<R, S, T>),
        )
        .route(
            "/api/v1/students/:student_id/scenarios/:school_id",
            get(scenarios_handler::<R, S, T>),
        )
        .route(
            "/api/v1/students/:student_id/improvement-plan/:school_id",
            get(plan_handler::<R, S, T>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlanQuery {
    #[serde(default)]
    pub(crate) target_tier: Option<FitTier>,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) async fn simulation_handler<R, S, T>(
    State(service): State<SharedService<R, S, T>>,
    Path((student_id, school_id)): Path<(String, String)>,
    Json(input): Json<SimulationInput>,
) -> Response
where
    R: StudentRecordReader + 'static,
    S: SchoolReader + 'static,
    T: TargetListReader + 'static,
{
    let student = StudentId(student_id);
    let school = SchoolId(school_id);
    match service.run_simulation(&student, &school, input).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn simulate_targets_handler<R, S, T>(
    State(service): State<SharedService<R, S, T>>,
    Path(student_id): Path<String>,
    Json(input): Json<SimulationInput>,
) -> Response
where
    R: StudentRecordReader + 'static,
    S: SchoolReader + 'static,
    T: TargetListReader + 'static,
{
    let student = StudentId(student_id);
    match service.simulate_all_targets(&student, input).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn scenarios_handler<R, S, T>(
    State(service): State<SharedService<R, S, T>>,
    Path((student_id, school_id)): Path<(String, String)>,
) -> Response
where
    R: StudentRecordReader + 'static,
    S: SchoolReader + 'static,
    T: TargetListReader + 'static,
{
    let student = StudentId(student_id);
    let school = SchoolId(school_id);
    match service.compare_scenarios(&student, &school).await {
        Ok(comparison) => (StatusCode::OK, Json(comparison)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn plan_handler<R, S, T>(
    State(service): State<SharedService<R, S, T>>,
    Path((student_id, school_id)): Path<(String, String)>,
    Query(query): Query<PlanQuery>,
) -> Response
where
    R: StudentRecordReader + 'static,
    S: SchoolReader + 'static,
    T: TargetListReader + 'static,
{
    let student = StudentId(student_id);
    let school = SchoolId(school_id);
    let target = query.target_tier.unwrap_or_default();
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());

    match service
        .improvement_plan(&student, &school, target, today)
        .await
    {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) fn error_status(err: &FitServiceError) -> StatusCode {
    match err {
        FitServiceError::SchoolNotFound(_)
        | FitServiceError::StudentNotFound(_)
        | FitServiceError::Reader(ReaderError::NotFound) => StatusCode::NOT_FOUND,
        FitServiceError::Reader(ReaderError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn error_response(err: FitServiceError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (error_status(&err), Json(payload)).into_response()
}
