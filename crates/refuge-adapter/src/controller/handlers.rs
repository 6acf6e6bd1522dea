//! Axum request handlers
//!
//! Repository calls are synchronous, so they run on the blocking pool.
//! Handlers are generic over the storage and feed adapters.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;

use refuge_domain::{Location, RobotFeed, Survivor, SurvivorId, SurvivorRepository, SurvivorView};
use refuge_usecase::{self as usecase, SurvivorError};

use super::dto::{
    CreateSurvivorRequest, CreatedResponse, ReportDto, ResultResponse, SurvivorDto,
    UpdateLocationRequest,
};
use super::error::{ApiError, ApiResult};
use super::state::AppState;

async fn blocking<T, Op>(op: Op) -> ApiResult<T>
where
    Op: FnOnce() -> Result<T, SurvivorError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| ApiError::internal(format!("worker task failed: {}", e)))?
        .map_err(ApiError::from)
}

fn survivor_id(path: Result<Path<i64>, PathRejection>) -> ApiResult<SurvivorId> {
    let Path(id) = path.map_err(|_| ApiError::bad_request("Invalid Survivor ID"))?;
    Ok(SurvivorId::new(id))
}

fn payload<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    let Json(value) = body.map_err(|_| ApiError::bad_request("Invalid request payload"))?;
    Ok(value)
}

fn to_dto(survivor: Survivor) -> SurvivorDto {
    SurvivorDto::from(SurvivorView::from(survivor))
}

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}

/// `GET /survivors`. 404 when nobody is registered.
pub async fn list_survivors<R, F>(
    State(state): State<AppState<R, F>>,
) -> ApiResult<Json<Vec<SurvivorDto>>>
where
    R: SurvivorRepository + Clone + Send + Sync + 'static,
    F: Send + Sync + 'static,
{
    let repo = state.repo;
    let survivors = blocking(move || usecase::list_all(&repo)).await?;
    if survivors.is_empty() {
        return Err(ApiError::not_found("survivors not found"));
    }
    Ok(Json(survivors.into_iter().map(to_dto).collect()))
}

/// `POST /survivor`
pub async fn create_survivor<R, F>(
    State(state): State<AppState<R, F>>,
    body: Result<Json<CreateSurvivorRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)>
where
    R: SurvivorRepository + Clone + Send + Sync + 'static,
    F: Send + Sync + 'static,
{
    let request = payload(body)?;
    let mut repo = state.repo;
    let id = blocking(move || usecase::create(&mut repo, request.into())).await?;

    info!(survivor_id = %id, "Survivor registered");
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            survivor_id: id.value(),
        }),
    ))
}

/// `GET /survivor/:id`
pub async fn get_survivor<R, F>(
    State(state): State<AppState<R, F>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<SurvivorDto>>
where
    R: SurvivorRepository + Clone + Send + Sync + 'static,
    F: Send + Sync + 'static,
{
    let id = survivor_id(path)?;
    let repo = state.repo;
    let survivor = blocking(move || usecase::fetch(&repo, id)).await?;
    Ok(Json(to_dto(survivor)))
}

/// `PUT /survivor/:id`
pub async fn update_location<R, F>(
    State(state): State<AppState<R, F>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateLocationRequest>, JsonRejection>,
) -> ApiResult<Json<ResultResponse>>
where
    R: SurvivorRepository + Clone + Send + Sync + 'static,
    F: Send + Sync + 'static,
{
    let id = survivor_id(path)?;
    let location: Location = payload(body)?.into();
    let mut repo = state.repo;
    blocking(move || usecase::update_location(&mut repo, id, location)).await?;

    info!(survivor_id = %id, %location, "Location updated");
    Ok(Json(ResultResponse::new("success")))
}

/// `DELETE /survivor/:id`
pub async fn delete_survivor<R, F>(
    State(state): State<AppState<R, F>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ResultResponse>>
where
    R: SurvivorRepository + Clone + Send + Sync + 'static,
    F: Send + Sync + 'static,
{
    let id = survivor_id(path)?;
    let mut repo = state.repo;
    blocking(move || usecase::delete(&mut repo, id)).await?;

    info!(survivor_id = %id, "Survivor deleted");
    Ok(Json(ResultResponse::new("success")))
}

/// `POST /report/survivor/:id`
pub async fn flag_infection<R, F>(
    State(state): State<AppState<R, F>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ResultResponse>>
where
    R: SurvivorRepository + Clone + Send + Sync + 'static,
    F: Send + Sync + 'static,
{
    let id = survivor_id(path)?;
    let mut repo = state.repo;
    let report = blocking(move || usecase::flag_infection(&mut repo, id)).await?;

    info!(
        survivor_id = %id,
        report_count = report.report_count,
        infected = report.became_infected,
        "Infection reported"
    );
    Ok(Json(ResultResponse::new("survivor flagged successfully")))
}

/// `GET /report`
pub async fn report<R, F>(State(state): State<AppState<R, F>>) -> ApiResult<Json<ReportDto>>
where
    R: SurvivorRepository + Clone + Send + Sync + 'static,
    F: RobotFeed + Send + Sync + 'static,
{
    let report = usecase::generate_report(&state.repo, state.feed.as_ref()).await?;
    Ok(Json(report.into()))
}
