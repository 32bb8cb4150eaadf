use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::contractor_controller::ContractorController;
use crate::dto::contractor_dto::{ContractorQuery, ContractorRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Contractor;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_contractor_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_contractor).get(list_contractors))
        .route("/:id", get(get_contractor).put(update_contractor).delete(delete_contractor))
}

async fn create_contractor(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<ContractorRequest>,
) -> Result<Json<ApiResponse<Contractor>>, AppError> {
    let controller = ContractorController::new(state.pool.clone());
    Ok(Json(controller.create(&user, request).await?))
}

async fn list_contractors(
    State(state): State<AppState>,
    Query(query): Query<ContractorQuery>,
) -> Result<Json<ApiResponse<Vec<Contractor>>>, AppError> {
    let controller = ContractorController::new(state.pool.clone());
    Ok(Json(controller.list(query).await?))
}

async fn get_contractor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Contractor>>, AppError> {
    let controller = ContractorController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_contractor(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<ContractorRequest>,
) -> Result<Json<ApiResponse<Contractor>>, AppError> {
    let controller = ContractorController::new(state.pool.clone());
    Ok(Json(controller.update(&user, id, request).await?))
}

async fn delete_contractor(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ContractorController::new(state.pool.clone());
    Ok(Json(controller.delete(&user, id).await?))
}
