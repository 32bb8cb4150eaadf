use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::labor_repair_form_controller::LaborRepairFormController;
use crate::dto::labor_repair_form_dto::{
    CashAdvanceRequest, CreateLaborRepairFormRequest, LaborRepairFormResponse,
    UpdateLaborRepairFormRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

type FormResult = Result<Json<ApiResponse<LaborRepairFormResponse>>, AppError>;

pub fn create_labor_repair_form_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_form).get(list_forms))
        .route("/:id", get(get_form).put(update_form).delete(delete_form))
        .route("/by-labor-item/:labor_item_id", get(get_form_by_labor_item))
        .route("/:id/cash-advances", post(add_cash_advance))
        .route("/cash-advances/:id", put(update_cash_advance).delete(delete_cash_advance))
}

async fn create_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateLaborRepairFormRequest>,
) -> FormResult {
    let controller = LaborRepairFormController::new(state.pool.clone());
    Ok(Json(controller.create(&user, request).await?))
}

async fn list_forms(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LaborRepairFormResponse>>>, AppError> {
    let controller = LaborRepairFormController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_form(State(state): State<AppState>, Path(id): Path<Uuid>) -> FormResult {
    let controller = LaborRepairFormController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn get_form_by_labor_item(
    State(state): State<AppState>,
    Path(labor_item_id): Path<Uuid>,
) -> FormResult {
    let controller = LaborRepairFormController::new(state.pool.clone());
    Ok(Json(controller.get_by_labor_item(labor_item_id).await?))
}

async fn update_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLaborRepairFormRequest>,
) -> FormResult {
    let controller = LaborRepairFormController::new(state.pool.clone());
    Ok(Json(controller.update(&user, id, request).await?))
}

async fn delete_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = LaborRepairFormController::new(state.pool.clone());
    Ok(Json(controller.delete(&user, id).await?))
}

async fn add_cash_advance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<CashAdvanceRequest>,
) -> FormResult {
    let controller = LaborRepairFormController::new(state.pool.clone());
    Ok(Json(controller.add_cash_advance(&user, id, request).await?))
}

async fn update_cash_advance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<CashAdvanceRequest>,
) -> FormResult {
    let controller = LaborRepairFormController::new(state.pool.clone());
    Ok(Json(controller.update_cash_advance(&user, id, request).await?))
}

async fn delete_cash_advance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> FormResult {
    let controller = LaborRepairFormController::new(state.pool.clone());
    Ok(Json(controller.delete_cash_advance(&user, id).await?))
}
