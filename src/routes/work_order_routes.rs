use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::work_order_controller::WorkOrderController;
use crate::dto::work_order_dto::{CreateWorkOrderRequest, UpdateWorkOrderRequest, WorkOrderResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_work_order_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_work_order).get(list_work_orders))
        .route("/:id", get(get_work_order).put(update_work_order).delete(delete_work_order))
}

async fn create_work_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateWorkOrderRequest>,
) -> Result<Json<ApiResponse<WorkOrderResponse>>, AppError> {
    let controller = WorkOrderController::new(state.pool.clone());
    Ok(Json(controller.create(&user, request, &state.config).await?))
}

async fn list_work_orders(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<WorkOrderResponse>>>, AppError> {
    let controller = WorkOrderController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_work_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<WorkOrderResponse>>, AppError> {
    let controller = WorkOrderController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_work_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateWorkOrderRequest>,
) -> Result<Json<ApiResponse<WorkOrderResponse>>, AppError> {
    let controller = WorkOrderController::new(state.pool.clone());
    Ok(Json(controller.update(&user, id, request).await?))
}

async fn delete_work_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = WorkOrderController::new(state.pool.clone());
    Ok(Json(controller.delete(&user, id).await?))
}
