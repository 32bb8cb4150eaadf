use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::order_requisition_controller::OrderRequisitionController;
use crate::dto::order_requisition_dto::{
    OrderRequisitionRequest, OrderRequisitionResponse, UpdateLaborItemNotesRequest,
    UpdateLaborItemStatusRequest, UpdateOrderStatusRequest, WorkOrderPreviewQuery,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{OrderLaborItem, OrderRequisition};
use crate::services::WorkOrderBreakdown;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_order_requisition_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/:id", get(get_order).put(update_order).delete(delete_order))
        .route("/:id/status", patch(update_order_status))
        .route("/:id/labor-items", get(list_labor_items))
        .route("/:id/work-order-preview", get(work_order_preview))
        .route("/labor-items/:id/status", patch(update_labor_item_status))
        .route("/labor-items/:id/notes", patch(update_labor_item_notes))
}

async fn create_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<OrderRequisitionRequest>,
) -> Result<Json<ApiResponse<OrderRequisitionResponse>>, AppError> {
    let controller = OrderRequisitionController::new(state.pool.clone());
    Ok(Json(controller.create(&user, request).await?))
}

async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OrderRequisitionResponse>>>, AppError> {
    let controller = OrderRequisitionController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrderRequisitionResponse>>, AppError> {
    let controller = OrderRequisitionController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<OrderRequisitionRequest>,
) -> Result<Json<ApiResponse<OrderRequisitionResponse>>, AppError> {
    let controller = OrderRequisitionController::new(state.pool.clone());
    Ok(Json(controller.update(&user, id, request).await?))
}

async fn delete_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = OrderRequisitionController::new(state.pool.clone());
    Ok(Json(controller.delete(&user, id).await?))
}

async fn update_order_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> Result<Json<ApiResponse<OrderRequisition>>, AppError> {
    let controller = OrderRequisitionController::new(state.pool.clone());
    Ok(Json(controller.update_status(&user, id, request).await?))
}

async fn list_labor_items(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<OrderLaborItem>>>, AppError> {
    let controller = OrderRequisitionController::new(state.pool.clone());
    Ok(Json(controller.labor_items(id).await?))
}

async fn work_order_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<WorkOrderPreviewQuery>,
) -> Result<Json<ApiResponse<WorkOrderBreakdown>>, AppError> {
    let controller = OrderRequisitionController::new(state.pool.clone());
    Ok(Json(controller.work_order_preview(id, query, &state.config).await?))
}

async fn update_labor_item_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLaborItemStatusRequest>,
) -> Result<Json<ApiResponse<OrderLaborItem>>, AppError> {
    let controller = OrderRequisitionController::new(state.pool.clone());
    Ok(Json(controller.update_labor_item_status(&user, id, request).await?))
}

async fn update_labor_item_notes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLaborItemNotesRequest>,
) -> Result<Json<ApiResponse<OrderLaborItem>>, AppError> {
    let controller = OrderRequisitionController::new(state.pool.clone());
    Ok(Json(controller.update_labor_item_notes(&user, id, request).await?))
}
