use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::registration_controller::RegistrationController;
use crate::dto::registration_dto::CreateRegistrationRequest;
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::RegistrationWithVehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_registration_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_registration).get(list_registrations))
        .route("/:id", get(get_registration))
}

async fn create_registration(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateRegistrationRequest>,
) -> Result<Json<ApiResponse<RegistrationWithVehicle>>, AppError> {
    let controller = RegistrationController::new(state.pool.clone());
    Ok(Json(controller.create(&user, request).await?))
}

async fn list_registrations(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RegistrationWithVehicle>>>, AppError> {
    let controller = RegistrationController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RegistrationWithVehicle>>, AppError> {
    let controller = RegistrationController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}
