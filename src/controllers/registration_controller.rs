use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::registration_dto::CreateRegistrationRequest;
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{Permission, RegistrationWithVehicle};
use crate::repositories::registration_repository::RegistrationRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::authorization_service::require_permission;
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};

pub struct RegistrationController {
    repository: RegistrationRepository,
    vehicles: VehicleRepository,
}

impl RegistrationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RegistrationRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateRegistrationRequest,
    ) -> AppResult<ApiResponse<RegistrationWithVehicle>> {
        require_permission(user, Permission::ManageVehicleRecords, "register vehicle")?;
        request.validate()?;

        if !request.checklist_complete() {
            return Err(AppError::ValidationError(
                "Deed of sale, ID and mayor's permit are all required".to_string(),
            ));
        }

        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &request.vehicle_id.to_string()))?;

        if self.repository.exists_for_vehicle(vehicle.id).await? {
            return Err(conflict_error("registration", "vehicle"));
        }

        let registration = self
            .repository
            .create(
                vehicle.id,
                request.sold_to.trim(),
                request.registration_date.unwrap_or_else(|| Utc::now().date_naive()),
            )
            .await?;
        info!("📝 Vehicle {} registered to {}", vehicle.plate_number, registration.sold_to);

        Ok(ApiResponse::success_with_message(
            RegistrationWithVehicle {
                registration,
                plate_number: vehicle.plate_number,
                make: vehicle.make,
            },
            "Registration created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<ApiResponse<RegistrationWithVehicle>> {
        let registration = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Registration", &id.to_string()))?;

        Ok(ApiResponse::success(registration))
    }

    pub async fn list(&self) -> AppResult<ApiResponse<Vec<RegistrationWithVehicle>>> {
        Ok(ApiResponse::success(self.repository.find_all().await?))
    }
}
