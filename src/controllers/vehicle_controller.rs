use std::collections::HashMap;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateSellingPriceRequest, VehicleRequest, VehicleWithSellingPrices};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{Permission, SellingPrice, Vehicle};
use crate::repositories::vehicle_repository::{VehicleFields, VehicleRepository};
use crate::services::authorization_service::require_permission;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};
use crate::utils::validation::normalize_plate_number;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: VehicleRequest,
    ) -> AppResult<ApiResponse<Vehicle>> {
        require_permission(user, Permission::ManageVehicleRecords, "create vehicle")?;
        request.validate()?;

        let fields = self.checked_fields(request, None).await?;
        let vehicle = self.repository.create(fields).await?;
        info!("🚗 Vehicle {} created by {}", vehicle.plate_number, user.email);

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehicle created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<ApiResponse<Vehicle>> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        Ok(ApiResponse::success(vehicle))
    }

    pub async fn list(&self) -> AppResult<ApiResponse<Vec<Vehicle>>> {
        let vehicles = self.repository.find_all().await?;
        Ok(ApiResponse::success(vehicles))
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: VehicleRequest,
    ) -> AppResult<ApiResponse<Vehicle>> {
        require_permission(user, Permission::ManageVehicleRecords, "update vehicle")?;
        request.validate()?;

        let fields = self.checked_fields(request, Some(id)).await?;
        let vehicle = self
            .repository
            .update(id, fields)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehicle updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<ApiResponse<()>> {
        require_permission(user, Permission::ManageVehicleRecords, "delete vehicle")?;

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }
        info!("🗑️ Vehicle {} deleted by {}", id, user.email);

        Ok(ApiResponse::message("Vehicle deleted successfully".to_string()))
    }

    pub async fn create_selling_price(
        &self,
        user: &AuthenticatedUser,
        vehicle_id: Uuid,
        request: CreateSellingPriceRequest,
    ) -> AppResult<ApiResponse<SellingPrice>> {
        require_permission(user, Permission::ManageVehicleRecords, "record selling price")?;
        request.validate()?;

        if self.repository.find_by_id(vehicle_id).await?.is_none() {
            return Err(not_found_error("Vehicle", &vehicle_id.to_string()));
        }

        let price = self
            .repository
            .create_selling_price(vehicle_id, request.selling_price)
            .await?;

        Ok(ApiResponse::success_with_message(
            price,
            "Selling price recorded successfully".to_string(),
        ))
    }

    pub async fn list_with_selling_prices(&self) -> AppResult<ApiResponse<Vec<VehicleWithSellingPrices>>> {
        let vehicles = self.repository.find_all().await?;
        let mut prices: HashMap<Uuid, Vec<SellingPrice>> = HashMap::new();
        for price in self.repository.find_all_selling_prices().await? {
            prices.entry(price.vehicle_id).or_default().push(price);
        }

        let response = vehicles
            .into_iter()
            .map(|vehicle| VehicleWithSellingPrices {
                selling_prices: prices.remove(&vehicle.id).unwrap_or_default(),
                vehicle,
            })
            .collect();

        Ok(ApiResponse::success(response))
    }

    /// Normalizes the plate and enforces plate/engine uniqueness
    async fn checked_fields(&self, request: VehicleRequest, exclude_id: Option<Uuid>) -> AppResult<VehicleFields> {
        let plate_number = normalize_plate_number(&request.plate_number);
        let engine_number = request.engine_number.trim().to_string();

        if self.repository.plate_number_exists(&plate_number, exclude_id).await? {
            return Err(conflict_error("vehicle", "plate number"));
        }
        if self.repository.engine_number_exists(&engine_number, exclude_id).await? {
            return Err(conflict_error("vehicle", "engine number"));
        }

        Ok(VehicleFields {
            plate_number,
            make: request.make.trim().to_string(),
            engine_number,
            purchase_date: request.purchase_date,
            purchase_cost: request.purchase_cost,
        })
    }
}
