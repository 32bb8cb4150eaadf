use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::customer_dto::CustomerRequest;
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{Customer, Permission};
use crate::repositories::customer_repository::CustomerRepository;
use crate::services::authorization_service::require_permission;
use crate::utils::errors::{not_found_error, AppResult};

pub struct CustomerController {
    repository: CustomerRepository,
}

impl CustomerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CustomerRequest,
    ) -> AppResult<ApiResponse<Customer>> {
        require_permission(user, Permission::ManageDirectory, "create customer")?;
        request.validate()?;

        let customer = self.repository.create(request).await?;
        Ok(ApiResponse::success_with_message(
            customer,
            "Customer created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<ApiResponse<Customer>> {
        let customer = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Customer", &id.to_string()))?;

        Ok(ApiResponse::success(customer))
    }

    pub async fn list(&self) -> AppResult<ApiResponse<Vec<Customer>>> {
        Ok(ApiResponse::success(self.repository.find_all().await?))
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: CustomerRequest,
    ) -> AppResult<ApiResponse<Customer>> {
        require_permission(user, Permission::ManageDirectory, "update customer")?;
        request.validate()?;

        let customer = self
            .repository
            .update(id, request)
            .await?
            .ok_or_else(|| not_found_error("Customer", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            customer,
            "Customer updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<ApiResponse<()>> {
        require_permission(user, Permission::ManageDirectory, "delete customer")?;

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Customer", &id.to_string()));
        }

        Ok(ApiResponse::message("Customer deleted successfully".to_string()))
    }
}
