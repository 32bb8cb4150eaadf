use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::contractor_dto::{ContractorQuery, ContractorRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{Contractor, Permission};
use crate::repositories::contractor_repository::ContractorRepository;
use crate::services::authorization_service::require_permission;
use crate::utils::errors::{not_found_error, AppResult};

pub struct ContractorController {
    repository: ContractorRepository,
}

impl ContractorController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ContractorRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: ContractorRequest,
    ) -> AppResult<ApiResponse<Contractor>> {
        require_permission(user, Permission::ManageDirectory, "create contractor")?;
        request.validate()?;

        let contractor = self.repository.create(request).await?;
        Ok(ApiResponse::success_with_message(
            contractor,
            "Contractor created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<ApiResponse<Contractor>> {
        let contractor = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Contractor", &id.to_string()))?;

        Ok(ApiResponse::success(contractor))
    }

    /// All contractors, or only those with the requested assignment
    pub async fn list(&self, query: ContractorQuery) -> AppResult<ApiResponse<Vec<Contractor>>> {
        let contractors = match query.assignment {
            Some(assignment) => self.repository.find_by_assignment(assignment).await?,
            None => self.repository.find_all().await?,
        };

        Ok(ApiResponse::success(contractors))
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: ContractorRequest,
    ) -> AppResult<ApiResponse<Contractor>> {
        require_permission(user, Permission::ManageDirectory, "update contractor")?;
        request.validate()?;

        let contractor = self
            .repository
            .update(id, request)
            .await?
            .ok_or_else(|| not_found_error("Contractor", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            contractor,
            "Contractor updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<ApiResponse<()>> {
        require_permission(user, Permission::ManageDirectory, "delete contractor")?;

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Contractor", &id.to_string()));
        }

        Ok(ApiResponse::message("Contractor deleted successfully".to_string()))
    }
}
