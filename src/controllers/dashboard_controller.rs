use sqlx::PgPool;

use crate::dto::dashboard_dto::DashboardResponse;
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::repositories::dashboard_repository::DashboardRepository;
use crate::services::dashboard_service::{dashboard_title, navigation};
use crate::utils::errors::AppResult;

pub struct DashboardController {
    repository: DashboardRepository,
}

impl DashboardController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DashboardRepository::new(pool),
        }
    }

    /// Landing data for the caller's role
    pub async fn get(&self, user: &AuthenticatedUser) -> AppResult<ApiResponse<DashboardResponse>> {
        let counts = self.repository.counts().await?;

        Ok(ApiResponse::success(DashboardResponse {
            role: user.role,
            title: dashboard_title(user.role),
            navigation: navigation(user.role),
            user: user.clone(),
            counts,
        }))
    }
}
