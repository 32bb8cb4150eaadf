use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::config::AdminBootstrap;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{Role, UserResponse};
use crate::repositories::user_repository::UserRepository;
use crate::services::auth_service::{hash_password, verify_password};
use crate::services::JwtService;
use crate::utils::errors::{AppError, AppResult};

pub struct AuthController {
    repository: UserRepository,
    jwt: Arc<JwtService>,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt: Arc<JwtService>) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt,
        }
    }

    /// Unknown email and wrong password get the same answer
    pub async fn login(&self, request: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
        request.validate()?;

        let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(invalid());
        }

        let token = self.jwt.generate_access_token(&user)?;
        info!("🔐 {} logged in as {}", user.email, user.role);

        Ok(ApiResponse::success_with_message(
            LoginResponse {
                token,
                token_type: "Bearer".to_string(),
                expires_in: self.jwt.expires_in(),
                user: UserResponse::from(user),
            },
            "Login successful".to_string(),
        ))
    }

    pub async fn me(&self, user: &AuthenticatedUser) -> AppResult<ApiResponse<UserResponse>> {
        let account = self
            .repository
            .find_by_id(user.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

        Ok(ApiResponse::success(UserResponse::from(account)))
    }

    /// Creates the configured administrator unless the email is already in
    /// use. Returns whether an account was created.
    pub async fn bootstrap_admin(&self, admin: &AdminBootstrap) -> AppResult<bool> {
        if self.repository.find_by_email(&admin.email).await?.is_some() {
            return Ok(false);
        }

        let password_hash = hash_password(&admin.password)?;
        let user = self
            .repository
            .create(admin.name.trim(), &admin.email, &password_hash, Role::Admin)
            .await?;
        info!("👤 Administrator account {} created", user.email);

        Ok(true)
    }
}
