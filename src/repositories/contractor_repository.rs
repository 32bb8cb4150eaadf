use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::contractor_dto::ContractorRequest;
use crate::models::{Assignment, Contractor};
use crate::utils::errors::{db_error, AppResult};
use crate::utils::validation::normalize_optional;

pub struct ContractorRepository {
    pool: PgPool,
}

impl ContractorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: ContractorRequest) -> AppResult<Contractor> {
        sqlx::query_as::<_, Contractor>(
            r#"
            INSERT INTO contractors (id, contractor_name, address, tel_no, mobile_no, tin, assignment)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.contractor_name.trim())
        .bind(request.address.trim())
        .bind(normalize_optional(request.tel_no))
        .bind(normalize_optional(request.mobile_no))
        .bind(normalize_optional(request.tin))
        .bind(request.assignment)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Error creating contractor"))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Contractor>> {
        sqlx::query_as::<_, Contractor>("SELECT * FROM contractors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Error finding contractor"))
    }

    pub async fn find_all(&self) -> AppResult<Vec<Contractor>> {
        sqlx::query_as::<_, Contractor>("SELECT * FROM contractors ORDER BY contractor_name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Error listing contractors"))
    }

    pub async fn find_by_assignment(&self, assignment: Assignment) -> AppResult<Vec<Contractor>> {
        sqlx::query_as::<_, Contractor>(
            "SELECT * FROM contractors WHERE assignment = $1 ORDER BY contractor_name ASC",
        )
        .bind(assignment)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Error listing contractors"))
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Contractor>> {
        sqlx::query_as::<_, Contractor>("SELECT * FROM contractors WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Error listing contractors"))
    }

    pub async fn update(&self, id: Uuid, request: ContractorRequest) -> AppResult<Option<Contractor>> {
        sqlx::query_as::<_, Contractor>(
            r#"
            UPDATE contractors
            SET contractor_name = $2, address = $3, tel_no = $4, mobile_no = $5, tin = $6, assignment = $7, updated_at = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.contractor_name.trim())
        .bind(request.address.trim())
        .bind(normalize_optional(request.tel_no))
        .bind(normalize_optional(request.mobile_no))
        .bind(normalize_optional(request.tin))
        .bind(request.assignment)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Error updating contractor"))
    }

    /// Fails with a conflict while orders or work orders still reference it
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM contractors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Error deleting contractor"))?;

        Ok(result.rows_affected() > 0)
    }
}
