use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::customer_dto::CustomerRequest;
use crate::models::Customer;
use crate::utils::errors::{db_error, AppResult};
use crate::utils::validation::normalize_optional;

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CustomerRequest) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (id, customer_name, address, tel_no, mobile_no, tin)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.customer_name.trim())
        .bind(request.address.trim())
        .bind(normalize_optional(request.tel_no))
        .bind(normalize_optional(request.mobile_no))
        .bind(normalize_optional(request.tin))
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Error creating customer"))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Error finding customer"))
    }

    pub async fn find_all(&self) -> AppResult<Vec<Customer>> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY customer_name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Error listing customers"))
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Customer>> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Error listing customers"))
    }

    pub async fn update(&self, id: Uuid, request: CustomerRequest) -> AppResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET customer_name = $2, address = $3, tel_no = $4, mobile_no = $5, tin = $6, updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.customer_name.trim())
        .bind(request.address.trim())
        .bind(normalize_optional(request.tel_no))
        .bind(normalize_optional(request.mobile_no))
        .bind(normalize_optional(request.tin))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Error updating customer"))
    }

    /// Fails with a conflict while order requisitions still reference it
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Error deleting customer"))?;

        Ok(result.rows_affected() > 0)
    }
}
