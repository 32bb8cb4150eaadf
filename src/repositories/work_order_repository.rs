use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::WorkOrder;
use crate::utils::errors::{db_error, AppResult};

pub struct WorkOrderRepository {
    pool: PgPool,
}

impl WorkOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        order_requisition_id: Uuid,
        contractor_id: Uuid,
        labor_repair_form_id: Option<Uuid>,
        expenses: Decimal,
        customer_billing: Decimal,
    ) -> AppResult<WorkOrder> {
        sqlx::query_as::<_, WorkOrder>(
            r#"
            INSERT INTO work_orders (id, order_requisition_id, contractor_id, labor_repair_form_id, expenses, customer_billing)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(order_requisition_id)
        .bind(contractor_id)
        .bind(labor_repair_form_id)
        .bind(expenses)
        .bind(customer_billing)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Error creating work order"))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WorkOrder>> {
        sqlx::query_as::<_, WorkOrder>("SELECT * FROM work_orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Error finding work order"))
    }

    pub async fn find_all(&self) -> AppResult<Vec<WorkOrder>> {
        sqlx::query_as::<_, WorkOrder>("SELECT * FROM work_orders ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Error listing work orders"))
    }

    /// Unset values keep what is stored
    pub async fn update(
        &self,
        id: Uuid,
        expenses: Option<Decimal>,
        customer_billing: Option<Decimal>,
    ) -> AppResult<Option<WorkOrder>> {
        sqlx::query_as::<_, WorkOrder>(
            r#"
            UPDATE work_orders
            SET expenses = COALESCE($2, expenses),
                customer_billing = COALESCE($3, customer_billing),
                updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(expenses)
        .bind(customer_billing)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Error updating work order"))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM work_orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Error deleting work order"))?;

        Ok(result.rows_affected() > 0)
    }
}
