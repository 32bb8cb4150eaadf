use chrono::{NaiveDate, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::order_requisition_dto::{LaborItemInput, MaterialItemInput};
use crate::models::{LaborItemStatus, OrderLaborItem, OrderMaterialItem, OrderRequisition, OrderStatus};
use crate::repositories::sequence_repository::SequenceRepository;
use crate::services::document_number::{or_number, ORDER_REQUISITION_SEQUENCE};
use crate::services::OrderTotals;
use crate::utils::errors::{db_error, AppResult};
use crate::utils::validation::normalize_optional;

/// Everything written when an order is created or replaced
pub struct OrderFields {
    pub customer_id: Uuid,
    pub contractor_id: Uuid,
    pub make: String,
    pub plate_number: String,
    pub engine_number: String,
    pub order_date: NaiveDate,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub labor_items: Vec<LaborItemInput>,
    pub material_items: Vec<MaterialItemInput>,
    pub totals: OrderTotals,
}

pub struct OrderRequisitionRepository {
    pool: PgPool,
}

impl OrderRequisitionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Allocates the OR number and stores the order with its items in one
    /// transaction.
    pub async fn create(&self, fields: OrderFields) -> AppResult<OrderRequisition> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Error starting transaction"))?;

        let sequence = SequenceRepository::next_value(&mut *tx, ORDER_REQUISITION_SEQUENCE).await?;
        let order_id = Uuid::new_v4();

        let order = sqlx::query_as::<_, OrderRequisition>(
            r#"
            INSERT INTO order_requisitions (
                id, customer_id, contractor_id, make, plate_number, engine_number, order_date, notes,
                generated_or_number, total_labor_expenses, total_material_expenses, overall_total, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(fields.customer_id)
        .bind(fields.contractor_id)
        .bind(fields.make.trim())
        .bind(fields.plate_number.trim())
        .bind(fields.engine_number.trim())
        .bind(fields.order_date)
        .bind(normalize_optional(fields.notes))
        .bind(or_number(sequence))
        .bind(fields.totals.labor)
        .bind(fields.totals.material)
        .bind(fields.totals.overall)
        .bind(fields.status)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Error creating order requisition"))?;

        insert_labor_items(&mut *tx, order_id, fields.labor_items).await?;
        insert_material_items(&mut *tx, order_id, fields.material_items).await?;

        tx.commit().await.map_err(db_error("Error committing order requisition"))?;

        Ok(order)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<OrderRequisition>> {
        sqlx::query_as::<_, OrderRequisition>("SELECT * FROM order_requisitions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Error finding order requisition"))
    }

    pub async fn find_all(&self) -> AppResult<Vec<OrderRequisition>> {
        sqlx::query_as::<_, OrderRequisition>("SELECT * FROM order_requisitions ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Error listing order requisitions"))
    }

    /// Labor items of the given orders, by item number within each order
    pub async fn find_labor_items(&self, order_ids: &[Uuid]) -> AppResult<Vec<OrderLaborItem>> {
        sqlx::query_as::<_, OrderLaborItem>(
            r#"
            SELECT * FROM order_labor_items
            WHERE order_requisition_id = ANY($1)
            ORDER BY order_requisition_id, item_number
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Error listing labor items"))
    }

    pub async fn find_material_items(&self, order_ids: &[Uuid]) -> AppResult<Vec<OrderMaterialItem>> {
        sqlx::query_as::<_, OrderMaterialItem>(
            r#"
            SELECT * FROM order_material_items
            WHERE order_requisition_id = ANY($1)
            ORDER BY order_requisition_id, item_number
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Error listing material items"))
    }

    /// Replaces the header and both item lists; the OR number is kept.
    ///
    /// Dropping the old labor items also drops their labor repair forms.
    pub async fn update(&self, id: Uuid, fields: OrderFields) -> AppResult<Option<OrderRequisition>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Error starting transaction"))?;

        let order = sqlx::query_as::<_, OrderRequisition>(
            r#"
            UPDATE order_requisitions
            SET customer_id = $2, contractor_id = $3, make = $4, plate_number = $5, engine_number = $6,
                order_date = $7, notes = $8, total_labor_expenses = $9, total_material_expenses = $10,
                overall_total = $11, status = $12, updated_at = $13
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.customer_id)
        .bind(fields.contractor_id)
        .bind(fields.make.trim())
        .bind(fields.plate_number.trim())
        .bind(fields.engine_number.trim())
        .bind(fields.order_date)
        .bind(normalize_optional(fields.notes))
        .bind(fields.totals.labor)
        .bind(fields.totals.material)
        .bind(fields.totals.overall)
        .bind(fields.status)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Error updating order requisition"))?;

        let Some(order) = order else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM order_labor_items WHERE order_requisition_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Error replacing labor items"))?;

        sqlx::query("DELETE FROM order_material_items WHERE order_requisition_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Error replacing material items"))?;

        insert_labor_items(&mut *tx, id, fields.labor_items).await?;
        insert_material_items(&mut *tx, id, fields.material_items).await?;

        tx.commit().await.map_err(db_error("Error committing order requisition"))?;

        Ok(Some(order))
    }

    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Option<OrderRequisition>> {
        sqlx::query_as::<_, OrderRequisition>(
            "UPDATE order_requisitions SET status = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Error updating order status"))
    }

    pub async fn find_labor_item(&self, id: Uuid) -> AppResult<Option<OrderLaborItem>> {
        sqlx::query_as::<_, OrderLaborItem>("SELECT * FROM order_labor_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Error finding labor item"))
    }

    /// Touches only the item; parent totals and status are unchanged
    pub async fn update_labor_item_status(
        &self,
        id: Uuid,
        status: LaborItemStatus,
    ) -> AppResult<Option<OrderLaborItem>> {
        sqlx::query_as::<_, OrderLaborItem>(
            "UPDATE order_labor_items SET status = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Error updating labor item status"))
    }

    /// Single statement, safe to repeat
    pub async fn update_labor_item_notes(
        &self,
        id: Uuid,
        notes: Option<String>,
    ) -> AppResult<Option<OrderLaborItem>> {
        sqlx::query_as::<_, OrderLaborItem>(
            "UPDATE order_labor_items SET notes = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(notes)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Error updating labor item notes"))
    }

    /// Items, labor repair forms, cash advances and work orders go with it
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM order_requisitions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Error deleting order requisition"))?;

        Ok(result.rows_affected() > 0)
    }
}

async fn insert_labor_items(
    conn: &mut PgConnection,
    order_id: Uuid,
    items: Vec<LaborItemInput>,
) -> AppResult<()> {
    for (index, item) in items.into_iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO order_labor_items (
                id, order_requisition_id, item_number, description, expenses,
                mechanic, assignment, remarks, notes, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(order_id)
        .bind(index as i32 + 1)
        .bind(item.description.trim())
        .bind(item.expenses)
        .bind(normalize_optional(item.mechanic))
        .bind(normalize_optional(item.assignment))
        .bind(normalize_optional(item.remarks))
        .bind(normalize_optional(item.notes))
        .bind(item.status)
        .execute(&mut *conn)
        .await
        .map_err(db_error("Error creating labor item"))?;
    }

    Ok(())
}

async fn insert_material_items(
    conn: &mut PgConnection,
    order_id: Uuid,
    items: Vec<MaterialItemInput>,
) -> AppResult<()> {
    for (index, item) in items.into_iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO order_material_items (id, order_requisition_id, item_number, quantity, description, expenses)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(order_id)
        .bind(index as i32 + 1)
        .bind(item.quantity)
        .bind(item.description.trim())
        .bind(item.expenses)
        .execute(&mut *conn)
        .await
        .map_err(db_error("Error creating material item"))?;
    }

    Ok(())
}
