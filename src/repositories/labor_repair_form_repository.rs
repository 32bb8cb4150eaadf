use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::labor_repair_form_dto::CashAdvanceInput;
use crate::models::{CashAdvance, LaborRepairForm};
use crate::repositories::sequence_repository::SequenceRepository;
use crate::services::cash_advance_ledger::fold_balances;
use crate::services::document_number::{lrf_number, LABOR_REPAIR_FORM_SEQUENCE};
use crate::utils::errors::{db_error, AppResult};
use crate::utils::validation::normalize_optional;

/// Header columns of a labor repair form
pub struct FormFields {
    pub contractor_name: String,
    pub make: String,
    pub plate_number: String,
    pub engine_number: String,
    pub amount: Decimal,
    pub or_number: Option<String>,
    pub scope_of_work_details: Option<String>,
}

pub struct LaborRepairFormRepository {
    pool: PgPool,
}

impl LaborRepairFormRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Allocates the LRF number, stores the form and its advances with
    /// balances folded from `amount`. Review and approval stamps are set to now.
    pub async fn create(
        &self,
        order_labor_item_id: Uuid,
        fields: FormFields,
        advances: Vec<CashAdvanceInput>,
    ) -> AppResult<LaborRepairForm> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Error starting transaction"))?;

        let sequence = SequenceRepository::next_value(&mut *tx, LABOR_REPAIR_FORM_SEQUENCE).await?;
        let form_id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO labor_repair_forms (
                id, order_labor_item_id, contractor_name, make, plate_number, engine_number, amount,
                or_number, scope_of_work_details, lrf_number, total_cash_advance, reviewed_by, approved_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 0, $11, $11)
            "#,
        )
        .bind(form_id)
        .bind(order_labor_item_id)
        .bind(fields.contractor_name.trim())
        .bind(fields.make.trim())
        .bind(fields.plate_number.trim())
        .bind(fields.engine_number.trim())
        .bind(fields.amount)
        .bind(normalize_optional(fields.or_number))
        .bind(normalize_optional(fields.scope_of_work_details))
        .bind(lrf_number(sequence))
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Error creating labor repair form"))?;

        let form = replace_advances(&mut *tx, form_id, fields.amount, advances).await?;

        tx.commit().await.map_err(db_error("Error committing labor repair form"))?;

        Ok(form)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LaborRepairForm>> {
        sqlx::query_as::<_, LaborRepairForm>("SELECT * FROM labor_repair_forms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Error finding labor repair form"))
    }

    pub async fn find_all(&self) -> AppResult<Vec<LaborRepairForm>> {
        sqlx::query_as::<_, LaborRepairForm>("SELECT * FROM labor_repair_forms ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Error listing labor repair forms"))
    }

    /// First form recorded for a labor item
    pub async fn find_by_labor_item(&self, order_labor_item_id: Uuid) -> AppResult<Option<LaborRepairForm>> {
        sqlx::query_as::<_, LaborRepairForm>(
            "SELECT * FROM labor_repair_forms WHERE order_labor_item_id = $1 ORDER BY created_at ASC LIMIT 1",
        )
        .bind(order_labor_item_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Error finding labor repair form"))
    }

    /// Advances of the given forms in insertion order
    pub async fn find_cash_advances(&self, form_ids: &[Uuid]) -> AppResult<Vec<CashAdvance>> {
        sqlx::query_as::<_, CashAdvance>(
            r#"
            SELECT * FROM labor_repair_form_cash_advances
            WHERE labor_repair_form_id = ANY($1)
            ORDER BY labor_repair_form_id, position
            "#,
        )
        .bind(form_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Error listing cash advances"))
    }

    /// Rewrites the header and replaces every advance, re-running the fold
    pub async fn update(
        &self,
        id: Uuid,
        fields: FormFields,
        advances: Vec<CashAdvanceInput>,
    ) -> AppResult<Option<LaborRepairForm>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Error starting transaction"))?;

        let result = sqlx::query(
            r#"
            UPDATE labor_repair_forms
            SET contractor_name = $2, make = $3, plate_number = $4, engine_number = $5, amount = $6,
                or_number = $7, scope_of_work_details = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(fields.contractor_name.trim())
        .bind(fields.make.trim())
        .bind(fields.plate_number.trim())
        .bind(fields.engine_number.trim())
        .bind(fields.amount)
        .bind(normalize_optional(fields.or_number))
        .bind(normalize_optional(fields.scope_of_work_details))
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Error updating labor repair form"))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        sqlx::query("DELETE FROM labor_repair_form_cash_advances WHERE labor_repair_form_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Error replacing cash advances"))?;

        let form = replace_advances(&mut *tx, id, fields.amount, advances).await?;

        tx.commit().await.map_err(db_error("Error committing labor repair form"))?;

        Ok(Some(form))
    }

    /// Cash advances go with it
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM labor_repair_forms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Error deleting labor repair form"))?;

        Ok(result.rows_affected() > 0)
    }

    /// Appends one advance with the balance as given, then refreshes the total
    pub async fn add_cash_advance(
        &self,
        form_id: Uuid,
        date: NaiveDate,
        amount: Decimal,
        balance: Decimal,
    ) -> AppResult<CashAdvance> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Error starting transaction"))?;

        let advance = sqlx::query_as::<_, CashAdvance>(
            r#"
            INSERT INTO labor_repair_form_cash_advances (id, labor_repair_form_id, position, date, amount, balance)
            VALUES (
                $1, $2,
                (SELECT COALESCE(MAX(position), 0) + 1 FROM labor_repair_form_cash_advances WHERE labor_repair_form_id = $2),
                $3, $4, $5
            )
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(form_id)
        .bind(date)
        .bind(amount)
        .bind(balance)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Error creating cash advance"))?;

        refresh_total(&mut *tx, form_id).await?;

        tx.commit().await.map_err(db_error("Error committing cash advance"))?;

        Ok(advance)
    }

    /// Rewrites one advance; balances of the other rows are left as stored
    pub async fn update_cash_advance(
        &self,
        id: Uuid,
        date: NaiveDate,
        amount: Decimal,
        balance: Decimal,
    ) -> AppResult<Option<CashAdvance>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Error starting transaction"))?;

        let advance = sqlx::query_as::<_, CashAdvance>(
            r#"
            UPDATE labor_repair_form_cash_advances
            SET date = $2, amount = $3, balance = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(date)
        .bind(amount)
        .bind(balance)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Error updating cash advance"))?;

        let Some(advance) = advance else {
            return Ok(None);
        };

        refresh_total(&mut *tx, advance.labor_repair_form_id).await?;

        tx.commit().await.map_err(db_error("Error committing cash advance"))?;

        Ok(Some(advance))
    }

    /// Returns the form the advance belonged to, if it existed
    pub async fn delete_cash_advance(&self, id: Uuid) -> AppResult<Option<Uuid>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Error starting transaction"))?;

        let form_id: Option<(Uuid,)> = sqlx::query_as(
            "DELETE FROM labor_repair_form_cash_advances WHERE id = $1 RETURNING labor_repair_form_id",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Error deleting cash advance"))?;

        let Some((form_id,)) = form_id else {
            return Ok(None);
        };

        refresh_total(&mut *tx, form_id).await?;

        tx.commit().await.map_err(db_error("Error committing cash advance"))?;

        Ok(Some(form_id))
    }
}

/// Inserts `advances` with folded balances and stores their total on the form
async fn replace_advances(
    conn: &mut PgConnection,
    form_id: Uuid,
    amount: Decimal,
    advances: Vec<CashAdvanceInput>,
) -> AppResult<LaborRepairForm> {
    let amounts: Vec<Decimal> = advances.iter().map(|a| a.amount).collect();
    let ledger = fold_balances(amount, &amounts)?;

    for (index, (advance, balance)) in advances.iter().zip(ledger.balances.iter()).enumerate() {
        sqlx::query(
            r#"
            INSERT INTO labor_repair_form_cash_advances (id, labor_repair_form_id, position, date, amount, balance)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(form_id)
        .bind(index as i32 + 1)
        .bind(advance.date)
        .bind(advance.amount)
        .bind(*balance)
        .execute(&mut *conn)
        .await
        .map_err(db_error("Error creating cash advance"))?;
    }

    sqlx::query_as::<_, LaborRepairForm>(
        "UPDATE labor_repair_forms SET total_cash_advance = $2 WHERE id = $1 RETURNING *",
    )
    .bind(form_id)
    .bind(ledger.total_cash_advance)
    .fetch_one(&mut *conn)
    .await
    .map_err(db_error("Error updating cash advance total"))
}

/// Flat sum of the remaining advances; stored balances are not recomputed
async fn refresh_total(conn: &mut PgConnection, form_id: Uuid) -> AppResult<()> {
    sqlx::query(
        r#"
        UPDATE labor_repair_forms
        SET total_cash_advance = (
                SELECT COALESCE(SUM(amount), 0) FROM labor_repair_form_cash_advances WHERE labor_repair_form_id = $1
            ),
            updated_at = $2
        WHERE id = $1
        "#,
    )
    .bind(form_id)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await
    .map_err(db_error("Error updating cash advance total"))?;

    Ok(())
}
