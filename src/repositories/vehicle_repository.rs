use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{SellingPrice, Vehicle};
use crate::utils::errors::{db_error, AppResult};

/// Column values written by create and update
pub struct VehicleFields {
    pub plate_number: String,
    pub make: String,
    pub engine_number: String,
    pub purchase_date: NaiveDate,
    pub purchase_cost: Decimal,
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, fields: VehicleFields) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, plate_number, make, engine_number, purchase_date, purchase_cost)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(fields.plate_number)
        .bind(fields.make)
        .bind(fields.engine_number)
        .bind(fields.purchase_date)
        .bind(fields.purchase_cost)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Error creating vehicle"))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Error finding vehicle"))
    }

    pub async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Error listing vehicles"))
    }

    /// `exclude_id` skips the record being updated
    pub async fn plate_number_exists(&self, plate_number: &str, exclude_id: Option<Uuid>) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate_number = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(plate_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Error checking plate number"))?;

        Ok(result.0)
    }

    pub async fn engine_number_exists(&self, engine_number: &str, exclude_id: Option<Uuid>) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE engine_number = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(engine_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Error checking engine number"))?;

        Ok(result.0)
    }

    pub async fn update(&self, id: Uuid, fields: VehicleFields) -> AppResult<Option<Vehicle>> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET plate_number = $2, make = $3, engine_number = $4, purchase_date = $5, purchase_cost = $6, updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.plate_number)
        .bind(fields.make)
        .bind(fields.engine_number)
        .bind(fields.purchase_date)
        .bind(fields.purchase_cost)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Error updating vehicle"))
    }

    /// Returns false when nothing was deleted
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Error deleting vehicle"))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn create_selling_price(&self, vehicle_id: Uuid, selling_price: Decimal) -> AppResult<SellingPrice> {
        sqlx::query_as::<_, SellingPrice>(
            r#"
            INSERT INTO selling_prices (id, vehicle_id, selling_price)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(selling_price)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Error creating selling price"))
    }

    pub async fn find_all_selling_prices(&self) -> AppResult<Vec<SellingPrice>> {
        sqlx::query_as::<_, SellingPrice>("SELECT * FROM selling_prices ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Error listing selling prices"))
    }
}
