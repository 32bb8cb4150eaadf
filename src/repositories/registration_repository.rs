use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Registration, RegistrationWithVehicle};
use crate::utils::errors::{db_error, AppResult};

const SELECT_WITH_VEHICLE: &str = r#"
    SELECT r.*, v.plate_number, v.make
    FROM registrations r
    JOIN vehicles v ON v.id = r.vehicle_id
"#;

pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn exists_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM registrations WHERE vehicle_id = $1)")
                .bind(vehicle_id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Error checking registration"))?;

        Ok(result.0)
    }

    /// A concurrent registration of the same vehicle surfaces as a conflict
    /// through the unique constraint on `vehicle_id`.
    pub async fn create(
        &self,
        vehicle_id: Uuid,
        sold_to: &str,
        registration_date: NaiveDate,
    ) -> AppResult<Registration> {
        sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (id, vehicle_id, sold_to, registration_date, deed_of_sale, id_status, mayor_permit)
            VALUES ($1, $2, $3, $4, TRUE, TRUE, TRUE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(sold_to)
        .bind(registration_date)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Error creating registration"))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RegistrationWithVehicle>> {
        sqlx::query_as::<_, RegistrationWithVehicle>(&format!("{} WHERE r.id = $1", SELECT_WITH_VEHICLE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Error finding registration"))
    }

    pub async fn find_all(&self) -> AppResult<Vec<RegistrationWithVehicle>> {
        sqlx::query_as::<_, RegistrationWithVehicle>(&format!(
            "{} ORDER BY r.created_at DESC",
            SELECT_WITH_VEHICLE
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Error listing registrations"))
    }
}
