//! Registration model
//!
//! Sale registration of a vehicle with its document checklist.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Registration row from the `registrations` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub sold_to: String,
    pub registration_date: NaiveDate,
    pub deed_of_sale: bool,
    pub id_status: bool,
    pub mayor_permit: bool,
    pub created_at: DateTime<Utc>,
}

/// Registration joined with the identifying fields of its vehicle
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RegistrationWithVehicle {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub registration: Registration,
    pub plate_number: String,
    pub make: String,
}
