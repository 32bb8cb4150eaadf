//! Vehicle model
//!
//! Vehicles bought by the business and the selling prices recorded for them.
//! Maps to the `vehicles` and `selling_prices` tables.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle row. `plate_number` is always stored upper-cased.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate_number: String,
    pub make: String,
    pub engine_number: String,
    pub purchase_date: NaiveDate,
    pub purchase_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Selling price recorded against a vehicle
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SellingPrice {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub selling_price: Decimal,
    pub created_at: DateTime<Utc>,
}
