//! Labor repair form model
//!
//! A labor repair form (LRF) records outside labor done for one labor item,
//! together with the cash advances paid against its amount.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Labor repair form row from the `labor_repair_forms` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LaborRepairForm {
    pub id: Uuid,
    pub order_labor_item_id: Uuid,
    pub contractor_name: String,
    pub make: String,
    pub plate_number: String,
    pub engine_number: String,
    pub amount: Decimal,
    pub or_number: Option<String>,
    pub scope_of_work_details: Option<String>,
    pub lrf_number: String,
    pub total_cash_advance: Decimal,
    pub reviewed_by: DateTime<Utc>,
    pub approved_by: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cash advance paid against a labor repair form.
///
/// `position` keeps insertion order; `balance` is what remained of the form
/// amount after this advance when it was last computed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CashAdvance {
    pub id: Uuid,
    pub labor_repair_form_id: Uuid,
    pub position: i32,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}
