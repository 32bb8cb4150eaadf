//! Work order model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Work order row from the `work_orders` table.
///
/// Only the aggregates are stored; the per-item billing breakdown is
/// recomputed from the order when needed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkOrder {
    pub id: Uuid,
    pub order_requisition_id: Uuid,
    pub contractor_id: Uuid,
    pub labor_repair_form_id: Option<Uuid>,
    pub expenses: Decimal,
    pub customer_billing: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
