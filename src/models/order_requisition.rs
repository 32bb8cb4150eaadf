//! Order requisition model
//!
//! An order requisition is the repair order for one customer's vehicle. It
//! carries labor and material line items and the totals derived from them.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Order-level status - maps to the `order_status` ENUM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// Review outcome of a labor item. A missing value means it is still pending.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "labor_item_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LaborItemStatus {
    Approved,
    Disapproved,
}

/// Order requisition row from the `order_requisitions` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderRequisition {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub contractor_id: Uuid,
    pub make: String,
    pub plate_number: String,
    pub engine_number: String,
    pub order_date: NaiveDate,
    pub notes: Option<String>,
    pub generated_or_number: String,
    pub total_labor_expenses: Decimal,
    pub total_material_expenses: Decimal,
    pub overall_total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Labor line of an order
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderLaborItem {
    pub id: Uuid,
    pub order_requisition_id: Uuid,
    pub item_number: i32,
    pub description: String,
    pub expenses: Decimal,
    pub mechanic: Option<String>,
    /// Free-text label, not tied to a contractor's assignment
    pub assignment: Option<String>,
    pub remarks: Option<String>,
    pub notes: Option<String>,
    pub status: Option<LaborItemStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Material (parts) line of an order
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderMaterialItem {
    pub id: Uuid,
    pub order_requisition_id: Uuid,
    pub item_number: i32,
    pub quantity: i32,
    pub description: String,
    pub expenses: Decimal,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_formats() {
        assert_eq!(serde_json::to_string(&OrderStatus::InProgress).unwrap(), "\"IN_PROGRESS\"");
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);

        let status: LaborItemStatus = serde_json::from_str("\"disapproved\"").unwrap();
        assert_eq!(status, LaborItemStatus::Disapproved);
        assert!(serde_json::from_str::<LaborItemStatus>("\"maybe\"").is_err());
    }
}
