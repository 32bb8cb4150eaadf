use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    Contractor, Customer, LaborItemStatus, OrderLaborItem, OrderMaterialItem, OrderRequisition,
    OrderStatus,
};
use crate::services::{DocumentKind, WorkOrderAvailability};
use crate::utils::validation::{validate_non_negative_amount, validate_not_empty};

// Labor line as sent by clients; item numbers follow list order
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LaborItemInput {
    #[validate(custom = "validate_not_empty")]
    pub description: String,
    #[validate(custom = "validate_non_negative_amount")]
    pub expenses: Decimal,
    pub mechanic: Option<String>,
    pub assignment: Option<String>,
    pub remarks: Option<String>,
    pub notes: Option<String>,
    /// Lets an update carry existing review decisions over
    pub status: Option<LaborItemStatus>,
}

// Parts line as sent by clients
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MaterialItemInput {
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(custom = "validate_not_empty")]
    pub description: String,
    #[validate(custom = "validate_non_negative_amount")]
    pub expenses: Decimal,
}

// Request to create or fully update an order requisition
#[derive(Debug, Deserialize, Validate)]
pub struct OrderRequisitionRequest {
    pub customer_id: Uuid,
    pub contractor_id: Uuid,
    #[validate(custom = "validate_not_empty")]
    pub make: String,
    #[validate(custom = "validate_not_empty")]
    pub plate_number: String,
    #[validate(custom = "validate_not_empty")]
    pub engine_number: String,
    /// Defaults to today on create, keeps the stored date on update
    pub order_date: Option<NaiveDate>,
    pub notes: Option<String>,
    #[validate]
    #[serde(default)]
    pub labor_items: Vec<LaborItemInput>,
    #[validate]
    #[serde(default)]
    pub material_items: Vec<MaterialItemInput>,
    /// Only honoured on update
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLaborItemStatusRequest {
    pub status: LaborItemStatus,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLaborItemNotesRequest {
    /// Blank clears the notes
    #[serde(default)]
    pub notes: Option<String>,
}

// Query string of the work order preview
#[derive(Debug, Default, Deserialize)]
pub struct WorkOrderPreviewQuery {
    pub labor_multiplier: Option<Decimal>,
    pub part_multiplier: Option<Decimal>,
}

// Order with its parties, items and derived work order gating
#[derive(Debug, Serialize)]
pub struct OrderRequisitionResponse {
    #[serde(flatten)]
    pub order: OrderRequisition,
    pub customer: Customer,
    pub contractor: Contractor,
    pub labor_items: Vec<OrderLaborItem>,
    pub material_items: Vec<OrderMaterialItem>,
    pub work_order_availability: WorkOrderAvailability,
    pub document_kind: DocumentKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(labor: serde_json::Value, material: serde_json::Value) -> OrderRequisitionRequest {
        serde_json::from_value(json!({
            "customer_id": Uuid::new_v4(),
            "contractor_id": Uuid::new_v4(),
            "make": "Hino",
            "plate_number": "NBC-4410",
            "engine_number": "J08E-99812",
            "labor_items": labor,
            "material_items": material
        }))
        .unwrap()
    }

    #[test]
    fn test_item_lists_default_to_empty() {
        let request: OrderRequisitionRequest = serde_json::from_value(json!({
            "customer_id": Uuid::new_v4(),
            "contractor_id": Uuid::new_v4(),
            "make": "Hino",
            "plate_number": "NBC-4410",
            "engine_number": "J08E-99812"
        }))
        .unwrap();
        assert!(request.labor_items.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_nested_labor_description_is_validated() {
        let request = order(json!([{ "description": "", "expenses": "100" }]), json!([]));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_negative_labor_expense_is_rejected() {
        let request = order(json!([{ "description": "Tune up", "expenses": "-1" }]), json!([]));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_material_quantity_must_be_positive() {
        let request = order(
            json!([]),
            json!([{ "quantity": 0, "description": "Oil filter", "expenses": "350" }]),
        );
        assert!(request.validate().is_err());

        let request = order(
            json!([]),
            json!([{ "quantity": 2, "description": "Oil filter", "expenses": "350" }]),
        );
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_expenses_beyond_money_columns_are_rejected() {
        let request = order(
            json!([
                { "description": "Overhaul", "expenses": "79228162514264337593543950335" },
                { "description": "Repaint", "expenses": "79228162514264337593543950335" }
            ]),
            json!([]),
        );
        assert!(request.validate().is_err());

        let request = order(
            json!([]),
            json!([{ "quantity": 1, "description": "Engine", "expenses": "1000000000000" }]),
        );
        assert!(request.validate().is_err());
    }
}
