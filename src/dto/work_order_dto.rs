use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::WorkOrder;
use crate::utils::validation::validate_non_negative_amount;

// Request to create a work order from an order requisition
#[derive(Debug, Deserialize)]
pub struct CreateWorkOrderRequest {
    pub order_requisition_id: Uuid,
    pub labor_repair_form_id: Option<Uuid>,
    pub labor_multiplier: Option<Decimal>,
    pub part_multiplier: Option<Decimal>,
}

// Overwrites the stored aggregates
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWorkOrderRequest {
    #[validate(custom = "validate_non_negative_amount")]
    pub expenses: Option<Decimal>,
    #[validate(custom = "validate_non_negative_amount")]
    pub customer_billing: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct WorkOrderResponse {
    #[serde(flatten)]
    pub work_order: WorkOrder,
    /// `expenses - customer_billing`
    pub difference: Decimal,
}

impl From<WorkOrder> for WorkOrderResponse {
    fn from(work_order: WorkOrder) -> Self {
        let difference = work_order.expenses - work_order.customer_billing;
        Self {
            work_order,
            difference,
        }
    }
}
