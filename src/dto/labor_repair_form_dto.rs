use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{CashAdvance, LaborRepairForm};
use crate::utils::validation::{validate_amount_range, validate_non_negative_amount, validate_not_empty};

// Advance in a create/replace request; its balance is computed server-side
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CashAdvanceInput {
    pub date: NaiveDate,
    #[validate(custom = "validate_non_negative_amount")]
    pub amount: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLaborRepairFormRequest {
    pub order_labor_item_id: Uuid,
    #[validate(custom = "validate_not_empty")]
    pub contractor_name: String,
    #[validate(custom = "validate_not_empty")]
    pub make: String,
    #[validate(custom = "validate_not_empty")]
    pub plate_number: String,
    #[validate(custom = "validate_not_empty")]
    pub engine_number: String,
    #[validate(custom = "validate_non_negative_amount")]
    pub amount: Decimal,
    pub or_number: Option<String>,
    pub scope_of_work_details: Option<String>,
    #[validate]
    #[serde(default)]
    pub cash_advances: Vec<CashAdvanceInput>,
}

// Replaces the header and the whole advance list
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLaborRepairFormRequest {
    #[validate(custom = "validate_not_empty")]
    pub contractor_name: String,
    #[validate(custom = "validate_not_empty")]
    pub make: String,
    #[validate(custom = "validate_not_empty")]
    pub plate_number: String,
    #[validate(custom = "validate_not_empty")]
    pub engine_number: String,
    #[validate(custom = "validate_non_negative_amount")]
    pub amount: Decimal,
    pub or_number: Option<String>,
    pub scope_of_work_details: Option<String>,
    #[validate]
    #[serde(default)]
    pub cash_advances: Vec<CashAdvanceInput>,
}

/// Single advance edit. The balance is stored exactly as sent.
#[derive(Debug, Deserialize, Validate)]
pub struct CashAdvanceRequest {
    pub date: NaiveDate,
    #[validate(custom = "validate_non_negative_amount")]
    pub amount: Decimal,
    /// May be negative when the form is overdrawn
    #[validate(custom = "validate_amount_range")]
    pub balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct LaborRepairFormResponse {
    #[serde(flatten)]
    pub form: LaborRepairForm,
    pub cash_advances: Vec<CashAdvance>,
}
