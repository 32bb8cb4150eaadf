use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_empty;

// Request to create or update a customer
#[derive(Debug, Deserialize, Validate)]
pub struct CustomerRequest {
    #[validate(custom = "validate_not_empty")]
    pub customer_name: String,
    #[validate(custom = "validate_not_empty")]
    pub address: String,
    pub tel_no: Option<String>,
    pub mobile_no: Option<String>,
    pub tin: Option<String>,
}
