use serde::Deserialize;
use validator::Validate;

use crate::models::Assignment;
use crate::utils::validation::validate_not_empty;

// Request to create or update a contractor
#[derive(Debug, Deserialize, Validate)]
pub struct ContractorRequest {
    #[validate(custom = "validate_not_empty")]
    pub contractor_name: String,
    #[validate(custom = "validate_not_empty")]
    pub address: String,
    pub tel_no: Option<String>,
    pub mobile_no: Option<String>,
    pub tin: Option<String>,
    pub assignment: Assignment,
}

// Query string of GET /contractors
#[derive(Debug, Default, Deserialize)]
pub struct ContractorQuery {
    pub assignment: Option<Assignment>,
}
