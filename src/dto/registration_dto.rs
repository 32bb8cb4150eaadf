use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::validate_not_empty;

// Request to register a vehicle sale
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRegistrationRequest {
    pub vehicle_id: Uuid,
    #[validate(custom = "validate_not_empty")]
    pub sold_to: String,
    /// Defaults to today
    pub registration_date: Option<NaiveDate>,
    pub deed_of_sale: bool,
    pub id_status: bool,
    pub mayor_permit: bool,
}

impl CreateRegistrationRequest {
    /// Deed of sale, buyer ID and mayor's permit must all be on file
    pub fn checklist_complete(&self) -> bool {
        self.deed_of_sale && self.id_status && self.mayor_permit
    }
}
