use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{SellingPrice, Vehicle};
use crate::utils::validation::{validate_not_empty, validate_positive_amount};

// Request to create or update a vehicle
#[derive(Debug, Deserialize, Validate)]
pub struct VehicleRequest {
    #[validate(custom = "validate_not_empty")]
    pub plate_number: String,
    #[validate(custom = "validate_not_empty")]
    pub make: String,
    #[validate(custom = "validate_not_empty")]
    pub engine_number: String,
    pub purchase_date: NaiveDate,
    #[validate(custom = "validate_positive_amount")]
    pub purchase_cost: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSellingPriceRequest {
    #[validate(custom = "validate_positive_amount")]
    pub selling_price: Decimal,
}

// Vehicle together with every selling price recorded for it, newest first
#[derive(Debug, Serialize)]
pub struct VehicleWithSellingPrices {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub selling_prices: Vec<SellingPrice>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(plate: &str, cost: &str) -> VehicleRequest {
        serde_json::from_value(json!({
            "plate_number": plate,
            "make": "Isuzu",
            "engine_number": "4HK1-778812",
            "purchase_date": "2024-03-01",
            "purchase_cost": cost
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_request() {
        assert!(request("abc-123", "850000.00").validate().is_ok());
    }

    #[test]
    fn test_blank_plate_is_rejected() {
        let errors = request("  ", "850000").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("plate_number"));
    }

    #[test]
    fn test_zero_cost_is_rejected() {
        let errors = request("ABC-123", "0").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("purchase_cost"));
    }
}
