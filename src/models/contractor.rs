//! Contractor model
//!
//! The `assignment` tag decides whether labor goes to an outside shop or is
//! done in-house.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Labor routing - maps to the `assignment_type` ENUM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "assignment_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Assignment {
    OutsideLabor,
    Inhouse,
}

/// Contractor - maps to the `contractors` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contractor {
    pub id: Uuid,
    pub contractor_name: String,
    pub address: String,
    pub tel_no: Option<String>,
    pub mobile_no: Option<String>,
    pub tin: Option<String>,
    pub assignment: Assignment,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_wire_format() {
        assert_eq!(serde_json::to_string(&Assignment::OutsideLabor).unwrap(), "\"OUTSIDE_LABOR\"");
        let parsed: Assignment = serde_json::from_str("\"INHOUSE\"").unwrap();
        assert_eq!(parsed, Assignment::Inhouse);
    }
}
