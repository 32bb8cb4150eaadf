//! Work order billing
//!
//! Customer billing is each item's expenses times a markup: one multiplier
//! for labor, another for parts. The multipliers are request parameters with
//! configured defaults and are never stored.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::EnvironmentConfig;
use crate::models::{OrderLaborItem, OrderMaterialItem};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::amount_in_range;

/// Largest markup accepted for either multiplier
pub const MAX_MULTIPLIER: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Multipliers {
    pub labor: Decimal,
    pub part: Decimal,
}

impl Multipliers {
    /// Fills unset values from configuration and rejects values outside
    /// `(0, MAX_MULTIPLIER]`
    pub fn resolve(
        labor: Option<Decimal>,
        part: Option<Decimal>,
        config: &EnvironmentConfig,
    ) -> AppResult<Self> {
        let multipliers = Self {
            labor: labor.unwrap_or(config.default_labor_multiplier),
            part: part.unwrap_or(config.default_part_multiplier),
        };

        if multipliers.labor <= Decimal::ZERO || multipliers.part <= Decimal::ZERO {
            return Err(AppError::ValidationError(
                "Multipliers must be greater than zero".to_string(),
            ));
        }

        if multipliers.labor > MAX_MULTIPLIER || multipliers.part > MAX_MULTIPLIER {
            return Err(AppError::ValidationError(format!(
                "Multipliers must not exceed {}",
                MAX_MULTIPLIER
            )));
        }

        Ok(multipliers)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Labor,
    Material,
}

#[derive(Debug, Clone, Serialize)]
pub struct BillingLine {
    pub kind: LineKind,
    pub item_number: i32,
    pub description: String,
    /// Parts only
    pub quantity: Option<i32>,
    pub expenses: Decimal,
    pub multiplier: Decimal,
    pub billing: Decimal,
}

/// Per-item breakdown of a work order and its aggregates
#[derive(Debug, Clone, Serialize)]
pub struct WorkOrderBreakdown {
    pub multipliers: Multipliers,
    pub lines: Vec<BillingLine>,
    pub expenses: Decimal,
    pub customer_billing: Decimal,
    /// `expenses - customer_billing`, negative when billing exceeds cost
    pub difference: Decimal,
}

/// Fails when a billing amount does not fit the money columns
pub fn derive_breakdown(
    labor_items: &[OrderLaborItem],
    material_items: &[OrderMaterialItem],
    multipliers: Multipliers,
) -> AppResult<WorkOrderBreakdown> {
    let labor_lines = labor_items.iter().map(|item| {
        Ok(BillingLine {
            kind: LineKind::Labor,
            item_number: item.item_number,
            description: item.description.clone(),
            quantity: None,
            expenses: item.expenses,
            multiplier: multipliers.labor,
            billing: bill(item.expenses, multipliers.labor)?,
        })
    });

    let material_lines = material_items.iter().map(|item| {
        Ok(BillingLine {
            kind: LineKind::Material,
            item_number: item.item_number,
            description: item.description.clone(),
            quantity: Some(item.quantity),
            expenses: item.expenses,
            multiplier: multipliers.part,
            billing: bill(item.expenses, multipliers.part)?,
        })
    });

    let lines = labor_lines.chain(material_lines).collect::<AppResult<Vec<_>>>()?;
    let expenses = checked_total(lines.iter().map(|line| line.expenses), "expenses")?;
    let customer_billing = checked_total(lines.iter().map(|line| line.billing), "customer billing")?;
    let difference = expenses
        .checked_sub(customer_billing)
        .ok_or_else(|| too_large("difference"))?;

    Ok(WorkOrderBreakdown {
        multipliers,
        lines,
        expenses,
        customer_billing,
        difference,
    })
}

fn bill(expenses: Decimal, multiplier: Decimal) -> AppResult<Decimal> {
    expenses
        .checked_mul(multiplier)
        .filter(|billing| amount_in_range(*billing))
        .ok_or_else(|| too_large("line billing"))
}

fn checked_total<I: Iterator<Item = Decimal>>(mut values: I, which: &str) -> AppResult<Decimal> {
    values
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(value))
        .filter(|total| amount_in_range(*total))
        .ok_or_else(|| too_large(which))
}

fn too_large(which: &str) -> AppError {
    AppError::ValidationError(format!("The work order {} is too large", which))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn labor(expenses: i64) -> OrderLaborItem {
        OrderLaborItem {
            id: Uuid::new_v4(),
            order_requisition_id: Uuid::nil(),
            item_number: 1,
            description: "Engine overhaul".to_string(),
            expenses: Decimal::from(expenses),
            mechanic: None,
            assignment: None,
            remarks: None,
            notes: None,
            status: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn material(expenses: i64) -> OrderMaterialItem {
        OrderMaterialItem {
            id: Uuid::new_v4(),
            order_requisition_id: Uuid::nil(),
            item_number: 1,
            quantity: 2,
            description: "Brake pads".to_string(),
            expenses: Decimal::from(expenses),
            created_at: Utc::now(),
        }
    }

    fn default_multipliers() -> Multipliers {
        Multipliers {
            labor: Decimal::new(175, 2),
            part: Decimal::new(14, 1),
        }
    }

    #[test]
    fn test_breakdown_with_default_multipliers() {
        let breakdown = derive_breakdown(&[labor(1000)], &[material(500)], default_multipliers()).unwrap();

        assert_eq!(breakdown.lines.len(), 2);
        assert_eq!(breakdown.lines[0].billing, Decimal::from(1750));
        assert_eq!(breakdown.lines[1].billing, Decimal::from(700));
        assert_eq!(breakdown.customer_billing, Decimal::from(2450));
        assert_eq!(breakdown.expenses, Decimal::from(1500));
        assert_eq!(breakdown.difference, Decimal::from(-950));
    }

    #[test]
    fn test_custom_multipliers() {
        let multipliers = Multipliers {
            labor: Decimal::from(2),
            part: Decimal::ONE,
        };
        let breakdown = derive_breakdown(&[labor(100)], &[material(100)], multipliers).unwrap();
        assert_eq!(breakdown.customer_billing, Decimal::from(300));
    }

    #[test]
    fn test_resolve_uses_config_defaults() {
        let mut config = EnvironmentConfig::default();
        config.default_labor_multiplier = Decimal::new(175, 2);
        config.default_part_multiplier = Decimal::new(14, 1);

        let multipliers = Multipliers::resolve(None, Some(Decimal::from(2)), &config).unwrap();
        assert_eq!(multipliers.labor, Decimal::new(175, 2));
        assert_eq!(multipliers.part, Decimal::from(2));
    }

    #[test]
    fn test_resolve_rejects_non_positive() {
        let config = EnvironmentConfig::default();
        let result = Multipliers::resolve(Some(Decimal::ZERO), None, &config);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_resolve_rejects_oversized_multiplier() {
        let config = EnvironmentConfig::default();
        let huge = Decimal::from(u64::MAX);

        let result = Multipliers::resolve(Some(huge), None, &config);
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        let result = Multipliers::resolve(None, Some(MAX_MULTIPLIER + Decimal::new(1, 2)), &config);
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        assert!(Multipliers::resolve(Some(MAX_MULTIPLIER), None, &config).is_ok());
    }

    #[test]
    fn test_billing_overflow_is_a_validation_error() {
        let mut item = labor(0);
        item.expenses = Decimal::MAX;
        let multipliers = Multipliers {
            labor: Decimal::from(2),
            part: Decimal::ONE,
        };

        let result = derive_breakdown(&[item], &[], multipliers);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_billing_beyond_money_columns_is_rejected() {
        let mut item = labor(0);
        item.expenses = Decimal::new(99_999_999_999_999, 2);

        let result = derive_breakdown(&[item], &[material(1)], default_multipliers());
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
