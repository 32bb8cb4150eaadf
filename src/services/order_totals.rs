use rust_decimal::Decimal;
use serde::Serialize;

use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::amount_in_range;

/// Totals stored on an order requisition.
///
/// `overall` is always `labor + material`; the three are recomputed together
/// whenever the item lists change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    pub labor: Decimal,
    pub material: Decimal,
    pub overall: Decimal,
}

impl OrderTotals {
    /// Fails when a total does not fit the money columns
    pub fn compute<L, M>(labor_expenses: L, material_expenses: M) -> AppResult<Self>
    where
        L: IntoIterator<Item = Decimal>,
        M: IntoIterator<Item = Decimal>,
    {
        let labor = checked_sum(labor_expenses, "labor")?;
        let material = checked_sum(material_expenses, "material")?;
        let overall = labor
            .checked_add(material)
            .filter(|total| amount_in_range(*total))
            .ok_or_else(|| total_too_large("overall"))?;

        Ok(Self {
            labor,
            material,
            overall,
        })
    }
}

fn checked_sum<I: IntoIterator<Item = Decimal>>(values: I, which: &str) -> AppResult<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(value))
        .filter(|total| amount_in_range(*total))
        .ok_or_else(|| total_too_large(which))
}

fn total_too_large(which: &str) -> AppError {
    AppError::ValidationError(format!("The {} total is too large", which))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let totals = OrderTotals::compute(
            vec![Decimal::from(1000), Decimal::from(500)],
            vec![Decimal::from(200)],
        )
        .unwrap();
        assert_eq!(totals.labor, Decimal::from(1500));
        assert_eq!(totals.material, Decimal::from(200));
        assert_eq!(totals.overall, Decimal::from(1700));
    }

    #[test]
    fn test_empty_lists_total_zero() {
        let totals = OrderTotals::compute(Vec::new(), Vec::new()).unwrap();
        assert_eq!(totals.overall, Decimal::ZERO);
    }

    #[test]
    fn test_cents_are_exact() {
        let totals = OrderTotals::compute(
            vec![Decimal::new(10, 2), Decimal::new(20, 2)],
            vec![Decimal::new(5, 2)],
        )
        .unwrap();
        assert_eq!(totals.overall, Decimal::new(35, 2));
    }

    #[test]
    fn test_overflowing_expenses_are_a_validation_error() {
        let result = OrderTotals::compute(vec![Decimal::MAX, Decimal::MAX], Vec::new());
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_overall_beyond_money_columns_is_rejected() {
        let half = Decimal::new(60_000_000_000_000, 2);
        let result = OrderTotals::compute(vec![half], vec![half]);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
