//! Cash advance balances
//!
//! A form's advances are applied in order against its amount. The full fold
//! runs when a form is created or its advance list is replaced. Editing a
//! single advance only recomputes the total with `flat_total`, so balances
//! stored on the other rows are left as they were.

use rust_decimal::Decimal;

use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::amount_in_range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    /// Remaining amount after each advance, in input order
    pub balances: Vec<Decimal>,
    pub total_cash_advance: Decimal,
}

/// Running balances: `b[0] = amount - a[0]`, `b[i] = b[i-1] - a[i]`.
/// Balances may go negative but must still fit the money columns.
pub fn fold_balances(amount: Decimal, advances: &[Decimal]) -> AppResult<Ledger> {
    let mut remaining = amount;
    let mut balances = Vec::with_capacity(advances.len());
    for advance in advances {
        remaining = remaining
            .checked_sub(*advance)
            .filter(|balance| amount_in_range(*balance))
            .ok_or_else(|| AppError::ValidationError("Cash advance balance is too large".to_string()))?;
        balances.push(remaining);
    }

    Ok(Ledger {
        balances,
        total_cash_advance: flat_total(advances)?,
    })
}

pub fn flat_total(advances: &[Decimal]) -> AppResult<Decimal> {
    advances
        .iter()
        .try_fold(Decimal::ZERO, |total, advance| total.checked_add(*advance))
        .filter(|total| amount_in_range(*total))
        .ok_or_else(|| AppError::ValidationError("Total cash advance is too large".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold() {
        let ledger = fold_balances(Decimal::from(10000), &[Decimal::from(3000), Decimal::from(2000)]).unwrap();
        assert_eq!(ledger.balances, vec![Decimal::from(7000), Decimal::from(5000)]);
        assert_eq!(ledger.total_cash_advance, Decimal::from(5000));
    }

    #[test]
    fn test_no_advances() {
        let ledger = fold_balances(Decimal::from(500), &[]).unwrap();
        assert!(ledger.balances.is_empty());
        assert_eq!(ledger.total_cash_advance, Decimal::ZERO);
    }

    #[test]
    fn test_overdrawn_goes_negative() {
        let ledger = fold_balances(Decimal::from(100), &[Decimal::from(150)]).unwrap();
        assert_eq!(ledger.balances, vec![Decimal::from(-50)]);
    }

    #[test]
    fn test_flat_total_ignores_order() {
        // After editing the first advance from 3000 to 4000 only the total moves.
        let total = flat_total(&[Decimal::from(4000), Decimal::from(2000)]).unwrap();
        assert_eq!(total, Decimal::from(6000));
    }

    #[test]
    fn test_overflowing_advances_are_a_validation_error() {
        let result = fold_balances(Decimal::MIN, &[Decimal::MAX]);
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        let result = flat_total(&[Decimal::MAX, Decimal::MAX]);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_total_beyond_money_columns_is_rejected() {
        let near_max = Decimal::new(90_000_000_000_000, 2);
        let result = fold_balances(near_max, &[near_max, near_max]);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
