//! Human-readable document numbers
//!
//! Order requisitions and labor repair forms get numbers derived from a
//! per-kind counter (see `SequenceRepository`). The counter value `n` is 1 for
//! the first document of a kind.

/// Counter row behind order requisition numbers
pub const ORDER_REQUISITION_SEQUENCE: &str = "order_requisition";
/// Counter row behind labor repair form numbers
pub const LABOR_REPAIR_FORM_SEQUENCE: &str = "labor_repair_form";

const OR_NUMBER_BASE: i64 = 1_000_000_000;
const LRF_NUMBER_BASE: i64 = 2_000_000_000;

/// OR number for the `n`-th order requisition, e.g. `"1000000001"`
pub fn or_number(n: i64) -> String {
    (OR_NUMBER_BASE + n).to_string()
}

/// LRF number for the `n`-th labor repair form, e.g. `"LRF-2000000001"`
pub fn lrf_number(n: i64) -> String {
    format!("LRF-{}", LRF_NUMBER_BASE + n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_numbers() {
        assert_eq!(or_number(1), "1000000001");
        assert_eq!(lrf_number(1), "LRF-2000000001");
    }

    #[test]
    fn test_numbers_follow_counter() {
        assert_eq!(or_number(42), "1000000042");
        assert_eq!(lrf_number(1234), "LRF-2000001234");
    }
}
