//! Work order gating
//!
//! Whether an order may be turned into a work order depends on the review
//! state of its labor items. Nothing here is stored; it is derived on read.

use serde::Serialize;

use crate::models::LaborItemStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderAvailability {
    /// Every labor item is approved
    Available,
    /// At least one labor item is disapproved
    Disabled,
    PendingApproval,
}

/// Printable document offered for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    WorkOrder,
    JobOrder,
}

/// Any disapproval wins; an order with no labor items stays pending.
pub fn availability<'a, I>(statuses: I) -> WorkOrderAvailability
where
    I: IntoIterator<Item = &'a Option<LaborItemStatus>>,
{
    let mut any = false;
    let mut all_approved = true;

    for status in statuses {
        any = true;
        match status {
            Some(LaborItemStatus::Disapproved) => return WorkOrderAvailability::Disabled,
            Some(LaborItemStatus::Approved) => {}
            None => all_approved = false,
        }
    }

    if any && all_approved {
        WorkOrderAvailability::Available
    } else {
        WorkOrderAvailability::PendingApproval
    }
}

pub fn document_kind(customer_name: &str) -> DocumentKind {
    if customer_name.to_uppercase().contains("TCX") {
        DocumentKind::WorkOrder
    } else {
        DocumentKind::JobOrder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LaborItemStatus::*;

    #[test]
    fn test_all_approved_is_available() {
        assert_eq!(availability(&[Some(Approved), Some(Approved)]), WorkOrderAvailability::Available);
    }

    #[test]
    fn test_any_disapproved_disables() {
        assert_eq!(availability(&[Some(Approved), Some(Disapproved), None]), WorkOrderAvailability::Disabled);
    }

    #[test]
    fn test_unset_keeps_pending() {
        assert_eq!(availability(&[Some(Approved), None]), WorkOrderAvailability::PendingApproval);
    }

    #[test]
    fn test_no_items_is_pending() {
        let empty: Vec<Option<LaborItemStatus>> = Vec::new();
        assert_eq!(availability(&empty), WorkOrderAvailability::PendingApproval);
    }

    #[test]
    fn test_document_kind() {
        assert_eq!(document_kind("TCX Motors"), DocumentKind::WorkOrder);
        assert_eq!(document_kind("acme tcx logistics"), DocumentKind::WorkOrder);
        assert_eq!(document_kind("ABC Transport"), DocumentKind::JobOrder);
    }
}
