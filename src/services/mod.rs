//! Services module
//!
//! Business rules that do not need the database: tokens and passwords, the
//! role matrix, document numbering, order totals, labor approval gating,
//! cash advance balances, work order billing and dashboards.

pub mod approval_gate;
pub mod auth_service;
pub mod authorization_service;
pub mod cash_advance_ledger;
pub mod dashboard_service;
pub mod document_number;
pub mod jwt_service;
pub mod order_totals;
pub mod work_order_billing;

pub use approval_gate::{DocumentKind, WorkOrderAvailability};
pub use jwt_service::JwtService;
pub use order_totals::OrderTotals;
pub use work_order_billing::{Multipliers, WorkOrderBreakdown};
