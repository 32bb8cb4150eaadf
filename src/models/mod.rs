//! Domain models
//!
//! Rows of the MVMIS tables and the Postgres enums they use.

pub mod auth;
pub mod contractor;
pub mod customer;
pub mod labor_repair_form;
pub mod order_requisition;
pub mod registration;
pub mod user;
pub mod vehicle;
pub mod work_order;

pub use auth::JwtClaims;
pub use contractor::{Assignment, Contractor};
pub use customer::Customer;
pub use labor_repair_form::{CashAdvance, LaborRepairForm};
pub use order_requisition::{LaborItemStatus, OrderLaborItem, OrderMaterialItem, OrderRequisition, OrderStatus};
pub use registration::{Registration, RegistrationWithVehicle};
pub use user::{Permission, Role, User, UserResponse};
pub use vehicle::{SellingPrice, Vehicle};
pub use work_order::WorkOrder;
