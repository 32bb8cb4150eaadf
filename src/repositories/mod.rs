pub mod contractor_repository;
pub mod customer_repository;
pub mod dashboard_repository;
pub mod labor_repair_form_repository;
pub mod order_requisition_repository;
pub mod registration_repository;
pub mod sequence_repository;
pub mod user_repository;
pub mod vehicle_repository;
pub mod work_order_repository;
