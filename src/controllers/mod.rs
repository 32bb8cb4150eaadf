pub mod auth_controller;
pub mod contractor_controller;
pub mod customer_controller;
pub mod dashboard_controller;
pub mod labor_repair_form_controller;
pub mod order_requisition_controller;
pub mod registration_controller;
pub mod vehicle_controller;
pub mod work_order_controller;
