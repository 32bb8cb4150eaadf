pub mod auth_dto;
pub mod common_dto;
pub mod contractor_dto;
pub mod customer_dto;
pub mod dashboard_dto;
pub mod labor_repair_form_dto;
pub mod order_requisition_dto;
pub mod registration_dto;
pub mod vehicle_dto;
pub mod work_order_dto;

pub use common_dto::ApiResponse;
