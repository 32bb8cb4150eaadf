use serde::Serialize;
use sqlx::FromRow;

use crate::middleware::auth::AuthenticatedUser;
use crate::models::Role;
use crate::services::dashboard_service::NavigationEntry;

// Live record counts shown on every dashboard
#[derive(Debug, Clone, Default, Serialize, FromRow)]
pub struct DashboardCounts {
    pub vehicles: i64,
    pub customers: i64,
    pub contractors: i64,
    pub order_requisitions: i64,
    pub labor_items_pending_approval: i64,
    pub work_orders: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub role: Role,
    pub title: &'static str,
    pub user: AuthenticatedUser,
    pub navigation: Vec<NavigationEntry>,
    pub counts: DashboardCounts,
}
