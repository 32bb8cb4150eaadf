use sqlx::PgPool;

use crate::dto::dashboard_dto::DashboardCounts;
use crate::utils::errors::{db_error, AppResult};

pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn counts(&self) -> AppResult<DashboardCounts> {
        sqlx::query_as::<_, DashboardCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM vehicles) AS vehicles,
                (SELECT COUNT(*) FROM customers) AS customers,
                (SELECT COUNT(*) FROM contractors) AS contractors,
                (SELECT COUNT(*) FROM order_requisitions) AS order_requisitions,
                (SELECT COUNT(*) FROM order_labor_items WHERE status IS NULL) AS labor_items_pending_approval,
                (SELECT COUNT(*) FROM work_orders) AS work_orders
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Error loading dashboard counts"))
    }
}
