use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::work_order_dto::{CreateWorkOrderRequest, UpdateWorkOrderRequest, WorkOrderResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Permission;
use crate::repositories::labor_repair_form_repository::LaborRepairFormRepository;
use crate::repositories::order_requisition_repository::OrderRequisitionRepository;
use crate::repositories::work_order_repository::WorkOrderRepository;
use crate::services::authorization_service::require_permission;
use crate::services::work_order_billing::derive_breakdown;
use crate::services::Multipliers;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct WorkOrderController {
    repository: WorkOrderRepository,
    orders: OrderRequisitionRepository,
    forms: LaborRepairFormRepository,
}

impl WorkOrderController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: WorkOrderRepository::new(pool.clone()),
            orders: OrderRequisitionRepository::new(pool.clone()),
            forms: LaborRepairFormRepository::new(pool),
        }
    }

    /// Derives the aggregates from the order's current items and stores only
    /// those. The multipliers used are not kept.
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateWorkOrderRequest,
        config: &EnvironmentConfig,
    ) -> AppResult<ApiResponse<WorkOrderResponse>> {
        require_permission(user, Permission::ManageWorkOrders, "create work order")?;
        let multipliers = Multipliers::resolve(request.labor_multiplier, request.part_multiplier, config)?;

        let order = self
            .orders
            .find_by_id(request.order_requisition_id)
            .await?
            .ok_or_else(|| not_found_error("Order requisition", &request.order_requisition_id.to_string()))?;

        if let Some(form_id) = request.labor_repair_form_id {
            if self.forms.find_by_id(form_id).await?.is_none() {
                return Err(not_found_error("Labor repair form", &form_id.to_string()));
            }
        }

        let labor = self.orders.find_labor_items(&[order.id]).await?;
        if labor.is_empty() {
            return Err(AppError::ValidationError(
                "A work order needs at least one labor item".to_string(),
            ));
        }
        let materials = self.orders.find_material_items(&[order.id]).await?;

        let breakdown = derive_breakdown(&labor, &materials, multipliers)?;
        let work_order = self
            .repository
            .create(
                order.id,
                order.contractor_id,
                request.labor_repair_form_id,
                breakdown.expenses,
                breakdown.customer_billing,
            )
            .await?;
        info!(
            "📋 Work order {} for {} created by {} (billing {})",
            work_order.id, order.generated_or_number, user.email, work_order.customer_billing
        );

        Ok(ApiResponse::success_with_message(
            WorkOrderResponse::from(work_order),
            "Work order created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<ApiResponse<WorkOrderResponse>> {
        let work_order = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Work order", &id.to_string()))?;

        Ok(ApiResponse::success(WorkOrderResponse::from(work_order)))
    }

    pub async fn list(&self) -> AppResult<ApiResponse<Vec<WorkOrderResponse>>> {
        let work_orders = self.repository.find_all().await?;
        Ok(ApiResponse::success(
            work_orders.into_iter().map(WorkOrderResponse::from).collect(),
        ))
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateWorkOrderRequest,
    ) -> AppResult<ApiResponse<WorkOrderResponse>> {
        require_permission(user, Permission::ManageWorkOrders, "update work order")?;
        request.validate()?;

        let work_order = self
            .repository
            .update(id, request.expenses, request.customer_billing)
            .await?
            .ok_or_else(|| not_found_error("Work order", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            WorkOrderResponse::from(work_order),
            "Work order updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<ApiResponse<()>> {
        require_permission(user, Permission::ManageWorkOrders, "delete work order")?;

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Work order", &id.to_string()));
        }

        Ok(ApiResponse::message("Work order deleted successfully".to_string()))
    }
}
