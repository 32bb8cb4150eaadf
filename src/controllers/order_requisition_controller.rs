use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::order_requisition_dto::{
    OrderRequisitionRequest, OrderRequisitionResponse, UpdateLaborItemNotesRequest,
    UpdateLaborItemStatusRequest, UpdateOrderStatusRequest, WorkOrderPreviewQuery,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    Contractor, Customer, OrderLaborItem, OrderMaterialItem, OrderRequisition, OrderStatus,
    Permission,
};
use crate::repositories::contractor_repository::ContractorRepository;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::order_requisition_repository::{OrderFields, OrderRequisitionRepository};
use crate::services::approval_gate::{availability, document_kind};
use crate::services::authorization_service::require_permission;
use crate::services::work_order_billing::derive_breakdown;
use crate::services::{Multipliers, OrderTotals, WorkOrderBreakdown};
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::normalize_optional;

pub struct OrderRequisitionController {
    repository: OrderRequisitionRepository,
    customers: CustomerRepository,
    contractors: ContractorRepository,
}

impl OrderRequisitionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: OrderRequisitionRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool.clone()),
            contractors: ContractorRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: OrderRequisitionRequest,
    ) -> AppResult<ApiResponse<OrderRequisitionResponse>> {
        require_permission(user, Permission::ManageOrderRequisitions, "create order requisition")?;
        request.validate()?;
        self.ensure_parties_exist(&request).await?;

        let order_date = request.order_date.unwrap_or_else(|| Utc::now().date_naive());
        let fields = order_fields(request, order_date, OrderStatus::default())?;
        let order = self.repository.create(fields).await?;
        info!(
            "🧾 Order requisition {} created by {} (total {})",
            order.generated_or_number, user.email, order.overall_total
        );

        let response = self.load_one(order).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Order requisition created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<ApiResponse<OrderRequisitionResponse>> {
        let order = self.find_order(id).await?;
        Ok(ApiResponse::success(self.load_one(order).await?))
    }

    /// Newest first
    pub async fn list(&self) -> AppResult<ApiResponse<Vec<OrderRequisitionResponse>>> {
        let orders = self.repository.find_all().await?;
        Ok(ApiResponse::success(self.load_many(orders).await?))
    }

    /// Replaces both item lists and recomputes the totals; the OR number stays
    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: OrderRequisitionRequest,
    ) -> AppResult<ApiResponse<OrderRequisitionResponse>> {
        require_permission(user, Permission::ManageOrderRequisitions, "update order requisition")?;
        request.validate()?;

        let current = self.find_order(id).await?;
        self.ensure_parties_exist(&request).await?;

        let order_date = request.order_date.unwrap_or(current.order_date);
        let status = request.status.unwrap_or(current.status);
        let fields = order_fields(request, order_date, status)?;

        let order = self
            .repository
            .update(id, fields)
            .await?
            .ok_or_else(|| not_found_error("Order requisition", &id.to_string()))?;

        let response = self.load_one(order).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Order requisition updated successfully".to_string(),
        ))
    }

    pub async fn update_status(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateOrderStatusRequest,
    ) -> AppResult<ApiResponse<OrderRequisition>> {
        require_permission(user, Permission::ManageOrderRequisitions, "update order status")?;

        let order = self
            .repository
            .update_status(id, request.status)
            .await?
            .ok_or_else(|| not_found_error("Order requisition", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            order,
            "Order status updated successfully".to_string(),
        ))
    }

    pub async fn labor_items(&self, order_id: Uuid) -> AppResult<ApiResponse<Vec<OrderLaborItem>>> {
        self.find_order(order_id).await?;
        let items = self.repository.find_labor_items(&[order_id]).await?;
        Ok(ApiResponse::success(items))
    }

    pub async fn update_labor_item_status(
        &self,
        user: &AuthenticatedUser,
        labor_item_id: Uuid,
        request: UpdateLaborItemStatusRequest,
    ) -> AppResult<ApiResponse<OrderLaborItem>> {
        require_permission(user, Permission::ReviewLaborItems, "review labor item")?;

        let item = self
            .repository
            .update_labor_item_status(labor_item_id, request.status)
            .await?
            .ok_or_else(|| not_found_error("Labor item", &labor_item_id.to_string()))?;
        info!("✅ Labor item {} marked {:?} by {}", item.id, request.status, user.email);

        Ok(ApiResponse::success_with_message(
            item,
            "Labor item status updated successfully".to_string(),
        ))
    }

    pub async fn update_labor_item_notes(
        &self,
        user: &AuthenticatedUser,
        labor_item_id: Uuid,
        request: UpdateLaborItemNotesRequest,
    ) -> AppResult<ApiResponse<OrderLaborItem>> {
        require_permission(user, Permission::ReviewLaborItems, "edit labor item notes")?;

        let item = self
            .repository
            .update_labor_item_notes(labor_item_id, normalize_optional(request.notes))
            .await?
            .ok_or_else(|| not_found_error("Labor item", &labor_item_id.to_string()))?;

        Ok(ApiResponse::success(item))
    }

    /// Billing breakdown the order would produce with the given multipliers
    pub async fn work_order_preview(
        &self,
        order_id: Uuid,
        query: WorkOrderPreviewQuery,
        config: &EnvironmentConfig,
    ) -> AppResult<ApiResponse<WorkOrderBreakdown>> {
        let multipliers = Multipliers::resolve(query.labor_multiplier, query.part_multiplier, config)?;
        self.find_order(order_id).await?;

        let labor = self.repository.find_labor_items(&[order_id]).await?;
        let materials = self.repository.find_material_items(&[order_id]).await?;

        Ok(ApiResponse::success(derive_breakdown(&labor, &materials, multipliers)?))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<ApiResponse<()>> {
        require_permission(user, Permission::ManageOrderRequisitions, "delete order requisition")?;

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Order requisition", &id.to_string()));
        }
        info!("🗑️ Order requisition {} deleted by {}", id, user.email);

        Ok(ApiResponse::message("Order requisition deleted successfully".to_string()))
    }

    async fn find_order(&self, id: Uuid) -> AppResult<OrderRequisition> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Order requisition", &id.to_string()))
    }

    async fn ensure_parties_exist(&self, request: &OrderRequisitionRequest) -> AppResult<()> {
        if self.customers.find_by_id(request.customer_id).await?.is_none() {
            return Err(not_found_error("Customer", &request.customer_id.to_string()));
        }
        if self.contractors.find_by_id(request.contractor_id).await?.is_none() {
            return Err(not_found_error("Contractor", &request.contractor_id.to_string()));
        }
        Ok(())
    }

    async fn load_one(&self, order: OrderRequisition) -> AppResult<OrderRequisitionResponse> {
        let id = order.id;
        self.load_many(vec![order])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal(format!("Order requisition {} could not be loaded", id)))
    }

    /// Attaches parties, items and gating to each order, keeping input order
    async fn load_many(&self, orders: Vec<OrderRequisition>) -> AppResult<Vec<OrderRequisitionResponse>> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let customer_ids: Vec<Uuid> = orders.iter().map(|o| o.customer_id).collect();
        let contractor_ids: Vec<Uuid> = orders.iter().map(|o| o.contractor_id).collect();

        let customers: HashMap<Uuid, Customer> = self
            .customers
            .find_by_ids(&customer_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let contractors: HashMap<Uuid, Contractor> = self
            .contractors
            .find_by_ids(&contractor_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let mut labor: HashMap<Uuid, Vec<OrderLaborItem>> = HashMap::new();
        for item in self.repository.find_labor_items(&order_ids).await? {
            labor.entry(item.order_requisition_id).or_default().push(item);
        }
        let mut materials: HashMap<Uuid, Vec<OrderMaterialItem>> = HashMap::new();
        for item in self.repository.find_material_items(&order_ids).await? {
            materials.entry(item.order_requisition_id).or_default().push(item);
        }

        orders
            .into_iter()
            .map(|order| {
                let customer = customers
                    .get(&order.customer_id)
                    .cloned()
                    .ok_or_else(|| not_found_error("Customer", &order.customer_id.to_string()))?;
                let contractor = contractors
                    .get(&order.contractor_id)
                    .cloned()
                    .ok_or_else(|| not_found_error("Contractor", &order.contractor_id.to_string()))?;
                let labor_items = labor.remove(&order.id).unwrap_or_default();
                let material_items = materials.remove(&order.id).unwrap_or_default();

                Ok(OrderRequisitionResponse {
                    work_order_availability: availability(labor_items.iter().map(|i| &i.status)),
                    document_kind: document_kind(&customer.customer_name),
                    order,
                    customer,
                    contractor,
                    labor_items,
                    material_items,
                })
            })
            .collect()
    }
}

fn order_fields(
    request: OrderRequisitionRequest,
    order_date: chrono::NaiveDate,
    status: OrderStatus,
) -> AppResult<OrderFields> {
    let totals = OrderTotals::compute(
        request.labor_items.iter().map(|i| i.expenses),
        request.material_items.iter().map(|i| i.expenses),
    )?;

    Ok(OrderFields {
        customer_id: request.customer_id,
        contractor_id: request.contractor_id,
        make: request.make,
        plate_number: request.plate_number,
        engine_number: request.engine_number,
        order_date,
        notes: request.notes,
        status,
        labor_items: request.labor_items,
        material_items: request.material_items,
        totals,
    })
}
