use std::collections::HashMap;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::labor_repair_form_dto::{
    CashAdvanceRequest, CreateLaborRepairFormRequest, LaborRepairFormResponse,
    UpdateLaborRepairFormRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{CashAdvance, LaborRepairForm, Permission};
use crate::repositories::labor_repair_form_repository::{FormFields, LaborRepairFormRepository};
use crate::repositories::order_requisition_repository::OrderRequisitionRepository;
use crate::services::authorization_service::require_permission;
use crate::utils::errors::{not_found_error, AppResult};

pub struct LaborRepairFormController {
    repository: LaborRepairFormRepository,
    orders: OrderRequisitionRepository,
}

impl LaborRepairFormController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: LaborRepairFormRepository::new(pool.clone()),
            orders: OrderRequisitionRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateLaborRepairFormRequest,
    ) -> AppResult<ApiResponse<LaborRepairFormResponse>> {
        require_permission(user, Permission::ManageLaborRepairForms, "create labor repair form")?;
        request.validate()?;

        if self.orders.find_labor_item(request.order_labor_item_id).await?.is_none() {
            return Err(not_found_error("Labor item", &request.order_labor_item_id.to_string()));
        }

        let fields = FormFields {
            contractor_name: request.contractor_name,
            make: request.make,
            plate_number: request.plate_number,
            engine_number: request.engine_number,
            amount: request.amount,
            or_number: request.or_number,
            scope_of_work_details: request.scope_of_work_details,
        };
        let form = self
            .repository
            .create(request.order_labor_item_id, fields, request.cash_advances)
            .await?;
        info!("🛠️ Labor repair form {} created by {}", form.lrf_number, user.email);

        let response = self.with_advances(form).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Labor repair form created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<ApiResponse<LaborRepairFormResponse>> {
        let form = self.find_form(id).await?;
        Ok(ApiResponse::success(self.with_advances(form).await?))
    }

    pub async fn list(&self) -> AppResult<ApiResponse<Vec<LaborRepairFormResponse>>> {
        let forms = self.repository.find_all().await?;
        if forms.is_empty() {
            return Ok(ApiResponse::success(Vec::new()));
        }

        let ids: Vec<Uuid> = forms.iter().map(|f| f.id).collect();
        let mut advances: HashMap<Uuid, Vec<CashAdvance>> = HashMap::new();
        for advance in self.repository.find_cash_advances(&ids).await? {
            advances.entry(advance.labor_repair_form_id).or_default().push(advance);
        }

        let response = forms
            .into_iter()
            .map(|form| LaborRepairFormResponse {
                cash_advances: advances.remove(&form.id).unwrap_or_default(),
                form,
            })
            .collect();

        Ok(ApiResponse::success(response))
    }

    /// First form recorded for the labor item
    pub async fn get_by_labor_item(&self, labor_item_id: Uuid) -> AppResult<ApiResponse<LaborRepairFormResponse>> {
        let form = self
            .repository
            .find_by_labor_item(labor_item_id)
            .await?
            .ok_or_else(|| not_found_error("Labor repair form for labor item", &labor_item_id.to_string()))?;

        Ok(ApiResponse::success(self.with_advances(form).await?))
    }

    /// Replaces the header and every advance, re-running the balance fold
    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateLaborRepairFormRequest,
    ) -> AppResult<ApiResponse<LaborRepairFormResponse>> {
        require_permission(user, Permission::ManageLaborRepairForms, "update labor repair form")?;
        request.validate()?;

        let fields = FormFields {
            contractor_name: request.contractor_name,
            make: request.make,
            plate_number: request.plate_number,
            engine_number: request.engine_number,
            amount: request.amount,
            or_number: request.or_number,
            scope_of_work_details: request.scope_of_work_details,
        };
        let form = self
            .repository
            .update(id, fields, request.cash_advances)
            .await?
            .ok_or_else(|| not_found_error("Labor repair form", &id.to_string()))?;

        let response = self.with_advances(form).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Labor repair form updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<ApiResponse<()>> {
        require_permission(user, Permission::ManageLaborRepairForms, "delete labor repair form")?;

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Labor repair form", &id.to_string()));
        }

        Ok(ApiResponse::message("Labor repair form deleted successfully".to_string()))
    }

    pub async fn add_cash_advance(
        &self,
        user: &AuthenticatedUser,
        form_id: Uuid,
        request: CashAdvanceRequest,
    ) -> AppResult<ApiResponse<LaborRepairFormResponse>> {
        require_permission(user, Permission::ManageLaborRepairForms, "add cash advance")?;
        request.validate()?;

        self.find_form(form_id).await?;
        self.repository
            .add_cash_advance(form_id, request.date, request.amount, request.balance)
            .await?;

        let form = self.find_form(form_id).await?;
        Ok(ApiResponse::success_with_message(
            self.with_advances(form).await?,
            "Cash advance added successfully".to_string(),
        ))
    }

    pub async fn update_cash_advance(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: CashAdvanceRequest,
    ) -> AppResult<ApiResponse<LaborRepairFormResponse>> {
        require_permission(user, Permission::ManageLaborRepairForms, "update cash advance")?;
        request.validate()?;

        let advance = self
            .repository
            .update_cash_advance(id, request.date, request.amount, request.balance)
            .await?
            .ok_or_else(|| not_found_error("Cash advance", &id.to_string()))?;

        let form = self.find_form(advance.labor_repair_form_id).await?;
        Ok(ApiResponse::success_with_message(
            self.with_advances(form).await?,
            "Cash advance updated successfully".to_string(),
        ))
    }

    pub async fn delete_cash_advance(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
    ) -> AppResult<ApiResponse<LaborRepairFormResponse>> {
        require_permission(user, Permission::ManageLaborRepairForms, "delete cash advance")?;

        let form_id = self
            .repository
            .delete_cash_advance(id)
            .await?
            .ok_or_else(|| not_found_error("Cash advance", &id.to_string()))?;

        let form = self.find_form(form_id).await?;
        Ok(ApiResponse::success_with_message(
            self.with_advances(form).await?,
            "Cash advance deleted successfully".to_string(),
        ))
    }

    async fn find_form(&self, id: Uuid) -> AppResult<LaborRepairForm> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Labor repair form", &id.to_string()))
    }

    async fn with_advances(&self, form: LaborRepairForm) -> AppResult<LaborRepairFormResponse> {
        let cash_advances = self.repository.find_cash_advances(&[form.id]).await?;
        Ok(LaborRepairFormResponse { form, cash_advances })
    }
}
