//! End-to-end scenarios against a real PostgreSQL database.
//!
//! Run with `DATABASE_URL=... cargo test --test db_tests -- --ignored`.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use mvmis_backend::config::{AdminBootstrap, EnvironmentConfig};
use mvmis_backend::controllers::auth_controller::AuthController;
use mvmis_backend::controllers::customer_controller::CustomerController;
use mvmis_backend::controllers::contractor_controller::ContractorController;
use mvmis_backend::controllers::labor_repair_form_controller::LaborRepairFormController;
use mvmis_backend::controllers::order_requisition_controller::OrderRequisitionController;
use mvmis_backend::controllers::vehicle_controller::VehicleController;
use mvmis_backend::controllers::work_order_controller::WorkOrderController;
use mvmis_backend::database::connection::run_migrations;
use mvmis_backend::dto::labor_repair_form_dto::LaborRepairFormResponse;
use mvmis_backend::dto::order_requisition_dto::OrderRequisitionResponse;
use mvmis_backend::dto::vehicle_dto::VehicleRequest;
use mvmis_backend::middleware::auth::AuthenticatedUser;
use mvmis_backend::models::{LaborItemStatus, OrderStatus, Role};
use mvmis_backend::services::JwtService;
use mvmis_backend::utils::errors::AppError;

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPool::connect(&url).await.expect("connect");
    run_migrations(&pool).await.expect("migrations");
    pool
}

fn admin() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: Uuid::new_v4(),
        email: "admin@mvmis.local".to_string(),
        role: Role::Admin,
    }
}

fn from_json<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("request body")
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

async fn create_order(pool: &PgPool, customer_name: &str) -> OrderRequisitionResponse {
    let user = admin();

    let customer = CustomerController::new(pool.clone())
        .create(
            &user,
            from_json(json!({ "customer_name": customer_name, "address": "Cebu City" })),
        )
        .await
        .expect("customer")
        .data
        .expect("customer data");

    let contractor = ContractorController::new(pool.clone())
        .create(
            &user,
            from_json(json!({
                "contractor_name": "Pedro Santos",
                "address": "Mandaue City",
                "assignment": "OUTSIDE_LABOR"
            })),
        )
        .await
        .expect("contractor")
        .data
        .expect("contractor data");

    OrderRequisitionController::new(pool.clone())
        .create(
            &user,
            from_json(json!({
                "customer_id": customer.id,
                "contractor_id": contractor.id,
                "make": "Isuzu",
                "plate_number": unique("ORD"),
                "engine_number": unique("ENG"),
                "labor_items": [
                    { "description": "Engine overhaul", "expenses": "1000" }
                ],
                "material_items": [
                    { "quantity": 2, "description": "Brake pads", "expenses": "500" }
                ]
            })),
        )
        .await
        .expect("order")
        .data
        .expect("order data")
}

// Amount 10000 with advances of 3000 then 2000
async fn create_form(pool: &PgPool, order: &OrderRequisitionResponse) -> LaborRepairFormResponse {
    LaborRepairFormController::new(pool.clone())
        .create(
            &admin(),
            from_json(json!({
                "order_labor_item_id": order.labor_items[0].id,
                "contractor_name": "Pedro Santos",
                "make": "Isuzu",
                "plate_number": order.order.plate_number,
                "engine_number": order.order.engine_number,
                "amount": "10000",
                "cash_advances": [
                    { "date": "2025-02-01", "amount": "3000" },
                    { "date": "2025-02-08", "amount": "2000" }
                ]
            })),
        )
        .await
        .expect("form")
        .data
        .expect("form data")
}

#[tokio::test]
#[ignore]
async fn test_vehicle_plate_is_normalized_and_unique() {
    let pool = pool().await;
    let controller = VehicleController::new(pool.clone());
    let plate = unique("abc").to_lowercase();

    let body = |engine: String| -> VehicleRequest {
        from_json(json!({
            "plate_number": format!("  {} ", plate),
            "make": "Toyota",
            "engine_number": engine,
            "purchase_date": "2025-01-15",
            "purchase_cost": "350000.00"
        }))
    };

    let vehicle = controller
        .create(&admin(), body(unique("ENG")))
        .await
        .expect("vehicle")
        .data
        .expect("vehicle data");
    assert_eq!(vehicle.plate_number, plate.to_uppercase());

    let duplicate = controller.create(&admin(), body(unique("ENG"))).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
}

#[tokio::test]
#[ignore]
async fn test_vehicle_engine_number_is_unique() {
    let pool = pool().await;
    let controller = VehicleController::new(pool.clone());
    let engine = unique("ENG");

    let body = |plate: String| -> VehicleRequest {
        from_json(json!({
            "plate_number": plate,
            "make": "Mitsubishi",
            "engine_number": engine,
            "purchase_date": "2025-03-01",
            "purchase_cost": "420000.00"
        }))
    };

    controller
        .create(&admin(), body(unique("PLT")))
        .await
        .expect("vehicle");

    let duplicate = controller.create(&admin(), body(unique("PLT"))).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
}

#[tokio::test]
#[ignore]
async fn test_order_totals_and_number() {
    let pool = pool().await;
    let response = create_order(&pool, "Juan Dela Cruz").await;

    assert_eq!(response.order.total_labor_expenses, Decimal::from(1000));
    assert_eq!(response.order.total_material_expenses, Decimal::from(500));
    assert_eq!(response.order.overall_total, Decimal::from(1500));
    assert_eq!(response.order.generated_or_number.len(), 10);
    assert!(response.order.generated_or_number.starts_with('1'));
}

#[tokio::test]
#[ignore]
async fn test_order_update_recomputes_totals() {
    let pool = pool().await;
    let order = create_order(&pool, "Jose Rizal").await;

    let updated = OrderRequisitionController::new(pool.clone())
        .update(
            &admin(),
            order.order.id,
            from_json(json!({
                "customer_id": order.order.customer_id,
                "contractor_id": order.order.contractor_id,
                "make": "Isuzu",
                "plate_number": order.order.plate_number,
                "engine_number": order.order.engine_number,
                "labor_items": [
                    { "description": "Engine overhaul", "expenses": "2000" },
                    { "description": "Wheel alignment", "expenses": "750.50" }
                ],
                "material_items": [
                    { "quantity": 4, "description": "Spark plugs", "expenses": "300" }
                ]
            })),
        )
        .await
        .expect("update")
        .data
        .expect("update data");

    assert_eq!(updated.labor_items.len(), 2);
    assert_eq!(updated.material_items.len(), 1);
    assert_eq!(updated.order.total_labor_expenses, Decimal::new(275050, 2));
    assert_eq!(updated.order.total_material_expenses, Decimal::from(300));
    assert_eq!(updated.order.overall_total, Decimal::new(305050, 2));
    assert_eq!(updated.order.generated_or_number, order.order.generated_or_number);
}

#[tokio::test]
#[ignore]
async fn test_labor_item_review_leaves_order_untouched() {
    let pool = pool().await;
    let order = create_order(&pool, "Andres Bonifacio").await;
    let controller = OrderRequisitionController::new(pool.clone());

    let item = controller
        .update_labor_item_status(
            &admin(),
            order.labor_items[0].id,
            from_json(json!({ "status": "approved" })),
        )
        .await
        .expect("review")
        .data
        .expect("review data");
    assert_eq!(item.status, Some(LaborItemStatus::Approved));

    let reloaded = controller
        .get_by_id(order.order.id)
        .await
        .expect("order")
        .data
        .expect("order data");
    assert_eq!(reloaded.order.status, OrderStatus::Pending);
    assert_eq!(reloaded.order.total_labor_expenses, Decimal::from(1000));
    assert_eq!(reloaded.order.total_material_expenses, Decimal::from(500));
    assert_eq!(reloaded.order.overall_total, Decimal::from(1500));
    assert_eq!(reloaded.labor_items[0].status, Some(LaborItemStatus::Approved));
}

#[tokio::test]
#[ignore]
async fn test_labor_repair_form_balances() {
    let pool = pool().await;
    let order = create_order(&pool, "Maria Clara").await;
    let form = create_form(&pool, &order).await;

    let balances: Vec<Decimal> = form.cash_advances.iter().map(|a| a.balance).collect();
    assert_eq!(balances, vec![Decimal::from(7000), Decimal::from(5000)]);
    assert_eq!(form.form.total_cash_advance, Decimal::from(5000));
    assert!(form.form.lrf_number.starts_with("LRF-2"));
}

#[tokio::test]
#[ignore]
async fn test_single_advance_edits_only_move_the_total() {
    let pool = pool().await;
    let order = create_order(&pool, "Gabriela Silang").await;
    let form = create_form(&pool, &order).await;
    let controller = LaborRepairFormController::new(pool.clone());
    let first = form.cash_advances[0].id;
    let second = form.cash_advances[1].id;

    let updated = controller
        .update_cash_advance(
            &admin(),
            first,
            from_json(json!({ "date": "2025-02-01", "amount": "4000", "balance": "6000" })),
        )
        .await
        .expect("update advance")
        .data
        .expect("update advance data");

    assert_eq!(updated.form.total_cash_advance, Decimal::from(6000));
    assert_eq!(updated.cash_advances[0].amount, Decimal::from(4000));
    assert_eq!(updated.cash_advances[0].balance, Decimal::from(6000));
    // Not refolded: still 10000 - 3000 - 2000
    assert_eq!(updated.cash_advances[1].balance, Decimal::from(5000));

    let after_delete = controller
        .delete_cash_advance(&admin(), second)
        .await
        .expect("delete advance")
        .data
        .expect("delete advance data");

    assert_eq!(after_delete.cash_advances.len(), 1);
    assert_eq!(after_delete.form.total_cash_advance, Decimal::from(4000));
    assert_eq!(after_delete.cash_advances[0].balance, Decimal::from(6000));
}

#[tokio::test]
#[ignore]
async fn test_saved_work_order_ignores_later_multipliers() {
    let pool = pool().await;
    let order = create_order(&pool, "Emilio Aguinaldo").await;
    let controller = WorkOrderController::new(pool.clone());
    let config = EnvironmentConfig {
        default_labor_multiplier: Decimal::new(175, 2),
        default_part_multiplier: Decimal::new(14, 1),
        ..EnvironmentConfig::default()
    };

    let saved = controller
        .create(&admin(), from_json(json!({ "order_requisition_id": order.order.id })), &config)
        .await
        .expect("work order")
        .data
        .expect("work order data");

    let preview = OrderRequisitionController::new(pool.clone())
        .work_order_preview(
            order.order.id,
            from_json(json!({ "labor_multiplier": "3", "part_multiplier": "3" })),
            &config,
        )
        .await
        .expect("preview")
        .data
        .expect("preview data");
    assert_eq!(preview.customer_billing, Decimal::from(4500));

    let second = controller
        .create(
            &admin(),
            from_json(json!({
                "order_requisition_id": order.order.id,
                "labor_multiplier": "3",
                "part_multiplier": "3"
            })),
            &config,
        )
        .await
        .expect("second work order")
        .data
        .expect("second work order data");
    assert_eq!(second.work_order.customer_billing, Decimal::from(4500));

    let reloaded = controller
        .get_by_id(saved.work_order.id)
        .await
        .expect("reload")
        .data
        .expect("reload data");
    assert_eq!(reloaded.work_order.customer_billing, Decimal::from(2450));
    assert_eq!(reloaded.work_order.expenses, Decimal::from(1500));
    assert_eq!(reloaded.difference, Decimal::from(-950));
}

#[tokio::test]
#[ignore]
async fn test_work_order_billing() {
    let pool = pool().await;
    let order = create_order(&pool, "TCX Logistics").await;

    let work_order = WorkOrderController::new(pool.clone())
        .create(
            &admin(),
            from_json(json!({ "order_requisition_id": order.order.id })),
            &EnvironmentConfig::default(),
        )
        .await
        .expect("work order")
        .data
        .expect("work order data");

    assert_eq!(work_order.work_order.customer_billing, Decimal::from(2450));
    assert_eq!(work_order.work_order.expenses, Decimal::from(1500));
    assert_eq!(work_order.difference, Decimal::from(-950));
}

#[tokio::test]
#[ignore]
async fn test_bootstrapped_admin_can_log_in() {
    let pool = pool().await;
    let controller = AuthController::new(pool.clone(), Arc::new(JwtService::new("db-test-secret", 600)));
    let admin = AdminBootstrap {
        name: "Administrator".to_string(),
        email: format!("{}@mvmis.local", unique("admin").to_lowercase()),
        password: "s3cret-pass".to_string(),
    };

    assert!(controller.bootstrap_admin(&admin).await.expect("bootstrap"));
    assert!(!controller.bootstrap_admin(&admin).await.expect("second bootstrap"));

    let login = controller
        .login(from_json(json!({ "email": admin.email, "password": admin.password })))
        .await
        .expect("login")
        .data
        .expect("login data");
    assert_eq!(login.user.role, Role::Admin);
    assert_eq!(login.expires_in, 600);

    let wrong = controller
        .login(from_json(json!({ "email": admin.email, "password": "nope" })))
        .await;
    assert!(matches!(wrong, Err(AppError::Unauthorized(_))));
}
