#![allow(dead_code)]

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use pharmacy_orders_api::{
    db::{create_orm_conn, run_migrations},
    dto::{
        auth::Claims,
        orders::{CreateOrderRequest, OrderItemInput, OrderWithItems},
        stores::RegisterStoreRequest,
    },
    lifecycle::{EnginePolicy, PaymentMethod},
    middleware::auth::{Actor, Role},
    models::Store,
    services::{approval_service, order_service, store_service},
    state::AppState,
};
use sea_orm::{ConnectOptions, Database};
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret";

/// Fresh in-memory database with the full schema. A single pooled connection keeps
/// the database alive for the lifetime of the state.
pub async fn setup_state(policy: EnginePolicy) -> anyhow::Result<AppState> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let orm = Database::connect(options).await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm, policy, JWT_SECRET))
}

/// Shared Postgres database from `TEST_DATABASE_URL` or `DATABASE_URL`, with a real
/// multi-connection pool so row locks are exercised. `None` when neither points at
/// Postgres. Tests using it must not assume an empty database.
pub async fn postgres_state(policy: EnginePolicy) -> anyhow::Result<Option<AppState>> {
    let url = match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) if url.starts_with("postgres") => url,
        _ => {
            eprintln!("Skipping Postgres run: set TEST_DATABASE_URL to a Postgres database.");
            return Ok(None);
        }
    };
    let orm = create_orm_conn(&url, 8).await?;
    run_migrations(&orm).await?;
    Ok(Some(AppState::new(orm, policy, JWT_SECRET)))
}

/// License numbers that cannot collide with earlier runs against a shared database.
pub fn unique_license(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

pub fn admin() -> Actor {
    Actor::admin(Uuid::new_v4())
}

pub fn store_request(name: &str, license: &str) -> RegisterStoreRequest {
    RegisterStoreRequest {
        store_name: name.into(),
        owner_name: "Anita Menon".into(),
        phone: "9876543210".into(),
        email: "owner@citycare.in".into(),
        license_number: license.into(),
        city: "Kochi".into(),
        area: "Edappally".into(),
        pincode: "682024".into(),
        address: "12 Market Road, Edappally".into(),
        image_ref: None,
        license_file_ref: Some("uploads/license.pdf".into()),
    }
}

pub async fn register(state: &AppState, name: &str, license: &str) -> anyhow::Result<Store> {
    Ok(store_service::register_store(state, store_request(name, license)).await?)
}

pub async fn approved_store(state: &AppState, name: &str, license: &str) -> anyhow::Result<Store> {
    let store = register(state, name, license).await?;
    Ok(approval_service::approve_store(state, &admin(), store.id).await?)
}

pub fn item(name: &str, price: i64, quantity: i32) -> OrderItemInput {
    OrderItemInput {
        medicine_name: name.into(),
        price,
        quantity,
        pack_size: Some("strip of 10".into()),
    }
}

pub fn order_request(store_id: Uuid, items: Vec<OrderItemInput>) -> CreateOrderRequest {
    CreateOrderRequest {
        store_id,
        customer_name: "Ravi Kumar".into(),
        customer_phone: "9123456780".into(),
        delivery_address: "Flat 4B, Lake View Apartments".into(),
        payment_method: PaymentMethod::CashOnDelivery,
        items,
        total_amount: None,
    }
}

pub async fn place_order(state: &AppState, store_id: Uuid) -> anyhow::Result<OrderWithItems> {
    let payload = order_request(
        store_id,
        vec![item("Paracetamol 500mg", 45, 2), item("Cetirizine 10mg", 85, 1)],
    );
    Ok(order_service::create_order(state, payload).await?)
}

pub fn bearer(sub: Uuid, role: Role) -> anyhow::Result<String> {
    let claims = Claims {
        sub: sub.to_string(),
        role,
        exp: (Utc::now().timestamp() + 3600) as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )?;
    Ok(format!("Bearer {token}"))
}
