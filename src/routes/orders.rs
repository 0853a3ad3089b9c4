use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::orders::{CreateOrderRequest, OrderWithItems, StoreOrders, UpdateOrderStatusRequest},
    error::AppResult,
    middleware::auth::{Actor, ensure_owner},
    models::Order,
    response::{ApiResponse, Meta},
    routes::params::OrderListQuery,
    services::{fulfillment_service, order_service, stats_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_order))
        .route("/store", get(list_store_orders))
        .route("/{id}", get(get_order))
        .route("/{id}/status", patch(update_order_status))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<OrderWithItems>),
        (status = 400, description = "Validation failed or store not approved"),
        (status = 404, description = "Store not found"),
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderWithItems>>)> {
    let order = order_service::create_order(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Order placed", order, Some(Meta::empty()))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/orders/store",
    params(OrderListQuery),
    responses(
        (status = 200, description = "Orders of the caller's store with stats", body = ApiResponse<StoreOrders>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_store_orders(
    State(state): State<AppState>,
    actor: Actor,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<StoreOrders>>> {
    let store_id = ensure_owner(&actor)?;
    let window = query.window();
    let sort = query.sort_order.unwrap_or_default();
    let (items, total) =
        order_service::list_orders_for_store(&state, store_id, &query.filter(), window, sort)
            .await?;
    let stats = stats_service::store_order_stats(&state, store_id).await?;
    Ok(Json(ApiResponse::success(
        "Orders",
        StoreOrders { items, stats },
        Some(Meta::paged(window, total)),
    )))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with line items", body = ApiResponse<OrderWithItems>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let order = order_service::get_order_for_actor(&state, &actor, id).await?;
    Ok(Json(ApiResponse::ok(order)))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order status updated", body = ApiResponse<Order>),
        (status = 403, description = "Order belongs to another store"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Transition not allowed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = fulfillment_service::update_status(&state, &actor, id, payload.status).await?;
    Ok(Json(ApiResponse::success("Order updated", order, Some(Meta::empty()))))
}
