use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::stores::{ActivityList, DashboardStats, RejectStoreRequest, StoreList},
    error::AppResult,
    middleware::auth::Actor,
    models::Store,
    response::{ApiResponse, Meta},
    routes::params::{ActivityQuery, StoreListQuery},
    services::{approval_service, stats_service, store_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard_stats))
        .route("/stores", get(list_stores))
        .route("/stores/{id}", get(get_store).delete(remove_store))
        .route("/stores/{id}/approve", put(approve_store))
        .route("/stores/{id}/reject", put(reject_store))
        .route("/recent-activity", get(recent_activity))
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Dashboard counters", body = ApiResponse<DashboardStats>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn dashboard_stats(
    State(state): State<AppState>,
    actor: Actor,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let stats = stats_service::dashboard_stats(&state, &actor).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

#[utoipa::path(
    get,
    path = "/api/admin/stores",
    params(StoreListQuery),
    responses(
        (status = 200, description = "Stores in any listed state", body = ApiResponse<StoreList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_stores(
    State(state): State<AppState>,
    actor: Actor,
    Query(query): Query<StoreListQuery>,
) -> AppResult<Json<ApiResponse<StoreList>>> {
    let window = query.window();
    let sort = query.sort_order.unwrap_or_default();
    let (items, total) =
        store_service::list_stores_for_admin(&state, &actor, &query.filter(), window, sort)
            .await?;
    Ok(Json(ApiResponse::success(
        "Stores",
        StoreList { items },
        Some(Meta::paged(window, total)),
    )))
}

#[utoipa::path(
    get,
    path = "/api/admin/stores/{id}",
    params(("id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store in any state", body = ApiResponse<Store>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_store(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Store>>> {
    let store = store_service::get_store_for_admin(&state, &actor, id).await?;
    Ok(Json(ApiResponse::ok(store)))
}

#[utoipa::path(
    put,
    path = "/api/admin/stores/{id}/approve",
    params(("id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store approved", body = ApiResponse<Store>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Store is not pending"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn approve_store(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Store>>> {
    let store = approval_service::approve_store(&state, &actor, id).await?;
    Ok(Json(ApiResponse::success("Store approved", store, Some(Meta::empty()))))
}

#[utoipa::path(
    put,
    path = "/api/admin/stores/{id}/reject",
    params(("id" = Uuid, Path, description = "Store ID")),
    request_body = RejectStoreRequest,
    responses(
        (status = 200, description = "Store rejected", body = ApiResponse<Store>),
        (status = 400, description = "Missing reason"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Store is not pending"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn reject_store(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectStoreRequest>,
) -> AppResult<Json<ApiResponse<Store>>> {
    let store = approval_service::reject_store(&state, &actor, id, &payload.reason).await?;
    Ok(Json(ApiResponse::success("Store rejected", store, Some(Meta::empty()))))
}

#[utoipa::path(
    delete,
    path = "/api/admin/stores/{id}",
    params(("id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store removed", body = ApiResponse<Store>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Store cannot be removed from its current state"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn remove_store(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Store>>> {
    let store = approval_service::remove_store(&state, &actor, id).await?;
    Ok(Json(ApiResponse::success("Store removed", store, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/api/admin/recent-activity",
    params(ActivityQuery),
    responses(
        (status = 200, description = "Newest approval workflow entries", body = ApiResponse<ActivityList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn recent_activity(
    State(state): State<AppState>,
    actor: Actor,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<ApiResponse<ActivityList>>> {
    let items = stats_service::recent_activity(&state, &actor, query.limit).await?;
    Ok(Json(ApiResponse::ok(ActivityList { items })))
}
