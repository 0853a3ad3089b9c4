use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::stores::{RegisterStoreRequest, StoreList, UpdateStoreProfileRequest},
    error::AppResult,
    middleware::auth::Actor,
    models::Store,
    response::{ApiResponse, Meta},
    routes::params::StoreListQuery,
    services::store_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_public_stores))
        .route("/register", post(register_store))
        .route("/profile", get(get_profile).put(update_profile))
        .route("/{id}", get(get_public_store))
}

#[utoipa::path(
    post,
    path = "/api/stores/register",
    request_body = RegisterStoreRequest,
    responses(
        (status = 201, description = "Store registered and awaiting approval", body = ApiResponse<Store>),
        (status = 400, description = "Validation failed"),
    ),
    tag = "Stores"
)]
pub async fn register_store(
    State(state): State<AppState>,
    Json(payload): Json<RegisterStoreRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Store>>)> {
    let store = store_service::register_store(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Store registered", store, Some(Meta::empty()))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/stores",
    params(StoreListQuery),
    responses(
        (status = 200, description = "Approved stores", body = ApiResponse<StoreList>),
    ),
    tag = "Stores"
)]
pub async fn list_public_stores(
    State(state): State<AppState>,
    Query(query): Query<StoreListQuery>,
) -> AppResult<Json<ApiResponse<StoreList>>> {
    let window = query.window();
    let (items, total) = store_service::list_public_stores(&state, query.q, window).await?;
    Ok(Json(ApiResponse::success(
        "Stores",
        StoreList { items },
        Some(Meta::paged(window, total)),
    )))
}

#[utoipa::path(
    get,
    path = "/api/stores/{id}",
    params(("id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Approved store", body = ApiResponse<Store>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Stores"
)]
pub async fn get_public_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Store>>> {
    let store = store_service::get_public_store(&state, id).await?;
    Ok(Json(ApiResponse::ok(store)))
}

#[utoipa::path(
    get,
    path = "/api/stores/profile",
    responses(
        (status = 200, description = "The caller's own store", body = ApiResponse<Store>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stores"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    actor: Actor,
) -> AppResult<Json<ApiResponse<Store>>> {
    let store = store_service::get_own_store(&state, &actor).await?;
    Ok(Json(ApiResponse::ok(store)))
}

#[utoipa::path(
    put,
    path = "/api/stores/profile",
    request_body = UpdateStoreProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<Store>),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stores"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    actor: Actor,
    Json(payload): Json<UpdateStoreProfileRequest>,
) -> AppResult<Json<ApiResponse<Store>>> {
    let store = store_service::update_store_profile(&state, &actor, payload).await?;
    Ok(Json(ApiResponse::success("Profile updated", store, Some(Meta::empty()))))
}
