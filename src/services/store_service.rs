use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
    prelude::DateTimeWithTimeZone,
    sea_query::{Expr, LikeExpr, LockType},
};
use uuid::Uuid;

use crate::{
    activity::record_store_activity,
    dto::stores::{RegisterStoreRequest, UpdateStoreProfileRequest},
    entity::stores::{ActiveModel as StoreActive, Column as StoreCol, Entity as Stores, Model as StoreModel},
    error::{AppError, AppResult, EntityKind, ValidationReason},
    lifecycle::StoreState,
    middleware::auth::{Actor, ensure_admin, ensure_owner},
    models::Store,
    routes::params::{PageWindow, SortOrder},
    state::AppState,
    validation,
};

#[derive(Debug, Clone, Default)]
pub struct StoreFilter {
    pub state: Option<StoreState>,
    pub search: Option<String>,
}

/// Context written alongside a state change.
#[derive(Debug, Clone)]
pub(crate) struct StateChange {
    pub reason: Option<String>,
    pub at: DateTimeWithTimeZone,
}

fn store_search_key(store: &StoreModel) -> String {
    validation::search_key(&[
        &store.store_name,
        &store.owner_name,
        &store.license_number,
        &store.city,
        &store.area,
    ])
}

pub async fn register_store(state: &AppState, payload: RegisterStoreRequest) -> AppResult<Store> {
    let license_number = validation::required("license_number", &payload.license_number)?;
    let store_name = validation::required("store_name", &payload.store_name)?;
    let owner_name = validation::required("owner_name", &payload.owner_name)?;
    let city = validation::required("city", &payload.city)?;
    let area = validation::required("area", &payload.area)?;
    let search_key =
        validation::search_key(&[&store_name, &owner_name, &license_number, &city, &area]);
    let now: DateTimeWithTimeZone = Utc::now().into();
    let active = StoreActive {
        id: Set(Uuid::new_v4()),
        store_name: Set(store_name),
        owner_name: Set(owner_name),
        phone: Set(validation::phone("phone", &payload.phone)?),
        email: Set(validation::email("email", &payload.email)?),
        license_number: Set(license_number.clone()),
        city: Set(city),
        area: Set(area),
        pincode: Set(validation::pincode("pincode", &payload.pincode)?),
        address: Set(validation::required("address", &payload.address)?),
        image_ref: Set(validation::optional(payload.image_ref)),
        license_file_ref: Set(validation::optional(payload.license_file_ref)),
        search_key: Set(search_key),
        state: Set(StoreState::Pending),
        rejection_reason: Set(None),
        approved_at: Set(None),
        removed_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let txn = state.orm.begin().await?;

    if license_in_use(&txn, &license_number).await? {
        return Err(AppError::validation(
            "license_number",
            ValidationReason::AlreadyInUse,
        ));
    }

    // The partial unique index catches a concurrent registration that passed the check.
    let store = active
        .insert(&txn)
        .await
        .map_err(|err| AppError::unique_violation(err, "license_number"))?;

    record_store_activity(&txn, store.id, None, StoreState::Pending, None, None, now).await?;

    txn.commit().await?;

    tracing::info!(store_id = %store.id, license = %store.license_number, "store registered");
    Ok(store.into())
}

async fn license_in_use<C: ConnectionTrait>(conn: &C, license_number: &str) -> AppResult<bool> {
    let count = Stores::find()
        .filter(StoreCol::LicenseNumber.eq(license_number))
        .filter(StoreCol::State.ne(StoreState::Removed))
        .count(conn)
        .await?;
    Ok(count > 0)
}

/// Loads a store in any state, removed included.
pub(crate) async fn find_store<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<StoreModel> {
    Stores::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::not_found(EntityKind::Store))
}

/// Loads a store and holds a row lock on it until the surrounding transaction ends.
pub(crate) async fn lock_store<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    lock: LockType,
) -> AppResult<StoreModel> {
    Stores::find_by_id(id)
        .lock(lock)
        .one(conn)
        .await?
        .ok_or(AppError::not_found(EntityKind::Store))
}

/// A store that has not been removed.
pub async fn get_store(state: &AppState, id: Uuid) -> AppResult<Store> {
    let store = find_store(&state.orm, id).await?;
    if !store.state.is_listed() {
        return Err(AppError::not_found(EntityKind::Store));
    }
    Ok(store.into())
}

/// Public lookups only see approved stores.
pub async fn get_public_store(state: &AppState, id: Uuid) -> AppResult<Store> {
    let store = find_store(&state.orm, id).await?;
    if store.state != StoreState::Approved {
        return Err(AppError::not_found(EntityKind::Store));
    }
    Ok(store.into())
}

/// Admin view; removed stores stay readable for audit.
pub async fn get_store_for_admin(state: &AppState, actor: &Actor, id: Uuid) -> AppResult<Store> {
    ensure_admin(actor)?;
    Ok(find_store(&state.orm, id).await?.into())
}

pub async fn get_own_store(state: &AppState, actor: &Actor) -> AppResult<Store> {
    let store_id = ensure_owner(actor)?;
    get_store(state, store_id).await
}

/// Builds the listing query. Nothing runs until the caller fetches, and every fetch
/// re-reads current rows.
pub fn store_query(filter: &StoreFilter, sort: SortOrder) -> Select<Stores> {
    let mut condition = Condition::all().add(StoreCol::State.ne(StoreState::Removed));
    if let Some(wanted) = filter.state {
        condition = condition.add(StoreCol::State.eq(wanted));
    }
    if let Some(pattern) = validation::search_pattern(filter.search.as_deref()) {
        condition = condition
            .add(Expr::col(StoreCol::SearchKey).like(LikeExpr::new(pattern).escape('\\')));
    }

    let finder = Stores::find().filter(condition);
    let finder = match sort {
        SortOrder::Asc => finder.order_by_asc(StoreCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(StoreCol::CreatedAt),
    };
    finder.order_by_asc(StoreCol::Id)
}

pub async fn list_stores(
    state: &AppState,
    filter: &StoreFilter,
    window: PageWindow,
    sort: SortOrder,
) -> AppResult<(Vec<Store>, u64)> {
    let finder = store_query(filter, sort);
    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(window.per_page)
        .offset(window.offset())
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Store::from)
        .collect();
    Ok((items, total))
}

pub async fn list_public_stores(
    state: &AppState,
    search: Option<String>,
    window: PageWindow,
) -> AppResult<(Vec<Store>, u64)> {
    let filter = StoreFilter {
        state: Some(StoreState::Approved),
        search,
    };
    list_stores(state, &filter, window, SortOrder::Desc).await
}

pub async fn list_stores_for_admin(
    state: &AppState,
    actor: &Actor,
    filter: &StoreFilter,
    window: PageWindow,
    sort: SortOrder,
) -> AppResult<(Vec<Store>, u64)> {
    ensure_admin(actor)?;
    list_stores(state, filter, window, sort).await
}

/// Owner edits to descriptive fields. State and license number are never touched here.
pub async fn update_store_profile(
    state: &AppState,
    actor: &Actor,
    payload: UpdateStoreProfileRequest,
) -> AppResult<Store> {
    let store_id = ensure_owner(actor)?;
    let txn = state.orm.begin().await?;

    let current = lock_store(&txn, store_id, LockType::Update).await?;
    if !current.state.is_listed() {
        return Err(AppError::not_found(EntityKind::Store));
    }

    let mut store = current;
    if let Some(v) = payload.store_name {
        store.store_name = validation::required("store_name", &v)?;
    }
    if let Some(v) = payload.owner_name {
        store.owner_name = validation::required("owner_name", &v)?;
    }
    if let Some(v) = payload.phone {
        store.phone = validation::phone("phone", &v)?;
    }
    if let Some(v) = payload.email {
        store.email = validation::email("email", &v)?;
    }
    if let Some(v) = payload.city {
        store.city = validation::required("city", &v)?;
    }
    if let Some(v) = payload.area {
        store.area = validation::required("area", &v)?;
    }
    if let Some(v) = payload.pincode {
        store.pincode = validation::pincode("pincode", &v)?;
    }
    if let Some(v) = payload.address {
        store.address = validation::required("address", &v)?;
    }
    if payload.image_ref.is_some() {
        store.image_ref = validation::optional(payload.image_ref);
    }
    store.search_key = store_search_key(&store);
    store.updated_at = Utc::now().into();

    // Every column is marked set; state and license are written back unchanged.
    let active = StoreActive::from(store).reset_all();
    let updated = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(store_id = %updated.id, "store profile updated");
    Ok(updated.into())
}

/// Writes a new approval state. Only the approval workflow calls this, with the row
/// already locked in `conn`'s transaction.
pub(crate) async fn set_state<C: ConnectionTrait>(
    conn: &C,
    current: StoreModel,
    next: StoreState,
    change: StateChange,
) -> AppResult<StoreModel> {
    let mut active: StoreActive = current.into();
    active.state = Set(next);
    match next {
        StoreState::Approved => {
            active.approved_at = Set(Some(change.at));
            active.rejection_reason = Set(None);
        }
        StoreState::Rejected => {
            active.rejection_reason = Set(change.reason);
        }
        StoreState::Removed => {
            active.removed_at = Set(Some(change.at));
        }
        StoreState::Pending => {}
    }
    active.updated_at = Set(change.at);
    Ok(active.update(conn).await?)
}
