use chrono::Utc;
use sea_orm::{TransactionTrait, prelude::DateTimeWithTimeZone, sea_query::LockType};
use uuid::Uuid;

use crate::{
    activity::record_store_activity,
    error::{AppError, AppResult, ValidationReason},
    lifecycle::StoreAction,
    middleware::auth::{Actor, ensure_admin},
    models::Store,
    services::store_service::{self, StateChange},
    state::AppState,
    validation,
};

pub async fn approve_store(state: &AppState, actor: &Actor, store_id: Uuid) -> AppResult<Store> {
    apply(state, actor, store_id, StoreAction::Approve, None).await
}

pub async fn reject_store(
    state: &AppState,
    actor: &Actor,
    store_id: Uuid,
    reason: &str,
) -> AppResult<Store> {
    let reason = validation::required("reason", reason)?;
    apply(state, actor, store_id, StoreAction::Reject, Some(reason)).await
}

/// Soft delete. Orders placed against the store are left untouched.
pub async fn remove_store(state: &AppState, actor: &Actor, store_id: Uuid) -> AppResult<Store> {
    apply(state, actor, store_id, StoreAction::Remove, None).await
}

async fn apply(
    state: &AppState,
    actor: &Actor,
    store_id: Uuid,
    action: StoreAction,
    reason: Option<String>,
) -> AppResult<Store> {
    ensure_admin(actor)?;

    let txn = state.orm.begin().await?;
    let current = store_service::lock_store(&txn, store_id, LockType::Update).await?;
    let from = current.state;
    let to = action.target();

    if !from.allows(action) {
        tracing::warn!(
            store_id = %store_id,
            from = %from,
            to = %to,
            actor = %actor.id,
            "rejected store transition"
        );
        return Err(AppError::InvalidTransition {
            from: from.as_str(),
            to: to.as_str(),
        });
    }

    if action == StoreAction::Approve {
        if current.license_number.trim().is_empty() {
            return Err(AppError::validation(
                "license_number",
                ValidationReason::Required,
            ));
        }
        if current.address.trim().is_empty() {
            return Err(AppError::validation("address", ValidationReason::Required));
        }
    }

    let at: DateTimeWithTimeZone = Utc::now().into();
    let updated = store_service::set_state(
        &txn,
        current,
        to,
        StateChange {
            reason: reason.clone(),
            at,
        },
    )
    .await?;

    record_store_activity(&txn, store_id, Some(from), to, Some(actor.id), reason, at).await?;

    txn.commit().await?;

    tracing::info!(
        store_id = %store_id,
        from = %from,
        to = %to,
        actor = %actor.id,
        "store transition applied"
    );
    Ok(updated.into())
}
