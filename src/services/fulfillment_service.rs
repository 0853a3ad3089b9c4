use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, EntityTrait, QuerySelect, Set, TransactionTrait,
    prelude::DateTimeWithTimeZone, sea_query::LockType,
};
use uuid::Uuid;

use crate::{
    entity::orders::{ActiveModel as OrderActive, Entity as Orders},
    error::{AppError, AppResult, EntityKind},
    lifecycle::OrderStatus,
    middleware::auth::{Actor, ensure_owner},
    models::Order,
    state::AppState,
};

/// Moves an order to `next` on behalf of its store. Only `status` and `updated_at`
/// change; line items and the total are never rewritten.
pub async fn update_status(
    state: &AppState,
    actor: &Actor,
    order_id: Uuid,
    next: OrderStatus,
) -> AppResult<Order> {
    let actor_store_id = ensure_owner(actor)?;

    let txn = state.orm.begin().await?;
    let order = Orders::find_by_id(order_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::not_found(EntityKind::Order))?;

    if order.store_id != actor_store_id {
        return Err(AppError::Forbidden);
    }

    let from = order.status;
    if !from.can_transition_to(next, state.policy.transitions) {
        tracing::warn!(
            order_id = %order_id,
            from = %from,
            to = %next,
            "rejected order transition"
        );
        return Err(AppError::InvalidTransition {
            from: from.as_str(),
            to: next.as_str(),
        });
    }

    let now: DateTimeWithTimeZone = Utc::now().into();
    let mut active: OrderActive = order.into();
    active.status = Set(next);
    active.updated_at = Set(now);
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        order_id = %updated.id,
        store_id = %updated.store_id,
        from = %from,
        to = %next,
        "order status updated"
    );
    Ok(updated.into())
}
