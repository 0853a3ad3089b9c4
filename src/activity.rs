use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, Set, prelude::DateTimeWithTimeZone,
};
use uuid::Uuid;

use crate::{entity::store_activity::ActiveModel as ActivityActive, error::AppResult, lifecycle::StoreState};

/// Appends an activity entry inside the caller's transaction, so the entry commits
/// exactly when the transition does.
pub async fn record_store_activity<C: ConnectionTrait>(
    conn: &C,
    store_id: Uuid,
    from_state: Option<StoreState>,
    to_state: StoreState,
    actor_id: Option<Uuid>,
    reason: Option<String>,
    at: DateTimeWithTimeZone,
) -> AppResult<()> {
    ActivityActive {
        id: NotSet,
        store_id: Set(store_id),
        from_state: Set(from_state),
        to_state: Set(to_state),
        actor_id: Set(actor_id),
        reason: Set(reason),
        created_at: Set(at),
    }
    .insert(conn)
    .await?;

    Ok(())
}
