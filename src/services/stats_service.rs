use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::{
    dto::{orders::OrderStats, stores::DashboardStats},
    entity::{
        orders::{Column as OrderCol, Entity as Orders},
        store_activity::{Column as ActivityCol, Entity as StoreActivity},
        stores::{Column as StoreCol, Entity as Stores},
        users::Entity as Users,
    },
    error::AppResult,
    lifecycle::{OrderStatus, RevenuePolicy, StoreState},
    middleware::auth::{Actor, ensure_admin},
    models::ActivityEntry,
    state::AppState,
};

const DEFAULT_ACTIVITY_LIMIT: u64 = 10;
const MAX_ACTIVITY_LIMIT: u64 = 100;

pub async fn dashboard_stats(state: &AppState, actor: &Actor) -> AppResult<DashboardStats> {
    ensure_admin(actor)?;
    let total_approved_stores = count_stores(&state.orm, StoreState::Approved).await?;
    let pending_store_count = count_stores(&state.orm, StoreState::Pending).await?;
    let total_users = Users::find().count(&state.orm).await?;
    Ok(DashboardStats {
        total_approved_stores,
        pending_store_count,
        total_users,
    })
}

async fn count_stores<C: ConnectionTrait>(conn: &C, wanted: StoreState) -> AppResult<u64> {
    Ok(Stores::find()
        .filter(StoreCol::State.eq(wanted))
        .count(conn)
        .await?)
}

/// Folds `(status, total)` rows into per-store counters.
pub fn tally_orders<I>(rows: I, policy: RevenuePolicy) -> OrderStats
where
    I: IntoIterator<Item = (OrderStatus, i64)>,
{
    rows.into_iter()
        .fold(OrderStats::default(), |mut stats, (status, amount)| {
            stats.total_orders += 1;
            match status {
                OrderStatus::Pending => stats.pending_orders += 1,
                OrderStatus::Confirmed => stats.confirmed_orders += 1,
                OrderStatus::Delivered => stats.delivered_orders += 1,
                _ => {}
            }
            if policy.counts(status) {
                stats.total_revenue = stats.total_revenue.saturating_add(amount);
            }
            stats
        })
}

pub async fn store_order_stats(state: &AppState, store_id: Uuid) -> AppResult<OrderStats> {
    let rows: Vec<(OrderStatus, i64)> = Orders::find()
        .select_only()
        .column(OrderCol::Status)
        .column(OrderCol::TotalAmount)
        .filter(OrderCol::StoreId.eq(store_id))
        .into_tuple()
        .all(&state.orm)
        .await?;
    Ok(tally_orders(rows, state.policy.revenue))
}

/// Newest activity first.
pub async fn recent_activity(
    state: &AppState,
    actor: &Actor,
    limit: Option<u64>,
) -> AppResult<Vec<ActivityEntry>> {
    ensure_admin(actor)?;
    let limit = limit
        .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
        .clamp(1, MAX_ACTIVITY_LIMIT);

    let entries = StoreActivity::find()
        .find_also_related(Stores)
        .order_by_desc(ActivityCol::Id)
        .limit(limit)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(entry, store)| ActivityEntry::from_entity(entry, store))
        .collect();
    Ok(entries)
}
