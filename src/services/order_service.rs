use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
    prelude::DateTimeWithTimeZone,
    sea_query::{Expr, LikeExpr, LockType, OnConflict},
};
use uuid::Uuid;

use crate::{
    dto::orders::{CreateOrderRequest, OrderItemInput, OrderWithItems},
    entity::{
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems},
        order_sequences::{ActiveModel as SequenceActive, Column as SequenceCol, Entity as OrderSequences},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
    },
    error::{AppError, AppResult, EntityKind, ValidationReason},
    lifecycle::{OrderStatus, StoreState},
    middleware::auth::{Actor, Role},
    models::{Order, OrderItem},
    routes::params::{PageWindow, SortOrder},
    services::store_service,
    state::AppState,
    validation,
};

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub search: Option<String>,
}

/// Validates line items and prices them. The returned total is the only total ever
/// stored for the order.
pub fn price_items(items: &[OrderItemInput]) -> AppResult<(Vec<OrderItem>, i64)> {
    if items.is_empty() {
        return Err(AppError::validation("items", ValidationReason::Required));
    }

    let mut priced = Vec::with_capacity(items.len());
    let mut total: i64 = 0;
    for item in items {
        let medicine_name = validation::required("items.medicine_name", &item.medicine_name)?;
        if item.quantity <= 0 {
            return Err(AppError::validation(
                "items.quantity",
                ValidationReason::NotPositive,
            ));
        }
        if item.price < 0 {
            return Err(AppError::validation("items.price", ValidationReason::Negative));
        }
        total = item
            .price
            .checked_mul(i64::from(item.quantity))
            .and_then(|line| total.checked_add(line))
            .ok_or(AppError::validation("items", ValidationReason::OutOfRange))?;

        priced.push(OrderItem {
            medicine_name,
            unit_price: item.price,
            quantity: item.quantity,
            pack_size: validation::optional(item.pack_size.clone()),
        });
    }
    Ok((priced, total))
}

pub async fn create_order(state: &AppState, payload: CreateOrderRequest) -> AppResult<OrderWithItems> {
    let customer_name = validation::required("customer_name", &payload.customer_name)?;
    let customer_phone = validation::phone("customer_phone", &payload.customer_phone)?;
    let delivery_address = validation::required("delivery_address", &payload.delivery_address)?;
    let (items, total_amount) = price_items(&payload.items)?;

    if let Some(claimed) = payload.total_amount.filter(|claimed| *claimed != total_amount) {
        tracing::debug!(claimed, computed = total_amount, "ignoring client-submitted total");
    }

    let txn = state.orm.begin().await?;

    // Shared lock: a concurrent removal waits until this order is committed.
    let store = store_service::lock_store(&txn, payload.store_id, LockType::Share).await?;
    if !store.state.is_listed() {
        return Err(AppError::not_found(EntityKind::Store));
    }
    if store.state != StoreState::Approved {
        return Err(AppError::validation(
            "store_id",
            ValidationReason::StoreNotApproved,
        ));
    }

    let now = Utc::now();
    let order_number = next_order_number(&txn, now).await?;
    let created_at: DateTimeWithTimeZone = now.into();
    let search_key = validation::search_key(&[&order_number, &customer_name, &customer_phone]);

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        order_number: Set(order_number),
        store_id: Set(store.id),
        customer_name: Set(customer_name),
        customer_phone: Set(customer_phone),
        delivery_address: Set(delivery_address),
        payment_method: Set(payload.payment_method),
        total_amount: Set(total_amount),
        search_key: Set(search_key),
        status: Set(OrderStatus::Pending),
        created_at: Set(created_at),
        updated_at: Set(created_at),
    }
    .insert(&txn)
    .await?;

    let rows = items.iter().enumerate().map(|(position, item)| OrderItemActive {
        id: Set(Uuid::new_v4()),
        order_id: Set(order.id),
        position: Set(position as i32),
        medicine_name: Set(item.medicine_name.clone()),
        unit_price: Set(item.unit_price),
        quantity: Set(item.quantity),
        pack_size: Set(item.pack_size.clone()),
    });
    OrderItems::insert_many(rows).exec_without_returning(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        order_number = %order.order_number,
        store_id = %order.store_id,
        total = order.total_amount,
        "order created"
    );

    Ok(OrderWithItems {
        order: order.into(),
        items,
    })
}

/// Bumps today's counter and formats `ORD-YYYYMMDD-NNNNNN`. The upsert holds the
/// counter row until the surrounding transaction ends.
async fn next_order_number<C: ConnectionTrait>(conn: &C, now: DateTime<Utc>) -> AppResult<String> {
    let day = now.format("%Y%m%d").to_string();

    OrderSequences::insert(SequenceActive {
        day: Set(day.clone()),
        last_value: Set(1),
    })
    .on_conflict(
        OnConflict::column(SequenceCol::Day)
            .value(
                SequenceCol::LastValue,
                Expr::col((OrderSequences, SequenceCol::LastValue)).add(1),
            )
            .to_owned(),
    )
    .exec_without_returning(conn)
    .await?;

    let sequence = OrderSequences::find_by_id(day.clone())
        .one(conn)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("order sequence row missing for {day}")))?;

    Ok(format_order_number(&day, sequence.last_value))
}

pub fn format_order_number(day: &str, value: i64) -> String {
    format!("ORD-{day}-{value:06}")
}

pub(crate) async fn find_order<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<OrderModel> {
    Orders::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::not_found(EntityKind::Order))
}

async fn load_items<C: ConnectionTrait>(conn: &C, order_id: Uuid) -> AppResult<Vec<OrderItem>> {
    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .order_by_asc(OrderItemCol::Position)
        .all(conn)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect();
    Ok(items)
}

pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<OrderWithItems> {
    let order = find_order(&state.orm, id).await?;
    let items = load_items(&state.orm, order.id).await?;
    Ok(OrderWithItems {
        order: order.into(),
        items,
    })
}

/// Owners see orders of their own store; admins see any order.
pub async fn get_order_for_actor(
    state: &AppState,
    actor: &Actor,
    id: Uuid,
) -> AppResult<OrderWithItems> {
    let order = find_order(&state.orm, id).await?;
    match actor.role {
        Role::Admin => {}
        Role::Owner if actor.id == order.store_id => {}
        _ => return Err(AppError::Forbidden),
    }
    let items = load_items(&state.orm, order.id).await?;
    Ok(OrderWithItems {
        order: order.into(),
        items,
    })
}

/// Builds the per-store listing query; re-running it re-reads current rows.
pub fn order_query(store_id: Uuid, filter: &OrderFilter, sort: SortOrder) -> Select<Orders> {
    let mut condition = Condition::all().add(OrderCol::StoreId.eq(store_id));
    if let Some(status) = filter.status {
        condition = condition.add(OrderCol::Status.eq(status));
    }
    if let Some(pattern) = validation::search_pattern(filter.search.as_deref()) {
        condition = condition
            .add(Expr::col(OrderCol::SearchKey).like(LikeExpr::new(pattern).escape('\\')));
    }

    let finder = Orders::find().filter(condition);
    let finder = match sort {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };
    finder.order_by_asc(OrderCol::OrderNumber)
}

pub async fn list_orders_for_store(
    state: &AppState,
    store_id: Uuid,
    filter: &OrderFilter,
    window: PageWindow,
    sort: SortOrder,
) -> AppResult<(Vec<Order>, u64)> {
    let finder = order_query(store_id, filter, sort);
    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(window.per_page)
        .offset(window.offset())
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();
    Ok((items, total))
}
