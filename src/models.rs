use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::{order_items, orders, store_activity, stores},
    lifecycle::{OrderStatus, PaymentMethod, StoreState},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Store {
    pub id: Uuid,
    pub store_name: String,
    pub owner_name: String,
    pub phone: String,
    pub email: String,
    pub license_number: String,
    pub city: String,
    pub area: String,
    pub pincode: String,
    pub address: String,
    pub image_ref: Option<String>,
    pub license_file_ref: Option<String>,
    pub state: StoreState,
    pub rejection_reason: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub removed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<stores::Model> for Store {
    fn from(model: stores::Model) -> Self {
        Store {
            id: model.id,
            store_name: model.store_name,
            owner_name: model.owner_name,
            phone: model.phone,
            email: model.email,
            license_number: model.license_number,
            city: model.city,
            area: model.area,
            pincode: model.pincode,
            address: model.address,
            image_ref: model.image_ref,
            license_file_ref: model.license_file_ref,
            state: model.state,
            rejection_reason: model.rejection_reason,
            approved_at: model.approved_at.map(|dt| dt.with_timezone(&Utc)),
            removed_at: model.removed_at.map(|dt| dt.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub store_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
    pub total_amount: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Order {
            id: model.id,
            order_number: model.order_number,
            store_id: model.store_id,
            customer_name: model.customer_name,
            customer_phone: model.customer_phone,
            delivery_address: model.delivery_address,
            payment_method: model.payment_method,
            total_amount: model.total_amount,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub medicine_name: String,
    pub unit_price: i64,
    pub quantity: i32,
    pub pack_size: Option<String>,
}

impl OrderItem {
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

impl From<order_items::Model> for OrderItem {
    fn from(model: order_items::Model) -> Self {
        OrderItem {
            medicine_name: model.medicine_name,
            unit_price: model.unit_price,
            quantity: model.quantity,
            pack_size: model.pack_size,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityEntry {
    pub id: i32,
    pub store_id: Uuid,
    pub store_name: Option<String>,
    pub from_state: Option<StoreState>,
    pub to_state: StoreState,
    pub actor_id: Option<Uuid>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn from_entity(model: store_activity::Model, store: Option<stores::Model>) -> Self {
        ActivityEntry {
            id: model.id,
            store_id: model.store_id,
            store_name: store.map(|s| s.store_name),
            from_state: model.from_state,
            to_state: model.to_state,
            actor_id: model.actor_id,
            reason: model.reason,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
