use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    lifecycle::{OrderStatus, PaymentMethod},
    models::{Order, OrderItem},
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderItemInput {
    pub medicine_name: String,
    pub price: i64,
    pub quantity: i32,
    pub pack_size: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub store_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
    pub items: Vec<OrderItemInput>,
    /// Accepted for client compatibility; the stored total is always recomputed.
    #[serde(default)]
    pub total_amount: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct OrderStats {
    pub total_orders: u64,
    pub pending_orders: u64,
    pub confirmed_orders: u64,
    pub delivered_orders: u64,
    pub total_revenue: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreOrders {
    pub items: Vec<Order>,
    pub stats: OrderStats,
}
