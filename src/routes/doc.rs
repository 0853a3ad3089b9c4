use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        orders::{
            CreateOrderRequest, OrderItemInput, OrderStats, OrderWithItems,
            StoreOrders, UpdateOrderStatusRequest,
        },
        stores::{
            ActivityList, DashboardStats, RegisterStoreRequest, RejectStoreRequest, StoreList,
            UpdateStoreProfileRequest,
        },
    },
    error::{EntityKind, ErrorData, ValidationReason},
    lifecycle::{OrderStatus, PaymentMethod, StoreState},
    middleware::auth::Role,
    models::{ActivityEntry, Order, OrderItem, Store},
    response::{ApiResponse, Meta},
    routes::{admin, health, orders, params, stores},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        stores::register_store,
        stores::list_public_stores,
        stores::get_public_store,
        stores::get_profile,
        stores::update_profile,
        orders::create_order,
        orders::list_store_orders,
        orders::get_order,
        orders::update_order_status,
        admin::dashboard_stats,
        admin::list_stores,
        admin::get_store,
        admin::approve_store,
        admin::reject_store,
        admin::remove_store,
        admin::recent_activity
    ),
    components(
        schemas(
            Store,
            StoreState,
            Order,
            OrderItem,
            OrderStatus,
            PaymentMethod,
            ActivityEntry,
            Role,
            RegisterStoreRequest,
            UpdateStoreProfileRequest,
            RejectStoreRequest,
            StoreList,
            DashboardStats,
            ActivityList,
            CreateOrderRequest,
            OrderItemInput,
            UpdateOrderStatusRequest,
            OrderWithItems,
            OrderStats,
            StoreOrders,
            ErrorData,
            EntityKind,
            ValidationReason,
            params::SortOrder,
            Meta,
            ApiResponse<Store>,
            ApiResponse<StoreList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<StoreOrders>,
            ApiResponse<DashboardStats>,
            ApiResponse<ActivityList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Stores", description = "Store registration, public directory and owner profile"),
        (name = "Orders", description = "Order placement and fulfillment"),
        (name = "Admin", description = "Store approval workflow and dashboard"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
