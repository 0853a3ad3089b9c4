pub mod approval_service;
pub mod fulfillment_service;
pub mod order_service;
pub mod stats_service;
pub mod store_service;
