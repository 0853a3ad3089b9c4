use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{ActivityEntry, Store};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterStoreRequest {
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
}

/// Descriptive fields an owner may edit. The license number is fixed at registration.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateStoreProfileRequest {
    pub store_name: Option<String>,
    pub owner_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub pincode: Option<String>,
    pub address: Option<String>,
    pub image_ref: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RejectStoreRequest {
    pub reason: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreList {
    pub items: Vec<Store>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_approved_stores: u64,
    pub pending_store_count: u64,
    pub total_users: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityList {
    pub items: Vec<ActivityEntry>,
}
