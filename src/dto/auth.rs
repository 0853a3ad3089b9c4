use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::middleware::auth::Role;

/// Bearer token claims issued by the identity provider.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: usize,
}
