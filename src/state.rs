use std::sync::Arc;

use crate::{db::OrmConn, lifecycle::EnginePolicy};

#[derive(Clone)]
pub struct AppState {
    pub orm: OrmConn,
    pub policy: EnginePolicy,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(orm: OrmConn, policy: EnginePolicy, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            orm,
            policy,
            jwt_secret: jwt_secret.into(),
        }
    }
}
