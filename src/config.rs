use std::env;

use anyhow::Context;

use crate::lifecycle::{EnginePolicy, RevenuePolicy, TransitionPolicy};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub db_max_connections: u32,
    pub policy: EnginePolicy,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|n| n.parse::<u32>().ok())
            .unwrap_or(10);

        let revenue = match env::var("REVENUE_POLICY") {
            Ok(raw) => raw.parse::<RevenuePolicy>()?,
            Err(_) => RevenuePolicy::default(),
        };
        let transitions = match env::var("ORDER_TRANSITION_POLICY") {
            Ok(raw) => raw.parse::<TransitionPolicy>()?,
            Err(_) => TransitionPolicy::default(),
        };

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            db_max_connections,
            policy: EnginePolicy {
                revenue,
                transitions,
            },
        })
    }
}
