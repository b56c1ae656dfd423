use std::sync::Arc;

use axum::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Pool, Postgres, Transaction};

use crate::{conf::settings, pkg::internal::auth::TokenRegistry, prelude::Result};

pub fn db_pool() -> Result<Pool<Postgres>> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_pool_max_connections)
        .connect_lazy(&settings.database_url)?;
    Ok(pool)
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub db_pool: Arc<PgPool>,
    pub tokens: Arc<TokenRegistry>,
}

impl AppState {
    pub async fn new() -> Result<AppState> {
        let tokens = TokenRegistry::load(&settings.auth_tokens_path)?;
        if tokens.is_empty() {
            tracing::warn!("token registry is empty, every submission will be rejected");
        } else {
            tracing::info!("loaded {} submission tokens", tokens.len());
        }
        Ok(AppState {
            db_pool: Arc::new(db_pool()?),
            tokens: Arc::new(tokens),
        })
    }
}

#[async_trait]
pub trait GetTxn {
    async fn begin_txn(&self) -> Result<Transaction<'static, Postgres>>;
}

#[async_trait]
impl GetTxn for PgPool {
    async fn begin_txn(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self.begin().await?)
    }
}
