use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use ag_api::config::{init_tracing, load_config};
use ag_api::{create_app, AppState};
use ag_core::services::guard::AuthGuard;
use ag_core::services::token::{TokenService, TokenServiceConfig};
use ag_infra::cache::RedisClient;
use ag_infra::database::{DatabasePool, PgUserRepository};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config();
    init_tracing(&config.logging)?;

    info!(environment = %config.environment, "Starting AuthGate API server");

    let database = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to PostgreSQL")?;
    if config.database.bootstrap_schema {
        database
            .ensure_schema()
            .await
            .context("failed to bootstrap the database schema")?;
    }

    let redis = RedisClient::new(config.cache.clone())
        .await
        .context("failed to connect to Redis")?;

    let token_config = TokenServiceConfig::from_auth_config(&config.auth)?;
    let token_service = Arc::new(TokenService::new(redis, token_config)?);
    let user_repository = Arc::new(PgUserRepository::new(database.clone()));

    let state = web::Data::new(AppState::new(
        user_repository,
        Arc::clone(&token_service),
        config.auth.password.bcrypt_cost,
    )?);
    let guard = web::Data::new(AuthGuard::new(token_service));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let environment = config.environment;
    let mut server = HttpServer::new(move || create_app(state.clone(), guard.clone(), environment))
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?;
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await?;

    database.close().await;
    info!("Server stopped");
    Ok(())
}
