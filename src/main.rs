//! Inkpress fulfillment service entry point.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use inkpress::adapters::archive::ZipArchiveAssembler;
use inkpress::adapters::auth::JwtAdminVerifier;
use inkpress::adapters::carriers::{CarrierRegistry, IsraelPostClient, IsraelPostConfig};
use inkpress::adapters::email::{NoopNotifier, ResendNotifier};
use inkpress::adapters::fetch::HttpFileFetcher;
use inkpress::adapters::http::{admin::admin_router, AdminApiState};
use inkpress::adapters::postgres::{PgAuditLog, PgOrderRepository, PgShipmentRepository};
use inkpress::adapters::print_file::{HttpPrintFileGenerator, PrintFileGeneratorConfig};
use inkpress::adapters::rate_limiter::{InMemoryRateLimiter, RedisRateLimiter};
use inkpress::adapters::storage::{InMemoryObjectStorage, S3ObjectStorage, S3StorageConfig};
use inkpress::application::handlers::fulfillment::{
    BulkDownloadHandler, BulkUpdateStatusHandler, UpdateOrderStatusHandler,
};
use inkpress::application::handlers::shipping::CreateShipmentHandler;
use inkpress::application::services::PrintFilePackager;
use inkpress::config::{AppConfig, StorageBackend};
use inkpress::ports::{FulfillmentNotifier, ObjectStorage, RateLimiter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Record store
    let orders = Arc::new(PgOrderRepository::new(pool.clone()));
    let shipments = Arc::new(PgShipmentRepository::new(pool.clone()));
    let audit = Arc::new(PgAuditLog::new(pool.clone()));

    // Object storage
    let storage: Arc<dyn ObjectStorage> = match config.storage.backend {
        StorageBackend::R2 => Arc::new(
            S3ObjectStorage::new(S3StorageConfig {
                account_id: config.storage.account_id.clone(),
                access_key_id: config.storage.access_key_id.clone().expect("validated"),
                secret_access_key: config
                    .storage
                    .secret_access_key
                    .clone()
                    .expect("validated"),
                bucket: config.storage.bucket.clone(),
                public_base_url: config.storage.public_base_url.clone(),
            })
            .await?,
        ),
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory object storage; objects will not survive restarts");
            Arc::new(InMemoryObjectStorage::new(
                config.storage.public_base_url.clone(),
            ))
        }
    };

    // Carriers
    let mut registry = CarrierRegistry::new(config.shipping.parsed_default_carrier()?);
    registry.register(Arc::new(IsraelPostClient::new(IsraelPostConfig::new(
        config
            .shipping
            .israel_post_api_base
            .clone()
            .unwrap_or_else(|| "https://api.israelpost.co.il/v1".to_string()),
        config.shipping.israel_post_api_key.clone().unwrap_or_default(),
        config
            .shipping
            .israel_post_customer_id
            .clone()
            .unwrap_or_default(),
    ))));
    let registry = Arc::new(registry);

    // Notifications
    let notifier: Arc<dyn FulfillmentNotifier> = if config.email.is_configured() {
        Arc::new(ResendNotifier::new(
            config.email.resend_api_key.clone().unwrap_or_default(),
            config.email.from_address.clone(),
        ))
    } else {
        Arc::new(NoopNotifier)
    };

    // Gates
    let rate_limiter: Arc<dyn RateLimiter> = match &config.redis.url {
        Some(url) if config.redis.is_configured() => {
            let client = redis::Client::open(url.as_str())?;
            let conn = client.get_multiplexed_tokio_connection().await?;
            Arc::new(RedisRateLimiter::new(conn))
        }
        _ => {
            tracing::warn!("No Redis configured; using in-memory rate limiter");
            Arc::new(InMemoryRateLimiter::new())
        }
    };
    let admin_verifier = Arc::new(JwtAdminVerifier::new(
        &config.auth.jwt_secret,
        config.auth.audience.as_deref(),
    ));

    // Application services and handlers
    let packager = Arc::new(PrintFilePackager::new(
        Arc::new(HttpFileFetcher::new()),
        Arc::new(HttpPrintFileGenerator::new(PrintFileGeneratorConfig::new(
            config.generator.base_url.clone(),
            config.generator.api_key.clone().unwrap_or_default(),
        ))),
    ));

    let state = AdminApiState {
        bulk_update_status: Arc::new(BulkUpdateStatusHandler::new(
            orders.clone(),
            audit.clone(),
            notifier.clone(),
        )),
        bulk_download: Arc::new(BulkDownloadHandler::new(
            orders.clone(),
            packager,
            Arc::new(ZipArchiveAssembler::new()),
            storage,
            audit.clone(),
        )),
        update_order_status: Arc::new(UpdateOrderStatusHandler::new(
            orders.clone(),
            audit.clone(),
            notifier.clone(),
        )),
        create_shipment: Arc::new(CreateShipmentHandler::new(
            orders,
            shipments,
            registry,
            audit,
            notifier,
            config.shipping.clone(),
        )),
        rate_limiter,
        admin_verifier,
    };

    let app = axum::Router::new()
        .nest("/api/admin", admin_router())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::timeout::TimeoutLayer::new(
            std::time::Duration::from_secs(120),
        ))
        .with_state(state);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "Inkpress fulfillment service listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
