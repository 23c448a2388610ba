use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use moviemagic_api::{app, AppState, AuthConfig};
use moviemagic_core::BookingWorkflow;
use moviemagic_store::{
    app_config::Config, DbClient, InMemoryRateLimiter, KafkaNotifier, PgBookingStore,
    PgUserDirectory, RateLimiter, RedisClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "moviemagic_api=debug,moviemagic_core=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting MovieMagic API on port {}", config.server.port);

    let catalog = config.catalog.build().context("Invalid movie catalog")?;
    tracing::info!("Loaded {} movies into the catalog", catalog.len());

    // Postgres
    let db = DbClient::new(&config.database)
        .await
        .context("Failed to connect to Postgres")?;
    db.migrate().await.context("Failed to run migrations")?;

    let users = Arc::new(PgUserDirectory::new(db.pool.clone()));
    let bookings = Arc::new(PgBookingStore::new(db.pool.clone()));

    // Kafka
    let notifier = Arc::new(
        KafkaNotifier::new(&config.kafka.brokers, config.kafka.notification_topic.clone())
            .context("Failed to create Kafka producer")?,
    );

    // Redis (optional)
    let rate_limiter: Arc<dyn RateLimiter> = match &config.redis {
        Some(redis_config) => Arc::new(
            RedisClient::new(&redis_config.url)
                .await
                .context("Failed to connect to Redis")?,
        ),
        None => {
            tracing::warn!("No Redis configured, rate limiting is per process");
            Arc::new(InMemoryRateLimiter::new())
        }
    };

    let workflow = BookingWorkflow::new(Arc::new(catalog), users.clone(), bookings, notifier)
        .with_notification_timeout(config.notifications.timeout());

    let app_state = AppState {
        workflow: Arc::new(workflow),
        users,
        rate_limiter: Some(rate_limiter),
        rate_limit: config.rate_limit.clone(),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
