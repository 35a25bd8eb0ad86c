use std::net::SocketAddr;
use std::sync::Arc;

use stellar_api::{app, state::AuthConfig, AppState};
use stellar_booking::{BookingEngine, PricingConfig};
use stellar_store::{DbClient, PgBookingStore, PgCatalog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stellar_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = stellar_store::app_config::Config::load()?;
    tracing::info!("Starting Stellar API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url).await?;
    db.migrate().await?;

    let engine = BookingEngine::new(
        Arc::new(PgCatalog::new(db.pool.clone())),
        Arc::new(PgBookingStore::new(db.pool.clone())),
        PricingConfig {
            destination_fee: config.pricing.destination_fee,
            travel_document_fee: config.pricing.travel_document_fee,
            insurance_fee: config.pricing.insurance_fee,
        },
    );

    let app_state = AppState {
        engine: Arc::new(engine),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
