use std::sync::Arc;

use auth::Authenticator;
use auth_service::config::Config;
use auth_service::credential::service::Authority;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::profiles::HttpProfileProvisioner;
use auth_service::outbound::repositories::PostgresCredentialRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_issuer = %config.jwt.issuer,
        jwt_expiration_hours = config.jwt.expiration_hours,
        profile_service_url = %config.profile_service.base_url,
        profile_service_timeout_secs = config.profile_service.timeout_secs,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::with_settings(
        config.jwt.secret.as_bytes(),
        &config.jwt.issuer,
        chrono::Duration::hours(config.jwt.expiration_hours),
    ));
    let credential_repository = Arc::new(PostgresCredentialRepository::new(pg_pool));
    let profile_provisioner = Arc::new(HttpProfileProvisioner::new(
        &config.profile_service.base_url,
        config.profile_service.timeout(),
    )?);

    let authority = Authority::new(credential_repository, profile_provisioner, authenticator);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(Arc::new(authority));

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
