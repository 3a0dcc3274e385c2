use std::sync::Arc;

use auth::PasswordStrength;
use auth::SessionRegistry;
use auth::TokenCodec;
use auth_service::config::Config;
use auth_service::domain::account::ports::AuthServicePort;
use auth_service::domain::account::ports::CredentialStore;
use auth_service::domain::account::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::password::Argon2PasswordVerifier;
use auth_service::outbound::repositories::InMemoryCredentialStore;
use auth_service::outbound::repositories::PostgresCredentialStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn build_service<CS: CredentialStore>(
    store: Arc<CS>,
    config: &Config,
) -> Arc<dyn AuthServicePort> {
    // One codec for the whole process: the signing key is fixed from here on.
    let tokens = Arc::new(TokenCodec::new(config.jwt.token_config()));
    let sessions = Arc::new(SessionRegistry::new());
    let passwords = Arc::new(Argon2PasswordVerifier::default());

    let service = AuthService::new(
        store,
        passwords,
        tokens,
        sessions,
        config.lockout.policy(),
    );

    if config.security.require_strong_passwords {
        Arc::new(service.with_password_strength(PasswordStrength::default()))
    } else {
        Arc::new(service)
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
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
        persistent_store = config.database.url.is_some(),
        token_ttl_hours = config.jwt.expiration_hours,
        max_failed_attempts = config.lockout.max_failed_attempts,
        lock_duration_minutes = config.lockout.lock_duration_minutes,
        "Configuration loaded"
    );

    let auth_service = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = 5,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_service(Arc::new(PostgresCredentialStore::new(pg_pool)), &config)
        }
        None => {
            tracing::warn!("No database configured, accounts are kept in memory");
            build_service(Arc::new(InMemoryCredentialStore::new()), &config)
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, config.security.conceal_unknown_accounts);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
