//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but request-level
//! errors go through `account::AccountError` and `kernel::Exception`.

use account::application::{RootUserSeed, SeedUseCase, StackSeed};
use account::{AccountConfig, PgAccountStore, SessionCodec, TokenConfig, account_router};
use axum::http::{self, Method, header};
use kernel::lang::LanguageConfig;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";

/// 未設定または空の環境変数は `None`
fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn account_config_from_env() -> AccountConfig {
    let defaults = TokenConfig::default();

    AccountConfig {
        token: TokenConfig {
            secret: env_opt("JWT_SECRET").map(String::into_bytes).unwrap_or_default(),
            issuer: env_opt("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: env_opt("JWT_AUDIENCE").unwrap_or(defaults.audience),
            ttl: defaults.ttl,
        },
        password_pepper: env_opt("PASSWORD_PEPPER").map(String::into_bytes),
        ..AccountConfig::default()
    }
}

fn language_config_from_env() -> anyhow::Result<LanguageConfig> {
    let header_name = env_opt("LANGUAGE_HEADER").unwrap_or_else(|| "accept-language".to_string());
    let supported = env_opt("SUPPORTED_LANGUAGES").unwrap_or_else(|| "pt-BR,en-US".to_string());
    let default_code = env_opt("DEFAULT_LANGUAGE").unwrap_or_else(|| "pt-BR".to_string());

    Ok(LanguageConfig::new(
        &header_name,
        supported.split(','),
        &default_code,
    )?)
}

/// Seed the root user and the configured stacks.
///
/// Failures here are logged and do not prevent server startup.
async fn seed(store: PgAccountStore, config: Arc<AccountConfig>) {
    let (Some(email), Some(name), Some(username)) = (
        env_opt("ROOT_USER_EMAIL"),
        env_opt("ROOT_USER_NAME"),
        env_opt("ROOT_USER_USERNAME"),
    ) else {
        tracing::info!("Root user not configured, skipping seeding");
        return;
    };

    let use_case = SeedUseCase::new(Arc::new(store), config);
    let root = RootUserSeed {
        email,
        name,
        username,
    };

    if let Err(e) = use_case.root_user(&root).await {
        tracing::error!(error = %e, "Root user seeding failed");
        return;
    }

    let Some(path) = env_opt("SEED_STACKS_FILE") else {
        return;
    };

    let seeds = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => match serde_json::from_str::<Vec<StackSeed>>(&raw) {
            Ok(seeds) => seeds,
            Err(e) => {
                tracing::error!(path = %path, error = %e, "Invalid stack seed file");
                return;
            }
        },
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Stack seed file unreadable");
            return;
        }
    };

    if let Err(e) = use_case.stacks(&root.email, &seeds).await {
        tracing::error!(error = %e, "Stack seeding aborted");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,account=info,kernel=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Configuration (a missing signing secret is fatal)
    let account_config = account_config_from_env();
    let codec = SessionCodec::new(&account_config.token)?;
    let language_config = language_config_from_env()?;

    tracing::info!(
        languages = ?language_config.supported_codes().collect::<Vec<_>>(),
        default = language_config.default_locale().code(),
        "Language configuration loaded"
    );

    // Database connection
    let database_url =
        env_opt("DATABASE_URL").ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let store = PgAccountStore::new(pool.clone());
    seed(store.clone(), Arc::new(account_config.clone())).await;

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let language_header: http::HeaderName = language_config.header_name().parse()?;

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            language_header,
        ]));

    // Build router
    let app = account_router(store, codec, account_config, language_config)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env_opt("BIND_ADDR")
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
        .parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
