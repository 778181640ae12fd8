use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wildseries_core::types::UserRole;
use wildseries_server::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env();
    info!(db_path = %config.db_path, "connecting to database");

    let pool = wildseries_db::connect(&config.db_path)
        .await
        .context("failed to connect to database")?;

    let applied = wildseries_db::migrate::run(&pool)
        .await
        .context("failed to run migrations")?;
    info!(applied, "migrations complete");

    // Bootstrap admin if no users exist
    let user_count = wildseries_db::repo::users::count_users(&pool)
        .await
        .context("failed to count users")?;

    if user_count == 0 {
        wildseries_db::repo::users::create_user(
            &pool,
            "admin",
            &config.admin_password,
            UserRole::Admin,
        )
        .await
        .context("failed to bootstrap admin user")?;
        info!("admin user bootstrapped (username: admin)");
    }

    if let Some(seed_path) = &config.seed_path {
        let fixture = wildseries_db::seed::load_fixture(seed_path)
            .await
            .with_context(|| format!("failed to load fixture {seed_path}"))?;
        wildseries_db::seed::apply(&pool, &fixture)
            .await
            .context("failed to apply fixture")?;
    }

    let app_state = wildseries_server::state::AppState {
        db: pool,
        jwt_secret: config.jwt_secret,
    };

    let app = wildseries_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
