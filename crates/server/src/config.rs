use std::env;

/// Server configuration, read once from the environment at start-up.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite database path (`WILDSERIES_DB`, default: `wildseries.db`)
    pub db_path: String,

    /// Listen address (`WILDSERIES_BIND`, default: `0.0.0.0:8000`)
    pub bind_addr: String,

    /// HS256 signing secret (`WILDSERIES_JWT_SECRET`, default: random per process)
    pub jwt_secret: String,

    /// Password of the bootstrapped `admin` account (`WILDSERIES_ADMIN_PASSWORD`)
    pub admin_password: String,

    /// Optional JSON fixture applied at start-up (`WILDSERIES_SEED`)
    pub seed_path: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("WILDSERIES_DB").unwrap_or_else(|_| "wildseries.db".to_string()),
            bind_addr: env::var("WILDSERIES_BIND").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            // Tokens do not survive a restart unless a secret is configured.
            jwt_secret: env::var("WILDSERIES_JWT_SECRET")
                .unwrap_or_else(|_| uuid::Uuid::new_v4().to_string()),
            admin_password: env::var("WILDSERIES_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin".to_string()),
            seed_path: env::var("WILDSERIES_SEED").ok().filter(|p| !p.is_empty()),
        }
    }
}
