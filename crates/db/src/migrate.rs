use sqlx::SqlitePool;
use tracing::{debug, info};

struct Migration {
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    name: "001_initial_schema",
    sql: include_str!("../migrations/001_initial_schema.sql"),
}];

/// Apply pending migrations in order and return how many ran.
///
/// Each migration runs in its own transaction together with its
/// `_migrations` record, so a failed one leaves no partial schema behind.
/// Migration files are split on `;` and must not contain one elsewhere.
pub async fn run(pool: &SqlitePool) -> Result<usize, sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_ts INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    let mut applied = 0;
    for migration in MIGRATIONS {
        let done: Option<(String,)> =
            sqlx::query_as("SELECT name FROM _migrations WHERE name = ?")
                .bind(migration.name)
                .fetch_optional(pool)
                .await?;
        if done.is_some() {
            debug!(migration = migration.name, "already applied");
            continue;
        }

        let mut tx = pool.begin().await?;
        for statement in migration.sql.split(';').map(str::trim) {
            if !statement.is_empty() {
                sqlx::query(statement).execute(&mut *tx).await?;
            }
        }
        sqlx::query("INSERT INTO _migrations (name, applied_ts) VALUES (?, ?)")
            .bind(migration.name)
            .bind(chrono::Utc::now().timestamp())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(migration = migration.name, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
