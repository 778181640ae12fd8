use sqlx::SqlitePool;
use wildseries_core::model::Program;
use wildseries_core::slug::slugify;

type ProgramTuple = (i64, String, String, Option<String>, Option<String>, i64);

const PROGRAM_COLUMNS: &str = "p.id, p.title, p.slug, p.summary, p.poster, p.category_id";

/// Insert a program. The slug is derived from the title. Returns the new ID.
pub async fn create_program(
    pool: &SqlitePool,
    title: &str,
    summary: Option<&str>,
    poster: Option<&str>,
    category_id: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO program (title, slug, summary, poster, category_id) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(title)
    .bind(slugify(title))
    .bind(summary)
    .bind(poster)
    .bind(category_id)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Link an actor to a program. Linking twice is a no-op.
pub async fn add_actor(
    pool: &SqlitePool,
    program_id: i64,
    actor_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO program_actor (program_id, actor_id) VALUES (?, ?)")
        .bind(program_id)
        .bind(actor_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn get_program(pool: &SqlitePool, id: i64) -> Result<Option<Program>, sqlx::Error> {
    let row: Option<ProgramTuple> =
        sqlx::query_as(&format!("SELECT {PROGRAM_COLUMNS} FROM program p WHERE p.id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(row_to_program))
}

pub async fn list_programs(pool: &SqlitePool) -> Result<Vec<Program>, sqlx::Error> {
    let rows: Vec<ProgramTuple> =
        sqlx::query_as(&format!("SELECT {PROGRAM_COLUMNS} FROM program p ORDER BY p.id"))
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(row_to_program).collect())
}

/// Programs whose title equals `title` exactly (case-sensitive, no substring match).
pub async fn find_by_title(pool: &SqlitePool, title: &str) -> Result<Vec<Program>, sqlx::Error> {
    let rows: Vec<ProgramTuple> = sqlx::query_as(&format!(
        "SELECT {PROGRAM_COLUMNS} FROM program p WHERE p.title = ? ORDER BY p.id"
    ))
    .bind(title)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(row_to_program).collect())
}

/// Find a program by title, ignoring case. `key` must already be lowercase.
pub async fn find_by_title_key(
    pool: &SqlitePool,
    key: &str,
) -> Result<Option<Program>, sqlx::Error> {
    let row: Option<ProgramTuple> = sqlx::query_as(&format!(
        "SELECT {PROGRAM_COLUMNS} FROM program p WHERE LOWER(p.title) = ? ORDER BY p.id LIMIT 1"
    ))
    .bind(key)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(row_to_program))
}

pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Program>, sqlx::Error> {
    let row: Option<ProgramTuple> =
        sqlx::query_as(&format!("SELECT {PROGRAM_COLUMNS} FROM program p WHERE p.slug = ?"))
            .bind(slug)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(row_to_program))
}

/// Most recent programs of a category, newest (highest ID) first.
pub async fn list_recent_by_category(
    pool: &SqlitePool,
    category_id: i64,
    limit: i64,
) -> Result<Vec<Program>, sqlx::Error> {
    let rows: Vec<ProgramTuple> = sqlx::query_as(&format!(
        "SELECT {PROGRAM_COLUMNS} FROM program p WHERE p.category_id = ? \
         ORDER BY p.id DESC LIMIT ?"
    ))
    .bind(category_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(row_to_program).collect())
}

pub async fn list_by_actor(pool: &SqlitePool, actor_id: i64) -> Result<Vec<Program>, sqlx::Error> {
    let rows: Vec<ProgramTuple> = sqlx::query_as(&format!(
        "SELECT {PROGRAM_COLUMNS} FROM program p \
         JOIN program_actor pa ON pa.program_id = p.id \
         WHERE pa.actor_id = ? ORDER BY p.title"
    ))
    .bind(actor_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(row_to_program).collect())
}

fn row_to_program(r: ProgramTuple) -> Program {
    Program {
        id: r.0,
        title: r.1,
        slug: r.2,
        summary: r.3,
        poster: r.4,
        category_id: r.5,
    }
}
