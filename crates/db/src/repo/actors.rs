use sqlx::SqlitePool;
use wildseries_core::model::Actor;

pub async fn create_actor(pool: &SqlitePool, name: &str) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO actor (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Find an actor by exact name.
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Actor>, sqlx::Error> {
    let row: Option<(i64, String)> = sqlx::query_as("SELECT id, name FROM actor WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(id, name)| Actor { id, name }))
}

/// Actors cast in a program, by name.
pub async fn list_by_program(
    pool: &SqlitePool,
    program_id: i64,
) -> Result<Vec<Actor>, sqlx::Error> {
    let rows: Vec<(i64, String)> = sqlx::query_as(
        "SELECT a.id, a.name FROM actor a \
         JOIN program_actor pa ON pa.actor_id = a.id \
         WHERE pa.program_id = ? ORDER BY a.name",
    )
    .bind(program_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(id, name)| Actor { id, name }).collect())
}
