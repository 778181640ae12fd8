use sqlx::SqlitePool;
use wildseries_core::model::Category;
use wildseries_core::slug::lookup_key;

/// Insert a category. Returns the new ID.
///
/// The lookup key is derived here so that every writer folds case the same
/// way. A name whose key is already taken fails with a unique violation.
pub async fn create_category(pool: &SqlitePool, name: &str) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO category (name, name_key) VALUES (?, ?)")
        .bind(name)
        .bind(lookup_key(name))
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Find a category by its lookup key (see [`lookup_key`]).
pub async fn find_by_name_key(
    pool: &SqlitePool,
    key: &str,
) -> Result<Option<Category>, sqlx::Error> {
    let row: Option<(i64, String)> =
        sqlx::query_as("SELECT id, name FROM category WHERE name_key = ?")
            .bind(key)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(row_to_category))
}

pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>, sqlx::Error> {
    let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM category ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(row_to_category).collect())
}

fn row_to_category((id, name): (i64, String)) -> Category {
    Category { id, name }
}
