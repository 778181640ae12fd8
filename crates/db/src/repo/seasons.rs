use sqlx::SqlitePool;
use wildseries_core::model::Season;

type SeasonTuple = (i64, i64, i64, Option<i64>, Option<String>);

pub async fn create_season(
    pool: &SqlitePool,
    program_id: i64,
    number: i64,
    year: Option<i64>,
    description: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO season (program_id, number, year, description) VALUES (?, ?, ?, ?)",
    )
    .bind(program_id)
    .bind(number)
    .bind(year)
    .bind(description)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_season(pool: &SqlitePool, id: i64) -> Result<Option<Season>, sqlx::Error> {
    let row: Option<SeasonTuple> = sqlx::query_as(
        "SELECT id, program_id, number, year, description FROM season WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(row_to_season))
}

/// Seasons of a program in season-number order.
pub async fn list_by_program(
    pool: &SqlitePool,
    program_id: i64,
) -> Result<Vec<Season>, sqlx::Error> {
    let rows: Vec<SeasonTuple> = sqlx::query_as(
        "SELECT id, program_id, number, year, description FROM season \
         WHERE program_id = ? ORDER BY number, id",
    )
    .bind(program_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(row_to_season).collect())
}

fn row_to_season(r: SeasonTuple) -> Season {
    Season {
        id: r.0,
        program_id: r.1,
        number: r.2,
        year: r.3,
        description: r.4,
    }
}
