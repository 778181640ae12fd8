use sqlx::SqlitePool;
use wildseries_core::model::Episode;

type EpisodeTuple = (i64, i64, i64, String, Option<String>);

pub async fn create_episode(
    pool: &SqlitePool,
    season_id: i64,
    number: i64,
    title: &str,
    synopsis: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO episode (season_id, number, title, synopsis) VALUES (?, ?, ?, ?)",
    )
    .bind(season_id)
    .bind(number)
    .bind(title)
    .bind(synopsis)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_episode(pool: &SqlitePool, id: i64) -> Result<Option<Episode>, sqlx::Error> {
    let row: Option<EpisodeTuple> = sqlx::query_as(
        "SELECT id, season_id, number, title, synopsis FROM episode WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(row_to_episode))
}

/// Episodes of a season in episode-number order.
pub async fn list_by_season(
    pool: &SqlitePool,
    season_id: i64,
) -> Result<Vec<Episode>, sqlx::Error> {
    let rows: Vec<EpisodeTuple> = sqlx::query_as(
        "SELECT id, season_id, number, title, synopsis FROM episode \
         WHERE season_id = ? ORDER BY number, id",
    )
    .bind(season_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(row_to_episode).collect())
}

fn row_to_episode(r: EpisodeTuple) -> Episode {
    Episode {
        id: r.0,
        season_id: r.1,
        number: r.2,
        title: r.3,
        synopsis: r.4,
    }
}
