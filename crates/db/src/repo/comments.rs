use sqlx::SqlitePool;
use wildseries_core::model::{Comment, CommentWithAuthor};

/// Insert a comment on an episode. Returns the new ID.
pub async fn create_comment(
    pool: &SqlitePool,
    episode_id: i64,
    author_id: i64,
    comment: &str,
) -> Result<i64, sqlx::Error> {
    let now = chrono::Utc::now().timestamp();
    let result = sqlx::query(
        "INSERT INTO comment (episode_id, author_id, comment, created_ts) VALUES (?, ?, ?, ?)",
    )
    .bind(episode_id)
    .bind(author_id)
    .bind(comment)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Comments on an episode, oldest first, with their author's username.
pub async fn list_by_episode(
    pool: &SqlitePool,
    episode_id: i64,
) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
    let rows: Vec<(i64, i64, i64, String, i64, String)> = sqlx::query_as(
        "SELECT c.id, c.episode_id, c.author_id, c.comment, c.created_ts, u.username \
         FROM comment c JOIN user u ON u.id = c.author_id \
         WHERE c.episode_id = ? ORDER BY c.created_ts, c.id",
    )
    .bind(episode_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| CommentWithAuthor {
            comment: Comment {
                id: r.0,
                episode_id: r.1,
                author_id: r.2,
                comment: r.3,
                created_ts: r.4,
            },
            author: r.5,
        })
        .collect())
}
