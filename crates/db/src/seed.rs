//! JSON fixture loader for the pre-seeded part of the catalog.
//!
//! Categories, programs (with their seasons, episodes and cast) and users are
//! only ever created here; the web front-end writes categories and comments
//! and nothing else. Applying the same fixture twice is a no-op: rows whose
//! natural key (category name, program slug, actor name, username) already
//! exists are skipped along with everything nested under them.

use serde::Deserialize;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, info};
use wildseries_core::slug::{lookup_key, slugify};
use wildseries_core::types::UserRole;

use crate::DbError;
use crate::repo::{actors, categories, episodes, programs, seasons, users};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read fixture: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid fixture: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("program {program:?} references unknown category {category:?}")]
    UnknownCategory { program: String, category: String },
}

impl From<sqlx::Error> for SeedError {
    fn from(e: sqlx::Error) -> Self {
        Self::Db(DbError::Sqlx(e))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub programs: Vec<ProgramFixture>,
    #[serde(default)]
    pub users: Vec<UserFixture>,
}

#[derive(Debug, Deserialize)]
pub struct ProgramFixture {
    pub title: String,
    pub category: String,
    pub summary: Option<String>,
    pub poster: Option<String>,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<SeasonFixture>,
}

#[derive(Debug, Deserialize)]
pub struct SeasonFixture {
    pub number: i64,
    pub year: Option<i64>,
    pub description: Option<String>,
    #[serde(default)]
    pub episodes: Vec<EpisodeFixture>,
}

#[derive(Debug, Deserialize)]
pub struct EpisodeFixture {
    pub number: i64,
    pub title: String,
    pub synopsis: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserFixture {
    pub username: String,
    pub password: String,
    #[serde(default = "default_user_role")]
    pub role: UserRole,
}

fn default_user_role() -> UserRole {
    UserRole::User
}

/// Counts of rows created by [`apply`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub programs: usize,
    pub seasons: usize,
    pub episodes: usize,
    pub actors: usize,
    pub users: usize,
}

/// Read and parse a fixture file.
pub async fn load_fixture(path: impl AsRef<Path>) -> Result<Fixture, SeedError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

/// Insert everything in `fixture` that is not already present.
pub async fn apply(pool: &SqlitePool, fixture: &Fixture) -> Result<SeedSummary, SeedError> {
    let mut summary = SeedSummary::default();

    for name in &fixture.categories {
        if categories::find_by_name_key(pool, &lookup_key(name))
            .await?
            .is_none()
        {
            categories::create_category(pool, name).await?;
            summary.categories += 1;
        }
    }

    for program in &fixture.programs {
        seed_program(pool, program, &mut summary).await?;
    }

    for user in &fixture.users {
        if users::find_by_username(pool, &user.username)
            .await?
            .is_none()
        {
            users::create_user(pool, &user.username, &user.password, user.role).await?;
            summary.users += 1;
        }
    }

    info!(
        categories = summary.categories,
        programs = summary.programs,
        seasons = summary.seasons,
        episodes = summary.episodes,
        actors = summary.actors,
        users = summary.users,
        "fixture applied"
    );
    Ok(summary)
}

async fn seed_program(
    pool: &SqlitePool,
    program: &ProgramFixture,
    summary: &mut SeedSummary,
) -> Result<(), SeedError> {
    if programs::find_by_slug(pool, &slugify(&program.title))
        .await?
        .is_some()
    {
        debug!(title = %program.title, "program already present, skipping");
        return Ok(());
    }

    let category = categories::find_by_name_key(pool, &lookup_key(&program.category))
        .await?
        .ok_or_else(|| SeedError::UnknownCategory {
            program: program.title.clone(),
            category: program.category.clone(),
        })?;

    let program_id = programs::create_program(
        pool,
        &program.title,
        program.summary.as_deref(),
        program.poster.as_deref(),
        category.id,
    )
    .await?;
    summary.programs += 1;

    for name in &program.actors {
        let actor_id = match actors::find_by_name(pool, name).await? {
            Some(actor) => actor.id,
            None => {
                summary.actors += 1;
                actors::create_actor(pool, name).await?
            }
        };
        programs::add_actor(pool, program_id, actor_id).await?;
    }

    for season in &program.seasons {
        let season_id = seasons::create_season(
            pool,
            program_id,
            season.number,
            season.year,
            season.description.as_deref(),
        )
        .await?;
        summary.seasons += 1;

        for episode in &season.episodes {
            episodes::create_episode(
                pool,
                season_id,
                episode.number,
                &episode.title,
                episode.synopsis.as_deref(),
            )
            .await?;
            summary.episodes += 1;
        }
    }

    Ok(())
}
