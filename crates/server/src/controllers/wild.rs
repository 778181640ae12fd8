use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::{debug, info};
use wildseries_core::error::ApiError;
use wildseries_core::model::{Episode, Program, Season};
use wildseries_core::slug::{lookup_key, slug_to_title};
use wildseries_db::repo::{actors, categories, comments, episodes, programs, seasons};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::extract::SlugParam;
use crate::forms::{CommentForm, SearchForm, validate_comment};
use crate::routes::episode_path;
use crate::state::AppState;
use crate::views::{
    self, ActorPage, CategoryPage, EpisodePage, IndexPage, ProgramPage, SeasonPage, ShowPage,
};

/// Number of programs listed on a category page.
pub const RECENT_PROGRAMS_LIMIT: i64 = 3;

const NO_PROGRAM: &str = "No program found in program's table.";

/// GET /wild
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let all = all_programs(&state).await?;
    render_index(&state, &all, None).await
}

/// POST /wild
///
/// Filters on exact title equality, not substring. The catalog must still be
/// non-empty even when the search matches nothing.
pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, AppError> {
    all_programs(&state).await?;

    let term = form.search_field.trim();
    let found = programs::find_by_title(&state.db, term).await?;
    debug!(term, matches = found.len(), "program search");
    render_index(&state, &found, Some(term)).await
}

async fn all_programs(state: &AppState) -> Result<Vec<Program>, AppError> {
    let all = programs::list_programs(&state.db).await?;
    if all.is_empty() {
        return Err(ApiError::NotFound(NO_PROGRAM.into()).into());
    }
    Ok(all)
}

async fn render_index(
    state: &AppState,
    listed: &[Program],
    search: Option<&str>,
) -> Result<Html<String>, AppError> {
    let all_categories = categories::list_categories(&state.db).await?;
    Ok(views::wild_index(&IndexPage {
        programs: listed,
        categories: &all_categories,
        search,
    }))
}

/// GET /wild/show/{slug}
pub async fn show(
    State(state): State<AppState>,
    SlugParam(slug): SlugParam,
) -> Result<Html<String>, AppError> {
    let program = programs::find_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No program with slug {slug} found in program's table."))
        })?;
    let program_seasons = seasons::list_by_program(&state.db, program.id).await?;
    let cast = actors::list_by_program(&state.db, program.id).await?;

    Ok(views::wild_show(&ShowPage {
        program: &program,
        seasons: &program_seasons,
        actors: &cast,
    }))
}

/// GET /wild/category/{categoryName}
pub async fn show_by_category(
    State(state): State<AppState>,
    SlugParam(category_name): SlugParam,
) -> Result<Html<String>, AppError> {
    let name = slug_to_title(&category_name).ok_or_else(|| {
        ApiError::NotFound(
            "No category has been sent to find a category in category's table.".into(),
        )
    })?;

    let category = categories::find_by_name_key(&state.db, &lookup_key(&name))
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No category {name} found in category's table."))
        })?;

    let recent =
        programs::list_recent_by_category(&state.db, category.id, RECENT_PROGRAMS_LIMIT).await?;
    if recent.is_empty() {
        return Err(ApiError::NotFound(NO_PROGRAM.into()).into());
    }

    Ok(views::wild_category(&CategoryPage {
        category: &category,
        programs: &recent,
    }))
}

/// GET /wild/program/{slug}
pub async fn show_by_program(
    State(state): State<AppState>,
    SlugParam(slug): SlugParam,
) -> Result<Html<String>, AppError> {
    let title = slug_to_title(&slug).ok_or_else(|| {
        ApiError::NotFound("No slug has been sent to find a program in program's table.".into())
    })?;

    let program = programs::find_by_title_key(&state.db, &lookup_key(&title))
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No program with {title} title, found in program's table."))
        })?;
    let program_seasons = seasons::list_by_program(&state.db, program.id).await?;
    let cast = actors::list_by_program(&state.db, program.id).await?;

    Ok(views::wild_program(&ProgramPage {
        slug: &title,
        program: &program,
        seasons: &program_seasons,
        actors: &cast,
    }))
}

/// GET /wild/program/season/{id}
pub async fn show_by_season(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    if id == 0 {
        return Err(ApiError::NotFound(
            "No id has been sent to find a season in season's table.".into(),
        )
        .into());
    }

    let season = seasons::get_season(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No season with id {id} found in season's table.")))?;
    let program = parent_program(&state, &season).await?;
    let season_episodes = episodes::list_by_season(&state.db, season.id).await?;

    Ok(views::wild_season(&SeasonPage {
        season: &season,
        program: &program,
        episodes: &season_episodes,
    }))
}

/// Episode resolved from its route together with its season and program.
struct EpisodeContext {
    program: Program,
    season: Season,
    episode: Episode,
}

/// Resolve `/wild/program/{program}/season/{season}/episode/{episode}`.
///
/// The episode must belong to the season and the season to the program;
/// any mismatch is reported as a missing episode.
async fn load_episode(
    state: &AppState,
    (program_id, season_id, episode_id): (i64, i64, i64),
) -> Result<EpisodeContext, AppError> {
    let missing = || {
        ApiError::NotFound(format!(
            "No episode {episode_id} in season {season_id} of program {program_id}."
        ))
    };

    let episode = episodes::get_episode(&state.db, episode_id)
        .await?
        .ok_or_else(missing)?;
    if episode.season_id != season_id {
        return Err(missing().into());
    }

    let season = seasons::get_season(&state.db, episode.season_id)
        .await?
        .ok_or_else(missing)?;
    if season.program_id != program_id {
        return Err(missing().into());
    }

    let program = parent_program(state, &season).await?;
    Ok(EpisodeContext {
        program,
        season,
        episode,
    })
}

async fn parent_program(state: &AppState, season: &Season) -> Result<Program, AppError> {
    let program = programs::get_program(&state.db, season.program_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No program with id {} found in program's table.",
                season.program_id
            ))
        })?;
    Ok(program)
}

async fn render_episode(
    state: &AppState,
    ctx: &EpisodeContext,
    form: &CommentForm,
    errors: Option<&serde_json::Value>,
) -> Result<Html<String>, AppError> {
    let listed = comments::list_by_episode(&state.db, ctx.episode.id).await?;
    Ok(views::wild_episode(&EpisodePage {
        season: &ctx.season,
        program: &ctx.program,
        episode: &ctx.episode,
        comments: &listed,
        form,
        errors,
    }))
}

/// GET /wild/program/{program}/season/{season}/episode/{episode}
pub async fn show_episode(
    State(state): State<AppState>,
    Path(ids): Path<(i64, i64, i64)>,
) -> Result<Html<String>, AppError> {
    let ctx = load_episode(&state, ids).await?;
    render_episode(&state, &ctx, &CommentForm::default(), None).await
}

/// POST /wild/program/{program}/season/{season}/episode/{episode}
///
/// A valid comment is stored and answered with a redirect to the episode
/// page, so refreshing does not post it again. An invalid one re-renders the
/// page with the submitted text and its errors.
pub async fn post_comment(
    State(state): State<AppState>,
    Path(ids): Path<(i64, i64, i64)>,
    user: AuthUser,
    Form(form): Form<CommentForm>,
) -> Result<Response, AppError> {
    let ctx = load_episode(&state, ids).await?;
    let form = form.normalized();

    if let Some(errors) = validate_comment(&form) {
        debug!(episode_id = ctx.episode.id, "rejected invalid comment");
        return Ok(render_episode(&state, &ctx, &form, Some(&errors))
            .await?
            .into_response());
    }

    let comment_id =
        comments::create_comment(&state.db, ctx.episode.id, user.user_id, &form.comment).await?;
    info!(
        comment_id,
        episode_id = ctx.episode.id,
        author = %user.username,
        "comment added"
    );

    Ok(Redirect::to(&episode_path(ctx.program.id, ctx.season.id, ctx.episode.id)).into_response())
}

/// GET /wild/actor/{name}
pub async fn show_actor(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>, AppError> {
    let actor = actors::find_by_name(&state.db, &name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No actor named {name} found in actor's table.")))?;
    let filmography = programs::list_by_actor(&state.db, actor.id).await?;

    Ok(views::wild_actor(&ActorPage {
        actor: &actor,
        programs: &filmography,
    }))
}
