use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use wildseries_core::error::ApiError;
use wildseries_core::model::Program;
use wildseries_core::slug::resolvable_slug;
use wildseries_core::types::UserRole;

use crate::auth::{authenticate, issue_token, session_cookie};
use crate::controllers::{category, session, wild};
use crate::error::JsonError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(auth_login))
        .route("/login", get(session::login_form).post(session::login))
        .route("/logout", post(session::logout))
        .route("/category", get(category::add_form).post(category::add))
        .merge(wild_router())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

fn wild_router() -> Router<AppState> {
    Router::new()
        .route("/wild", get(wild::index).post(wild::search))
        .route("/wild/show/{slug}", get(wild::show))
        .route("/wild/category/{category_name}", get(wild::show_by_category))
        .route("/wild/program/{program}", get(wild::show_by_program))
        .route("/wild/program/season/{id}", get(wild::show_by_season))
        .route(
            "/wild/program/{program}/season/{season}/episode/{episode}",
            get(wild::show_episode).post(wild::post_comment),
        )
        .route("/wild/actor/{name}", get(wild::show_actor))
}

// ---------------------------------------------------------------------------
// Canonical page paths
// ---------------------------------------------------------------------------

pub fn program_path(program: &Program) -> String {
    format!("/wild/show/{}", program.slug)
}

/// `None` when the category route cannot resolve `name` from any slug.
pub fn category_path(name: &str) -> Option<String> {
    resolvable_slug(name).map(|slug| format!("/wild/category/{slug}"))
}

pub fn season_path(season_id: i64) -> String {
    format!("/wild/program/season/{season_id}")
}

pub fn episode_path(program_id: i64, season_id: i64, episode_id: i64) -> String {
    format!("/wild/program/{program_id}/season/{season_id}/episode/{episode_id}")
}

pub fn actor_path(name: &str) -> String {
    format!("/wild/actor/{}", utf8_percent_encode(name, NON_ALPHANUMERIC))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, JsonError> {
    sqlx::query("SELECT 1")
        .execute(&state.db)
        .await
        .map_err(|e| ApiError::Internal(format!("database check failed: {e}")))?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    token: String,
    user_id: i64,
    username: String,
    role: UserRole,
}

/// Answers the token in the body and also sets it as the session cookie, so
/// the HTML forms work for clients that signed in here.
async fn auth_login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, JsonError> {
    let user = authenticate(&state.db, &body.username, &body.password).await?;
    let token = issue_token(user.id, &user.username, user.role, &state.jwt_secret)?;
    let cookie = session_cookie(&token);

    let response = LoginResponse {
        token,
        user_id: user.id,
        username: user.username,
        role: user.role,
    };
    Ok(([(SET_COOKIE, cookie)], Json(response)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_path_uses_slug_of_name() {
        assert_eq!(
            category_path("Science Fiction").as_deref(),
            Some("/wild/category/science-fiction")
        );
        assert_eq!(category_path("Comédie"), None);
    }

    #[test]
    fn episode_path_embeds_all_three_ids() {
        assert_eq!(episode_path(1, 2, 3), "/wild/program/1/season/2/episode/3");
    }
}
