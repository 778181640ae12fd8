use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::info;
use wildseries_core::error::ApiError;

use crate::auth::{authenticate, cleared_session_cookie, issue_token, session_cookie};
use crate::error::AppError;
use crate::forms::LoginForm;
use crate::state::AppState;
use crate::views::{self, LoginPage};

/// GET /login
pub async fn login_form() -> Html<String> {
    views::login(&LoginPage {
        username: "",
        error: None,
    })
}

/// POST /login
///
/// On success the token is stored in the session cookie and the browser is
/// sent to the catalog. Bad credentials re-render the form with a 401.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let user = match authenticate(&state.db, &form.username, &form.password).await {
        Ok(user) => user,
        Err(ApiError::Unauthorized(message)) => {
            let page = views::login(&LoginPage {
                username: &form.username,
                error: Some(&message),
            });
            return Ok((StatusCode::UNAUTHORIZED, page).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let token = issue_token(user.id, &user.username, user.role, &state.jwt_secret)?;
    info!(username = %user.username, "signed in");
    Ok(([(SET_COOKIE, session_cookie(&token))], Redirect::to("/wild")).into_response())
}

/// POST /logout
pub async fn logout() -> Response {
    ([(SET_COOKIE, cleared_session_cookie())], Redirect::to("/wild")).into_response()
}
