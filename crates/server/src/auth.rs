use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use wildseries_core::error::ApiError;
use wildseries_core::types::UserRole;
use wildseries_db::repo::users::{self, UserRow};

use crate::error::AppError;
use crate::state::AppState;

/// Cookie carrying the session token for browser form posts.
pub const AUTH_COOKIE: &str = "wildseries_token";

const TOKEN_TTL_HOURS: i64 = 24;

/// JWT claims payload.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user ID
    pub username: String,
    pub role: String,
    pub exp: usize,
}

/// Issue a JWT token for a user.
pub fn issue_token(
    user_id: i64,
    username: &str,
    role: UserRole,
    secret: &str,
) -> Result<String, ApiError> {
    let exp = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| ApiError::Internal("time overflow".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role: role.as_str().to_string(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("token encoding failed: {e}")))
}

/// Validate a JWT token and return claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| ApiError::Unauthorized(format!("invalid token: {e}")))?;

    Ok(data.claims)
}

/// Check a username and password against the user table.
pub async fn authenticate(
    db: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<UserRow, ApiError> {
    let user = users::find_by_username(db, username)
        .await
        .map_err(|e| ApiError::Internal(format!("db error: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("invalid credentials".into()))?;

    let valid = users::verify_password(password, &user.password_hash)
        .map_err(|e| ApiError::Internal(format!("hash error: {e}")))?;
    if !valid {
        tracing::warn!(username, "failed login attempt");
        return Err(ApiError::Unauthorized("invalid credentials".into()));
    }
    Ok(user)
}

/// `Set-Cookie` value storing `token` for the lifetime of the token.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{AUTH_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        TOKEN_TTL_HOURS * 3600
    )
}

/// `Set-Cookie` value that removes the session cookie.
pub fn cleared_session_cookie() -> String {
    format!("{AUTH_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Token from the `Authorization: Bearer` header, or failing that from the
/// session cookie. A present but malformed header is not retried as a cookie.
fn request_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        return value
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Unauthorized("invalid authorization scheme".into()));
    }
    cookie_token(headers).ok_or_else(|| ApiError::Unauthorized("missing credentials".into()))
}

fn cookie_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .map(|(_, token)| token)
}

/// Authenticated principal.
///
/// The token's subject must still exist; role and username are read from the
/// user table rather than trusted from the token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = request_token(&parts.headers)?;
        let claims = validate_token(token, &state.jwt_secret)?;
        let user_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| ApiError::Unauthorized("invalid token subject".into()))?;

        let user = users::find_by_id(&state.db, user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("unknown user".into()))?;

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
            role: user.role,
        })
    }
}

/// Admin-only extractor. Rejects non-admin users with 403.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user_id: i64,
    pub username: String,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != UserRole::Admin {
            return Err(ApiError::Forbidden("admin access required".into()).into());
        }
        Ok(AdminUser {
            user_id: user.user_id,
            username: user.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_validates_with_same_secret() {
        let token = issue_token(7, "alice", UserRole::User, "secret").unwrap();
        let claims = validate_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, "user");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token(7, "alice", UserRole::User, "secret").unwrap();
        let err = validate_token(&token, "other").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    fn headers(pairs: &[(axum::http::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), value.parse().unwrap());
        }
        map
    }

    #[test]
    fn token_is_read_from_session_cookie() {
        let map = headers(&[(COOKIE, "theme=dark; wildseries_token=abc.def; lang=fr")]);
        assert_eq!(request_token(&map).unwrap(), "abc.def");
    }

    #[test]
    fn bearer_header_takes_precedence_over_cookie() {
        let map = headers(&[
            (AUTHORIZATION, "Bearer from-header"),
            (COOKIE, "wildseries_token=from-cookie"),
        ]);
        assert_eq!(request_token(&map).unwrap(), "from-header");

        let map = headers(&[
            (AUTHORIZATION, "Basic Zm9vOmJhcg=="),
            (COOKIE, "wildseries_token=from-cookie"),
        ]);
        assert!(request_token(&map).is_err());
    }

    #[test]
    fn missing_credentials_are_unauthorized() {
        let map = headers(&[(COOKIE, "theme=dark")]);
        assert!(matches!(request_token(&map), Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn session_cookie_is_http_only() {
        let cookie = session_cookie("abc");
        assert!(cookie.starts_with("wildseries_token=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cleared_session_cookie().contains("Max-Age=0"));
    }
}
