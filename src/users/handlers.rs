use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header::SET_COOKIE,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{LoginRequest, PublicUser, RegisterRequest},
    errors::UserError,
    profile::UserProfile,
    repo_types::User,
    services::{login_user, register_user},
};
use crate::{
    auth::{
        middleware::{authorize, ACCESS_TOKEN_COOKIE},
        Identity, JwtKeys,
    },
    response::Envelope,
    state::AppState,
};

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
}

/// Routes behind the access token cookie gate.
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/me", get(get_me))
        .route("/users/:user_id", get(get_user))
        .route_layer(middleware::from_fn_with_state(state, authorize))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Envelope<Vec<User>>, UserError> {
    let users = state.users.find_all().await?;
    debug!(caller = %identity.id, role = %identity.role, count = users.len(), "users listed");
    Ok(Envelope::success("Fetching users successfully!", users))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Envelope<UserProfile>, UserError> {
    let id = Uuid::parse_str(&user_id).map_err(|_| {
        warn!(%user_id, "malformed user id");
        UserError::ProfileUnavailable
    })?;
    load_profile(&state, id).await
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Envelope<UserProfile>, UserError> {
    load_profile(&state, identity.id).await
}

async fn load_profile(state: &AppState, id: Uuid) -> Result<Envelope<UserProfile>, UserError> {
    let user = match state.users.find_by_id(id).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(user_id = %id, "user not found");
            return Err(UserError::ProfileUnavailable);
        }
        Err(e) => {
            warn!(error = %e, user_id = %id, "find user failed");
            return Err(UserError::ProfileUnavailable);
        }
    };
    let profile = UserProfile::from_record(user, OffsetDateTime::now_utc()).map_err(|e| {
        warn!(user_id = %id, "stored user has no gender");
        e
    })?;
    Ok(Envelope::success("Fetching user by Id successfully!", profile))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Envelope<User>, UserError> {
    let Json(payload) = payload.map_err(|e| {
        warn!(error = %e, "unreadable register body");
        UserError::MissingFields
    })?;
    let user = register_user(state.users.as_ref(), payload, OffsetDateTime::now_utc()).await?;
    Ok(Envelope::success("Register success!", user))
}

#[instrument(skip(state, keys, payload))]
pub async fn login(
    State(state): State<AppState>,
    State(keys): State<JwtKeys>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, UserError> {
    let Json(payload) = payload.map_err(|_| UserError::MissingFields)?;
    let (user, token) = login_user(state.users.as_ref(), &keys, payload).await?;

    let cookie = format!(
        "{ACCESS_TOKEN_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        keys.ttl.as_secs()
    );
    Ok((
        [(SET_COOKIE, cookie)],
        Envelope::success(
            "Login success!",
            PublicUser {
                id: user.id,
                username: user.username,
                email: user.email,
            },
        ),
    ))
}
