use crate::state::AppState;
use axum::Router;

mod dto;
pub mod errors;
pub mod handlers;
mod profile;
pub mod repo;
pub mod repo_types;
mod services;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(handlers::public_routes())
        .merge(handlers::protected_routes(state))
}
