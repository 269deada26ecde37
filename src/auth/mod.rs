use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use extractors::AuthSession;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes())
}
