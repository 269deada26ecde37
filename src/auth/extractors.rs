use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::{error, warn};

use crate::{
    auth::repo_types::User,
    error::AppError,
    flash::{self, Level},
    state::AppState,
};

pub(crate) const SESSION_USER_KEY: &str = "user_id";

/// Proof of a successful login for the current request.
///
/// Registry operations take this by value; they never look the user up
/// themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: i64,
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let user_id = session
            .get::<i64>(SESSION_USER_KEY)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        let Some(user_id) = user_id else {
            return Err(login_required(&session).await);
        };

        // The account behind a session may be gone (e.g. database reset).
        match User::find_by_id(&state.db, user_id).await {
            Ok(Some(_)) => {
                tracing::Span::current().record("user_id", user_id);
                Ok(AuthSession { user_id })
            }
            Ok(None) => {
                warn!(user_id, "session references unknown user");
                if let Err(e) = session.flush().await {
                    error!(error = %e, "flush stale session failed");
                }
                Err(login_required(&session).await)
            }
            Err(e) => Err(AppError::from(e).into_response()),
        }
    }
}

async fn login_required(session: &Session) -> Response {
    flash::redirect(
        session,
        Level::Info,
        "Please log in to access this page.",
        "/login",
    )
    .await
}
