//! One-shot messages carried in the session from a POST to the next view.

use axum::response::{IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::error;

use crate::error::AppError;

const FLASH_KEY: &str = "_flashes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

pub async fn push(
    session: &Session,
    level: Level,
    message: impl Into<String>,
) -> Result<(), AppError> {
    let mut flashes = session
        .get::<Vec<Flash>>(FLASH_KEY)
        .await?
        .unwrap_or_default();
    flashes.push(Flash {
        level,
        message: message.into(),
    });
    session.insert(FLASH_KEY, flashes).await?;
    Ok(())
}

/// Remove and return all pending messages.
pub async fn take(session: &Session) -> Result<Vec<Flash>, AppError> {
    Ok(session
        .remove::<Vec<Flash>>(FLASH_KEY)
        .await?
        .unwrap_or_default())
}

/// Queue a message and answer with `303 See Other`.
///
/// A failing session store loses the message but not the redirect.
pub async fn redirect(
    session: &Session,
    level: Level,
    message: impl Into<String>,
    to: &str,
) -> Response {
    if let Err(e) = push(session, level, message).await {
        error!(error = %e, "store flash message failed");
    }
    Redirect::to(to).into_response()
}

/// Turn a domain failure into a danger flash plus redirect. Internal errors
/// are not recoverable here and become a logged 500.
pub async fn recover(session: &Session, err: AppError, to: &str) -> Response {
    match err {
        AppError::Internal(_) => err.into_response(),
        err => redirect(session, Level::Danger, err.to_string(), to).await,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{header, StatusCode};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn messages_are_consumed_once_in_order() {
        let session = session();
        push(&session, Level::Success, "first").await.unwrap();
        push(&session, Level::Danger, "second").await.unwrap();

        let flashes = take(&session).await.unwrap();
        assert_eq!(
            flashes,
            vec![
                Flash {
                    level: Level::Success,
                    message: "first".into()
                },
                Flash {
                    level: Level::Danger,
                    message: "second".into()
                },
            ]
        );
        assert!(take(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn redirect_is_see_other() {
        let session = session();
        let res = redirect(&session, Level::Info, "hello", "/login").await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/login");
        assert_eq!(take(&session).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn recover_flashes_domain_errors_only() {
        let session = session();
        let res = recover(&session, AppError::Forbidden, "/dashboard").await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let flashes = take(&session).await.unwrap();
        assert_eq!(flashes[0].level, Level::Danger);
        assert_eq!(flashes[0].message, AppError::Forbidden.to_string());

        let res = recover(
            &session,
            AppError::Internal(anyhow::anyhow!("boom")),
            "/dashboard",
        )
        .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(take(&session).await.unwrap().is_empty());
    }

    #[test]
    fn levels_serialize_lowercase() {
        let json = serde_json::to_string(&Flash {
            level: Level::Danger,
            message: "x".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"level":"danger","message":"x"}"#);
    }
}
