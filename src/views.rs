use axum::Json;
use serde::Serialize;
use tower_sessions::Session;

use crate::{
    error::AppError,
    flash::{self, Flash},
};

/// JSON view model returned by every GET page.
#[derive(Debug, Serialize)]
pub struct View<T> {
    pub flashes: Vec<Flash>,
    pub data: T,
}

/// Wrap `data` together with the messages queued by the previous request.
pub async fn render<T: Serialize>(session: &Session, data: T) -> Result<Json<View<T>>, AppError> {
    let flashes = flash::take(session).await?;
    Ok(Json(View { flashes, data }))
}

/// Body of pages that carry nothing but their name (forms, home).
#[derive(Debug, Serialize)]
pub struct Page {
    pub page: &'static str,
}
