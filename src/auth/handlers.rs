use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    auth::{
        dto::{LoginForm, RegisterForm},
        extractors::AuthSession,
        services,
    },
    error::AppError,
    flash::{self, Level},
    state::AppState,
    views::{render, Page, View},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
        .route("/logout", get(logout))
}

pub async fn login_page(session: Session) -> Result<Json<View<Page>>, AppError> {
    render(&session, Page { page: "login" }).await
}

pub async fn register_page(session: Session) -> Result<Json<View<Page>>, AppError> {
    render(&session, Page { page: "register" }).await
}

#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    match services::register(&state.db, &form.name, &form.email, &form.password).await {
        Ok(_) => {
            flash::redirect(
                &session,
                Level::Success,
                "Registration successful! You can now log in.",
                "/login",
            )
            .await
        }
        Err(e) => flash::recover(&session, e, "/register").await,
    }
}

#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match services::login(&state.db, &session, &form.email, &form.password).await {
        Ok(_) => Redirect::to("/dashboard").into_response(),
        Err(e) => flash::recover(&session, e, "/login").await,
    }
}

#[instrument(skip(session))]
pub async fn logout(session: Session, auth: AuthSession) -> Response {
    match services::logout(&session, auth).await {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) => e.into_response(),
    }
}
