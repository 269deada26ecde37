use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    auth::AuthSession,
    error::AppError,
    flash::{self, Level},
    personnel::{
        dto::{EditPersonnelView, PersonnelForm, PersonnelListView},
        services,
    },
    state::AppState,
    views::{render, Page, View},
};

pub fn personnel_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route(
            "/dashboard/add_personnel",
            get(add_personnel_page).post(add_personnel),
        )
        .route("/dashboard/personnel_list", get(personnel_list))
        .route(
            "/dashboard/edit_personnel/{id}",
            get(edit_personnel_page).post(edit_personnel),
        )
        .route("/delete/personnel/{id}", post(delete_personnel))
}

#[instrument(skip(state, session))]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
    auth: AuthSession,
) -> Result<Json<View<PersonnelListView>>, AppError> {
    list_view(&state, &session, auth).await
}

#[instrument(skip(state, session))]
pub async fn personnel_list(
    State(state): State<AppState>,
    session: Session,
    auth: AuthSession,
) -> Result<Json<View<PersonnelListView>>, AppError> {
    list_view(&state, &session, auth).await
}

async fn list_view(
    state: &AppState,
    session: &Session,
    auth: AuthSession,
) -> Result<Json<View<PersonnelListView>>, AppError> {
    let personnel = services::list(&state.db, auth)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    render(session, PersonnelListView { personnel }).await
}

pub async fn add_personnel_page(
    session: Session,
    _auth: AuthSession,
) -> Result<Json<View<Page>>, AppError> {
    render(&session, Page { page: "add_personnel" }).await
}

#[instrument(skip(state, session, form))]
pub async fn add_personnel(
    State(state): State<AppState>,
    session: Session,
    auth: AuthSession,
    Form(form): Form<PersonnelForm>,
) -> Response {
    match services::create(&state.db, auth, form).await {
        Ok(_) => {
            flash::redirect(
                &session,
                Level::Success,
                "Personnel added successfully!",
                "/dashboard",
            )
            .await
        }
        Err(e) => flash::recover(&session, e, "/dashboard/add_personnel").await,
    }
}

#[instrument(skip(state, session))]
pub async fn edit_personnel_page(
    State(state): State<AppState>,
    session: Session,
    auth: AuthSession,
    Path(id): Path<i64>,
) -> Response {
    let personnel = match services::get_for_edit(&state.db, auth, id).await {
        Ok(p) => p,
        Err(e) => return flash::recover(&session, e, "/dashboard").await,
    };
    let view = EditPersonnelView {
        personnel: personnel.into(),
    };
    render(&session, view).await.into_response()
}

#[instrument(skip(state, session, form))]
pub async fn edit_personnel(
    State(state): State<AppState>,
    session: Session,
    auth: AuthSession,
    Path(id): Path<i64>,
    Form(form): Form<PersonnelForm>,
) -> Response {
    match services::update(&state.db, auth, id, form).await {
        Ok(_) => {
            flash::redirect(
                &session,
                Level::Success,
                "Personnel details updated.",
                "/dashboard",
            )
            .await
        }
        Err(e @ AppError::Validation(_)) => {
            let back = format!("/dashboard/edit_personnel/{}", id);
            flash::recover(&session, e, &back).await
        }
        Err(e) => flash::recover(&session, e, "/dashboard").await,
    }
}

#[instrument(skip(state, session))]
pub async fn delete_personnel(
    State(state): State<AppState>,
    session: Session,
    auth: AuthSession,
    Path(id): Path<i64>,
) -> Response {
    match services::delete(&state.db, auth, id).await {
        Ok(()) => {
            flash::redirect(
                &session,
                Level::Success,
                "Personnel deleted successfully!",
                "/dashboard",
            )
            .await
        }
        Err(e) => flash::recover(&session, e, "/dashboard").await,
    }
}
