use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::{
    auth::AuthSession,
    error::AppError,
    personnel::{dto::PersonnelForm, repo, repo_types::Personnel},
};

/// The session user's records, newest first.
pub async fn list(db: &SqlitePool, auth: AuthSession) -> Result<Vec<Personnel>, AppError> {
    Ok(repo::list_by_owner(db, auth.user_id).await?)
}

pub async fn create(
    db: &SqlitePool,
    auth: AuthSession,
    form: PersonnelForm,
) -> Result<Personnel, AppError> {
    let fields = form.validate()?;
    let personnel = repo::insert(db, auth.user_id, &fields).await?;
    info!(user_id = auth.user_id, personnel_id = personnel.id, "personnel created");
    Ok(personnel)
}

/// Load a record the session user owns.
pub async fn get_for_edit(
    db: &SqlitePool,
    auth: AuthSession,
    id: i64,
) -> Result<Personnel, AppError> {
    let Some(personnel) = repo::find_by_id(db, id).await? else {
        return Err(AppError::NotFound);
    };
    if personnel.owner_id != auth.user_id {
        warn!(
            user_id = auth.user_id,
            personnel_id = id,
            owner_id = personnel.owner_id,
            "access to foreign personnel denied"
        );
        return Err(AppError::Forbidden);
    }
    Ok(personnel)
}

/// Last write wins between concurrent edits of the same record.
pub async fn update(
    db: &SqlitePool,
    auth: AuthSession,
    id: i64,
    form: PersonnelForm,
) -> Result<Personnel, AppError> {
    get_for_edit(db, auth, id).await?;
    let fields = form.validate()?;

    // Deleted between the check and the write.
    let Some(personnel) = repo::update_owned(db, auth.user_id, id, &fields).await? else {
        return Err(AppError::NotFound);
    };
    info!(user_id = auth.user_id, personnel_id = id, "personnel updated");
    Ok(personnel)
}

pub async fn delete(db: &SqlitePool, auth: AuthSession, id: i64) -> Result<(), AppError> {
    get_for_edit(db, auth, id).await?;
    if !repo::delete_owned(db, auth.user_id, id).await? {
        return Err(AppError::NotFound);
    }
    info!(user_id = auth.user_id, personnel_id = id, "personnel deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::services::register, state::AppState};

    async fn user(state: &AppState, email: &str) -> AuthSession {
        let u = register(&state.db, "Tester", email, "password-123")
            .await
            .unwrap();
        AuthSession { user_id: u.id }
    }

    fn form(name: &str) -> PersonnelForm {
        PersonnelForm {
            name: name.into(),
            surname: "Hopper".into(),
            workstation: "WS-7".into(),
            service: "Compilers".into(),
        }
    }

    #[tokio::test]
    async fn create_sets_owner_from_session() {
        let state = AppState::in_memory().await.unwrap();
        let alice = user(&state, "alice@example.com").await;

        let p = create(&state.db, alice, form("Grace")).await.unwrap();
        assert_eq!(p.owner_id, alice.user_id);
        assert_eq!(p.name, "Grace");
    }

    #[tokio::test]
    async fn create_then_list_then_delete() {
        let state = AppState::in_memory().await.unwrap();
        let alice = user(&state, "alice@example.com").await;

        let created = create(&state.db, alice, form("Grace")).await.unwrap();
        let listed = list(&state.db, alice).await.unwrap();
        assert_eq!(listed, vec![created.clone()]);

        delete(&state.db, alice, created.id).await.unwrap();
        assert!(list(&state.db, alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_scoped_and_newest_first() {
        let state = AppState::in_memory().await.unwrap();
        let alice = user(&state, "alice@example.com").await;
        let bob = user(&state, "bob@example.com").await;

        let a1 = create(&state.db, alice, form("A1")).await.unwrap();
        create(&state.db, bob, form("B1")).await.unwrap();
        let a2 = create(&state.db, alice, form("A2")).await.unwrap();

        let ids: Vec<i64> = list(&state.db, alice)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![a2.id, a1.id]);
    }

    #[tokio::test]
    async fn create_rejects_blank_fields() {
        let state = AppState::in_memory().await.unwrap();
        let alice = user(&state, "alice@example.com").await;

        let err = create(&state.db, alice, form("  ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(list(&state.db, alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn foreign_record_is_forbidden_and_untouched() {
        let state = AppState::in_memory().await.unwrap();
        let alice = user(&state, "alice@example.com").await;
        let mallory = user(&state, "mallory@example.com").await;
        let record = create(&state.db, alice, form("Grace")).await.unwrap();

        let err = get_for_edit(&state.db, mallory, record.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        let err = update(&state.db, mallory, record.id, form("Hacked"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        let err = delete(&state.db, mallory, record.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        let stored = repo::find_by_id(&state.db, record.id).await.unwrap();
        assert_eq!(stored, Some(record));
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let state = AppState::in_memory().await.unwrap();
        let alice = user(&state, "alice@example.com").await;

        assert!(matches!(
            get_for_edit(&state.db, alice, 999).await.unwrap_err(),
            AppError::NotFound
        ));
        assert!(matches!(
            update(&state.db, alice, 999, form("x")).await.unwrap_err(),
            AppError::NotFound
        ));
        assert!(matches!(
            delete(&state.db, alice, 999).await.unwrap_err(),
            AppError::NotFound
        ));
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_owner() {
        let state = AppState::in_memory().await.unwrap();
        let alice = user(&state, "alice@example.com").await;
        let record = create(&state.db, alice, form("Grace")).await.unwrap();

        let updated = update(
            &state.db,
            alice,
            record.id,
            PersonnelForm {
                name: "Ada".into(),
                surname: "Lovelace".into(),
                workstation: "WS-1".into(),
                service: "Analytics".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.id, record.id);
        assert_eq!(updated.owner_id, alice.user_id);
        assert_eq!(updated.surname, "Lovelace");
        assert_eq!(
            get_for_edit(&state.db, alice, record.id).await.unwrap(),
            updated
        );
    }

    #[tokio::test]
    async fn invalid_update_leaves_record_unchanged() {
        let state = AppState::in_memory().await.unwrap();
        let alice = user(&state, "alice@example.com").await;
        let record = create(&state.db, alice, form("Grace")).await.unwrap();

        let err = update(&state.db, alice, record.id, form(""))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(
            get_for_edit(&state.db, alice, record.id).await.unwrap(),
            record
        );
    }
}
