use sqlx::SqlitePool;

use crate::personnel::{dto::PersonnelFields, repo_types::Personnel};

/// All records owned by `owner_id`, newest first.
pub async fn list_by_owner(db: &SqlitePool, owner_id: i64) -> sqlx::Result<Vec<Personnel>> {
    sqlx::query_as::<_, Personnel>(
        r#"
        SELECT id, name, surname, workstation, service, owner_id
        FROM personnel
        WHERE owner_id = ?1
        ORDER BY id DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(db)
    .await
}

/// Every record, grouped by owner then id. Used by the export.
pub async fn list_all(db: &SqlitePool) -> sqlx::Result<Vec<Personnel>> {
    sqlx::query_as::<_, Personnel>(
        r#"
        SELECT id, name, surname, workstation, service, owner_id
        FROM personnel
        ORDER BY owner_id ASC, id ASC
        "#,
    )
    .fetch_all(db)
    .await
}

/// Unscoped lookup; callers decide between not-found and forbidden.
pub async fn find_by_id(db: &SqlitePool, id: i64) -> sqlx::Result<Option<Personnel>> {
    sqlx::query_as::<_, Personnel>(
        r#"
        SELECT id, name, surname, workstation, service, owner_id
        FROM personnel
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert(
    db: &SqlitePool,
    owner_id: i64,
    fields: &PersonnelFields,
) -> sqlx::Result<Personnel> {
    sqlx::query_as::<_, Personnel>(
        r#"
        INSERT INTO personnel (name, surname, workstation, service, owner_id)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING id, name, surname, workstation, service, owner_id
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.surname)
    .bind(&fields.workstation)
    .bind(&fields.service)
    .bind(owner_id)
    .fetch_one(db)
    .await
}

/// Overwrite the mutable fields. Returns `None` when no row with that id is
/// owned by `owner_id`.
pub async fn update_owned(
    db: &SqlitePool,
    owner_id: i64,
    id: i64,
    fields: &PersonnelFields,
) -> sqlx::Result<Option<Personnel>> {
    sqlx::query_as::<_, Personnel>(
        r#"
        UPDATE personnel
           SET name = ?1, surname = ?2, workstation = ?3, service = ?4
         WHERE id = ?5 AND owner_id = ?6
        RETURNING id, name, surname, workstation, service, owner_id
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.surname)
    .bind(&fields.workstation)
    .bind(&fields.service)
    .bind(id)
    .bind(owner_id)
    .fetch_optional(db)
    .await
}

/// Returns whether a row was removed.
pub async fn delete_owned(db: &SqlitePool, owner_id: i64, id: i64) -> sqlx::Result<bool> {
    let res = sqlx::query("DELETE FROM personnel WHERE id = ?1 AND owner_id = ?2")
        .bind(id)
        .bind(owner_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
