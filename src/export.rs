//! Offline snapshot of every user and their personnel as one JSON document.

use std::{collections::BTreeMap, io::Write, path::Path};

use anyhow::Context;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::{auth::repo_types::User, personnel};

pub const DEFAULT_OUTPUT: &str = "users_and_personnel.json";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ExportedPersonnel {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub workstation: String,
    pub service: String,
}

/// One user with the personnel they own. Credentials are never included.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ExportedUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub personnels: Vec<ExportedPersonnel>,
}

/// Load users and personnel with two queries and join them in memory.
pub async fn collect(db: &SqlitePool) -> anyhow::Result<Vec<ExportedUser>> {
    let users = User::list_all(db).await.context("load users")?;
    let records = personnel::repo::list_all(db)
        .await
        .context("load personnel")?;

    let mut by_owner: BTreeMap<i64, Vec<ExportedPersonnel>> = BTreeMap::new();
    for p in records {
        by_owner.entry(p.owner_id).or_default().push(ExportedPersonnel {
            id: p.id,
            name: p.name,
            surname: p.surname,
            workstation: p.workstation,
            service: p.service,
        });
    }

    Ok(users
        .into_iter()
        .map(|u| ExportedUser {
            personnels: by_owner.remove(&u.id).unwrap_or_default(),
            id: u.id,
            name: u.name,
            email: u.email,
        })
        .collect())
}

/// Pretty-print with four-space indentation; non-ASCII text is written as-is.
pub fn write_json<W: Write>(writer: W, users: &[ExportedUser]) -> anyhow::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    users.serialize(&mut ser).context("serialize export")?;
    Ok(())
}

/// Write the full snapshot to `path`, returning the number of users exported.
pub async fn export_to_file(db: &SqlitePool, path: &Path) -> anyhow::Result<usize> {
    let users = collect(db).await?;
    let mut buf = Vec::new();
    write_json(&mut buf, &users)?;
    tokio::fs::write(path, buf)
        .await
        .with_context(|| format!("write {}", path.display()))?;

    info!(
        users = users.len(),
        personnel = users.iter().map(|u| u.personnels.len()).sum::<usize>(),
        path = %path.display(),
        "export written"
    );
    Ok(users.len())
}
