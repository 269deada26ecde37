use sqlx::FromRow;

/// Personnel record in the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Personnel {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub workstation: String,
    pub service: String,
    pub owner_id: i64, // users.id
}
