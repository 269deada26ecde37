use serde::{Deserialize, Serialize};

use crate::{error::AppError, personnel::repo_types::Personnel};

/// Form body shared by the add and edit pages. Missing fields deserialize
/// as empty and are rejected by [`PersonnelForm::validate`].
#[derive(Debug, Default, Deserialize)]
pub struct PersonnelForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub workstation: String,
    #[serde(default)]
    pub service: String,
}

/// Trimmed, non-empty personnel fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonnelFields {
    pub name: String,
    pub surname: String,
    pub workstation: String,
    pub service: String,
}

impl PersonnelForm {
    pub fn validate(self) -> Result<PersonnelFields, AppError> {
        fn required(value: String, label: &str) -> Result<String, AppError> {
            let value = value.trim();
            if value.is_empty() {
                return Err(AppError::validation(format!("{} is required", label)));
            }
            Ok(value.to_string())
        }

        Ok(PersonnelFields {
            name: required(self.name, "Name")?,
            surname: required(self.surname, "Surname")?,
            workstation: required(self.workstation, "Workstation")?,
            service: required(self.service, "Service")?,
        })
    }
}

/// Personnel as shown in views; the owner is implied by the session.
#[derive(Debug, Serialize)]
pub struct PersonnelItem {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub workstation: String,
    pub service: String,
}

impl From<Personnel> for PersonnelItem {
    fn from(p: Personnel) -> Self {
        Self {
            id: p.id,
            name: p.name,
            surname: p.surname,
            workstation: p.workstation,
            service: p.service,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PersonnelListView {
    pub personnel: Vec<PersonnelItem>,
}

#[derive(Debug, Serialize)]
pub struct EditPersonnelView {
    pub personnel: PersonnelItem,
}
