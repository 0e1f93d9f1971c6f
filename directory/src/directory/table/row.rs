use serde::{Deserialize, Serialize};

use crate::model::{person::Person, photo::Photo};

use super::table::ApplyErrors;

#[derive(Debug)]
pub struct ApplyUpdateResult {
    pub previous: Person,
    pub current: Person,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UpdatePersonData {
    pub name: UpdateStatement,
    pub email: UpdateStatement,
    pub phone: UpdateStatement,
    pub role: UpdateStatement,
    pub photo: UpdateStatement<Photo>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub enum UpdateStatement<T = String> {
    Set(T),
    Unset,
    #[default]
    NoChanges,
}

impl<T> UpdateStatement<T> {
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => UpdateStatement::Set(value),
            None => UpdateStatement::NoChanges,
        }
    }
}

impl UpdatePersonData {
    pub fn is_empty(&self) -> bool {
        self.name == UpdateStatement::NoChanges
            && self.email == UpdateStatement::NoChanges
            && self.phone == UpdateStatement::NoChanges
            && self.role == UpdateStatement::NoChanges
            && self.photo == UpdateStatement::NoChanges
    }

    /// Text fields are trimmed the same way a submitted form is
    pub fn trimmed(self) -> Self {
        let trim = |statement: UpdateStatement| match statement {
            UpdateStatement::Set(value) => UpdateStatement::Set(value.trim().to_string()),
            other => other,
        };

        UpdatePersonData {
            name: trim(self.name),
            email: trim(self.email),
            phone: trim(self.phone),
            role: trim(self.role),
            photo: self.photo,
        }
    }
}

fn apply_required_field(
    field: &mut String,
    statement: &UpdateStatement,
    field_name: &str,
) -> Result<(), ApplyErrors> {
    match statement {
        UpdateStatement::Set(value) => *field = value.clone(),
        UpdateStatement::Unset => {
            return Err(ApplyErrors::NotNullConstraintViolation(
                field_name.to_string(),
            ))
        }
        UpdateStatement::NoChanges => {}
    }

    Ok(())
}

/// Builds the next state of a person, the original is left untouched so a failed update has nothing to undo
pub fn apply_update(
    previous: &Person,
    update: &UpdatePersonData,
) -> Result<ApplyUpdateResult, ApplyErrors> {
    let mut current = previous.clone();

    apply_required_field(&mut current.name, &update.name, "Name")?;
    apply_required_field(&mut current.email, &update.email, "Email")?;
    apply_required_field(&mut current.phone, &update.phone, "Phone")?;
    apply_required_field(&mut current.role, &update.role, "Role")?;

    match &update.photo {
        UpdateStatement::Set(photo) => current.photo = photo.clone(),
        // Photo is optional on the form, clearing it restores the avatar
        UpdateStatement::Unset => current.photo = Photo::default_avatar(),
        UpdateStatement::NoChanges => {}
    }

    Ok(ApplyUpdateResult {
        previous: previous.clone(),
        current,
    })
}
