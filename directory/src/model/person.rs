use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::consts::PersonId;

use super::photo::Photo;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub photo: Photo,
    pub registered_at: DateTime<Utc>,
}

impl Person {
    pub fn new(id: PersonId, form: PersonForm, registered_at: DateTime<Utc>) -> Self {
        Person {
            id,
            name: form.name,
            email: form.email,
            phone: form.phone,
            role: form.role,
            photo: form.photo.unwrap_or_default(),
            registered_at,
        }
    }

    /// Case insensitive substring match over the searchable fields
    ///
    /// `lowercase_term` must already be lowercased, callers do it once per search rather than once per person
    pub fn matches_term(&self, lowercase_term: &str) -> bool {
        if lowercase_term.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(lowercase_term)
            || self.email.to_lowercase().contains(lowercase_term)
            || self.role.to_lowercase().contains(lowercase_term)
            || self.phone.to_lowercase().contains(lowercase_term)
    }

    pub fn new_test() -> Self {
        Person {
            id: PersonId(1),
            name: "Full Name".to_string(),
            email: "full.name@example.com".to_string(),
            phone: "(11) 99999-9999".to_string(),
            role: "Developer".to_string(),
            photo: Photo::default_avatar(),
            registered_at: Utc.timestamp_opt(0, 0).unwrap(),
        }
    }
}

/// What a user submits, fields are raw input and still need validating
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PersonForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Photo>,
}

impl PersonForm {
    pub fn new(name: &str, email: &str, phone: &str, role: &str) -> Self {
        PersonForm {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            role: role.to_string(),
            photo: None,
        }
    }

    pub fn with_photo(mut self, photo: Photo) -> Self {
        self.photo = Some(photo);
        self
    }

    /// Surrounding whitespace is never meaningful in a form field
    pub fn trimmed(self) -> Self {
        PersonForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            role: self.role.trim().to_string(),
            photo: self.photo,
        }
    }

    pub fn new_test() -> Self {
        PersonForm::new(
            "Full Name",
            "full.name@example.com",
            "(11) 99999-9999",
            "Developer",
        )
    }
}
