use std::{collections::BTreeMap, fmt, sync::OnceLock};

use regex::Regex;
use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    consts::consts::{PersonId, EMAIL_MAX_CHARS, NAME_MAX_CHARS, NAME_MIN_CHARS},
    model::person::PersonForm,
};

use super::table::{row::UpdatePersonData, row::UpdateStatement, table::PersonTable};

#[derive(
    Serialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Role,
}

/// Every failing field with its message, a form is only accepted when this is empty
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&Field, &String)> {
        self.errors.iter()
    }

    fn record(&mut self, field: Field, error: Option<String>) {
        if let Some(error) = error {
            self.errors.insert(field, error);
        }
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Please fix the errors in the form:")?;

        for (field, error) in &self.errors {
            write!(f, " [{}: {}]", field, error)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn name_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[a-zA-ZÀ-ÿ\s]+$").expect("Invalid regex pattern"))
}

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern"))
}

fn phone_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\(?\d{2}\)?\s?\d{4,5}-?\d{4}$").expect("Invalid regex pattern"))
}

pub fn validate_name(name: &str) -> Option<String> {
    let chars = name.chars().count();

    if name.is_empty() {
        return Some("Name is required".to_string());
    }
    if chars < NAME_MIN_CHARS {
        return Some(format!("Name must have at least {} characters", NAME_MIN_CHARS));
    }
    if chars > NAME_MAX_CHARS {
        return Some(format!("Name must have at most {} characters", NAME_MAX_CHARS));
    }
    if !name_regex().is_match(name) {
        return Some("Name must contain only letters and spaces".to_string());
    }

    None
}

/// `editing` is the person being edited, their own email never counts as taken
pub fn validate_email(
    email: &str,
    table: &PersonTable,
    editing: Option<PersonId>,
) -> Option<String> {
    if email.is_empty() {
        return Some("Email is required".to_string());
    }
    if !email_regex().is_match(email) {
        return Some("Invalid email".to_string());
    }
    if email.chars().count() > EMAIL_MAX_CHARS {
        return Some("Email is too long".to_string());
    }

    match table.email_owner(email) {
        Some(owner) if Some(owner) != editing => {
            Some("This email is already registered".to_string())
        }
        _ => None,
    }
}

pub fn validate_phone(phone: &str) -> Option<String> {
    if phone.is_empty() {
        return Some("Phone is required".to_string());
    }
    if !phone_regex().is_match(phone) {
        return Some("Invalid format. Use: (11) 99999-9999".to_string());
    }

    None
}

pub fn validate_role(role: &str) -> Option<String> {
    if role.is_empty() {
        return Some("Role is required".to_string());
    }

    None
}

/// Checks every field, not just the first failing one, so all errors can be shown at once
pub fn validate_form(
    form: &PersonForm,
    table: &PersonTable,
    editing: Option<PersonId>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    errors.record(Field::Name, validate_name(&form.name));
    errors.record(Field::Email, validate_email(&form.email, table, editing));
    errors.record(Field::Phone, validate_phone(&form.phone));
    errors.record(Field::Role, validate_role(&form.role));

    errors.into_result()
}

fn check_statement(
    statement: &UpdateStatement,
    validator: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    match statement {
        UpdateStatement::Set(value) => validator(value),
        // Empty string gives the "is required" message
        UpdateStatement::Unset => validator(""),
        UpdateStatement::NoChanges => None,
    }
}

/// Same rules as a full form, applied only to the fields the update touches
pub fn validate_update(
    update: &UpdatePersonData,
    table: &PersonTable,
    id: PersonId,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    errors.record(Field::Name, check_statement(&update.name, validate_name));
    errors.record(
        Field::Email,
        check_statement(&update.email, |email| validate_email(email, table, Some(id))),
    );
    errors.record(Field::Phone, check_statement(&update.phone, validate_phone));
    errors.record(Field::Role, check_statement(&update.role, validate_role));

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::model::{person::Person, statement::Statement};

    #[rstest]
    #[case("", Some("Name is required"))]
    #[case("A", Some("Name must have at least 2 characters"))]
    #[case("Ana Silva", None)]
    #[case("João Pedro Almeida", None)]
    #[case("Ana 2", Some("Name must contain only letters and spaces"))]
    #[case("ana.silva", Some("Name must contain only letters and spaces"))]
    fn name_rules(#[case] name: &str, #[case] expected: Option<&str>) {
        assert_eq!(validate_name(name).as_deref(), expected);
    }

    #[test]
    fn name_longer_than_limit_is_rejected() {
        let name = "a".repeat(NAME_MAX_CHARS + 1);

        assert_eq!(
            validate_name(&name).as_deref(),
            Some("Name must have at most 100 characters")
        );
    }

    #[rstest]
    #[case("(11) 99999-9999", true)]
    #[case("(11) 9999-9999", true)]
    #[case("11999999999", true)]
    #[case("11 99999-9999", true)]
    #[case("(11) 999-9999", false)]
    #[case("phone", false)]
    #[case("", false)]
    fn phone_rules(#[case] phone: &str, #[case] valid: bool) {
        assert_eq!(validate_phone(phone).is_none(), valid);
    }

    #[rstest]
    #[case("ana@example.com", None)]
    #[case("", Some("Email is required"))]
    #[case("ana@example", Some("Invalid email"))]
    #[case("ana @example.com", Some("Invalid email"))]
    fn email_rules(#[case] email: &str, #[case] expected: Option<&str>) {
        let table = PersonTable::new();

        assert_eq!(validate_email(email, &table, None).as_deref(), expected);
    }

    mod uniqueness {
        use super::*;

        fn table_with(email: &str) -> PersonTable {
            let mut table = PersonTable::new();
            let mut person = Person::new_test();
            person.email = email.to_string();
            table.apply(Statement::Add(person)).unwrap();
            table
        }

        #[test]
        fn taken_email_is_rejected_on_add() {
            let table = table_with("ana@example.com");

            assert_eq!(
                validate_email("ANA@example.com", &table, None).as_deref(),
                Some("This email is already registered")
            );
        }

        #[test]
        fn own_email_is_accepted_when_editing() {
            let table = table_with("ana@example.com");

            assert_eq!(
                validate_email("ana@example.com", &table, Some(PersonId(1))),
                None
            );
        }

        #[test]
        fn taken_email_is_rejected_when_editing_someone_else() {
            let table = table_with("ana@example.com");

            assert!(validate_email("ana@example.com", &table, Some(PersonId(2))).is_some());
        }
    }

    #[test]
    fn every_failing_field_is_reported() {
        let table = PersonTable::new();
        let form = PersonForm::new("", "nope", "123", "");

        let errors = validate_form(&form, &table, None)
            .err()
            .expect("should error");

        let fields: Vec<Field> = errors.fields().map(|(field, _)| *field).collect();
        assert_eq!(
            fields,
            vec![Field::Name, Field::Email, Field::Phone, Field::Role]
        );
    }

    #[test]
    fn update_only_checks_touched_fields() {
        let table = PersonTable::new();

        let update = UpdatePersonData {
            phone: UpdateStatement::Set("bad".to_string()),
            ..Default::default()
        };

        let errors = validate_update(&update, &table, PersonId(1))
            .err()
            .expect("should error");

        assert!(errors.get(Field::Phone).is_some());
        assert!(errors.get(Field::Name).is_none());
    }

    #[test]
    fn unset_required_field_is_reported_as_required() {
        let table = PersonTable::new();

        let update = UpdatePersonData {
            role: UpdateStatement::Unset,
            ..Default::default()
        };

        let errors = validate_update(&update, &table, PersonId(1))
            .err()
            .expect("should error");

        assert_eq!(errors.get(Field::Role), Some("Role is required"));
    }
}
