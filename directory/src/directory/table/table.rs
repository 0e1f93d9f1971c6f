use std::collections::HashMap;
use thiserror::Error;

use crate::{
    consts::consts::PersonId,
    model::{
        person::Person,
        statement::{Statement, StatementResult},
    },
};

use super::{
    query::{filter, query, QueryPersonData},
    row::{apply_update, ApplyUpdateResult, UpdateStatement},
};

#[derive(Error, Debug, PartialEq)]
pub enum ApplyErrors {
    // CRUD - CREATE
    #[error("Cannot create, record already exists: {0}")]
    CannotCreateWhenAlreadyExists(PersonId),

    // CRUD - UPDATE
    #[error("Cannot update, record does not exist: {0}")]
    CannotUpdateDoesNotExist(PersonId),

    // Constraints
    #[error("Cannot save row as a person already exists with this email: {0}")]
    UniqueConstraintViolation(String),

    #[error("Cannot set field to null: {0}")]
    NotNullConstraintViolation(String),

    #[error("Mutations cannot run as a query: {0}")]
    MutationAsQuery(String),
}

/// Emails are unique regardless of case
fn email_key(email: &str) -> String {
    email.to_lowercase()
}

pub struct PersonTable {
    /// Newest person first
    pub person_rows: Vec<Person>,
    pub unique_email_index: HashMap<String, PersonId>,
}

impl Default for PersonTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonTable {
    pub fn new() -> Self {
        Self {
            person_rows: Vec::new(),
            unique_email_index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.person_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.person_rows.is_empty()
    }

    /// Who currently owns an email, if anyone
    pub fn email_owner(&self, email: &str) -> Option<PersonId> {
        self.unique_email_index.get(&email_key(email)).copied()
    }

    fn position(&self, id: &PersonId) -> Option<usize> {
        self.person_rows.iter().position(|person| &person.id == id)
    }

    // Each mutation statement can be broken up into 3 steps
    //  - Verifying validity / constraints (uniqueness)
    //  - Applying statement
    //  - Updating the email index
    pub fn apply(&mut self, statement: Statement) -> Result<StatementResult, ApplyErrors> {
        let statement_result = match statement {
            Statement::Add(person) => {
                // Check if a person with an email already exists
                if self.email_owner(&person.email).is_some() {
                    return Err(ApplyErrors::UniqueConstraintViolation(person.email.clone()));
                }

                if self.position(&person.id).is_some() {
                    return Err(ApplyErrors::CannotCreateWhenAlreadyExists(person.id));
                }

                self.unique_email_index
                    .insert(email_key(&person.email), person.id);

                self.person_rows.insert(0, person.clone());

                StatementResult::Single(person)
            }
            Statement::Update(id, update_person) => {
                let index = self
                    .position(&id)
                    .ok_or(ApplyErrors::CannotUpdateDoesNotExist(id))?;

                if let UpdateStatement::Set(email_to_update) = &update_person.email {
                    // Edge case: updating the email to our own (possibly re-cased) email must not trip the constraint
                    match self.email_owner(email_to_update) {
                        Some(owner) if owner != id => {
                            return Err(ApplyErrors::UniqueConstraintViolation(
                                email_to_update.clone(),
                            ));
                        }
                        _ => {}
                    }
                }

                let ApplyUpdateResult { current, previous } =
                    apply_update(&self.person_rows[index], &update_person)?;

                if previous.email != current.email {
                    self.unique_email_index.remove(&email_key(&previous.email));
                    self.unique_email_index
                        .insert(email_key(&current.email), id);
                }

                self.person_rows[index] = current.clone();

                StatementResult::Single(current)
            }
            Statement::Remove(id) => match self.position(&id) {
                Some(index) => {
                    let previous = self.person_rows.remove(index);

                    self.unique_email_index.remove(&email_key(&previous.email));

                    StatementResult::Removed(true)
                }
                None => StatementResult::Removed(false),
            },
            Statement::Get(_) | Statement::List | Statement::Search(_) => {
                return self.query_statement(statement)
            }
        };

        Ok(statement_result)
    }

    /// Read only statements, never touches the rows
    pub fn query_statement(&self, statement: Statement) -> Result<StatementResult, ApplyErrors> {
        let statement_result = match statement {
            Statement::Get(id) => {
                let person = self.position(&id).map(|index| self.person_rows[index].clone());

                StatementResult::GetSingle(person)
            }
            Statement::List => StatementResult::List(query(self)),
            Statement::Search(term) => {
                StatementResult::List(filter(query(self), &QueryPersonData::search(&term)))
            }
            Statement::Add(_) | Statement::Update(_, _) | Statement::Remove(_) => {
                return Err(ApplyErrors::MutationAsQuery(statement.log_format()))
            }
        };

        Ok(statement_result)
    }

    /// Used when restoring from a snapshot, rows are expected newest first
    pub fn restore_table(&mut self, people: Vec<Person>) -> Result<(), ApplyErrors> {
        self.clear();

        // Applied oldest first so that every add lands in front of the previous one
        for person in people.into_iter().rev() {
            self.apply(Statement::Add(person))?;
        }

        Ok(())
    }

    pub fn clear(&mut self) {
        self.person_rows.clear();
        self.unique_email_index.clear();
    }
}
