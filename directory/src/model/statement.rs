use serde::{Deserialize, Serialize};

use crate::{consts::consts::PersonId, directory::table::row::UpdatePersonData};

use super::person::Person;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum Statement {
    /// Person must already carry its allocated id
    Add(Person),
    Update(PersonId, UpdatePersonData),
    Remove(PersonId),
    Get(PersonId),
    /// Returns a list of Person, newest first
    List,
    /// Case insensitive substring search over name, email, role and phone
    Search(String),
}

impl Statement {
    pub fn is_query(&self) -> bool {
        !self.is_mutation()
    }

    pub fn is_mutation(&self) -> bool {
        match self {
            Statement::Add(_) | Statement::Remove(_) | Statement::Update(_, _) => true,
            Statement::List | Statement::Search(_) | Statement::Get(_) => false,
        }
    }

    /// Prints statements without dumping embedded photos into the log
    pub fn log_format(&self) -> String {
        match self {
            Statement::Add(person) => format!("Add({}, {})", person.id, person.email),
            Statement::Update(id, _) => format!("Update({})", id),
            _ => format!("{:?}", self),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum StatementResult {
    Single(Person),
    GetSingle(Option<Person>),
    /// Whether a row was removed
    Removed(bool),
    List(Vec<Person>),
}

impl StatementResult {
    pub fn single(self) -> Person {
        if let StatementResult::Single(p) = self {
            p
        } else {
            panic!("Statement result is not of type Single")
        }
    }

    pub fn get_single(self) -> Option<Person> {
        if let StatementResult::GetSingle(p) = self {
            p
        } else {
            panic!("Statement result is not of type GetSingle")
        }
    }

    pub fn removed(self) -> bool {
        if let StatementResult::Removed(removed) = self {
            removed
        } else {
            panic!("Statement result is not of type Removed")
        }
    }

    pub fn list(self) -> Vec<Person> {
        if let StatementResult::List(l) = self {
            l
        } else {
            panic!("Statement result is not of type List")
        }
    }
}
