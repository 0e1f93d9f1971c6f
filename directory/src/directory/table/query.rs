use serde::{Deserialize, Serialize};

use crate::model::person::Person;

use super::table::PersonTable;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub enum QueryMatch {
    Value(String),
    #[default]
    Any,
}

impl QueryMatch {
    pub fn from_option(value: Option<String>) -> Self {
        match value {
            Some(value) => QueryMatch::Value(value),
            None => QueryMatch::Any,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct QueryPersonData {
    /// Substring searched across name, email, role and phone
    pub term: QueryMatch,
    /// Exact role
    pub role: QueryMatch,
}

impl QueryPersonData {
    pub fn search(term: &str) -> Self {
        QueryPersonData {
            term: QueryMatch::Value(term.to_string()),
            role: QueryMatch::Any,
        }
    }
}

#[tracing::instrument(skip(table))]
pub fn query(table: &PersonTable) -> Vec<Person> {
    table.person_rows.iter().cloned().collect()
}

#[tracing::instrument(skip(people))]
pub fn filter(people: Vec<Person>, query: &QueryPersonData) -> Vec<Person> {
    // Lowercased once, not once per person
    let lowercase_term = match &query.term {
        QueryMatch::Value(term) => Some(term.trim().to_lowercase()),
        QueryMatch::Any => None,
    };

    people
        .into_iter()
        .filter(|person| {
            if let Some(term) = &lowercase_term {
                if !person.matches_term(term) {
                    return false;
                }
            }

            match &query.role {
                QueryMatch::Value(role) => {
                    if &person.role != role {
                        return false;
                    }
                }
                QueryMatch::Any => {}
            }

            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::consts::consts::PersonId;

    use super::*;

    fn person(id: u64, name: &str, role: &str) -> Person {
        let mut person = Person::new_test();
        person.id = PersonId(id);
        person.name = name.to_string();
        person.email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
        person.role = role.to_string();
        person
    }

    fn people() -> Vec<Person> {
        vec![
            person(1, "Ana Silva", "Developer"),
            person(2, "Carlos Lima", "Designer"),
            person(3, "Mariana Silva", "Designer"),
        ]
    }

    #[test]
    fn empty_query_returns_everyone() {
        let result = filter(people(), &QueryPersonData::default());

        assert_eq!(result.len(), 3);
    }

    #[test]
    fn blank_term_matches_everyone() {
        let result = filter(people(), &QueryPersonData::search("   "));

        assert_eq!(result.len(), 3);
    }

    #[test]
    fn term_and_role_compose() {
        // Given "silva" matches Ana and Mariana, and only Mariana is a designer
        let query = QueryPersonData {
            term: QueryMatch::Value("SILVA".to_string()),
            role: QueryMatch::Value("Designer".to_string()),
        };

        // When both are applied
        let result = filter(people(), &query);

        // Then only people matching both remain
        let ids: Vec<PersonId> = result.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PersonId(3)]);
    }

    #[test]
    fn role_filter_is_exact() {
        let query = QueryPersonData {
            term: QueryMatch::Any,
            role: QueryMatch::Value("Design".to_string()),
        };

        assert!(filter(people(), &query).is_empty());
    }
}
