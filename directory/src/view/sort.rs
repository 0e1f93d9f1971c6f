use std::cmp::Ordering;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::model::person::Person;

use super::state::SortKey;

/// Lowercase with accents removed, so `Álvaro` sorts among the `a`s
fn folded(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Letters first, accents only separate otherwise equal text
fn case_insensitive(a: &str, b: &str) -> Ordering {
    folded(a)
        .cmp(&folded(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
}

/// Total order for a sort key, equal keys fall back to the id so no two people ever compare equal
pub fn compare(a: &Person, b: &Person, sort: SortKey) -> Ordering {
    match sort {
        SortKey::Name => case_insensitive(&a.name, &b.name).then(a.id.cmp(&b.id)),
        SortKey::Email => case_insensitive(&a.email, &b.email).then(a.id.cmp(&b.id)),
        SortKey::Role => case_insensitive(&a.role, &b.role).then(a.id.cmp(&b.id)),
        SortKey::Date => b
            .registered_at
            .cmp(&a.registered_at)
            .then(b.id.cmp(&a.id)),
    }
}

#[tracing::instrument(skip(people))]
pub fn sort_people(people: &mut [Person], sort: SortKey) {
    people.sort_by(|a, b| compare(a, b, sort));
}
