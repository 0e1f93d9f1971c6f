use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::model::person::Person;

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Stats {
    pub total: usize,
    /// Registered on the current local date
    pub today: usize,
    pub filtered: usize,
}

impl Stats {
    pub fn compute(people: &[Person], filtered: usize) -> Self {
        Self::compute_on(people, filtered, Local::now().date_naive())
    }

    pub fn compute_on(people: &[Person], filtered: usize, today: NaiveDate) -> Self {
        let registered_today = people
            .iter()
            .filter(|person| person.registered_at.with_timezone(&Local).date_naive() == today)
            .count();

        Stats {
            total: people.len(),
            today: registered_today,
            filtered,
        }
    }
}
