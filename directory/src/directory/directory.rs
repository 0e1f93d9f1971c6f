use std::time::Instant;

use chrono::{DateTime, Duration, Utc};
use num_format::{Locale, ToFormattedString};
use thiserror::Error;

use crate::{
    consts::consts::PersonId,
    model::{
        person::{Person, PersonForm},
        statement::{Statement, StatementResult},
    },
    persistence::{
        snapshot::{Metadata, SnapshotManager},
        storage::{StorageEngine, StorageError},
    },
};

use super::{
    options::DirectoryOptions,
    seed::sample_forms,
    table::{
        row::UpdatePersonData,
        table::{ApplyErrors, PersonTable},
    },
    validation::{validate_form, validate_update, ValidationErrors},
};

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Not found, record does not exist: {0}")]
    NotFound(PersonId),

    #[error(transparent)]
    Apply(#[from] ApplyErrors),

    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// The person store, every mutation is written through to the storage engine before it returns
pub struct Directory {
    person_table: PersonTable,
    snapshot_manager: SnapshotManager,
    metadata: Metadata,
    options: DirectoryOptions,
}

impl Directory {
    pub fn new(options: DirectoryOptions) -> Self {
        let storage = StorageEngine::get_engine(options.storage_engine.clone());

        Self {
            person_table: PersonTable::new(),
            snapshot_manager: SnapshotManager::new(storage),
            metadata: Metadata::default(),
            options,
        }
    }

    pub fn new_test() -> Self {
        Directory::new(DirectoryOptions::new_test())
    }

    /// Creates the directory and loads whatever the storage engine holds
    pub fn open(options: DirectoryOptions) -> DirectoryResult<Self> {
        let mut directory = Directory::new(options);

        directory.snapshot_manager.init()?;

        if directory.options.restore {
            directory.restore()?;
        }

        if directory.options.seed_when_empty && directory.person_table.is_empty() {
            directory.seed()?;
        }

        Ok(directory)
    }

    pub fn options(&self) -> &DirectoryOptions {
        &self.options
    }

    pub fn restore(&mut self) -> DirectoryResult<usize> {
        log::info!("Storage engine: [{:?}]", self.options.storage_engine);

        let now = Instant::now();

        let (snapshot_count, metadata) = self
            .snapshot_manager
            .restore_snapshot(&mut self.person_table)?;

        self.metadata = metadata;

        log::info!(
            "✅ Successful Restore [Duration: {}ms]",
            now.elapsed().as_millis(),
        );

        log::info!(
            "📀 Data               [People: {}, NextId: {}]",
            snapshot_count.to_formatted_string(&Locale::en),
            self.metadata.next_id,
        );

        Ok(snapshot_count)
    }

    /// Runs a single statement against the table, mutations are persisted and undone if persisting fails
    pub fn process_statement(&mut self, statement: Statement) -> DirectoryResult<StatementResult> {
        log::debug!("Received statement: {}", statement.log_format());

        if statement.is_query() {
            return Ok(self.person_table.query_statement(statement)?);
        }

        let previous_rows = self.person_table.person_rows.clone();
        let previous_metadata = self.metadata.clone();

        let result = self.person_table.apply(statement)?;

        if let StatementResult::Single(person) = &result {
            if person.id >= self.metadata.next_id {
                self.metadata.next_id = person.id.increment();
            }
        }

        if let Err(err) = self
            .snapshot_manager
            .create_snapshot(&self.person_table, &self.metadata)
        {
            log::error!("Rolling back, unable to persist: {}", err);

            if let Err(restore_err) = self.person_table.restore_table(previous_rows) {
                log::error!("Unable to roll back the table: {}", restore_err);
            }
            self.metadata = previous_metadata;

            return Err(err.into());
        }

        Ok(result)
    }

    pub fn add(&mut self, form: PersonForm) -> DirectoryResult<Person> {
        self.add_at(form, Utc::now())
    }

    /// Validates the form and stores a new person registered at `registered_at`
    pub fn add_at(
        &mut self,
        form: PersonForm,
        registered_at: DateTime<Utc>,
    ) -> DirectoryResult<Person> {
        let form = form.trimmed();

        validate_form(&form, &self.person_table, None)?;

        let person = Person::new(self.metadata.next_id, form, registered_at);

        let person = self.process_statement(Statement::Add(person))?.single();

        log::info!("✅ Added: [{}] {}", person.id, person.email);

        Ok(person)
    }

    pub fn list(&self) -> Vec<Person> {
        self.person_table.person_rows.clone()
    }

    /// Borrowed view of every person, newest first
    pub fn people(&self) -> &[Person] {
        &self.person_table.person_rows
    }

    pub fn len(&self) -> usize {
        self.person_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.person_table.is_empty()
    }

    pub fn get(&self, id: PersonId) -> DirectoryResult<Person> {
        self.person_table
            .query_statement(Statement::Get(id))?
            .get_single()
            .ok_or(DirectoryError::NotFound(id))
    }

    pub fn update(&mut self, id: PersonId, update: UpdatePersonData) -> DirectoryResult<Person> {
        let update = update.trimmed();

        if self.person_table.person_rows.iter().all(|p| p.id != id) {
            return Err(DirectoryError::NotFound(id));
        }

        validate_update(&update, &self.person_table, id)?;

        let person = self.process_statement(Statement::Update(id, update))?.single();

        log::info!("✅ Updated: [{}]", person.id);

        Ok(person)
    }

    /// Returns whether a person was removed
    pub fn delete(&mut self, id: PersonId) -> DirectoryResult<bool> {
        let removed = self.process_statement(Statement::Remove(id))?.removed();

        if removed {
            log::info!("✅ Removed: [{}]", id);
        }

        Ok(removed)
    }

    pub fn search(&self, term: &str) -> DirectoryResult<Vec<Person>> {
        Ok(self
            .person_table
            .query_statement(Statement::Search(term.to_string()))?
            .list())
    }

    /// Adds the sample people, oldest first so the first sample ends up last.
    /// A directory that already holds anyone is left alone and 0 is returned
    pub fn seed(&mut self) -> DirectoryResult<usize> {
        if !self.person_table.is_empty() {
            log::info!("🌱 Directory already has people, skipping seed");
            return Ok(0);
        }

        let now = Utc::now();
        let forms = sample_forms();
        let count = forms.len();

        for (index, form) in forms.into_iter().enumerate() {
            let days_ago = (count - index) as i64;
            self.add_at(form, now - Duration::days(days_ago))?;
        }

        log::info!("🌱 Seeded {} people", count);

        Ok(count)
    }

    /// Drops every person and starts ids from the beginning again
    pub fn reset(&mut self) -> DirectoryResult<()> {
        self.snapshot_manager.reset()?;

        self.person_table.clear();
        self.metadata = Metadata::default();

        log::info!("🧹 Directory reset");

        Ok(())
    }
}
