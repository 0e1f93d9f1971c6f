use std::sync::{Arc, Mutex};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    consts::consts::{PersonId, SchemaVersion, SCHEMA_VERSION, START_AT_ID},
    directory::table::table::PersonTable,
    model::person::Person,
};

use super::storage::{ReadBlobState, Storage, StorageError, StorageResult};

#[derive(Debug)]
enum FileType {
    Metadata,
    Users,
}

impl FileType {
    fn as_str(&self) -> &'static str {
        match self {
            FileType::Metadata => "metadata",
            FileType::Users => "users",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Metadata {
    pub schema_version: SchemaVersion,
    /// Ids are never handed out twice, even after the person holding one is removed
    pub next_id: PersonId,
}

impl Default for Metadata {
    fn default() -> Self {
        Metadata {
            schema_version: SCHEMA_VERSION,
            next_id: START_AT_ID,
        }
    }
}

pub struct SnapshotManager {
    storage: Arc<Mutex<dyn Storage + Sync + Send>>,
}

impl SnapshotManager {
    pub fn new(storage: Arc<Mutex<dyn Storage + Sync + Send>>) -> Self {
        Self { storage }
    }

    pub fn init(&self) -> StorageResult<()> {
        self.storage.lock().unwrap().init()
    }

    pub fn reset(&self) -> StorageResult<()> {
        self.storage.lock().unwrap().reset_database()
    }

    /// Loads the people into the table, returns how many were restored along with the metadata
    #[tracing::instrument(skip(self, table))]
    pub fn restore_snapshot(&self, table: &mut PersonTable) -> StorageResult<(usize, Metadata)> {
        let mut metadata: Metadata = self.read_file(FileType::Metadata)?;

        if metadata.schema_version != SCHEMA_VERSION {
            return Err(StorageError::UnsupportedSchemaVersion {
                found: metadata.schema_version,
                expected: SCHEMA_VERSION,
            });
        }

        let people: Vec<Person> = self.read_file(FileType::Users)?;

        let snapshot_count = people.len();

        // The counter must stay ahead of every stored id, even when the metadata blob is stale or missing
        if let Some(max_next_id) = people.iter().map(|person| person.id.increment()).max() {
            if max_next_id > metadata.next_id {
                log::warn!(
                    "Stored next id {} is behind the stored people, continuing from {}",
                    metadata.next_id,
                    max_next_id
                );
                metadata.next_id = max_next_id;
            }
        }

        table.restore_table(people).map_err(|e| {
            StorageError::UnableToDecodeBlob(FileType::Users.as_str().to_string(), e.into())
        })?;

        Ok((snapshot_count, metadata))
    }

    #[tracing::instrument(skip(self, table))]
    pub fn create_snapshot(&self, table: &PersonTable, metadata: &Metadata) -> StorageResult<()> {
        // Metadata first, a crash in between leaves a next id that is ahead of every stored id
        self.write_file(FileType::Metadata, metadata)?;

        self.write_file(FileType::Users, &table.person_rows)?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn read_file<T: DeserializeOwned + Default>(&self, file_type: FileType) -> StorageResult<T> {
        let result = self
            .storage
            .lock()
            .unwrap()
            .read_blob(file_type.as_str().to_string())?;

        match result {
            ReadBlobState::Found(file_contents) => serde_json::from_slice(&file_contents)
                .map_err(|e| {
                    StorageError::UnableToDecodeBlob(file_type.as_str().to_string(), e.into())
                }),
            ReadBlobState::NotFound => Ok(T::default()),
        }
    }

    #[tracing::instrument(skip(self, data))]
    fn write_file<T: Serialize>(&self, file_type: FileType, data: T) -> StorageResult<()> {
        let serialized_bytes =
            serde_json::to_vec(&data).map_err(|e| StorageError::UnableToWriteBlob(e.into()))?;

        self.storage
            .lock()
            .unwrap()
            .write_blob(file_type.as_str().to_string(), serialized_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::storage::{memory::MemoryStorage, StorageEngine};

    fn memory_manager() -> (SnapshotManager, Arc<Mutex<dyn Storage + Sync + Send>>) {
        let storage = StorageEngine::get_engine(StorageEngine::Memory);

        (SnapshotManager::new(storage.clone()), storage)
    }

    #[test]
    fn empty_storage_restores_nothing() {
        let (manager, _) = memory_manager();
        let mut table = PersonTable::new();

        let (count, metadata) = manager.restore_snapshot(&mut table).unwrap();

        assert_eq!(count, 0);
        assert_eq!(metadata, Metadata::default());
    }

    #[test]
    fn snapshot_then_restore_keeps_people_and_next_id() {
        // Given a table with a person and an advanced id counter
        let (manager, _) = memory_manager();
        let mut table = PersonTable::new();
        table
            .apply(crate::model::statement::Statement::Add(Person::new_test()))
            .unwrap();

        let metadata = Metadata {
            schema_version: SCHEMA_VERSION,
            next_id: PersonId(7),
        };

        // When we snapshot and restore into a fresh table
        manager.create_snapshot(&table, &metadata).unwrap();

        let mut restored = PersonTable::new();
        let (count, restored_metadata) = manager.restore_snapshot(&mut restored).unwrap();

        // Then everything comes back
        assert_eq!(count, 1);
        assert_eq!(restored_metadata, metadata);
        assert_eq!(restored.person_rows, table.person_rows);
    }

    #[test]
    fn unknown_schema_version_is_rejected() {
        let storage: Arc<Mutex<dyn Storage + Sync + Send>> =
            Arc::new(Mutex::new(MemoryStorage::new()));
        storage
            .lock()
            .unwrap()
            .write_blob(
                "metadata".to_string(),
                br#"{"schema_version":2,"next_id":1}"#.to_vec(),
            )
            .unwrap();

        let manager = SnapshotManager::new(storage);

        let result = manager.restore_snapshot(&mut PersonTable::new());

        assert!(matches!(
            result,
            Err(StorageError::UnsupportedSchemaVersion { .. })
        ));
    }

    #[test]
    fn corrupt_blob_is_a_decode_error() {
        let (manager, storage) = memory_manager();
        storage
            .lock()
            .unwrap()
            .write_blob("users".to_string(), b"not json".to_vec())
            .unwrap();

        let result = manager.restore_snapshot(&mut PersonTable::new());

        assert!(matches!(result, Err(StorageError::UnableToDecodeBlob(file, _)) if file == "users"));
    }

    #[test]
    fn users_without_metadata_move_the_id_counter_past_stored_ids() {
        // Given a users blob whose metadata was never written
        let (manager, storage) = memory_manager();

        let mut person = Person::new_test();
        person.id = PersonId(4);

        storage
            .lock()
            .unwrap()
            .write_blob("users".to_string(), serde_json::to_vec(&vec![person]).unwrap())
            .unwrap();

        // When we restore
        let mut table = PersonTable::new();
        let (count, metadata) = manager.restore_snapshot(&mut table).unwrap();

        // Then the next id is past the stored person
        assert_eq!(count, 1);
        assert_eq!(metadata.next_id, PersonId(5));
    }

    #[test]
    fn stale_metadata_never_moves_the_id_counter_backwards() {
        let (manager, _) = memory_manager();
        let mut table = PersonTable::new();
        table
            .apply(crate::model::statement::Statement::Add(Person::new_test()))
            .unwrap();

        let metadata = Metadata {
            schema_version: SCHEMA_VERSION,
            next_id: PersonId(9),
        };
        manager.create_snapshot(&table, &metadata).unwrap();

        let (_, restored) = manager.restore_snapshot(&mut PersonTable::new()).unwrap();

        assert_eq!(restored.next_id, PersonId(9));
    }
}
