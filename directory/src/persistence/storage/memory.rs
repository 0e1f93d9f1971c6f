use std::{collections::HashMap, sync::RwLock};

use super::{ReadBlobState, Storage, StorageResult};

/// Keeps blobs for the lifetime of the process, used for tests and throwaway sessions
#[derive(Default)]
pub struct MemoryStorage {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn write_blob(&self, path: String, bytes: Vec<u8>) -> StorageResult<()> {
        self.blobs.write().unwrap().insert(path, bytes);

        Ok(())
    }

    fn read_blob(&self, path: String) -> StorageResult<ReadBlobState> {
        match self.blobs.read().unwrap().get(&path) {
            Some(bytes) => Ok(ReadBlobState::Found(bytes.clone())),
            None => Ok(ReadBlobState::NotFound),
        }
    }

    fn init(&self) -> StorageResult<()> {
        Ok(())
    }

    fn reset_database(&self) -> StorageResult<()> {
        self.blobs.write().unwrap().clear();

        Ok(())
    }
}
