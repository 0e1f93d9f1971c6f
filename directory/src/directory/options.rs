use std::path::PathBuf;

use crate::{
    consts::consts::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    persistence::storage::StorageEngine,
};

#[derive(Debug, Clone)]
pub struct DirectoryOptions {
    pub storage_engine: StorageEngine,
    pub restore: bool,
    pub seed_when_empty: bool,
    pub page_size: usize,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl DirectoryOptions {
    pub fn set_storage_engine(mut self, storage_engine: StorageEngine) -> Self {
        self.storage_engine = storage_engine;
        self
    }

    pub fn set_data_directory(self, data_directory: PathBuf) -> Self {
        self.set_storage_engine(StorageEngine::File(data_directory))
    }

    /// Defines whether people should be loaded from the storage engine when the directory opens
    pub fn set_restore(mut self, restore: bool) -> Self {
        self.restore = restore;
        self
    }

    /// Fills an empty directory with sample people on open
    pub fn set_seed_when_empty(mut self, seed_when_empty: bool) -> Self {
        self.seed_when_empty = seed_when_empty;
        self
    }

    /// Page size the list view starts with, clamped to 1..=100
    pub fn set_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }
}

impl Default for DirectoryOptions {
    fn default() -> Self {
        Self {
            storage_engine: StorageEngine::File(PathBuf::from("data")),
            restore: true,
            seed_when_empty: false,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DirectoryOptions {
    pub fn new_test() -> Self {
        DirectoryOptions::default()
            .set_storage_engine(StorageEngine::Memory)
            .set_restore(false)
    }
}
