use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use thiserror::Error;

use crate::consts::consts::SchemaVersion;

use self::{file::FileStorage, memory::MemoryStorage};

pub mod file;
pub mod memory;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Unable to initialize persistence: {0}")]
    UnableToInitializePersistence(anyhow::Error),

    #[error("Unable to write blob: {0}")]
    UnableToWriteBlob(anyhow::Error),

    #[error("Unable to read blob: {0}")]
    UnableToReadBlob(anyhow::Error),

    #[error("Unable to decode blob {0}: {1}")]
    UnableToDecodeBlob(String, anyhow::Error),

    #[error("Unable to reset persistence: {0}")]
    UnableToResetPersistence(anyhow::Error),

    #[error("Snapshot schema {found} is not supported, expected {expected}")]
    UnsupportedSchemaVersion {
        found: SchemaVersion,
        expected: SchemaVersion,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

pub fn io_to_generic_error(error: std::io::Error) -> anyhow::Error {
    anyhow::anyhow!(error)
}

#[derive(Debug, PartialEq)]
pub enum ReadBlobState {
    Found(Vec<u8>),
    NotFound,
}

/// A flat key / blob store, the directory keeps one blob per document (people, metadata)
pub trait Storage {
    fn write_blob(&self, path: String, bytes: Vec<u8>) -> StorageResult<()>;
    fn read_blob(&self, path: String) -> StorageResult<ReadBlobState>;
    fn init(&self) -> StorageResult<()>;
    fn reset_database(&self) -> StorageResult<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageEngine {
    File(PathBuf),
    Memory,
}

impl StorageEngine {
    pub fn get_engine(engine: StorageEngine) -> Arc<Mutex<dyn Storage + Sync + Send>> {
        match engine {
            StorageEngine::File(path) => Arc::new(Mutex::new(FileStorage::new(path))),
            StorageEngine::Memory => Arc::new(Mutex::new(MemoryStorage::new())),
        }
    }
}
