use std::{
    fs::{self, File, OpenOptions},
    io::{Read, Write},
    path::PathBuf,
};

use super::{io_to_generic_error, ReadBlobState, Storage, StorageError, StorageResult};

pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn get_path(&self, path: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", path))
    }
}

impl Storage for FileStorage {
    fn write_blob(&self, path: String, bytes: Vec<u8>) -> StorageResult<()> {
        let final_path = self.get_path(&path);
        let staging_path = final_path.with_extension("json.tmp");

        // Written beside the target then renamed, a crash mid-write leaves the previous snapshot intact
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&staging_path)
            .map_err(|e| StorageError::UnableToWriteBlob(io_to_generic_error(e)))?;

        file.write_all(&bytes)
            .map_err(|e| StorageError::UnableToWriteBlob(io_to_generic_error(e)))?;

        file.sync_all()
            .map_err(|e| StorageError::UnableToWriteBlob(io_to_generic_error(e)))?;

        fs::rename(&staging_path, &final_path)
            .map_err(|e| StorageError::UnableToWriteBlob(io_to_generic_error(e)))
    }

    fn read_blob(&self, path: String) -> StorageResult<ReadBlobState> {
        let mut file = match File::open(self.get_path(&path)) {
            Ok(file) => file,
            Err(err) => match err.kind() {
                std::io::ErrorKind::NotFound => return Ok(ReadBlobState::NotFound),
                _ => return Err(StorageError::UnableToReadBlob(io_to_generic_error(err))),
            },
        };

        let mut buf = Vec::new();

        file.read_to_end(&mut buf)
            .map_err(|e| StorageError::UnableToReadBlob(io_to_generic_error(e)))?;

        Ok(ReadBlobState::Found(buf))
    }

    // Called on start-up, should be idempotent
    fn init(&self) -> StorageResult<()> {
        std::fs::create_dir_all(&self.base_path)
            .map_err(|e| StorageError::UnableToInitializePersistence(io_to_generic_error(e)))?;

        Ok(())
    }

    // Called when the directory gets cleared (via user)
    fn reset_database(&self) -> StorageResult<()> {
        match fs::remove_dir_all(&self.base_path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(StorageError::UnableToResetPersistence(io_to_generic_error(err))),
        }

        self.init()
    }
}
