//! A JSON document on disk that is replaced atomically on every save.
//!
//! Each store in the app keeps its whole state in one [JsonDocument]. Saves
//! write the new document to a temporary file in the same directory and then
//! rename it over the old one, so a reader either sees the previous document
//! or the new one, never a partially written file.

use std::{
    fmt::Display,
    fs::{self, File},
    io::{self, BufReader, Write},
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tempfile::NamedTempFile;

use crate::Error;

/// A single JSON document of type `T` stored at a fixed path.
#[derive(Debug)]
pub struct JsonDocument<T> {
    path: PathBuf,
    _document: PhantomData<fn() -> T>,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a handle to the document at `path`.
    ///
    /// The file is not touched until the document is loaded or saved.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _document: PhantomData,
        }
    }

    /// The path of the document on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document, or `None` if it has not been created yet.
    ///
    /// # Errors
    ///
    /// Returns an [Error::StorageError] if the file cannot be read or does not
    /// contain a valid document.
    pub fn load(&self) -> Result<Option<T>, Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.storage_error(error)),
        };

        serde_json::from_reader(BufReader::new(file))
            .map(Some)
            .map_err(|error| self.storage_error(error))
    }

    /// Read the document, creating it from `seed` if it does not exist yet.
    ///
    /// Creation never replaces an existing file: if another caller creates the
    /// document first, their document is read and returned instead.
    ///
    /// # Errors
    ///
    /// Returns an [Error::StorageError] if the document cannot be read or the
    /// seed cannot be written.
    pub fn load_or_seed(&self, seed: impl FnOnce() -> T) -> Result<T, Error> {
        if let Some(document) = self.load()? {
            return Ok(document);
        }

        let document = seed();
        let temp_file = self.write_temp_file(&document)?;

        match temp_file.persist_noclobber(&self.path) {
            Ok(_) => {
                tracing::info!("Created {} from seed data", self.path.display());
                Ok(document)
            }
            Err(error) if error.error.kind() == io::ErrorKind::AlreadyExists => self
                .load()?
                .ok_or_else(|| self.storage_error("document disappeared after it was created")),
            Err(error) => Err(self.storage_error(error.error)),
        }
    }

    /// Replace the stored document with `document`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::StorageError] if the document cannot be written. The
    /// previously stored document is left in place in that case.
    pub fn save(&self, document: &T) -> Result<(), Error> {
        let temp_file = self.write_temp_file(document)?;

        temp_file
            .persist(&self.path)
            .map_err(|error| self.storage_error(error.error))?;

        tracing::debug!("Saved {}", self.path.display());

        Ok(())
    }

    /// Write `document` to a synced temporary file next to the target path.
    fn write_temp_file(&self, document: &T) -> Result<NamedTempFile, Error> {
        let directory = self.directory();
        fs::create_dir_all(directory).map_err(|error| self.storage_error(error))?;

        let bytes = serde_json::to_vec_pretty(document).map_err(|error| self.storage_error(error))?;

        let mut temp_file =
            NamedTempFile::new_in(directory).map_err(|error| self.storage_error(error))?;
        temp_file
            .write_all(&bytes)
            .and_then(|_| temp_file.as_file().sync_all())
            .map_err(|error| self.storage_error(error))?;

        Ok(temp_file)
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn storage_error(&self, error: impl Display) -> Error {
        Error::StorageError(self.path().display().to_string(), error.to_string())
    }
}
