//! Flat-file record storage.
//!
//! A resource is an ordered list of rows, each row a list of string fields.
//! Every write replaces the whole resource; there is no locking and no
//! atomic rename, so the store assumes a single process.

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::error::AppError;

pub type Row = Vec<String>;

/// Field delimiter used by the on-disk encoding.
pub const DELIMITER: char = ',';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Sessions,
}

impl Resource {
    pub const ALL: [Resource; 2] = [Resource::Users, Resource::Sessions];

    pub fn file_name(&self) -> &'static str {
        match self {
            Resource::Users => "users.txt",
            Resource::Sessions => "sessions.txt",
        }
    }
}

pub trait RecordStore {
    /// All non-empty rows of `resource` in stored order.
    fn load(&self, resource: Resource) -> Result<Vec<Row>, AppError>;

    /// Replace the contents of `resource` with `rows`.
    fn save(&self, resource: Resource, rows: &[Row]) -> Result<(), AppError>;
}

#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn path(&self, resource: Resource) -> PathBuf {
        self.data_dir.join(resource.file_name())
    }

    /// Create the data directory and empty resource files if missing.
    #[instrument(skip(self), fields(data_dir = %self.data_dir.display()))]
    pub fn bootstrap(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.data_dir)?;

        for resource in Resource::ALL {
            let path = self.path(resource);
            if !path.exists() {
                fs::File::create(&path)?;
                info!(path = %path.display(), "Created empty data file");
            }
        }

        Ok(())
    }
}

fn read_rows(path: &Path) -> Result<Vec<Row>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(DELIMITER as u8)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(rows)
}

impl RecordStore for FileStore {
    #[instrument(skip(self))]
    fn load(&self, resource: Resource) -> Result<Vec<Row>, AppError> {
        let path = self.path(resource);
        if !path.exists() {
            debug!(path = %path.display(), "Data file missing, treating as empty");
            return Ok(Vec::new());
        }

        let rows = read_rows(&path)?;
        debug!(count = rows.len(), "Loaded rows");
        Ok(rows)
    }

    #[instrument(skip(self, rows), fields(count = rows.len()))]
    fn save(&self, resource: Resource, rows: &[Row]) -> Result<(), AppError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(DELIMITER as u8)
            .from_path(self.path(resource))?;

        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        debug!("Saved rows");
        Ok(())
    }
}

/// Store kept entirely in memory, used by tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RefCell<HashMap<Resource, Vec<Row>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl RecordStore for MemoryStore {
    fn load(&self, resource: Resource) -> Result<Vec<Row>, AppError> {
        let rows = self
            .tables
            .borrow()
            .get(&resource)
            .map(|rows| {
                rows.iter()
                    .filter(|row| !row.iter().all(String::is_empty))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(rows)
    }

    fn save(&self, resource: Resource, rows: &[Row]) -> Result<(), AppError> {
        self.tables.borrow_mut().insert(resource, rows.to_vec());
        Ok(())
    }
}
