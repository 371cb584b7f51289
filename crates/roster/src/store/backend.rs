use crate::codec::{Decoded, FileFormat, WriteData};
use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw roster I/O.
/// This trait handles the "where" of storage (filesystem vs memory),
/// while the codecs handle the "how" of each format and the roster handles
/// the "what" (validation, lookups, rollback).
pub trait StorageBackend {
    /// Load every record stored in the given format.
    /// A missing data file yields an empty [`Decoded`], never an error.
    fn load(&self, format: FileFormat) -> Result<Decoded>;

    /// Persist the collection, or append a single record.
    /// Overwrites MUST be atomic (e.g. write to tmp then rename).
    fn save(&self, format: FileFormat, data: WriteData<'_>) -> Result<()>;

    /// Where the data for a format lives.
    /// For FsBackend, this is the real path. For MemBackend, a virtual path.
    fn location(&self, format: FileFormat) -> PathBuf;
}
