//! # Storage Layer
//!
//! The [`StorageBackend`](backend::StorageBackend) trait is the seam between
//! the roster and wherever its records live. A backend maps a
//! [`FileFormat`](crate::codec::FileFormat) to a location and delegates the
//! encoding to the matching [`Codec`](crate::codec::Codec).
//!
//! ## Persistence Model
//!
//! The roster keeps the whole collection in memory and persists after every
//! mutation:
//!
//! - **Add** appends one record ([`WriteData::Append`](crate::codec::WriteData)).
//! - **Delete / update** rewrite the whole file ([`WriteData::All`](crate::codec::WriteData)).
//! - **Sorting** is in-memory only and never written.
//!
//! If a save fails, the roster restores its previous in-memory state so the
//! collection never drifts from what is on disk.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: Production implementation, one file per format.
//! - [`mem_backend::MemBackend`]: For testing logic without filesystem I/O,
//!   including simulated write failures.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── roster.toml        # Optional configuration
//! ├── employees.txt      # Delimited text (default)
//! ├── employees.csv
//! ├── employees.json
//! └── employees.xml
//! ```
//!
//! Only the file of the active format is read or written.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
