//! # roster
//!
//! An in-memory employee roster persisted to one of four interchangeable
//! file formats: delimited text, CSV, JSON and XML.
//!
//! ## Architecture
//!
//! The crate is a UI-agnostic core. It never prints, prompts or exits; every
//! operation returns typed values and a caller (a menu loop, a CLI, a test)
//! decides how to present them.
//!
//! ```text
//! caller ──► Roster (facade) ──► commands/* ──► StorageBackend ──► Codec ──► file
//!                                   │
//!                                   └──► model (Employee, income, tax)
//! ```
//!
//! - [`model`]: [`Employee`](model::Employee), its closed set of categories and
//!   the derived income and income tax.
//! - [`codec`]: one [`Codec`](codec::Codec) per [`FileFormat`](codec::FileFormat),
//!   all reading and writing the same nine-field record.
//! - [`store`]: where the data lives. [`FsBackend`](store::FsBackend) for real
//!   files, [`MemBackend`](store::MemBackend) for tests.
//! - [`commands`]: the business logic of each operation.
//! - [`roster`]: the [`Roster`](roster::Roster) facade that owns the collection.
//! - [`config`]: layered settings for the data location and format.
//!
//! ## Quick Start
//!
//! ```no_run
//! use roster::{Category, EmployeeFields, FileFormat, FsBackend, Roster};
//!
//! # fn main() -> roster::Result<()> {
//! let mut roster = Roster::open(FsBackend::new("data"), FileFormat::Csv)?;
//! let hired = roster.add(
//!     Category::Marketing,
//!     &EmployeeFields::new()
//!         .with_name("Le Thi B")
//!         .with_base_salary(10_000_000.0)
//!         .with_sales_revenue(200_000_000.0)
//!         .with_commission_rate(0.05),
//! )?;
//! assert_eq!(hired.income(), 20_000_000.0);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod roster;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use codec::FileFormat;
pub use commands::sort::DEFAULT_TOP;
pub use commands::EmployeeFields;
pub use config::RosterConfig;
pub use error::{Result, RosterError};
pub use model::{Category, Employee, EmployeeCode, EmployeeKind};
pub use roster::{LoadReport, Roster};
pub use store::{FsBackend, MemBackend, StorageBackend};
