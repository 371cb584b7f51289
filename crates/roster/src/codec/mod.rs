//! # Codec Layer
//!
//! One [`Codec`] per file format, all sharing the same read/write contract.
//! Codecs never see the roster: they receive a path plus transient references
//! to employees and hand back owned values.
//!
//! ## Read Contract
//!
//! - A missing or blank file is an empty collection, not an error.
//! - Records are validated one by one. A record that fails (wrong field
//!   count, unknown category label, invalid code, non-numeric or missing
//!   required field) is skipped and reported in [`Decoded::skipped`]; the
//!   read still returns every record that did parse.
//! - A JSON or XML document that is not well-formed as a whole is a
//!   [`RosterError::Parse`]: there is nothing to salvage, and an empty result
//!   would let the next write destroy the file.
//!
//! ## Write Contract
//!
//! - [`WriteData::All`] truncates and rewrites the file (temp file + rename).
//! - [`WriteData::Append`] adds one record, writing the header or document
//!   skeleton first when the file is absent or blank.
//!
//! ## Field Layout
//!
//! Every format stores the same nine fields in the same order, see
//! [`record::Column`]. Fields a variant lacks are written as `0.0`.
//!
//! | Format | Extension | Codec |
//! |--------|-----------|-------|
//! | Delimited text | `.txt` | [`text_codec::TextCodec`] |
//! | CSV | `.csv` | [`csv_codec::CsvCodec`] |
//! | JSON | `.json` | [`json_codec::JsonCodec`] |
//! | XML | `.xml` | [`xml_codec::XmlCodec`] |

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::str::FromStr;

use tracing::warn;
use uuid::Uuid;

use crate::error::{Result, RosterError};
use crate::model::{Employee, FieldWarning};

pub mod csv_codec;
pub mod json_codec;
pub mod record;
pub mod text_codec;
pub mod xml_codec;

use record::RawRecord;

/// UTF-8 byte-order mark.
pub(crate) const BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Text,
    Csv,
    Json,
    Xml,
}

impl FileFormat {
    pub const ALL: [FileFormat; 4] = [
        FileFormat::Text,
        FileFormat::Csv,
        FileFormat::Json,
        FileFormat::Xml,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Text => ".txt",
            FileFormat::Csv => ".csv",
            FileFormat::Json => ".json",
            FileFormat::Xml => ".xml",
        }
    }

    /// Accepts `.csv`, `csv`, `CSV`, ...
    pub fn from_extension(ext: &str) -> Result<Self> {
        let normalized = ext.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "txt" => Ok(FileFormat::Text),
            "csv" => Ok(FileFormat::Csv),
            "json" => Ok(FileFormat::Json),
            "xml" => Ok(FileFormat::Xml),
            _ => Err(RosterError::UnsupportedFormat(ext.to_string())),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FileFormat {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s)
    }
}

/// What a write call persists.
#[derive(Debug, Clone, Copy)]
pub enum WriteData<'a> {
    /// The full collection; the file is replaced.
    All(&'a [Employee]),
    /// One new record added to the end of the existing file.
    Append(&'a Employee),
}

/// A record the reader could not use.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// Where in the file, e.g. `line 4` or `entry 2`.
    pub location: String,
    pub reason: String,
}

/// The outcome of a read.
#[derive(Debug, Default)]
pub struct Decoded {
    pub employees: Vec<Employee>,
    pub skipped: Vec<SkippedRecord>,
    /// Values the model coerced while the records were rebuilt.
    pub warnings: Vec<FieldWarning>,
}

impl Decoded {
    pub(crate) fn accept(&mut self, path: &Path, location: String, record: &RawRecord) {
        match record.decode() {
            Ok((employee, warnings)) => {
                self.employees.push(employee);
                self.warnings.extend(warnings);
            }
            Err(reason) => self.skip(path, location, reason),
        }
    }

    pub(crate) fn skip(&mut self, path: &Path, location: String, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(path = %path.display(), %location, %reason, "skipping record");
        self.skipped.push(SkippedRecord { location, reason });
    }
}

/// Format-specific persistence.
pub trait Codec {
    fn format(&self) -> FileFormat;

    /// Reads every record that parses. Missing files yield an empty result.
    fn read(&self, path: &Path) -> Result<Decoded>;

    /// Overwrites or appends, see [`WriteData`].
    fn write(&self, path: &Path, data: WriteData<'_>) -> Result<()>;
}

/// Knobs that only some formats care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Prefix CSV files with a UTF-8 byte-order mark for spreadsheet apps.
    pub csv_bom: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self { csv_bom: true }
    }
}

pub fn codec_for(format: FileFormat, options: CodecOptions) -> Box<dyn Codec> {
    match format {
        FileFormat::Text => Box::new(text_codec::TextCodec),
        FileFormat::Csv => Box::new(csv_codec::CsvCodec::new().with_bom(options.csv_bom)),
        FileFormat::Json => Box::new(json_codec::JsonCodec),
        FileFormat::Xml => Box::new(xml_codec::XmlCodec),
    }
}

/// File contents, or `None` when the file does not exist.
pub(crate) fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(RosterError::Io(err)),
    }
}

/// Non-blank file contents, or `None` for a missing or blank file.
pub(crate) fn read_nonblank(path: &Path) -> Result<Option<String>> {
    Ok(read_existing(path)?
        .filter(|content| !content.trim_start_matches('\u{feff}').trim().is_empty()))
}

/// Raw file bytes, or `None` when the file does not exist.
fn read_bytes(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(RosterError::Io(err)),
    }
}

/// Non-blank raw bytes with any byte-order mark removed.
///
/// Line-based formats decode each record on its own, so one row in a legacy
/// code page is skipped instead of failing the whole read.
pub(crate) fn read_nonblank_bytes(path: &Path) -> Result<Option<Vec<u8>>> {
    Ok(read_bytes(path)?.filter(|bytes| !is_blank(bytes)).map(|mut bytes| {
        if bytes.starts_with(BOM) {
            bytes.drain(..BOM.len());
        }
        bytes
    }))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(RosterError::Io)?;
        }
    }
    Ok(())
}

/// Replaces the file in one step: write a sibling temp file, then rename.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    ensure_parent(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));

    fs::write(&tmp_path, contents).map_err(RosterError::Io)?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(RosterError::Io(err));
    }
    Ok(())
}

/// Appends one encoded record to a line-oriented file.
///
/// A missing or blank file is rewritten as `header + record`. Otherwise the
/// record is appended, after a line break if the file lacks a trailing one.
pub(crate) fn append_line(path: &Path, header: &[u8], record: &[u8]) -> Result<()> {
    let existing = match read_bytes(path)? {
        Some(bytes) if !is_blank(&bytes) => bytes,
        _ => {
            let mut contents = header.to_vec();
            contents.extend_from_slice(record);
            return write_atomic(path, &contents);
        }
    };

    let mut buf = Vec::with_capacity(record.len() + 1);
    if existing.last() != Some(&b'\n') {
        buf.push(b'\n');
    }
    buf.extend_from_slice(record);

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(RosterError::Io)?;
    file.write_all(&buf).map_err(RosterError::Io)?;
    Ok(())
}

fn is_blank(bytes: &[u8]) -> bool {
    let bytes = bytes.strip_prefix(BOM).unwrap_or(bytes);
    bytes.iter().all(u8::is_ascii_whitespace)
}
