use super::backend::StorageBackend;
use crate::codec::{codec_for, CodecOptions, Decoded, FileFormat, WriteData};
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_FILE_STEM: &str = "employees";

/// Stores the roster as `<root>/<file_stem><extension>`.
pub struct FsBackend {
    root: PathBuf,
    file_stem: String,
    options: CodecOptions,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            file_stem: DEFAULT_FILE_STEM.to_string(),
            options: CodecOptions::default(),
        }
    }

    pub fn with_file_stem(mut self, stem: &str) -> Self {
        let stem = stem.trim();
        if !stem.is_empty() {
            self.file_stem = stem.to_string();
        }
        self
    }

    pub fn with_csv_bom(mut self, bom: bool) -> Self {
        self.options.csv_bom = bom;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }
}

impl StorageBackend for FsBackend {
    fn load(&self, format: FileFormat) -> Result<Decoded> {
        let path = self.location(format);
        let decoded = codec_for(format, self.options).read(&path)?;
        debug!(
            path = %path.display(),
            loaded = decoded.employees.len(),
            skipped = decoded.skipped.len(),
            "loaded roster"
        );
        Ok(decoded)
    }

    fn save(&self, format: FileFormat, data: WriteData<'_>) -> Result<()> {
        let path = self.location(format);
        codec_for(format, self.options).write(&path, data)?;
        match data {
            WriteData::All(employees) => {
                debug!(path = %path.display(), count = employees.len(), "rewrote roster")
            }
            WriteData::Append(employee) => {
                debug!(path = %path.display(), code = %employee.code(), "appended record")
            }
        }
        Ok(())
    }

    fn location(&self, format: FileFormat) -> PathBuf {
        self.root
            .join(format!("{}{}", self.file_stem, format.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn location_joins_stem_and_extension() {
        let backend = FsBackend::new("/data").with_file_stem("staff");
        assert_eq!(
            backend.location(FileFormat::Csv),
            PathBuf::from("/data/staff.csv")
        );
        assert_eq!(
            FsBackend::new("/data").location(FileFormat::Xml),
            PathBuf::from("/data/employees.xml")
        );
    }

    #[test]
    fn blank_stem_keeps_default() {
        let backend = FsBackend::new("/data").with_file_stem("  ");
        assert_eq!(backend.file_stem(), DEFAULT_FILE_STEM);
    }

    #[test]
    fn missing_directory_loads_empty() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("not-yet"));
        for format in FileFormat::ALL {
            let decoded = backend.load(format).unwrap();
            assert!(decoded.employees.is_empty());
            assert!(decoded.skipped.is_empty());
        }
    }
}
