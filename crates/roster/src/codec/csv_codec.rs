//! CSV with a header row; rows are mapped through the header names.
//!
//! Header names go through [`Column::from_name`], so files produced by older
//! exports (`Ma_NV`, `Họ Tên`, `Base_Salary`, ...) load without changes.
//! Columns that do not resolve are ignored. A row lacking a column its
//! variant requires is skipped.
//!
//! Files are written with a UTF-8 byte-order mark by default so spreadsheet
//! applications pick the right encoding.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};

use super::record::{Column, EmployeeRecord, RawRecord};
use super::{
    append_line, read_nonblank_bytes, write_atomic, Codec, Decoded, FileFormat, WriteData, BOM,
};
use crate::error::{Result, RosterError};

pub struct CsvCodec {
    bom: bool,
}

impl Default for CsvCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvCodec {
    pub fn new() -> Self {
        Self { bom: true }
    }

    pub fn with_bom(mut self, bom: bool) -> Self {
        self.bom = bom;
        self
    }

    fn header(&self) -> Result<Vec<u8>> {
        let mut bytes = if self.bom { BOM.to_vec() } else { Vec::new() };
        bytes.extend(encode_rows([Column::ALL.map(|c| c.header().to_string())])?);
        Ok(bytes)
    }
}

fn encode_rows<I>(rows: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = [String; 9]>,
{
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(&row)?;
    }
    writer
        .into_inner()
        .map_err(|err| RosterError::Io(err.into_error()))
}

fn map_row(columns: &[Option<Column>], row: &StringRecord) -> RawRecord {
    let mut record = RawRecord::default();
    for (column, value) in columns.iter().zip(row.iter()) {
        if let Some(column) = column {
            record.set(*column, value);
        }
    }
    record
}

impl Codec for CsvCodec {
    fn format(&self) -> FileFormat {
        FileFormat::Csv
    }

    fn read(&self, path: &Path) -> Result<Decoded> {
        let mut decoded = Decoded::default();
        let Some(content) = read_nonblank_bytes(path)? else {
            return Ok(decoded);
        };

        // Rows are decoded one by one; a row that is not UTF-8 is skipped
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(content.as_slice());

        let columns: Vec<Option<Column>> =
            reader.headers()?.iter().map(Column::from_name).collect();

        for (idx, row) in reader.records().enumerate() {
            let location = format!("row {}", idx + 1);
            match row {
                Ok(row) => decoded.accept(path, location, &map_row(&columns, &row)),
                Err(err) => decoded.skip(path, location, err.to_string()),
            }
        }

        Ok(decoded)
    }

    fn write(&self, path: &Path, data: WriteData<'_>) -> Result<()> {
        match data {
            WriteData::All(employees) => {
                let mut content = self.header()?;
                content.extend(encode_rows(
                    employees.iter().map(|e| EmployeeRecord::from(e).values()),
                )?);
                write_atomic(path, &content)
            }
            WriteData::Append(employee) => {
                let row = encode_rows([EmployeeRecord::from(employee).values()])?;
                append_line(path, &self.header()?, &row)
            }
        }
    }
}
