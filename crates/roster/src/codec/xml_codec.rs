//! XML: one `<employee>` element per record, one leaf element per field.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <employees>
//!   <employee>
//!     <code>HC0001</code>
//!     <name>Nguyen Van A</name>
//!     ...
//!   </employee>
//! </employees>
//! ```
//!
//! Decoding is lenient about names: any root, any record element, leaves in
//! any order, leaf names resolved through [`Column::from_name`]. Attributes
//! are ignored.

use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use super::record::{Column, EmployeeRecord, RawRecord};
use super::{read_nonblank, write_atomic, Codec, Decoded, FileFormat, WriteData};
use crate::error::{Result, RosterError};
use crate::model::Employee;

const ROOT: &str = "employees";
const RECORD: &str = "employee";

pub struct XmlCodec;

type XmlWriter = Writer<Vec<u8>>;

fn new_writer() -> Result<XmlWriter> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(RosterError::xml)?;
    Ok(writer)
}

fn finish(writer: XmlWriter) -> Vec<u8> {
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    bytes
}

fn write_record(writer: &mut XmlWriter, employee: &Employee) -> Result<()> {
    let values = EmployeeRecord::from(employee).values();
    writer
        .write_event(Event::Start(BytesStart::new(RECORD)))
        .map_err(RosterError::xml)?;
    for (column, value) in Column::ALL.into_iter().zip(values.iter()) {
        writer
            .write_event(Event::Start(BytesStart::new(column.key())))
            .map_err(RosterError::xml)?;
        writer
            .write_event(Event::Text(BytesText::new(value)))
            .map_err(RosterError::xml)?;
        writer
            .write_event(Event::End(BytesEnd::new(column.key())))
            .map_err(RosterError::xml)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(RECORD)))
        .map_err(RosterError::xml)?;
    Ok(())
}

fn render(employees: &[Employee]) -> Result<Vec<u8>> {
    let mut writer = new_writer()?;
    writer
        .write_event(Event::Start(BytesStart::new(ROOT)))
        .map_err(RosterError::xml)?;
    for employee in employees {
        write_record(&mut writer, employee)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(ROOT)))
        .map_err(RosterError::xml)?;
    Ok(finish(writer))
}

fn malformed(path: &Path, reader: &Reader<&[u8]>, err: impl std::fmt::Display) -> RosterError {
    RosterError::parse(
        path,
        format!("{} (at byte {})", err, reader.buffer_position()),
    )
}

fn new_reader(content: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);
    reader
}

/// Open element count while walking the document: 1 inside the root,
/// 2 inside a record, 3 inside a leaf.
const IN_RECORD: usize = 2;
const IN_LEAF: usize = 3;

impl Codec for XmlCodec {
    fn format(&self) -> FileFormat {
        FileFormat::Xml
    }

    fn read(&self, path: &Path) -> Result<Decoded> {
        let mut decoded = Decoded::default();
        let Some(content) = read_nonblank(path)? else {
            return Ok(decoded);
        };

        let mut reader = new_reader(&content);
        let mut depth = 0usize;
        let mut seen_root = false;
        let mut records = 0usize;
        let mut record = RawRecord::default();
        let mut leaf: Option<Column> = None;
        let mut text = String::new();

        loop {
            let event = reader
                .read_event()
                .map_err(|err| malformed(path, &reader, err))?;
            match event {
                Event::Start(e) => {
                    depth += 1;
                    match depth {
                        1 => seen_root = true,
                        IN_RECORD => {
                            records += 1;
                            record = RawRecord::default();
                        }
                        IN_LEAF => {
                            leaf = Column::from_name(&String::from_utf8_lossy(
                                e.local_name().as_ref(),
                            ));
                            text.clear();
                        }
                        _ => {}
                    }
                }
                Event::Empty(e) => match depth + 1 {
                    1 => seen_root = true,
                    IN_RECORD => {
                        records += 1;
                        decoded.accept(path, format!("record {}", records), &RawRecord::default());
                    }
                    IN_LEAF => {
                        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                        if let Some(column) = Column::from_name(&name) {
                            record.set(column, "");
                        }
                    }
                    _ => {}
                },
                Event::Text(t) if depth == IN_LEAF => {
                    let value = t.unescape().map_err(|err| malformed(path, &reader, err))?;
                    text.push_str(&value);
                }
                Event::CData(c) if depth == IN_LEAF => {
                    text.push_str(&String::from_utf8_lossy(&c));
                }
                Event::End(_) => {
                    match depth {
                        IN_LEAF => {
                            if let Some(column) = leaf.take() {
                                record.set(column, text.as_str());
                            }
                        }
                        IN_RECORD => {
                            decoded.accept(path, format!("record {}", records), &record);
                        }
                        _ => {}
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !seen_root {
            return Err(RosterError::parse(path, "no root element"));
        }
        if depth != 0 {
            return Err(RosterError::parse(path, "unexpected end of document"));
        }

        Ok(decoded)
    }

    fn write(&self, path: &Path, data: WriteData<'_>) -> Result<()> {
        match data {
            WriteData::All(employees) => write_atomic(path, &render(employees)?),
            WriteData::Append(employee) => append(path, employee),
        }
    }
}

/// Re-emits the existing document with the new record placed before the
/// root's closing tag.
fn append(path: &Path, employee: &Employee) -> Result<()> {
    let Some(content) = read_nonblank(path)? else {
        return write_atomic(path, &render(std::slice::from_ref(employee))?);
    };

    let mut reader = new_reader(&content);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let mut depth = 0usize;
    let mut inserted = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|err| malformed(path, &reader, err))?;
        match event {
            Event::Start(e) => {
                depth += 1;
                writer
                    .write_event(Event::Start(e))
                    .map_err(RosterError::xml)?;
            }
            Event::End(e) => {
                if depth == 1 && !inserted {
                    write_record(&mut writer, employee)?;
                    inserted = true;
                }
                depth = depth.saturating_sub(1);
                writer.write_event(Event::End(e)).map_err(RosterError::xml)?;
            }
            Event::Empty(e) if depth == 0 && !inserted => {
                // `<employees/>`: open it up so the record has a parent
                let end = e.to_end().into_owned();
                writer
                    .write_event(Event::Start(e.clone()))
                    .map_err(RosterError::xml)?;
                write_record(&mut writer, employee)?;
                writer
                    .write_event(Event::End(end))
                    .map_err(RosterError::xml)?;
                inserted = true;
            }
            Event::Eof => break,
            other => writer.write_event(other).map_err(RosterError::xml)?,
        }
    }

    if !inserted || depth != 0 {
        return Err(RosterError::parse(path, "no complete root element"));
    }

    write_atomic(path, &finish(writer))
}
