//! Length-prefixed binary format.
//!
//! Layout (all integers are `i32`, little-endian):
//!
//! ```text
//! count
//! repeated `count` times:
//!   year, course
//!   len, bytes  (name)
//!   len, bytes  (surname)
//!   len, bytes  (middle name)
//!   len, bytes  (subject 1)   len, bytes  (grades 1)
//!   len, bytes  (subject 2)   len, bytes  (grades 2)
//!   len, bytes  (subject 3)   len, bytes  (grades 3)
//! ```
//!
//! Strings are raw UTF-8 with no terminator. Decoding never reads past the
//! buffer: a length running off the end, a negative count or length, or
//! bytes that are not UTF-8 abort the decode with [`RosterError::Corrupt`].

use super::{Decoded, RecordCodec};
use crate::error::{Result, RosterError};
use crate::model::{StudentRecord, SUBJECT_COUNT};
use crate::store::backend::FileKind;
use tracing::warn;

const INT_SIZE: usize = 4;
/// Smallest possible encoded record: two ints and eight empty strings.
const MIN_RECORD_SIZE: usize = INT_SIZE * (2 + 3 + 2 * SUBJECT_COUNT);

#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec;

impl BinaryCodec {
    pub fn new() -> Self {
        Self
    }
}

fn write_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn write_len(out: &mut Vec<u8>, len: usize) -> Result<()> {
    let len = i32::try_from(len)
        .map_err(|_| RosterError::Store(format!("{} bytes is too large to encode", len)))?;
    write_i32(out, len);
    Ok(())
}

fn write_str(out: &mut Vec<u8>, s: &str) -> Result<()> {
    write_len(out, s.len())?;
    out.extend_from_slice(s.as_bytes());
    Ok(())
}

/// Bounds-checked cursor over the encoded bytes.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(RosterError::Corrupt(format!(
                "{} needs {} byte(s) at offset {}, only {} remain",
                what,
                len,
                self.pos,
                self.remaining()
            )));
        }
        let bytes: &'a [u8] = self.bytes;
        let slice = &bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_i32(&mut self, what: &str) -> Result<i32> {
        let raw = self.take(INT_SIZE, what)?;
        let mut buf = [0u8; INT_SIZE];
        buf.copy_from_slice(raw);
        Ok(i32::from_le_bytes(buf))
    }

    fn read_len(&mut self, what: &str) -> Result<usize> {
        let offset = self.pos;
        let len = self.read_i32(what)?;
        usize::try_from(len).map_err(|_| {
            RosterError::Corrupt(format!("negative {} {} at offset {}", what, len, offset))
        })
    }

    fn read_string(&mut self, what: &str) -> Result<String> {
        let len = self.read_len(what)?;
        let offset = self.pos;
        let raw = self.take(len, what)?;
        String::from_utf8(raw.to_vec()).map_err(|_| {
            RosterError::Corrupt(format!("{} at offset {} is not valid UTF-8", what, offset))
        })
    }

    fn read_record(&mut self) -> Result<StudentRecord> {
        let birth_year = self.read_i32("birth year")?;
        let course = self.read_i32("course")?;
        let name = self.read_string("name")?;
        let surname = self.read_string("surname")?;
        let middle_name = self.read_string("middle name")?;

        let mut record = StudentRecord::new(name, surname, middle_name, birth_year, course);
        for slot in 0..SUBJECT_COUNT {
            record.subjects[slot] = self.read_string("subject")?;
            record.grades[slot] = self.read_string("grades")?;
        }
        Ok(record)
    }
}

impl RecordCodec for BinaryCodec {
    fn kind(&self) -> FileKind {
        FileKind::Binary
    }

    fn encode(&self, records: &[StudentRecord]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(INT_SIZE + records.len() * MIN_RECORD_SIZE * 2);
        write_len(&mut out, records.len())?;

        for record in records {
            write_i32(&mut out, record.birth_year);
            write_i32(&mut out, record.course);
            write_str(&mut out, &record.name)?;
            write_str(&mut out, &record.surname)?;
            write_str(&mut out, &record.middle_name)?;
            for slot in 0..SUBJECT_COUNT {
                write_str(&mut out, &record.subjects[slot])?;
                write_str(&mut out, &record.grades[slot])?;
            }
        }

        Ok(out)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Decoded> {
        let mut reader = Reader::new(bytes);
        let count = reader.read_len("record count")?;

        // A corrupt count must not drive a huge allocation.
        let plausible = reader.remaining() / MIN_RECORD_SIZE;
        let mut records = Vec::with_capacity(count.min(plausible));
        for _ in 0..count {
            records.push(reader.read_record()?);
        }

        if reader.remaining() > 0 {
            warn!(
                "Ignoring {} trailing byte(s) after {} record(s)",
                reader.remaining(),
                count
            );
        }

        Ok(Decoded {
            records,
            rejected: Vec::new(),
        })
    }
}
