use super::{Decoded, RecordCodec, RejectedLine};
use crate::error::Result;
use crate::model::{StudentRecord, SUBJECT_COUNT};
use crate::store::backend::FileKind;
use tracing::warn;

pub const DELIMITER: char = '|';
pub const FIELD_COUNT: usize = 5 + 2 * SUBJECT_COUNT;

/// Pipe-delimited text format.
///
/// Field order per line: year, course, name, surname, middle name, then
/// subject/grades for each of the three subjects.
///
/// Decoding checks structure only: field count, numeric year and course,
/// valid UTF-8. Field rules belong to the entry paths, so tightening a
/// configured bound never drops records that are already on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl TextCodec {
    pub fn new() -> Self {
        Self
    }

    fn encode_record(record: &StudentRecord) -> String {
        let mut fields = vec![
            record.birth_year.to_string(),
            record.course.to_string(),
            record.name.clone(),
            record.surname.clone(),
            record.middle_name.clone(),
        ];
        for slot in 0..SUBJECT_COUNT {
            fields.push(record.subjects[slot].clone());
            fields.push(record.grades[slot].clone());
        }
        fields.join(&DELIMITER.to_string())
    }

    fn decode_line(line: &str) -> std::result::Result<StudentRecord, String> {
        let fields: Vec<&str> = line.split(DELIMITER).collect();
        if fields.len() != FIELD_COUNT {
            return Err(format!(
                "expected {} fields, found {}",
                FIELD_COUNT,
                fields.len()
            ));
        }

        let birth_year = fields[0]
            .parse::<i32>()
            .map_err(|_| format!("birth year '{}' is not a number", fields[0]))?;
        let course = fields[1]
            .parse::<i32>()
            .map_err(|_| format!("course '{}' is not a number", fields[1]))?;

        let mut record =
            StudentRecord::new(fields[2], fields[3], fields[4], birth_year, course);
        for slot in 0..SUBJECT_COUNT {
            record.subjects[slot] = fields[5 + slot * 2].to_string();
            record.grades[slot] = fields[6 + slot * 2].to_string();
        }
        Ok(record)
    }
}

impl RecordCodec for TextCodec {
    fn kind(&self) -> FileKind {
        FileKind::Text
    }

    fn encode(&self, records: &[StudentRecord]) -> Result<Vec<u8>> {
        let mut out = String::new();
        for record in records {
            out.push_str(&Self::encode_record(record));
            out.push('\n');
        }
        Ok(out.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Decoded> {
        let mut decoded = Decoded::default();

        for (i, raw) in bytes.split(|b| *b == b'\n').enumerate() {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let parsed = std::str::from_utf8(raw)
                .map_err(|_| "line is not valid UTF-8".to_string())
                .and_then(|line| {
                    if line.trim().is_empty() {
                        Ok(None)
                    } else {
                        Self::decode_line(line).map(Some)
                    }
                });
            match parsed {
                Ok(Some(record)) => decoded.records.push(record),
                Ok(None) => {}
                Err(reason) => {
                    warn!("Skipping line {}: {}", i + 1, reason);
                    decoded.rejected.push(RejectedLine {
                        line: i + 1,
                        reason,
                    });
                }
            }
        }

        Ok(decoded)
    }
}
