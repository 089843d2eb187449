use crate::codec::binary::BinaryCodec;
use crate::codec::text::TextCodec;
use crate::codec::RecordCodec;
use crate::commands::{CmdMessage, CmdResult, LoadReport};
use crate::error::{Result, RosterError};
use crate::model::{SortField, SortOrder, StudentRecord};
use crate::store::backend::{FileKind, StorageBackend};
use crate::store::RecordStore;
use tracing::{debug, info, warn};

/// Replaces the store with the text file's records.
///
/// A missing text file is not an error: the load falls back to the binary
/// file and says so. Lines that fail to decode are skipped with a warning
/// each; the rest still load.
pub fn text<B: StorageBackend>(store: &mut RecordStore, backend: &B) -> Result<CmdResult> {
    let Some(bytes) = backend.read(FileKind::Text)? else {
        let location = backend.location(FileKind::Text);
        warn!(
            "Text file {} not found, falling back to binary",
            location.display()
        );
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning(format!(
            "Text file {} not found; loading the binary file instead",
            location.display()
        )));

        let loaded = binary(store, backend)?;
        result.messages.extend(loaded.messages);
        if let Some(mut report) = loaded.load_report {
            report.fell_back = true;
            result = result.with_load_report(report);
        }
        return Ok(result);
    };

    let decoded = TextCodec::new().decode(&bytes)?;
    let mut result = CmdResult::default();
    for rejected in &decoded.rejected {
        result.add_message(CmdMessage::warning(format!(
            "Skipped line {}: {}",
            rejected.line, rejected.reason
        )));
    }

    let report = LoadReport {
        source: FileKind::Text,
        loaded: decoded.records.len(),
        skipped: decoded.rejected.len(),
        fell_back: false,
    };
    install(store, decoded.records);
    finish(result, backend, report)
}

/// Replaces the store with the binary file's records.
///
/// Missing or damaged files leave the store exactly as it was.
pub fn binary<B: StorageBackend>(store: &mut RecordStore, backend: &B) -> Result<CmdResult> {
    let location = backend.location(FileKind::Binary);
    let bytes = backend
        .read(FileKind::Binary)?
        .ok_or(RosterError::NotFound(location))?;

    let decoded = BinaryCodec::new().decode(&bytes)?;
    let report = LoadReport {
        source: FileKind::Binary,
        loaded: decoded.records.len(),
        skipped: 0,
        fell_back: false,
    };
    install(store, decoded.records);
    finish(CmdResult::default(), backend, report)
}

/// Load used when a session starts.
///
/// Same as [`text`], except that a data directory holding neither file is a
/// fresh roster rather than an error.
pub fn startup<B: StorageBackend>(store: &mut RecordStore, backend: &B) -> Result<CmdResult> {
    if backend.read(FileKind::Text)?.is_none() && backend.read(FileKind::Binary)?.is_none() {
        debug!("No roster files yet, starting empty");
        return Ok(CmdResult::default());
    }
    text(store, backend)
}

fn install(store: &mut RecordStore, records: Vec<StudentRecord>) {
    store.replace_all(records);
    store.sort_by(SortField::BirthYear, SortOrder::Ascending);
}

fn finish<B: StorageBackend>(
    mut result: CmdResult,
    backend: &B,
    report: LoadReport,
) -> Result<CmdResult> {
    let location = backend.location(report.source);
    info!(
        "Loaded {} record(s) from {} ({} skipped)",
        report.loaded,
        location.display(),
        report.skipped
    );
    result.add_message(CmdMessage::success(format!(
        "Loaded {} record(s) from {} file {}",
        report.loaded,
        report.source,
        location.display()
    )));
    Ok(result.with_load_report(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::student;
    use crate::commands::save;
    use crate::commands::MessageLevel;
    use crate::store::mem_backend::MemBackend;

    fn years(store: &RecordStore) -> Vec<i32> {
        store.records().iter().map(|r| r.birth_year).collect()
    }

    fn saved_backend(kind: FileKind, records: &[StudentRecord]) -> MemBackend {
        let backend = MemBackend::new();
        let mut store = RecordStore::new();
        for record in records {
            store.push(record.clone());
        }
        match kind {
            FileKind::Text => save::text(&store, &backend).unwrap(),
            FileKind::Binary => save::binary(&store, &backend).unwrap(),
        };
        backend
    }

    #[test]
    fn text_load_replaces_store_and_sorts_by_year() {
        let backend = saved_backend(
            FileKind::Text,
            &[student("Anna", 2005), student("Boris", 1999), student("Vera", 2010)],
        );
        let mut store = RecordStore::new();
        store.push(student("Stale", 1950));

        let result = text(&mut store, &backend).unwrap();

        assert_eq!(years(&store), vec![1999, 2005, 2010]);
        let report = result.load_report.unwrap();
        assert_eq!(report.source, FileKind::Text);
        assert_eq!(report.loaded, 3);
        assert!(!report.fell_back);
    }

    #[test]
    fn text_round_trip_keeps_every_field() {
        let original = vec![student("Anna Maria", 1999), student("Борис", 2001)];
        let backend = saved_backend(FileKind::Text, &original);

        let mut store = RecordStore::new();
        text(&mut store, &backend).unwrap();
        assert_eq!(store.records(), original.as_slice());
    }

    #[test]
    fn malformed_lines_are_skipped_with_warnings() {
        let backend = MemBackend::new();
        backend.put(
            FileKind::Text,
            "2001|2|Anna|Ivanova|Petrovna|Math|5,4,5|Art|4,4,4|Music|3,3,3\n\
             not|enough|fields\n\
             1999|3|Boris|Petrov|Ivanovich|Math|5,5,5|Art|4,4,4|Music|3,3,3\n",
        );
        let mut store = RecordStore::new();

        let result = text(&mut store, &backend).unwrap();

        assert_eq!(years(&store), vec![1999, 2001]);
        assert!(result.has_warnings());
        assert!(result.messages[0].content.contains("line 2"));
        assert_eq!(result.load_report.unwrap().skipped, 1);
    }

    #[test]
    fn missing_text_falls_back_to_binary() {
        let backend = saved_backend(FileKind::Binary, &[student("Anna", 2001)]);
        let mut store = RecordStore::new();

        let result = text(&mut store, &backend).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        let report = result.load_report.unwrap();
        assert_eq!(report.source, FileKind::Binary);
        assert!(report.fell_back);
    }

    #[test]
    fn missing_both_files_is_not_found_and_keeps_store() {
        let backend = MemBackend::new();
        let mut store = RecordStore::new();
        store.push(student("Keep", 2000));

        let err = text(&mut store, &backend).unwrap_err();
        assert!(matches!(err, RosterError::NotFound(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn binary_round_trip_and_sort() {
        let original = vec![student("Vera", 2010), student("Anna", 1999)];
        let backend = saved_backend(FileKind::Binary, &original);

        let mut store = RecordStore::new();
        binary(&mut store, &backend).unwrap();
        assert_eq!(years(&store), vec![1999, 2010]);
    }

    #[test]
    fn corrupt_binary_leaves_store_unchanged() {
        let backend = MemBackend::new();
        let mut bytes = 1i32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&2001i32.to_le_bytes());
        backend.put(FileKind::Binary, bytes);

        let mut store = RecordStore::new();
        store.push(student("Keep", 2000));

        let err = binary(&mut store, &backend).unwrap_err();
        assert!(matches!(err, RosterError::Corrupt(_)));
        assert_eq!(store.records()[0].name, "Keep");
    }

    #[test]
    fn startup_with_no_files_is_empty_and_quiet() {
        let backend = MemBackend::new();
        let mut store = RecordStore::new();
        let result = startup(&mut store, &backend).unwrap();
        assert!(result.messages.is_empty());
        assert!(store.is_empty());
    }
}
