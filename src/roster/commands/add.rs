use crate::commands::{describe, save, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::StudentRecord;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;
use crate::validation::{validate_record, CourseBounds};

/// Validates and appends a record, then rewrites the text file.
pub fn run<B: StorageBackend>(
    store: &mut RecordStore,
    backend: &B,
    record: StudentRecord,
    bounds: CourseBounds,
) -> Result<CmdResult> {
    validate_record(&record, bounds)?;

    let capacity_before = store.capacity();
    store.push(record.clone());

    let mut result = CmdResult::default();
    if store.capacity() > capacity_before {
        result.add_message(CmdMessage::info(format!(
            "Roster capacity increased to {}",
            store.capacity()
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Student added ({}): {}",
        store.len(),
        describe(&record)
    )));

    let saved = save::text(store, backend)?;
    result.absorb(saved);
    Ok(result.with_affected(vec![record]))
}
