use crate::commands::{describe, save, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

/// Removes the record at a 0-based position and rewrites the text file.
/// An out-of-range position changes nothing.
pub fn run<B: StorageBackend>(
    store: &mut RecordStore,
    backend: &B,
    index: usize,
) -> Result<CmdResult> {
    let removed = store.remove(index)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Student deleted ({}): {}",
        index + 1,
        describe(&removed)
    )));
    let saved = save::text(store, backend)?;
    result.absorb(saved);
    Ok(result.with_affected(vec![removed]))
}
