use crate::codec::binary::BinaryCodec;
use crate::codec::text::TextCodec;
use crate::codec::RecordCodec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;
use tracing::info;

/// Writes the whole roster to the text file.
pub fn text<B: StorageBackend>(store: &RecordStore, backend: &B) -> Result<CmdResult> {
    write(store, backend, &TextCodec::new())
}

/// Writes the whole roster to the binary file.
pub fn binary<B: StorageBackend>(store: &RecordStore, backend: &B) -> Result<CmdResult> {
    write(store, backend, &BinaryCodec::new())
}

fn write<B: StorageBackend>(
    store: &RecordStore,
    backend: &B,
    codec: &dyn RecordCodec,
) -> Result<CmdResult> {
    let kind = codec.kind();
    let bytes = codec.encode(store.records())?;
    backend.write(kind, &bytes)?;

    let location = backend.location(kind);
    info!(
        "Saved {} record(s) to {} ({} bytes)",
        store.len(),
        location.display(),
        bytes.len()
    );

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Saved {} record(s) to {} file {}",
        store.len(),
        kind,
        location.display()
    )));
    Ok(result)
}
