use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::RecordStore;
use crate::table::render_table;

/// Renders the roster as a table sized for `console_width` columns.
pub fn run(store: &RecordStore, console_width: usize) -> Result<CmdResult> {
    let rendered = render_table(store.records(), console_width);
    Ok(CmdResult::default()
        .with_affected(store.records().to_vec())
        .with_rendered(rendered))
}
