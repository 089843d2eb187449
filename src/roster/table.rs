//! # Table Renderer
//!
//! Renders the roster as a fixed-column text table sized to the console.
//!
//! Layout math is character-counted (see [`crate::text`]) so Cyrillic and
//! other multi-byte text pads correctly. Each column is as wide as its widest
//! header or cell, capped at a per-cell maximum derived from console width.
//! Cells longer than their column wrap onto extra physical lines instead of
//! being truncated:
//!
//! ```text
//! |# |Year |Course |Name     |...
//! ---------------------------...
//! |1 |2001 |2      |Alexandr |...
//! |  |     |       |a        |...
//! ---------------------------...
//! ```

use crate::model::{StudentRecord, SUBJECT_COUNT};
use crate::text::{char_width, chunk_chars, pad_right};
use console::Term;

pub const DEFAULT_CONSOLE_WIDTH: usize = 120;
pub const MIN_CELL_WIDTH: usize = 8;
pub const MAX_CELL_WIDTH: usize = 20;
const MIN_TABLE_WIDTH: usize = 80;
const WIDTH_MARGIN: usize = 5;
/// Per-column overhead: trailing space, border, and slack.
const COLUMN_OVERHEAD: usize = 3;

pub const HEADERS: [&str; 6 + 2 * SUBJECT_COUNT] = [
    "#",
    "Year",
    "Course",
    "Name",
    "Surname",
    "Middle name",
    "Subject 1",
    "Grades 1",
    "Subject 2",
    "Grades 2",
    "Subject 3",
    "Grades 3",
];

pub const EMPTY_MESSAGE: &str = "No students.";

/// Console width in columns, or [`DEFAULT_CONSOLE_WIDTH`] when stdout is not
/// a terminal.
pub fn terminal_width() -> usize {
    Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .filter(|cols| *cols > 0)
        .unwrap_or(DEFAULT_CONSOLE_WIDTH)
}

/// Widest a single column may grow for the given console width.
pub fn max_cell_width(console_width: usize) -> usize {
    let columns = HEADERS.len();
    let table_width = MIN_TABLE_WIDTH.max(console_width.saturating_sub(WIDTH_MARGIN));
    let per_column = table_width.saturating_sub(columns * COLUMN_OVERHEAD) / columns;
    per_column.clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH)
}

/// Cell texts for one record, starting with its 1-based row number.
pub fn row_cells(number: usize, record: &StudentRecord) -> Vec<String> {
    let mut cells = vec![
        number.to_string(),
        record.birth_year.to_string(),
        record.course.to_string(),
        record.name.clone(),
        record.surname.clone(),
        record.middle_name.clone(),
    ];
    for slot in 0..SUBJECT_COUNT {
        cells.push(record.subjects[slot].clone());
        cells.push(record.grades[slot].clone());
    }
    cells
}

/// Column widths: widest header or cell per column, capped at `cap`.
pub fn column_widths(rows: &[Vec<String>], cap: usize) -> Vec<usize> {
    HEADERS
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| char_width(cell))
                .fold(char_width(header), usize::max)
                .min(cap)
        })
        .collect()
}

/// Renders every record as a wrapped, aligned table.
pub fn render_table(records: &[StudentRecord], console_width: usize) -> String {
    if records.is_empty() {
        return format!("{}\n", EMPTY_MESSAGE);
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .enumerate()
        .map(|(i, record)| row_cells(i + 1, record))
        .collect();
    let widths = column_widths(&rows, max_cell_width(console_width));
    let separator = separator_line(&widths);

    let headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let mut out = String::new();
    push_row(&mut out, &headers, &widths);
    out.push_str(&separator);

    for row in &rows {
        push_row(&mut out, row, &widths);
        out.push_str(&separator);
    }
    out
}

fn separator_line(widths: &[usize]) -> String {
    let total = 1 + widths.iter().map(|w| w + 2).sum::<usize>();
    format!("{}\n", "-".repeat(total))
}

/// Writes one logical row, spilling wrapped cells onto extra physical lines.
fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let wrapped: Vec<Vec<String>> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| chunk_chars(cell, *width))
        .collect();
    let height = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);

    for line in 0..height {
        out.push('|');
        for (chunks, width) in wrapped.iter().zip(widths) {
            let chunk = chunks.get(line).map(String::as_str).unwrap_or("");
            out.push_str(&pad_right(chunk, *width + 1));
            out.push('|');
        }
        out.push('\n');
    }
}
