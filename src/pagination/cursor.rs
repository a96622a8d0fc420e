//! Cursor tracking
//!
//! Finds the bottom cursor of a search page. Two response shapes carry it:
//!
//! - `replaceEntry`: a single cursor entry, taken when its type is `Bottom`
//! - `addEntries`: a list of entries, taken from the `sq-cursor-bottom` entry
//!
//! Instructions are resolved into [`Instruction`] variants as the scan reaches
//! them. A page with neither yields `None`, which ends pagination.

use crate::decode::Page;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::Deserialize;

/// Entry id of the bottom cursor in `addEntries` pages
pub const BOTTOM_ENTRY_ID: &str = "sq-cursor-bottom";

/// Cursor type of the bottom cursor in `replaceEntry` pages
pub const BOTTOM_CURSOR_TYPE: &str = "Bottom";

/// A timeline instruction that can carry a cursor
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Instruction {
    /// Replaces one entry, typically a cursor on later pages
    ReplaceEntry {
        /// The replacement entry
        entry: CursorEntry,
    },
    /// Appends entries, including cursors on the first page
    AddEntries {
        /// Appended entries
        entries: Vec<TimelineEntry>,
    },
}

impl Instruction {
    /// The bottom cursor carried by this instruction, if any
    pub fn bottom_cursor(&self) -> Result<Option<String>> {
        match self {
            Self::ReplaceEntry { entry } => {
                let cursor = &entry.content.operation.cursor;
                if cursor.cursor_type == BOTTOM_CURSOR_TYPE {
                    Ok(Some(cursor.value.clone()))
                } else {
                    Ok(None)
                }
            }
            Self::AddEntries { entries } => {
                let Some(entry) = entries.iter().find(|e| e.entry_id == BOTTOM_ENTRY_ID) else {
                    return Ok(None);
                };
                let content = OperationContent::<Cursor>::deserialize(&entry.content)
                    .map_err(|e| Error::decode(format!("{BOTTOM_ENTRY_ID}: {e}")))?;
                Ok(Some(content.operation.cursor.value))
            }
        }
    }
}

/// Cursor entry inside `replaceEntry`
#[derive(Debug, Clone, Deserialize)]
pub struct CursorEntry {
    content: OperationContent<TypedCursor>,
}

/// Entry inside `addEntries`; content is only decoded for the bottom cursor
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// Entry id such as `sq-I-t-123` or `sq-cursor-bottom`
    pub entry_id: String,
    #[serde(default)]
    content: JsonValue,
}

#[derive(Debug, Clone, Deserialize)]
struct OperationContent<C> {
    operation: Operation<C>,
}

#[derive(Debug, Clone, Deserialize)]
struct Operation<C> {
    cursor: C,
}

/// Cursor found by entry id; its type is implied
#[derive(Debug, Clone, Deserialize)]
struct Cursor {
    value: String,
}

/// Cursor of a `replaceEntry`; only the type tells top from bottom
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypedCursor {
    value: String,
    cursor_type: String,
}

/// Find the next-page token of a page; `None` means last page.
///
/// Instructions are decoded one at a time and the scan stops at the first
/// bottom cursor, so instructions after it are never inspected.
pub fn extract_cursor(page: &Page) -> Result<Option<String>> {
    for (i, raw) in page.instructions()?.iter().enumerate() {
        let instruction = Instruction::deserialize(raw)
            .map_err(|e| Error::decode(format!("timeline.instructions[{i}]: {e}")))?;
        if let Some(cursor) = instruction.bottom_cursor()? {
            return Ok(Some(cursor));
        }
    }
    Ok(None)
}
