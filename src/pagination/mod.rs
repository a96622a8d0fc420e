//! Pagination module
//!
//! # Overview
//!
//! The search API pages with an opaque bottom cursor. [`extract_cursor`]
//! finds it in a raw page, [`CursorToken`] tracks it across pages, and the
//! [`Paginator`] drives fetch → extract → advance until the cursor runs out,
//! a short page arrives, or the result limit is met.

mod cursor;
mod paginator;
mod types;

pub use cursor::{
    extract_cursor, CursorEntry, Instruction, TimelineEntry, BOTTOM_CURSOR_TYPE,
    BOTTOM_ENTRY_ID,
};
pub use paginator::{Paginator, RecordStream};
pub use types::{CursorToken, PaginationState, StopReason};
