//! Response decoding module
//!
//! Wraps raw search responses as [`Page`]s and extracts normalized
//! [`PostRecord`]s from them.

mod extractor;
mod page;
mod types;

pub use extractor::{extract_records, parse_date, upgrade_profile_image, RecordExtractor};
pub use page::Page;
pub use types::{Author, Media, PostRecord};
