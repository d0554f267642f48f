//! Inner text encoding of a record map
//!
//! Format: `|key:value` per cell, concatenated in map order. No escaping:
//! keys or values containing `|` (or keys containing `:`) do not survive.

use indexmap::IndexMap;

use super::cell::{CELL_DELIMITER, Cell};
use crate::error::Result;

/// Encode every cell, in iteration order
pub fn encode<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> String {
    let mut out = String::new();
    for cell in cells {
        cell.write_to(&mut out);
    }
    out
}

/// Decode encoded text into an insertion-ordered map.
///
/// Empty segments are skipped. A later duplicate key overwrites the earlier
/// value but keeps the earlier position. Any malformed segment fails the
/// whole decode.
pub fn decode(text: &str) -> Result<IndexMap<String, Cell>> {
    let mut cells = IndexMap::new();
    for segment in text.split(CELL_DELIMITER) {
        if segment.is_empty() {
            continue;
        }
        let cell = Cell::from_segment(segment)?;
        if let Some(previous) = cells.insert(cell.key().to_string(), cell) {
            log::debug!("Duplicate record key {:?}, keeping later value", previous.key());
        }
    }
    Ok(cells)
}
