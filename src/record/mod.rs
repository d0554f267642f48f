//! Typed key-value records
//!
//! - `cell`: one record, a canonical string with int/float views
//! - `codec`: the `|key:value` text encoding
//! - `store`: the record map, dirty tracking, save/load

pub mod cell;
pub mod codec;
pub mod store;

pub use cell::Cell;
pub use codec::{decode, encode};
pub use store::{LoadOutcome, RecordStore, SaveOutcome};
