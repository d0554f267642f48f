//! A single stored record
//!
//! The value is always kept as a string; integer and float access are views
//! that parse on read and format on write.

use crate::error::{RecordError, Result};

/// Separator written before every cell in the encoded text
pub const CELL_DELIMITER: char = '|';
/// Separator between a key and its value
pub const KEY_VALUE_SEPARATOR: char = ':';

/// One key/value record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    key: String,
    value: String,
}

impl Cell {
    /// Create an empty cell for `key`
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: String::new(),
        }
    }

    /// Parse a `key:value` segment, splitting at the first `:`
    pub fn from_segment(segment: &str) -> Result<Self> {
        match segment.split_once(KEY_VALUE_SEPARATOR) {
            Some((key, value)) if !key.is_empty() => Ok(Self {
                key: key.to_string(),
                value: value.to_string(),
            }),
            _ => Err(RecordError::malformed(segment)),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn string_value(&self) -> &str {
        &self.value
    }

    /// Integer view (empty reads as 0)
    pub fn int_value(&self) -> Result<i32> {
        if self.value.is_empty() {
            return Ok(0);
        }
        self.value
            .parse()
            .map_err(|source| RecordError::ParseInt {
                key: self.key.clone(),
                value: self.value.clone(),
                source,
            })
    }

    /// Float view (empty reads as 0.0)
    pub fn float_value(&self) -> Result<f32> {
        if self.value.is_empty() {
            return Ok(0.0);
        }
        self.value
            .parse()
            .map_err(|source| RecordError::ParseFloat {
                key: self.key.clone(),
                value: self.value.clone(),
                source,
            })
    }

    pub fn set_string(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn set_int(&mut self, value: i32) {
        self.value = value.to_string();
    }

    pub fn set_float(&mut self, value: f32) {
        self.value = value.to_string();
    }

    /// Append this cell's `|key:value` fragment
    pub fn write_to(&self, out: &mut String) {
        out.push(CELL_DELIMITER);
        out.push_str(&self.key);
        out.push(KEY_VALUE_SEPARATOR);
        out.push_str(&self.value);
    }
}
