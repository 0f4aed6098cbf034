//! Low-level byte stream parser for resource fork decoding.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a cursor over a byte slice
//! used by the header validator, the index builder and the name table reader. Every operation
//! is bounds-checked, so a hostile container can at worst produce an error.
//!
//! # Key Components
//!
//! - [`crate::file::parser::Parser::seek`] - Move to an absolute position
//! - [`crate::file::parser::Parser::advance_by`] - Skip a number of bytes
//! - [`crate::file::parser::Parser::read_le`] - Read a little-endian primitive
//! - [`crate::file::parser::Parser::read_bytes`] - Borrow a run of raw bytes
//! - [`crate::file::parser::Parser::remaining`] - Number of unread bytes
//!
//! # Usage Examples
//!
//! ```rust
//! use rsrcscope::Parser;
//!
//! let data = [0x01, 0x00, 0x03, b'F', b'o', b'o'];
//! let mut parser = Parser::new(&data);
//!
//! let version = parser.read_le::<u16>()?;
//! let len = parser.read_le::<u8>()?;
//! let name = parser.read_bytes(len as usize)?;
//!
//! assert_eq!(version, 1);
//! assert_eq!(name, b"Foo");
//! assert!(!parser.has_more_data());
//! # Ok::<(), rsrcscope::Error>(())
//! ```

use crate::{
    file::io::{read_le_at, ForkIO},
    Error::OutOfBounds,
    Result,
};

/// A cursor-based little-endian reader over a borrowed byte slice.
///
/// The parser never copies: [`Parser::read_bytes`] hands out sub-slices that carry the
/// lifetime of the underlying data, not of the parser.
pub struct Parser<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Total length of the underlying data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the underlying data is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` while unread bytes remain.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Number of bytes between the current position and the end of the data.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Move to an absolute position.
    ///
    /// Positioning exactly at the end is allowed; any read from there fails.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if `pos` lies past the end of the data.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(OutOfBounds);
        }

        self.position = pos;
        Ok(())
    }

    /// Move forward by `step` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `step` bytes remain.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        if step > self.remaining() {
            return Err(OutOfBounds);
        }

        self.position += step;
        Ok(())
    }

    /// Current position within the data.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// The complete underlying data.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Read a little-endian primitive and advance past it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the value does not fit in the remaining data.
    pub fn read_le<T: ForkIO>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }

    /// Borrow the next `len` bytes and advance past them.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `len` bytes remain.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(OutOfBounds);
        }

        let slice = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }
}
