//! Low-level byte order and safe reading utilities for resource fork parsing.
//!
//! This module provides bounds-checked, little-endian reading of the primitive types that
//! appear in GS/OS resource forks. Every multi-byte integer in the format is little-endian and
//! unaligned, so reads go through fixed-size byte arrays rather than pointer casts.
//!
//! # Key Components
//!
//! - [`crate::file::io::ForkIO`] - Trait describing how a primitive is decoded from bytes
//! - [`crate::file::io::read_le`] - Read a value from the start of a buffer
//! - [`crate::file::io::read_le_at`] - Read a value at an offset and advance the offset
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use rsrcscope::file::io::read_le_at;
//!
//! let data = [0x06, 0x80, 0x01, 0x00, 0x00, 0x00];
//! let mut offset = 0;
//!
//! let res_type: u16 = read_le_at(&data, &mut offset)?; // offset: 0 -> 2
//! let res_id: u32 = read_le_at(&data, &mut offset)?;   // offset: 2 -> 6
//!
//! assert_eq!(res_type, 0x8006);
//! assert_eq!(res_id, 1);
//! # Ok::<(), rsrcscope::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All functions return [`crate::Result<T>`] and report [`crate::Error::OutOfBounds`] if the
//! buffer holds too few bytes. The offset is left untouched on failure.

use crate::{Error::OutOfBounds, Result};

/// Trait for implementing type-specific safe binary data reading operations.
///
/// Each implementation names the fixed-size byte array that holds its encoding
/// (e.g. `[u8; 4]` for `u32`) and converts it from little-endian order.
pub trait ForkIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

impl ForkIO for u32 {
    type Bytes = [u8; 4];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u32::from_le_bytes(bytes)
    }
}

impl ForkIO for u16 {
    type Bytes = [u8; 2];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u16::from_le_bytes(bytes)
    }
}

impl ForkIO for u8 {
    type Bytes = [u8; 1];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u8::from_le_bytes(bytes)
    }
}

/// Safely reads a value of type `T` in little-endian byte order from the start of a buffer.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if the buffer is shorter than `T`.
pub fn read_le<T: ForkIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Safely reads a value of type `T` in little-endian byte order at `offset`.
///
/// On success the offset is advanced by the size of `T`.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes remain after
/// `offset`, including when `offset` itself lies past the end of the buffer.
pub fn read_le_at<T: ForkIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds);
    };
    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}
