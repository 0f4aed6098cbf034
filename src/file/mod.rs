//! Byte sources and low-level reading for resource fork containers.
//!
//! This module decides where the bytes of a fork live and provides the bounds-checked
//! primitives the parser is built on.
//!
//! # Architecture
//!
//! - **Ownership modes** - [`Input`] is either a borrowed slice owned by the caller or an owned
//!   [`Backend`]. The mode is fixed at construction and carried in the type: a fork over a
//!   borrowed slice is `ResourceFork<'a>`, an owning fork is `ResourceFork<'static>`.
//! - **Backends** - [`memory::Memory`] owns a vector (handed over or copied),
//!   [`physical::Physical`] memory-maps a file.
//! - **Reading** - [`io`] decodes little-endian primitives, [`parser::Parser`] is a cursor on top.
//!
//! # Usage Examples
//!
//! ```rust
//! use rsrcscope::Input;
//!
//! let bytes = vec![0u8; 64];
//!
//! // Borrow, caller keeps ownership and must outlive every reader
//! let borrowed = Input::Borrowed(&bytes);
//! assert_eq!(borrowed.len(), 64);
//!
//! // Private copy, independent of `bytes` from here on
//! let copied: Input<'static> = Input::copy_of(&bytes);
//! assert_eq!(copied.data(), borrowed.data());
//! ```

pub mod io;
pub mod memory;
pub mod parser;
pub mod physical;

use std::path::Path;

use crate::{Error::OutOfBounds, Result};
use memory::Memory;
use physical::Physical;

/// Backend trait for owned fork data sources.
///
/// Implementors expose one contiguous, immutable byte slice for as long as they live.
pub trait Backend: Send + Sync {
    /// The complete data of this backend.
    fn data(&self) -> &[u8];

    /// Returns a slice of `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the range does not lie within the data.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let data = self.data();
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(OutOfBounds);
        };

        if offset_end > data.len() {
            return Err(OutOfBounds);
        }

        Ok(&data[offset..offset_end])
    }

    /// Length of the data in bytes.
    fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns `true` if the backend holds no data.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The bytes a resource fork is parsed from, together with who owns them.
pub enum Input<'a> {
    /// Caller-owned bytes. The fork borrows them for its whole lifetime.
    Borrowed(&'a [u8]),
    /// Bytes owned by the fork through a backend.
    Owned(Box<dyn Backend>),
}

impl<'a> Input<'a> {
    /// Take ownership of a vector.
    #[must_use]
    pub fn from_vec(data: Vec<u8>) -> Input<'static> {
        Input::Owned(Box::new(Memory::new(data)))
    }

    /// Copy `data` into a private buffer owned by the input.
    #[must_use]
    pub fn copy_of(data: &[u8]) -> Input<'static> {
        Input::Owned(Box::new(Memory::copy_of(data)))
    }

    /// Memory-map the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped.
    pub fn map_file(path: impl AsRef<Path>) -> Result<Input<'static>> {
        Ok(Input::Owned(Box::new(Physical::new(path)?)))
    }

    /// The complete data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        match self {
            Input::Borrowed(data) => data,
            Input::Owned(backend) => backend.data(),
        }
    }

    /// Length of the data in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns `true` if there is no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    /// Returns `true` if the bytes are owned by this input.
    #[must_use]
    pub fn is_owned(&self) -> bool {
        matches!(self, Input::Owned(_))
    }

    /// Returns a slice of `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the range does not lie within the data.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        match self {
            Input::Owned(backend) => backend.data_slice(offset, len),
            Input::Borrowed(data) => {
                let Some(offset_end) = offset.checked_add(len) else {
                    return Err(OutOfBounds);
                };
                data.get(offset..offset_end).ok_or(OutOfBounds)
            }
        }
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(data: &'a [u8]) -> Self {
        Input::Borrowed(data)
    }
}

impl From<Vec<u8>> for Input<'static> {
    fn from(data: Vec<u8>) -> Self {
        Input::from_vec(data)
    }
}

impl std::fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Borrowed(data) => f.debug_tuple("Borrowed").field(&data.len()).finish(),
            Input::Owned(backend) => f.debug_tuple("Owned").field(&backend.len()).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn borrowed_and_owned_agree() {
        let bytes: Vec<u8> = (0u8..32).collect();

        let borrowed = Input::Borrowed(&bytes);
        let owned = Input::from_vec(bytes.clone());
        let copied = Input::copy_of(&bytes);

        assert!(!borrowed.is_owned());
        assert!(owned.is_owned());
        assert!(copied.is_owned());

        for input in [&borrowed, &owned, &copied] {
            assert_eq!(input.len(), 32);
            assert_eq!(input.data_slice(4, 3).unwrap(), &[4, 5, 6]);
            assert!(matches!(input.data_slice(30, 3), Err(Error::OutOfBounds)));
            assert!(matches!(
                input.data_slice(usize::MAX, 2),
                Err(Error::OutOfBounds)
            ));
        }
    }

    #[test]
    fn from_conversions() {
        let bytes = [1u8, 2, 3];
        let input: Input = (&bytes[..]).into();
        assert!(!input.is_owned());
        assert_eq!(format!("{input:?}"), "Borrowed(3)");

        let input: Input<'static> = vec![1u8, 2].into();
        assert!(input.is_owned());
        assert_eq!(format!("{input:?}"), "Owned(2)");
    }

    #[test]
    fn map_missing_file() {
        assert!(matches!(
            Input::map_file("/nonexistent/fork.rsrc"),
            Err(Error::FileError(_))
        ));
    }
}
