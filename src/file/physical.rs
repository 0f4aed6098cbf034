//! Memory-mapped file backend.
//!
//! [`Physical`] maps a resource fork file read-only, so opening a large fork costs no
//! up-front copy. On systems where resource forks live in a separate stream (for example
//! ProDOS images extracted by CiderPress), the caller points this at the extracted fork.

use super::Backend;
use crate::Result;

use memmap2::Mmap;
use std::{fs, path::Path};

/// A read-only memory map of a resource fork file.
#[derive(Debug)]
pub struct Physical {
    data: Option<Mmap>,
}

impl Physical {
    /// Open and map the file at `path`.
    ///
    /// Empty files are not mapped (mapping zero bytes fails on some platforms); they yield
    /// an empty backend and fail format validation later on.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = fs::File::open(path)?;
        Self::from_std_file(&file)
    }

    /// Map an already opened file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if the file metadata cannot be read or the
    /// mapping fails.
    pub fn from_std_file(file: &fs::File) -> Result<Physical> {
        if file.metadata()?.len() == 0 {
            return Ok(Physical { data: None });
        }

        // The map is read-only; concurrent truncation of the file by another process is
        // outside what this crate can guard against.
        let mmap = unsafe { Mmap::map(file) }?;

        Ok(Physical { data: Some(mmap) })
    }
}

impl Backend for Physical {
    fn data(&self) -> &[u8] {
        match &self.data {
            Some(mmap) => mmap.as_ref(),
            None => &[],
        }
    }
}
