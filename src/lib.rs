// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # rsrcscope
//!
//! A safe, zero-copy reader for Apple IIgs (GS/OS) resource forks.
//!
//! Resource forks store typed binary blobs ("resources") such as icons, menus, strings and
//! code, addressed by a 16-bit type and a 32-bit id, and optionally by a name. `rsrcscope`
//! validates an untrusted fork, builds a sorted catalog of its resources and answers lookups
//! without ever reading outside the buffer or copying a payload.
//!
//! ## Features
//!
//! - **🛡️ Hostile-input safe** - Every offset and size is validated before use, all reads are bounds-checked
//! - **📦 Zero-copy** - Payloads are slices into the fork, whether borrowed, owned or memory-mapped
//! - **🔍 Complete lookup surface** - By position, by type and id, by type group, and by name
//! - **🧵 Shareable** - A parsed fork is immutable, `Send` and `Sync`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rsrcscope::prelude::*;
//!
//! let fork = ResourceFork::from_file("Teach.rsrc")?;
//! println!(
//!     "{} resources in {} types",
//!     fork.count_resources(),
//!     fork.count_types()
//! );
//!
//! for &res_type in fork.types() {
//!     let name = ResType::from_repr(res_type)
//!         .map_or_else(|| format!("${res_type:04X}"), |t| t.to_string());
//!     println!("{name}: {} resources", fork.resources_of_type(res_type).len());
//! }
//! # Ok::<(), rsrcscope::Error>(())
//! ```
//!
//! ### Borrowing a buffer
//!
//! ```rust
//! use rsrcscope::{Error, ResourceFork};
//!
//! // An empty but valid fork: file header, 30 byte map header, no resources
//! let mut data = vec![0u8; 46];
//! data[4] = 16; // map offset
//! data[8] = 30; // map size
//! data[16 + 6] = 16; // map header repeats the offset
//! data[16 + 10] = 30; // ... and the size
//! data[16 + 14] = 30; // index starts right after the map header
//!
//! let fork = ResourceFork::from_slice(&data)?;
//! assert_eq!(fork.count_resources(), 0);
//! assert!(matches!(
//!     fork.load_resource(0x8006, 1),
//!     Err(Error::NotFound { .. })
//! ));
//! # Ok::<(), rsrcscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`fork`] - Header validation, catalog building, lookups and name tables
//! - [`file`] - Ownership modes ([`Input`]), byte backends and the bounds-checked [`Parser`]
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Format
//!
//! All integers are little-endian and unaligned. A fork starts with a 16 byte file header
//! locating the resource map; the map header locates an index of 20 byte entries, each
//! describing one resource (type, id, offset, attributes, size). See [`fork::header`] for the
//! exact layout and [`fork::names`] for the name table format.
//!
//! ## Error Handling
//!
//! Construction fails on any structural inconsistency (the catalog is all or nothing), while
//! query failures are local to the call:
//!
//! ```rust,no_run
//! use rsrcscope::{Error, ResourceFork};
//!
//! match ResourceFork::from_file("Broken.rsrc") {
//!     Ok(fork) => println!("{} resources", fork.count_resources()),
//!     Err(Error::BadFormat { message, .. }) => println!("Corrupt fork: {message}"),
//!     Err(Error::InvalidTypeOrID) => println!("Index uses a reserved type or id"),
//!     Err(e) => println!("Other error: {e} (toolbox error ${:04X})", e.code()),
//! }
//! ```
//!
//! ## Development and Testing
//!
//! ### Fuzzing
//!
//! ```bash
//! cargo +nightly fuzz run fork --release
//! ```
//!
//! ### Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! ```

#[macro_use]
pub(crate) mod error;

pub mod file;

pub mod fork;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// ```rust
/// use rsrcscope::prelude::*;
///
/// let fork = ResourceFork::open(Input::copy_of(&[0u8; 4]), ErrorPolicy::Empty)?;
/// assert!(fork.load_error().is_some());
/// # Ok::<(), rsrcscope::Error>(())
/// ```
pub mod prelude;

/// `rsrcscope` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

pub use error::Error;

pub use file::{parser::Parser, Backend, Input};

pub use fork::{
    catalog::Catalog,
    header::{FileHeader, MapHeader},
    names::NameTable,
    types::{ResAttr, ResId, ResType, ResTypeCode, ResourceRecord},
    ErrorPolicy, ResourceFork,
};
