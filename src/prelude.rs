//! # rsrcscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the rsrcscope library. Import this module to get quick access to the essential
//! types for reading resource forks.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all rsrcscope operations
pub use crate::Error;

/// The result type used throughout rsrcscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Parsed resource fork and its construction options
pub use crate::{ErrorPolicy, ResourceFork};

/// Ownership modes of the fork data
pub use crate::{Backend, Input};

/// Low-level parsing utilities
pub use crate::Parser;

// ================================================================================================
// Catalog Types
// ================================================================================================

/// Catalog entries and their attributes
pub use crate::fork::types::{ResAttr, ResId, ResTypeCode, ResourceRecord};

/// Well-known resource types
pub use crate::fork::types::ResType;

/// Name table and resource naming constants
pub use crate::fork::{
    names::NameTable,
    types::{RES_NAME_BASE_ID, RES_NAME_TYPE, RES_NAME_VERSION},
};

/// Header structures
pub use crate::fork::header::{FileHeader, MapHeader};
