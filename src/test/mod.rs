//! Shared helpers for unit tests.


pub use builders::*;
