//! Resource index decoding and the sorted catalog.
//!
//! The index builder turns the flat on-disk index into a [`Catalog`]: every entry is
//! decoded and validated, the records are sorted, and the list of distinct types is derived
//! from the sorted order.
//!
//! # Ordering Contract
//!
//! The catalog is stably sorted by `(type, id)`, both ascending. All records of one type are
//! therefore contiguous, and the type list holds exactly one entry per such group, in the
//! same order. Every search in this module relies on that order:
//!
//! - a type group is located with two `partition_point` calls, equivalent to a forward scan
//!   that stops at the first record whose type exceeds the requested one;
//! - a point lookup returns the *first* record whose key equals `(type, id)`. Duplicated keys
//!   keep their on-disk order, so the earliest index entry wins. Later duplicates remain
//!   reachable through their catalog index.

use std::ops::Range;

use crate::{
    file::parser::Parser,
    fork::{
        header::MapHeader,
        types::{ResId, ResTypeCode, ResourceRecord},
    },
    Error, Result,
};

/// The validated, sorted set of resource records of a fork.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<ResourceRecord>,
    types: Vec<ResTypeCode>,
}

impl Catalog {
    /// Decode and validate the index described by `map`, then sort it.
    ///
    /// `map` must have been validated against `data`, so the whole index lies in bounds.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InvalidTypeOrID`] if any entry has type 0 or id 0
    /// - [`crate::Error::BadFormat`] if any entry's payload extends past the end of `data`
    ///
    /// Either error aborts the build; no partial catalog is produced.
    pub fn build(data: &[u8], map: &MapHeader) -> Result<Catalog> {
        let index_start = usize::try_from(map.index_start())
            .map_err(|_| bad_format!("Index offset {} out of range", map.index_start()))?;

        let mut parser = Parser::new(data);
        parser.seek(index_start)?;

        let mut records = Vec::with_capacity(map.index_used as usize);
        for _ in 0..map.index_used {
            let record = Self::read_entry(&mut parser, data.len())?;
            records.push(record);
        }

        // Stable: duplicates keep their on-disk order.
        records.sort_by_key(ResourceRecord::key);

        let mut types = Vec::new();
        let mut current: Option<ResTypeCode> = None;
        for (position, record) in records.iter_mut().enumerate() {
            record.index = position as u32;
            if current != Some(record.res_type) {
                types.push(record.res_type);
                current = Some(record.res_type);
            }
        }

        log::debug!(
            "Built resource catalog: {} resources in {} types",
            records.len(),
            types.len()
        );

        Ok(Catalog { records, types })
    }

    /// Decode one 20 byte index entry at the parser's position.
    fn read_entry(parser: &mut Parser, fork_len: usize) -> Result<ResourceRecord> {
        let res_type = parser.read_le::<u16>()?;
        let res_id = parser.read_le::<u32>()?;
        let offset = parser.read_le::<u32>()?;
        let attr = parser.read_le::<u16>()?;
        let size = parser.read_le::<u32>()?;
        // handle, only meaningful in memory
        parser.advance_by(4)?;

        if res_type == 0 || res_id == 0 {
            return Err(Error::InvalidTypeOrID);
        }

        if u64::from(offset) + u64::from(size) > fork_len as u64 {
            return Err(bad_format!(
                "Resource 0x{:04X}/0x{:08X} at {}+{} exceeds fork length {}",
                res_type,
                res_id,
                offset,
                size,
                fork_len
            ));
        }

        Ok(ResourceRecord {
            res_type,
            res_id,
            offset,
            attr,
            size,
            index: 0,
        })
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the catalog holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in catalog order.
    #[must_use]
    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    /// The distinct types in ascending order.
    #[must_use]
    pub fn types(&self) -> &[ResTypeCode] {
        &self.types
    }

    /// The catalog positions of all records of `res_type`.
    ///
    /// Empty (and positioned where the type would be inserted) if no such record exists.
    #[must_use]
    pub fn type_range(&self, res_type: ResTypeCode) -> Range<usize> {
        let start = self.records.partition_point(|r| r.res_type < res_type);
        let end = start + self.records[start..].partition_point(|r| r.res_type == res_type);
        start..end
    }

    /// All records of `res_type`, sorted by id.
    #[must_use]
    pub fn of_type(&self, res_type: ResTypeCode) -> &[ResourceRecord] {
        &self.records[self.type_range(res_type)]
    }

    /// The `n`-th record of `res_type`, counting from 0.
    #[must_use]
    pub fn nth_of_type(&self, res_type: ResTypeCode, n: usize) -> Option<&ResourceRecord> {
        self.of_type(res_type).get(n)
    }

    /// The first record with key `(res_type, res_id)`.
    #[must_use]
    pub fn find(&self, res_type: ResTypeCode, res_id: ResId) -> Option<&ResourceRecord> {
        let key = (res_type, res_id);
        let position = self.records.partition_point(|r| r.key() < key);
        self.records.get(position).filter(|r| r.key() == key)
    }
}
