//! Resource fork parsing and lookup.
//!
//! [`ResourceFork`] is the entry point of this crate. Constructing one validates the headers
//! ([`header`]), builds the sorted catalog ([`catalog`]) and from then on answers queries by
//! position, by type and id, and by name ([`names`]).
//!
//! # Construction
//!
//! | Constructor                      | Ownership            | Lifetime              |
//! |----------------------------------|----------------------|-----------------------|
//! | [`ResourceFork::from_slice`]     | borrowed from caller | `ResourceFork<'a>`    |
//! | [`ResourceFork::from_copy`]      | private copy         | `ResourceFork<'static>` |
//! | [`ResourceFork::from_mem`]       | vector handed over   | `ResourceFork<'static>` |
//! | [`ResourceFork::from_file`]      | memory-mapped file   | `ResourceFork<'static>` |
//! | [`ResourceFork::open`]           | any [`Input`]        | follows the input     |
//!
//! [`ResourceFork::open`] additionally takes an [`ErrorPolicy`]: with [`ErrorPolicy::Fail`] a
//! corrupt fork is an error, with [`ErrorPolicy::Empty`] construction succeeds with an empty
//! catalog and the failure is kept in [`ResourceFork::load_error`].
//!
//! # Queries
//!
//! Every query returns a [`crate::Result`]; payloads are slices into the fork's buffer and
//! are never copied. A fork is immutable after construction, so it can be shared between
//! threads and queried concurrently.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rsrcscope::{ResType, ResourceFork};
//!
//! let fork = ResourceFork::from_file("Finder.rsrc")?;
//!
//! for record in fork.resources_of_type(ResType::PString.code()) {
//!     let payload = fork.load_resource(record.res_type, record.res_id)?;
//!     println!("{:08X}: {} bytes", record.res_id, payload.len());
//! }
//!
//! let id = fork.find_named_resource(ResType::PString.code(), "Greeting")?;
//! println!("'Greeting' is resource {id:08X}");
//! # Ok::<(), rsrcscope::Error>(())
//! ```

pub mod catalog;
pub mod header;
pub mod names;
pub mod types;

use std::path::Path;

use crate::{
    file::Input,
    fork::{
        catalog::Catalog,
        header::{FileHeader, MapHeader},
        names::NameTable,
        types::{ResAttr, ResId, ResTypeCode, ResourceRecord, RES_NAME_BASE_ID, RES_NAME_TYPE},
    },
    Error, Result,
};

/// What construction does when the fork fails validation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ErrorPolicy {
    /// Return the error from the constructor.
    #[default]
    Fail,
    /// Construct an empty fork and keep the error in [`ResourceFork::load_error`].
    Empty,
}

/// A parsed, read-only resource fork.
pub struct ResourceFork<'a> {
    input: Input<'a>,
    headers: Option<(FileHeader, MapHeader)>,
    catalog: Catalog,
    load_error: Option<Error>,
}

impl<'a> ResourceFork<'a> {
    /// Parse `input` according to `policy`.
    ///
    /// # Errors
    ///
    /// With [`ErrorPolicy::Fail`], returns [`crate::Error::BadFormat`] for inconsistent
    /// headers or out of bounds payloads and [`crate::Error::InvalidTypeOrID`] for index
    /// entries using type or id 0. With [`ErrorPolicy::Empty`] this never fails.
    pub fn open(input: Input<'a>, policy: ErrorPolicy) -> Result<ResourceFork<'a>> {
        let parsed = Self::parse(input.data());
        match parsed {
            Ok((headers, catalog)) => Ok(ResourceFork {
                input,
                headers: Some(headers),
                catalog,
                load_error: None,
            }),
            Err(error) => match policy {
                ErrorPolicy::Fail => Err(error),
                ErrorPolicy::Empty => {
                    log::warn!("Resource fork rejected, continuing empty: {error}");
                    Ok(ResourceFork {
                        input,
                        headers: None,
                        catalog: Catalog::default(),
                        load_error: Some(error),
                    })
                }
            },
        }
    }

    /// Parse a fork that borrows `data` for its whole lifetime.
    ///
    /// # Errors
    ///
    /// See [`ResourceFork::open`].
    pub fn from_slice(data: &'a [u8]) -> Result<ResourceFork<'a>> {
        Self::open(Input::Borrowed(data), ErrorPolicy::Fail)
    }

    /// Copy `data` and parse the copy.
    ///
    /// # Errors
    ///
    /// See [`ResourceFork::open`].
    pub fn from_copy(data: &[u8]) -> Result<ResourceFork<'static>> {
        ResourceFork::open(Input::copy_of(data), ErrorPolicy::Fail)
    }

    /// Take ownership of `data` and parse it.
    ///
    /// # Errors
    ///
    /// See [`ResourceFork::open`].
    pub fn from_mem(data: Vec<u8>) -> Result<ResourceFork<'static>> {
        ResourceFork::open(Input::from_vec(data), ErrorPolicy::Fail)
    }

    /// Memory-map the file at `path` and parse it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped, otherwise
    /// see [`ResourceFork::open`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<ResourceFork<'static>> {
        ResourceFork::open(Input::map_file(path)?, ErrorPolicy::Fail)
    }

    fn parse(data: &[u8]) -> Result<((FileHeader, MapHeader), Catalog)> {
        let (file, map) = header::validate(data)?;
        let catalog = Catalog::build(data, &map)?;
        Ok(((file, map), catalog))
    }

    /// The error that emptied this fork, if it was opened with [`ErrorPolicy::Empty`].
    #[must_use]
    pub fn load_error(&self) -> Option<&Error> {
        self.load_error.as_ref()
    }

    /// The file header, `None` if validation failed.
    #[must_use]
    pub fn file_header(&self) -> Option<&FileHeader> {
        self.headers.as_ref().map(|(file, _)| file)
    }

    /// The resource map header, `None` if validation failed.
    #[must_use]
    pub fn map_header(&self) -> Option<&MapHeader> {
        self.headers.as_ref().map(|(_, map)| map)
    }

    /// The complete fork data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.input.data()
    }

    /// Length of the fork data in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Returns `true` if the fork data is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Returns `true` if the fork owns its data.
    #[must_use]
    pub fn is_owned(&self) -> bool {
        self.input.is_owned()
    }

    /// The sorted catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Number of distinct resource types.
    #[must_use]
    pub fn count_types(&self) -> usize {
        self.catalog.types().len()
    }

    /// Number of resources.
    #[must_use]
    pub fn count_resources(&self) -> usize {
        self.catalog.len()
    }

    /// The distinct resource types in ascending order.
    #[must_use]
    pub fn types(&self) -> &[ResTypeCode] {
        self.catalog.types()
    }

    /// All records, sorted by type and id.
    #[must_use]
    pub fn records(&self) -> &[ResourceRecord] {
        self.catalog.records()
    }

    /// All records of `res_type`, sorted by id. Empty for unknown types.
    #[must_use]
    pub fn resources_of_type(&self, res_type: ResTypeCode) -> &[ResourceRecord] {
        self.catalog.of_type(res_type)
    }

    /// The `index`-th distinct type.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexRange`] if `index >= count_types()`.
    pub fn type_at_index(&self, index: usize) -> Result<ResTypeCode> {
        self.catalog
            .types()
            .get(index)
            .copied()
            .ok_or(Error::IndexRange(index))
    }

    /// The record at catalog position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexRange`] if `index >= count_resources()`.
    pub fn resource_at_index(&self, index: usize) -> Result<&ResourceRecord> {
        self.catalog
            .records()
            .get(index)
            .ok_or(Error::IndexRange(index))
    }

    /// The record at catalog position `index` together with its payload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexRange`] if `index >= count_resources()`.
    pub fn indexed_resource(&self, index: usize) -> Result<(&ResourceRecord, &[u8])> {
        let record = self.resource_at_index(index)?;
        Ok((record, self.payload(record)?))
    }

    /// The id of the `index`-th resource of `res_type`, counting from 0 in id order.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InvalidTypeOrID`] if `res_type` is 0
    /// - [`crate::Error::IndexRange`] if the type has `index` or fewer resources
    pub fn resource_id_at(&self, res_type: ResTypeCode, index: usize) -> Result<ResId> {
        if res_type == 0 {
            return Err(Error::InvalidTypeOrID);
        }

        self.catalog
            .nth_of_type(res_type, index)
            .map(|record| record.res_id)
            .ok_or(Error::IndexRange(index))
    }

    /// The record of resource `(res_type, res_id)`.
    ///
    /// If the fork holds duplicates of this key, the earliest index entry is returned.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InvalidTypeOrID`] if `res_type` or `res_id` is 0
    /// - [`crate::Error::NotFound`] if no such resource exists
    pub fn resource_record(
        &self,
        res_type: ResTypeCode,
        res_id: ResId,
    ) -> Result<&ResourceRecord> {
        if res_type == 0 || res_id == 0 {
            return Err(Error::InvalidTypeOrID);
        }

        self.catalog
            .find(res_type, res_id)
            .ok_or(Error::NotFound { res_type, res_id })
    }

    /// Returns `true` if resource `(res_type, res_id)` exists.
    #[must_use]
    pub fn contains(&self, res_type: ResTypeCode, res_id: ResId) -> bool {
        self.resource_record(res_type, res_id).is_ok()
    }

    /// The attributes of resource `(res_type, res_id)`.
    ///
    /// # Errors
    ///
    /// See [`ResourceFork::resource_record`].
    pub fn resource_attr(&self, res_type: ResTypeCode, res_id: ResId) -> Result<ResAttr> {
        Ok(self.resource_record(res_type, res_id)?.attributes())
    }

    /// The payload size of resource `(res_type, res_id)`.
    ///
    /// # Errors
    ///
    /// See [`ResourceFork::resource_record`].
    pub fn resource_size(&self, res_type: ResTypeCode, res_id: ResId) -> Result<u32> {
        Ok(self.resource_record(res_type, res_id)?.size)
    }

    /// The payload of resource `(res_type, res_id)`.
    ///
    /// # Errors
    ///
    /// See [`ResourceFork::resource_record`].
    pub fn load_resource(&self, res_type: ResTypeCode, res_id: ResId) -> Result<&[u8]> {
        let record = self.resource_record(res_type, res_id)?;
        self.payload(record)
    }

    fn payload(&self, record: &ResourceRecord) -> Result<&[u8]> {
        self.input
            .data_slice(record.offset as usize, record.size as usize)
    }

    /// The name table of `res_type`.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InvalidTypeOrID`] if `res_type` is 0
    /// - [`crate::Error::NameNotFound`] if the type has no (or a too short) name table
    /// - [`crate::Error::BadNameVersion`] if the table version is not supported
    pub fn name_table(&self, res_type: ResTypeCode) -> Result<NameTable<'_>> {
        if res_type == 0 {
            return Err(Error::InvalidTypeOrID);
        }

        let table_id = RES_NAME_BASE_ID + ResId::from(res_type);
        let data = match self.load_resource(RES_NAME_TYPE, table_id) {
            Ok(data) => data,
            Err(Error::NotFound { .. }) => return Err(Error::NameNotFound),
            Err(error) => return Err(error),
        };

        NameTable::parse(data)
    }

    /// The id of the resource of `res_type` named `name`.
    ///
    /// Names are compared as raw bytes.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InvalidTypeOrID`] if `res_type` is 0
    /// - [`crate::Error::NameNotFound`] if `name` is empty, the type has no name table, or
    ///   no decodable entry carries `name`
    /// - [`crate::Error::BadNameVersion`] if the table version is not supported
    pub fn find_named_resource(
        &self,
        res_type: ResTypeCode,
        name: impl AsRef<[u8]>,
    ) -> Result<ResId> {
        if res_type == 0 {
            return Err(Error::InvalidTypeOrID);
        }

        let name = name.as_ref();
        if name.is_empty() {
            return Err(Error::NameNotFound);
        }

        self.name_table(res_type)?
            .id_of(name)
            .ok_or(Error::NameNotFound)
    }

    /// Returns `true` if a resource of `res_type` is named `name`.
    #[must_use]
    pub fn contains_name(&self, res_type: ResTypeCode, name: impl AsRef<[u8]>) -> bool {
        self.find_named_resource(res_type, name).is_ok()
    }

    /// The name of resource `(res_type, res_id)`, as raw bytes.
    ///
    /// The resource itself does not need to exist; only the name table is consulted.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InvalidTypeOrID`] if `res_type` or `res_id` is 0
    /// - [`crate::Error::NameNotFound`] if the type has no name table or no decodable entry
    ///   for `res_id`
    /// - [`crate::Error::BadNameVersion`] if the table version is not supported
    pub fn resource_name(&self, res_type: ResTypeCode, res_id: ResId) -> Result<&[u8]> {
        if res_type == 0 || res_id == 0 {
            return Err(Error::InvalidTypeOrID);
        }

        self.name_table(res_type)?
            .name_of(res_id)
            .ok_or(Error::NameNotFound)
    }

    /// The payload of the resource of `res_type` named `name`.
    ///
    /// # Errors
    ///
    /// See [`ResourceFork::find_named_resource`]; additionally
    /// [`crate::Error::NotFound`] if the name table refers to a resource that does not exist.
    pub fn load_named_resource(
        &self,
        res_type: ResTypeCode,
        name: impl AsRef<[u8]>,
    ) -> Result<&[u8]> {
        let res_id = self.find_named_resource(res_type, name)?;
        self.load_resource(res_type, res_id)
    }
}

impl std::fmt::Debug for ResourceFork<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceFork")
            .field("input", &self.input)
            .field("types", &self.count_types())
            .field("resources", &self.count_resources())
            .field("load_error", &self.load_error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::ForkBuilder;

    fn sample() -> Vec<u8> {
        ForkBuilder::new()
            .resource(0x8006, 1, b"\x05Hello")
            .resource_with_attr(0x8006, 2, 0x8040, b"\x02Hi")
            .resource(0x8016, 0x0700_0001, b"plain text")
            .name_table(0x8006, &[(1, "Greeting"), (2, "Short")])
            .build()
    }

    #[test]
    fn counts() {
        let data = sample();
        let fork = ResourceFork::from_slice(&data).unwrap();

        // the name table is a resource of its own
        assert_eq!(fork.count_resources(), 4);
        assert_eq!(fork.count_types(), 3);
        assert_eq!(fork.types(), &[0x8006, 0x8014, 0x8016]);
        assert!(fork.load_error().is_none());
        assert!(!fork.is_owned());
        assert_eq!(fork.len(), data.len());
    }

    #[test]
    fn positional_access() {
        let data = sample();
        let fork = ResourceFork::from_slice(&data).unwrap();

        assert_eq!(fork.type_at_index(2).unwrap(), 0x8016);
        assert!(matches!(fork.type_at_index(3), Err(Error::IndexRange(3))));

        let record = fork.resource_at_index(1).unwrap();
        assert_eq!(record.key(), (0x8006, 2));
        assert!(matches!(fork.resource_at_index(4), Err(Error::IndexRange(4))));

        let (record, payload) = fork.indexed_resource(3).unwrap();
        assert_eq!(record.res_type, 0x8016);
        assert_eq!(payload, b"plain text");

        assert_eq!(fork.resource_id_at(0x8006, 1).unwrap(), 2);
        assert!(matches!(
            fork.resource_id_at(0x8006, 2),
            Err(Error::IndexRange(2))
        ));
        assert!(matches!(
            fork.resource_id_at(0x8001, 0),
            Err(Error::IndexRange(0))
        ));
        assert!(matches!(
            fork.resource_id_at(0, 0),
            Err(Error::InvalidTypeOrID)
        ));
    }

    #[test]
    fn point_lookups() {
        let data = sample();
        let fork = ResourceFork::from_slice(&data).unwrap();

        assert_eq!(fork.load_resource(0x8006, 1).unwrap(), b"\x05Hello");
        assert_eq!(fork.resource_size(0x8006, 2).unwrap(), 3);
        assert_eq!(
            fork.resource_attr(0x8006, 2).unwrap(),
            ResAttr::LOCKED | ResAttr::PRELOAD
        );
        assert!(fork.contains(0x8016, 0x0700_0001));
        assert!(!fork.contains(0x8016, 1));

        assert!(matches!(
            fork.resource_record(0x8006, 3),
            Err(Error::NotFound {
                res_type: 0x8006,
                res_id: 3
            })
        ));
        assert!(matches!(
            fork.load_resource(0, 1),
            Err(Error::InvalidTypeOrID)
        ));
        assert!(matches!(
            fork.resource_size(0x8006, 0),
            Err(Error::InvalidTypeOrID)
        ));
    }

    #[test]
    fn names() {
        let data = sample();
        let fork = ResourceFork::from_slice(&data).unwrap();

        assert_eq!(fork.find_named_resource(0x8006, "Short").unwrap(), 2);
        assert_eq!(fork.resource_name(0x8006, 1).unwrap(), b"Greeting");
        assert_eq!(
            fork.load_named_resource(0x8006, "Greeting").unwrap(),
            b"\x05Hello"
        );
        assert!(fork.contains_name(0x8006, b"Short"));
        assert!(!fork.contains_name(0x8006, "short"));

        assert!(matches!(
            fork.find_named_resource(0x8006, ""),
            Err(Error::NameNotFound)
        ));
        assert!(matches!(
            fork.find_named_resource(0x8016, "Greeting"),
            Err(Error::NameNotFound)
        ));
        assert!(matches!(
            fork.resource_name(0x8006, 3),
            Err(Error::NameNotFound)
        ));
        assert!(matches!(
            fork.find_named_resource(0, "Short"),
            Err(Error::InvalidTypeOrID)
        ));
        assert!(matches!(
            fork.resource_name(0x8006, 0),
            Err(Error::InvalidTypeOrID)
        ));

        let table = fork.name_table(0x8006).unwrap();
        assert_eq!(table.iter().count(), 2);
    }

    #[test]
    fn name_pointing_nowhere() {
        let data = ForkBuilder::new()
            .resource(0x8006, 1, b"x")
            .name_table(0x8006, &[(9, "Ghost")])
            .build();
        let fork = ResourceFork::from_slice(&data).unwrap();

        assert_eq!(fork.find_named_resource(0x8006, "Ghost").unwrap(), 9);
        assert!(matches!(
            fork.load_named_resource(0x8006, "Ghost"),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn bad_name_version() {
        let data = ForkBuilder::new()
            .resource(0x8006, 1, b"x")
            .raw_name_table(0x8006, crate::test::encode_name_table(3, 1, &[(1, "One")]))
            .build();
        let fork = ResourceFork::from_slice(&data).unwrap();

        assert!(matches!(
            fork.find_named_resource(0x8006, "One"),
            Err(Error::BadNameVersion(3))
        ));
        assert!(matches!(
            fork.resource_name(0x8006, 1),
            Err(Error::BadNameVersion(3))
        ));
        // query failures are local
        assert_eq!(fork.load_resource(0x8006, 1).unwrap(), b"x");
    }

    #[test]
    fn ownership_modes() {
        let data = sample();

        let copied = ResourceFork::from_copy(&data).unwrap();
        let owned = ResourceFork::from_mem(data.clone()).unwrap();
        drop(data);

        assert!(copied.is_owned());
        assert!(owned.is_owned());
        assert_eq!(copied.load_resource(0x8006, 1).unwrap(), b"\x05Hello");
        assert_eq!(owned.records(), copied.records());
    }

    #[test]
    fn error_policy() {
        let mut data = sample();
        data[0] = 1;

        assert!(matches!(
            ResourceFork::from_slice(&data),
            Err(Error::BadFormat { .. })
        ));

        let fork = ResourceFork::open(Input::Borrowed(&data), ErrorPolicy::Empty).unwrap();
        assert!(matches!(fork.load_error(), Some(Error::BadFormat { .. })));
        assert_eq!(fork.count_resources(), 0);
        assert_eq!(fork.count_types(), 0);
        assert!(fork.file_header().is_none());
        assert!(fork.map_header().is_none());
        assert!(matches!(fork.type_at_index(0), Err(Error::IndexRange(0))));
        assert!(matches!(
            fork.load_resource(0x8006, 1),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn fork_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResourceFork<'static>>();
    }
}
