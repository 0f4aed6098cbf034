//! Resource name tables.
//!
//! Names are optional. The names of all resources of type `T` live in a single resource of
//! type `rResName` (0x8014) with id `0x10000 + T`. Its payload is:
//!
//! ```text
//! u16 version (1)
//! u32 count
//! count x { u32 id, u8 length, length bytes of name }
//! ```
//!
//! Entries are packed without padding and names are not terminated. Names are raw bytes
//! (Mac OS Roman in practice) and compared byte for byte.
//!
//! # Tolerance
//!
//! Unlike the resource index, a name table is read best-effort. An entry that needs more
//! bytes than remain ends the table: every entry before it is still usable and lookups that
//! would have needed the rest simply find nothing. The version field is the only hard check.

use crate::{
    file::parser::Parser,
    fork::types::{ResId, RES_NAME_VERSION},
    Error, Result,
};

/// A decoded view of a name table payload.
#[derive(Clone, Copy, Debug)]
pub struct NameTable<'a> {
    count: u32,
    entries: &'a [u8],
}

impl<'a> NameTable<'a> {
    /// Interpret `data` as a name table.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::NameNotFound`] if `data` is too short for the table header
    /// - [`crate::Error::BadNameVersion`] if the version is not 1
    pub fn parse(data: &'a [u8]) -> Result<NameTable<'a>> {
        let mut parser = Parser::new(data);

        if parser.len() < 6 {
            return Err(Error::NameNotFound);
        }

        let version = parser.read_le::<u16>()?;
        let count = parser.read_le::<u32>()?;

        if version != RES_NAME_VERSION {
            return Err(Error::BadNameVersion(version));
        }

        Ok(NameTable {
            count,
            entries: &data[parser.pos()..],
        })
    }

    /// The number of entries the table declares. Fewer may actually be decodable.
    #[must_use]
    pub fn declared_count(&self) -> u32 {
        self.count
    }

    /// Iterate over the decodable `(id, name)` entries in table order.
    #[must_use]
    pub fn iter(&self) -> NameIter<'a> {
        NameIter {
            parser: Parser::new(self.entries),
            remaining: self.count,
        }
    }

    /// The name of the first entry with id `res_id`.
    #[must_use]
    pub fn name_of(&self, res_id: ResId) -> Option<&'a [u8]> {
        self.iter()
            .find(|(id, _)| *id == res_id)
            .map(|(_, name)| name)
    }

    /// The id of the first entry named `name`.
    #[must_use]
    pub fn id_of(&self, name: &[u8]) -> Option<ResId> {
        self.iter()
            .find(|(_, entry)| entry.len() == name.len() && *entry == name)
            .map(|(id, _)| id)
    }
}

impl<'a> IntoIterator for &NameTable<'a> {
    type Item = (ResId, &'a [u8]);
    type IntoIter = NameIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`NameTable`].
pub struct NameIter<'a> {
    parser: Parser<'a>,
    remaining: u32,
}

impl<'a> NameIter<'a> {
    fn read_entry(&mut self) -> Result<(ResId, &'a [u8])> {
        let id = self.parser.read_le::<u32>()?;
        let len = self.parser.read_le::<u8>()?;
        let name = self.parser.read_bytes(usize::from(len))?;
        Ok((id, name))
    }
}

impl<'a> Iterator for NameIter<'a> {
    type Item = (ResId, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        if let Ok(entry) = self.read_entry() {
            self.remaining -= 1;
            Some(entry)
        } else {
            log::debug!(
                "Name table truncated with {} of its entries unread",
                self.remaining
            );
            self.remaining = 0;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::encode_name_table;

    #[test]
    fn single_entry() {
        let data = encode_name_table(1, 1, &[(5, "Foo")]);
        let table = NameTable::parse(&data).unwrap();

        assert_eq!(table.declared_count(), 1);
        assert_eq!(table.name_of(5), Some(&b"Foo"[..]));
        assert_eq!(table.id_of(b"Foo"), Some(5));
        assert_eq!(table.id_of(b"Bar"), None);
        assert_eq!(table.id_of(b"Fo"), None);
        assert_eq!(table.id_of(b"Fooo"), None);
        assert_eq!(table.name_of(6), None);
    }

    #[test]
    fn skips_non_matching_names() {
        let data = encode_name_table(1, 3, &[(1, "Alpha"), (2, ""), (3, "Gamma")]);
        let table = NameTable::parse(&data).unwrap();

        assert_eq!(table.name_of(3), Some(&b"Gamma"[..]));
        assert_eq!(table.name_of(2), Some(&b""[..]));
        assert_eq!(table.id_of(b"Gamma"), Some(3));

        let all: Vec<_> = table.iter().collect();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], (1, &b"Alpha"[..]));
    }

    #[test]
    fn header_too_short() {
        assert!(matches!(NameTable::parse(&[]), Err(Error::NameNotFound)));
        assert!(matches!(
            NameTable::parse(&[1, 0, 0, 0, 0]),
            Err(Error::NameNotFound)
        ));
    }

    #[test]
    fn bad_version() {
        let data = encode_name_table(2, 1, &[(5, "Foo")]);
        assert!(matches!(
            NameTable::parse(&data),
            Err(Error::BadNameVersion(2))
        ));
    }

    #[test]
    fn truncated_tail_is_tolerated() {
        let mut data = encode_name_table(1, 2, &[(1, "One"), (2, "Two")]);
        data.truncate(data.len() - 1);
        let table = NameTable::parse(&data).unwrap();

        assert_eq!(table.name_of(1), Some(&b"One"[..]));
        assert_eq!(table.name_of(2), None);
        assert_eq!(table.id_of(b"Two"), None);
        assert_eq!(table.iter().count(), 1);
    }

    #[test]
    fn count_larger_than_entries() {
        let data = encode_name_table(1, 1000, &[(7, "Seven")]);
        let table = NameTable::parse(&data).unwrap();
        assert_eq!(table.iter().count(), 1);
        assert_eq!(table.id_of(b"Seven"), Some(7));
    }

    #[test]
    fn count_smaller_than_entries() {
        let data = encode_name_table(1, 1, &[(7, "Seven"), (8, "Eight")]);
        let table = NameTable::parse(&data).unwrap();
        assert_eq!(table.iter().count(), 1);
        assert_eq!(table.id_of(b"Eight"), None);
    }
}
