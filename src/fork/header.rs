//! File header and resource map header validation.
//!
//! A fork starts with a 16 byte file header pointing at the resource map. The map begins with
//! its own header, which repeats the map position and size and locates the index of
//! resource entries. Both headers are checked against each other and against the buffer
//! length before the index builder touches a single entry.
//!
//! # Layout
//!
//! ```text
//! File header (offset 0)            Resource map header (offset map_offset)
//!  0  u32 version (0)                0  u32 handle
//!  4  u32 map offset                 4  u16 flag
//!  8  u32 map size                   6  u32 map offset (== file header)
//! 12  u32 reserved                  10  u32 map size   (== file header)
//!                                   14  u16 index offset (from map start)
//!                                   16  u16 file number
//!                                   18  u16 map id
//!                                   20  u32 index size
//!                                   24  u32 index used
//!                                   28  u16 free list size
//!                                   30  u16 free list used
//! ```
//!
//! The map header is at least 30 bytes; the trailing free list count may spill past that
//! and is only decoded when the map is large enough to hold it.

use crate::{
    file::parser::Parser,
    fork::types::{FILE_HEADER_SIZE, INDEX_ENTRY_SIZE, MAP_HEADER_SIZE},
    Result,
};

/// The fixed header at the start of every fork.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct FileHeader {
    /// Format version, always 0
    pub version: u32,
    /// Offset of the resource map from the start of the fork
    pub map_offset: u32,
    /// Size of the resource map in bytes
    pub map_size: u32,
    /// Reserved for application use
    pub reserved: u32,
}

impl FileHeader {
    /// Read and validate the file header of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::BadFormat`] if `data` is shorter than 16 bytes, the version is
    /// not 0, the map is smaller than 30 bytes, or the map extends past the end of `data`.
    pub fn read(data: &[u8]) -> Result<FileHeader> {
        if data.len() < FILE_HEADER_SIZE {
            return Err(bad_format!(
                "Fork too small for a file header - {} bytes",
                data.len()
            ));
        }

        let mut parser = Parser::new(data);
        let header = FileHeader {
            version: parser.read_le::<u32>()?,
            map_offset: parser.read_le::<u32>()?,
            map_size: parser.read_le::<u32>()?,
            reserved: parser.read_le::<u32>()?,
        };

        if header.version != 0 {
            return Err(bad_format!("Unsupported fork version - {}", header.version));
        }

        let map_end = u64::from(header.map_offset) + u64::from(header.map_size);
        if (data.len() as u64) < map_end {
            return Err(bad_format!(
                "Resource map {}+{} exceeds fork length {}",
                header.map_offset,
                header.map_size,
                data.len()
            ));
        }

        if (header.map_size as usize) < MAP_HEADER_SIZE {
            return Err(bad_format!(
                "Resource map too small - {} bytes",
                header.map_size
            ));
        }

        Ok(header)
    }
}

/// The header at the start of the resource map.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct MapHeader {
    /// Memory handle of the map, meaningless on disk
    pub handle: u32,
    /// Map flags
    pub flag: u16,
    /// Map offset, must match [`FileHeader::map_offset`]
    pub map_offset: u32,
    /// Map size, must match [`FileHeader::map_size`]
    pub map_size: u32,
    /// Offset of the index from the start of the map
    pub index_offset: u16,
    /// File number, meaningless on disk
    pub file_num: u16,
    /// Map id
    pub map_id: u16,
    /// Number of index slots allocated
    pub index_size: u32,
    /// Number of index slots in use
    pub index_used: u32,
    /// Number of free list slots allocated
    pub free_list_size: u16,
    /// Number of free list slots in use, 0 when the map is too short to hold it
    pub free_list_used: u16,
}

impl MapHeader {
    /// Read the map header located by `file` and validate it.
    ///
    /// `file` must come from [`FileHeader::read`] on the same `data`, which guarantees the
    /// first 30 bytes of the map are in bounds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::BadFormat`] if the map repeats a different offset or size than
    /// the file header, or if the index of `index_used` entries does not fit in `data`.
    pub fn read(data: &[u8], file: &FileHeader) -> Result<MapHeader> {
        let map_start = file.map_offset as usize;
        let mut parser = Parser::new(data);
        parser.seek(map_start)?;

        let mut header = MapHeader {
            handle: parser.read_le::<u32>()?,
            flag: parser.read_le::<u16>()?,
            map_offset: parser.read_le::<u32>()?,
            map_size: parser.read_le::<u32>()?,
            index_offset: parser.read_le::<u16>()?,
            file_num: parser.read_le::<u16>()?,
            map_id: parser.read_le::<u16>()?,
            index_size: parser.read_le::<u32>()?,
            index_used: parser.read_le::<u32>()?,
            free_list_size: parser.read_le::<u16>()?,
            free_list_used: 0,
        };
        if file.map_size as usize >= MAP_HEADER_SIZE + 2 {
            header.free_list_used = parser.read_le::<u16>()?;
        }

        if header.map_offset != file.map_offset || header.map_size != file.map_size {
            return Err(bad_format!(
                "Resource map header disagrees with file header - {}+{} vs {}+{}",
                header.map_offset,
                header.map_size,
                file.map_offset,
                file.map_size
            ));
        }

        if (data.len() as u64) < header.index_end() {
            return Err(bad_format!(
                "Resource index of {} entries exceeds fork length {}",
                header.index_used,
                data.len()
            ));
        }

        Ok(header)
    }

    /// Absolute offset of the first index entry.
    #[must_use]
    pub fn index_start(&self) -> u64 {
        u64::from(self.map_offset) + u64::from(self.index_offset)
    }

    /// Absolute offset one past the last used index entry.
    #[must_use]
    pub fn index_end(&self) -> u64 {
        self.index_start() + u64::from(self.index_used) * INDEX_ENTRY_SIZE as u64
    }
}

/// Run the complete header validation over `data`.
///
/// # Errors
///
/// Returns [`crate::Error::BadFormat`] on the first failed check.
pub fn validate(data: &[u8]) -> Result<(FileHeader, MapHeader)> {
    let file = FileHeader::read(data)?;
    let map = MapHeader::read(data, &file)?;
    Ok((file, map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test::ForkBuilder, Error};

    #[test]
    fn minimal_fork() {
        let data = ForkBuilder::new().build();
        let (file, map) = validate(&data).unwrap();

        assert_eq!(file.version, 0);
        assert_eq!(file.map_offset, 16);
        assert_eq!(file.map_size, 32);
        assert_eq!(map.map_offset, 16);
        assert_eq!(map.index_offset, 32);
        assert_eq!(map.index_used, 0);
        assert_eq!(map.index_start(), 48);
        assert_eq!(map.index_end(), 48);
    }

    #[test]
    fn too_small() {
        for len in 0..FILE_HEADER_SIZE {
            let data = vec![0u8; len];
            assert!(matches!(validate(&data), Err(Error::BadFormat { .. })));
        }
    }

    #[test]
    fn bad_version() {
        let mut data = ForkBuilder::new().build();
        data[0] = 1;
        assert!(matches!(validate(&data), Err(Error::BadFormat { .. })));
    }

    #[test]
    fn map_past_end() {
        let mut data = ForkBuilder::new().build();
        data[8..12].copy_from_slice(&1000u32.to_le_bytes());
        assert!(matches!(validate(&data), Err(Error::BadFormat { .. })));
    }

    #[test]
    fn map_overflow() {
        let mut data = ForkBuilder::new().build();
        data[4..8].copy_from_slice(&u32::MAX.to_le_bytes());
        data[8..12].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(validate(&data), Err(Error::BadFormat { .. })));
    }

    #[test]
    fn map_too_small() {
        let mut data = ForkBuilder::new().build();
        data[8..12].copy_from_slice(&29u32.to_le_bytes());
        assert!(matches!(validate(&data), Err(Error::BadFormat { .. })));
    }

    #[test]
    fn map_disagrees() {
        let mut data = ForkBuilder::new().build();
        // map header's own copy of the map size lives at map + 10
        data[16 + 10] = 0x21;
        assert!(matches!(validate(&data), Err(Error::BadFormat { .. })));

        let mut data = ForkBuilder::new().build();
        data[16 + 6] = 0x11;
        assert!(matches!(validate(&data), Err(Error::BadFormat { .. })));
    }

    #[test]
    fn index_past_end() {
        let mut data = ForkBuilder::new().build();
        // claim one used entry without space for it
        data[16 + 24..16 + 28].copy_from_slice(&1u32.to_le_bytes());
        assert!(matches!(validate(&data), Err(Error::BadFormat { .. })));
    }

    #[test]
    fn thirty_byte_map() {
        let data = ForkBuilder::new().map_size(30).build();
        let (file, map) = validate(&data).unwrap();
        assert_eq!(file.map_size, 30);
        assert_eq!(map.free_list_used, 0);
    }
}
