//! Core types of a parsed resource fork.
//!
//! This module contains the decoded [`ResourceRecord`], the attribute flags carried by every
//! record, and a table of the resource types Apple defined for the IIgs toolbox. The catalog
//! itself treats types as plain `u16` values; [`ResType`] exists for presentation only, and
//! applications are free to use any nonzero type.

use bitflags::bitflags;
use std::ops::Range;
use strum::{Display, EnumIter, EnumString, FromRepr};

/// A 16-bit resource type code.
pub type ResTypeCode = u16;

/// A 32-bit resource id, unique within its type.
pub type ResId = u32;

/// Type of the resource holding the name table of another type.
pub const RES_NAME_TYPE: ResTypeCode = 0x8014;

/// The name table of type `T` is stored as resource `(RES_NAME_TYPE, RES_NAME_BASE_ID + T)`.
pub const RES_NAME_BASE_ID: ResId = 0x0001_0000;

/// The only name table version this crate understands.
pub const RES_NAME_VERSION: u16 = 0x0001;

/// Size of the file header at the start of every fork.
pub const FILE_HEADER_SIZE: usize = 16;

/// Minimum size of the resource map header.
pub const MAP_HEADER_SIZE: usize = 30;

/// Size of one on-disk index entry.
pub const INDEX_ENTRY_SIZE: usize = 20;

bitflags! {
    #[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
    /// Attribute flags stored with each resource.
    ///
    /// The catalog keeps the raw `u16`; these flags only give the bits names.
    pub struct ResAttr: u16 {
        /// Memory Manager: page aligned
        const PAGE = 0x0004;
        /// Memory Manager: may not use special memory
        const NO_SPEC = 0x0008;
        /// Memory Manager: may not cross banks
        const NO_CROSS = 0x0010;
        /// Resource Manager: marked changed
        const CHANGED = 0x0020;
        /// Resource Manager: load when the file is opened
        const PRELOAD = 0x0040;
        /// Resource Manager: write protected
        const PROTECTED = 0x0080;
        /// Purge level 1
        const PURGE1 = 0x0100;
        /// Purge level 2
        const PURGE2 = 0x0200;
        /// Purge level 3 (both purge bits set)
        const PURGE3 = 0x0300;
        /// Resource Manager: load at absolute address
        const ABS_LOAD = 0x0400;
        /// Resource Manager: requires a converter routine
        const CONVERTER = 0x0800;
        /// Memory Manager: not moveable
        const FIXED = 0x4000;
        /// Memory Manager: locked
        const LOCKED = 0x8000;
    }
}

impl ResAttr {
    /// The purge level encoded in bits 8 and 9, `0..=3`.
    #[must_use]
    pub fn purge_level(self) -> u8 {
        ((self.bits() >> 8) & 0x3) as u8
    }
}

/// Resource types defined by Apple for the IIgs toolbox.
///
/// Display and parsing use the toolbox names (`rPString`, `rIcon`, ...).
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumIter, EnumString, FromRepr,
)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum ResType {
    #[strum(to_string = "rIcon")]
    Icon = 0x8001,
    #[strum(to_string = "rPicture")]
    Picture = 0x8002,
    #[strum(to_string = "rControlList")]
    ControlList = 0x8003,
    #[strum(to_string = "rControlTemplate")]
    ControlTemplate = 0x8004,
    #[strum(to_string = "rC1InputString")]
    C1InputString = 0x8005,
    #[strum(to_string = "rPString")]
    PString = 0x8006,
    #[strum(to_string = "rStringList")]
    StringList = 0x8007,
    #[strum(to_string = "rMenuBar")]
    MenuBar = 0x8008,
    #[strum(to_string = "rMenu")]
    Menu = 0x8009,
    #[strum(to_string = "rMenuItem")]
    MenuItem = 0x800A,
    #[strum(to_string = "rTextForLETextBox2")]
    TextForLETextBox2 = 0x800B,
    #[strum(to_string = "rCtlDefProc")]
    CtlDefProc = 0x800C,
    #[strum(to_string = "rCtlColorTbl")]
    CtlColorTbl = 0x800D,
    #[strum(to_string = "rWindParam1")]
    WindParam1 = 0x800E,
    #[strum(to_string = "rWindParam2")]
    WindParam2 = 0x800F,
    #[strum(to_string = "rWindColor")]
    WindColor = 0x8010,
    #[strum(to_string = "rTextBlock")]
    TextBlock = 0x8011,
    #[strum(to_string = "rStyleBlock")]
    StyleBlock = 0x8012,
    #[strum(to_string = "rToolStartup")]
    ToolStartup = 0x8013,
    #[strum(to_string = "rResName")]
    ResName = 0x8014,
    #[strum(to_string = "rAlertString")]
    AlertString = 0x8015,
    #[strum(to_string = "rText")]
    Text = 0x8016,
    #[strum(to_string = "rCodeResource")]
    CodeResource = 0x8017,
    #[strum(to_string = "rCDEVCode")]
    CDEVCode = 0x8018,
    #[strum(to_string = "rCDEVFlags")]
    CDEVFlags = 0x8019,
    #[strum(to_string = "rTwoRects")]
    TwoRects = 0x801A,
    #[strum(to_string = "rFileType")]
    FileType = 0x801B,
    #[strum(to_string = "rListRef")]
    ListRef = 0x801C,
    #[strum(to_string = "rCString")]
    CString = 0x801D,
    #[strum(to_string = "rXCMD")]
    XCMD = 0x801E,
    #[strum(to_string = "rXFCN")]
    XFCN = 0x801F,
    #[strum(to_string = "rErrorString")]
    ErrorString = 0x8020,
    #[strum(to_string = "rKTransTable")]
    KTransTable = 0x8021,
    #[strum(to_string = "rWString")]
    WString = 0x8022,
    #[strum(to_string = "rC1OutputString")]
    C1OutputString = 0x8023,
    #[strum(to_string = "rSoundSample")]
    SoundSample = 0x8024,
    #[strum(to_string = "rTERuler")]
    TERuler = 0x8025,
    #[strum(to_string = "rFSequence")]
    FSequence = 0x8026,
    #[strum(to_string = "rCursor")]
    Cursor = 0x8027,
    #[strum(to_string = "rItemStruct")]
    ItemStruct = 0x8028,
    #[strum(to_string = "rVersion")]
    Version = 0x8029,
    #[strum(to_string = "rComment")]
    Comment = 0x802A,
    #[strum(to_string = "rBundle")]
    Bundle = 0x802B,
    #[strum(to_string = "rFinderPath")]
    FinderPath = 0x802C,
    #[strum(to_string = "rPaletteWindow")]
    PaletteWindow = 0x802D,
    #[strum(to_string = "rTaggedStrings")]
    TaggedStrings = 0x802E,
    #[strum(to_string = "rPatternList")]
    PatternList = 0x802F,
    #[strum(to_string = "rRectList")]
    RectList = 0xC001,
    #[strum(to_string = "rPrintRecord")]
    PrintRecord = 0xC002,
    #[strum(to_string = "rFont")]
    Font = 0xC003,
}

impl ResType {
    /// The raw type code.
    #[must_use]
    pub fn code(self) -> ResTypeCode {
        self as ResTypeCode
    }
}

impl From<ResType> for ResTypeCode {
    fn from(value: ResType) -> Self {
        value.code()
    }
}

/// One validated entry of the resource catalog.
///
/// `offset` and `size` always describe a range inside the fork's buffer, and `index` is the
/// record's position in the sorted catalog.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ResourceRecord {
    /// Resource type, never 0
    pub res_type: ResTypeCode,
    /// Resource id, never 0
    pub res_id: ResId,
    /// Offset of the payload from the start of the fork
    pub offset: u32,
    /// Raw attribute bits, see [`ResAttr`]
    pub attr: u16,
    /// Payload size in bytes
    pub size: u32,
    /// Position in the sorted catalog
    pub index: u32,
}

impl ResourceRecord {
    /// The attribute bits as flags. Unknown bits are retained.
    #[must_use]
    pub fn attributes(&self) -> ResAttr {
        ResAttr::from_bits_retain(self.attr)
    }

    /// The well-known name of this record's type, if Apple defined one.
    #[must_use]
    pub fn well_known_type(&self) -> Option<ResType> {
        ResType::from_repr(self.res_type)
    }

    /// The byte range of the payload within the fork.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        let start = self.offset as usize;
        start..start + self.size as usize
    }

    /// The catalog sort key.
    #[must_use]
    pub fn key(&self) -> (ResTypeCode, ResId) {
        (self.res_type, self.res_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn res_type_names() {
        assert_eq!(ResType::PString.to_string(), "rPString");
        assert_eq!(ResType::from_str("rResName").unwrap(), ResType::ResName);
        assert_eq!(ResType::from_repr(0xC003), Some(ResType::Font));
        assert_eq!(ResType::from_repr(0x1234), None);
        assert_eq!(ResType::ResName.code(), RES_NAME_TYPE);
    }

    #[test]
    fn res_type_codes_ascending() {
        let codes: Vec<u16> = ResType::iter().map(ResType::code).collect();
        assert!(codes.windows(2).all(|w| w[0] < w[1]));
        assert!(codes.iter().all(|&c| c != 0));
    }

    #[test]
    fn attributes() {
        let attr = ResAttr::from_bits_retain(0x8340);
        assert!(attr.contains(ResAttr::LOCKED));
        assert!(attr.contains(ResAttr::PRELOAD));
        assert!(attr.contains(ResAttr::PURGE3));
        assert_eq!(attr.purge_level(), 3);
        assert_eq!(ResAttr::PURGE2.purge_level(), 2);
        assert_eq!(ResAttr::empty().purge_level(), 0);
    }

    #[test]
    fn record_helpers() {
        let record = ResourceRecord {
            res_type: 0x8006,
            res_id: 1,
            offset: 46,
            attr: 0x0040,
            size: 4,
            index: 0,
        };

        assert_eq!(record.range(), 46..50);
        assert_eq!(record.well_known_type(), Some(ResType::PString));
        assert_eq!(record.attributes(), ResAttr::PRELOAD);
        assert_eq!(record.key(), (0x8006, 1));
    }
}
