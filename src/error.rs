use thiserror::Error;

macro_rules! bad_format {
    // Single string version
    ($msg:expr) => {
        crate::Error::BadFormat {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::BadFormat {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The first six variants mirror the error taxonomy of the GS/OS Resource Manager and are
/// mutually exclusive per call. Each of them maps to the toolbox error number through
/// [`Error::code`]. The remaining variants cover the byte access layer and file loading.
///
/// # Error Categories
///
/// ## Container Errors (terminal for a fork)
/// - [`Error::BadFormat`] - Header, map or index inconsistency, or an arithmetic overflow
/// - [`Error::InvalidTypeOrID`] - An index entry (or a query) uses the reserved zero type or id
///
/// ## Query Errors (local to one call)
/// - [`Error::NotFound`] - Well-formed query without a matching record
/// - [`Error::IndexRange`] - Position argument outside `[0, count)`
/// - [`Error::NameNotFound`] - Name table absent, truncated, or without a matching entry
/// - [`Error::BadNameVersion`] - Name table with an unsupported version
///
/// ## Ambient Errors
/// - [`Error::OutOfBounds`] - A cursor read would have left the underlying slice
/// - [`Error::FileError`] - Filesystem I/O errors while loading a fork
///
/// # Examples
///
/// ```rust
/// use rsrcscope::{Error, ResourceFork};
///
/// match ResourceFork::from_slice(&[0u8; 8]) {
///     Ok(_) => unreachable!(),
///     Err(Error::BadFormat { message, .. }) => println!("not a resource fork: {message}"),
///     Err(e) => println!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The container is damaged and could not be parsed.
    ///
    /// Raised for any header or map inconsistency, for index entries whose payload
    /// would extend past the end of the buffer, and for offset arithmetic overflows.
    /// The error includes the source location where the problem was detected.
    #[error("Bad format - {file}:{line}: {message}")]
    BadFormat {
        /// The message to be printed for the BadFormat error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A resource type or resource id of zero was encountered.
    ///
    /// Zero is reserved in both spaces. During construction this aborts the whole
    /// catalog build; as a query argument it fails only that query.
    #[error("Resource type or ID is 0")]
    InvalidTypeOrID,

    /// No resource with the given type and id exists.
    #[error("Resource not found - type 0x{res_type:04X}, id 0x{res_id:08X}")]
    NotFound {
        /// The requested resource type
        res_type: u16,
        /// The requested resource id
        res_id: u32,
    },

    /// A positional argument was out of range.
    #[error("Index {0} is out of range")]
    IndexRange(usize),

    /// No resource with the given name exists.
    ///
    /// Also reported when the type has no name table, or when the table ends before
    /// a matching entry could be decoded.
    #[error("No resource with the given name")]
    NameNotFound,

    /// The name table resource carries an unsupported version.
    #[error("Bad version in rResName resource - {0}")]
    BadNameVersion(u16),

    /// An out of bound access was attempted while reading.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while opening or mapping a file.
    #[error("{0}")]
    FileError(#[from] std::io::Error),
}

impl Error {
    /// Returns the GS/OS toolbox error number that corresponds to this error.
    ///
    /// Ambient errors without a toolbox counterpart report `resBadFormat` for
    /// out of bound reads and `resFileNotFound` for I/O failures.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Error::BadFormat { .. } | Error::OutOfBounds => 0x1E02,
            Error::NotFound { .. } => 0x1E06,
            Error::FileError(_) => 0x1E07,
            Error::IndexRange(_) => 0x1E0A,
            Error::NameNotFound => 0x1E10,
            Error::BadNameVersion(_) => 0x1E11,
            Error::InvalidTypeOrID => 0x1E13,
        }
    }

    /// Returns `true` if this error describes a corrupt container rather than a failed query.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::BadFormat { .. } | Error::OutOfBounds | Error::InvalidTypeOrID
        )
    }
}
