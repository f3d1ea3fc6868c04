//! Errors that occur while converting tables

use types::{InvalidTag, MajorMinor, Tag};

/// An error that occurs when reading binary font data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    OutOfBounds,
    // i64 is flexible enough to store any value we might encounter
    InvalidFormat(i64),
    InvalidSfnt(u32),
    TableIsMissing(Tag),
    MalformedData(&'static str),
}

/// An error that occurs when parsing the textual form of a table
#[derive(Debug, Clone, PartialEq)]
pub enum TextError {
    /// The input was not well-formed XML.
    Xml(String),
    /// An element was missing a required attribute.
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    /// An attribute that should contain a number did not.
    InvalidNumber { attribute: String, value: String },
    /// An attribute that should contain a tag did not.
    InvalidTag { value: String, error: InvalidTag },
    /// Hex data contained something other than hex digits and whitespace.
    InvalidHexData,
}

/// An error that occurs while compiling or decompiling a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The table's version is not one we know how to parse.
    UnsupportedVersion { tag: Tag, version: MajorMinor },
    /// The table needs the font's axis registry (`fvar`), and there is none.
    MissingAxisRegistry,
    /// The number of axes in the table does not agree with the axis registry.
    RegistryMismatch {
        table_axes: usize,
        registry_axes: usize,
    },
    /// A segment map is stored for an axis that the axis registry lacks.
    UnknownAxis { axis: Tag },
    /// A coordinate cannot be represented in the binary form.
    OutOfRange { axis: Option<Tag>, value: f64 },
    /// A segment map has more points than its 16-bit count can express.
    TooManyPoints { axis: Tag, count: usize },
    /// The textual form of a table was malformed.
    Text(TextError),
    /// The binary form of a table was malformed.
    Read(ReadError),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "An offset was out of bounds"),
            ReadError::InvalidFormat(x) => write!(f, "Invalid format '{x}'"),
            ReadError::InvalidSfnt(ver) => write!(f, "Invalid sfnt version 0x{ver:08X}"),
            ReadError::TableIsMissing(tag) => write!(f, "the {tag} table is missing"),
            ReadError::MalformedData(msg) => write!(f, "Malformed data: '{msg}'"),
        }
    }
}

impl std::fmt::Display for TextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextError::Xml(msg) => write!(f, "malformed XML: {msg}"),
            TextError::MissingAttribute { element, attribute } => {
                write!(f, "<{element}> is missing required attribute '{attribute}'")
            }
            TextError::InvalidNumber { attribute, value } => {
                write!(f, "attribute '{attribute}' is not a number: '{value}'")
            }
            TextError::InvalidTag { value, error } => write!(f, "invalid tag '{value}': {error}"),
            TextError::InvalidHexData => write!(f, "hexdata contains non-hex characters"),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnsupportedVersion { tag, version } => {
                write!(f, "unsupported '{tag}' table version {version}")
            }
            Error::MissingAxisRegistry => {
                write!(f, "the font has no 'fvar' table to associate axes with")
            }
            Error::RegistryMismatch {
                table_axes,
                registry_axes,
            } => write!(
                f,
                "table has {table_axes} axes but 'fvar' declares {registry_axes}"
            ),
            Error::UnknownAxis { axis } => {
                write!(f, "axis '{axis}' is not in the font's axis registry")
            }
            Error::OutOfRange {
                axis: Some(axis),
                value,
            } => write!(f, "value {value} for axis '{axis}' is out of range for F2Dot14"),
            Error::OutOfRange { axis: None, value } => {
                write!(f, "value {value} is out of range for F2Dot14")
            }
            Error::TooManyPoints { axis, count } => {
                write!(f, "axis '{axis}' has {count} points, more than {}", u16::MAX)
            }
            Error::Text(err) => err.fmt(f),
            Error::Read(err) => err.fmt(f),
        }
    }
}

impl From<ReadError> for Error {
    fn from(src: ReadError) -> Error {
        Error::Read(src)
    }
}

impl From<TextError> for Error {
    fn from(src: TextError) -> Error {
        Error::Text(src)
    }
}

impl std::error::Error for ReadError {}
impl std::error::Error for TextError {}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Text(err) => Some(err),
            Error::Read(err) => Some(err),
            _ => None,
        }
    }
}
