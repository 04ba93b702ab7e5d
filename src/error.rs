//! Unified error types for flv-amf

use std::fmt;

/// Result type alias using the library's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for all decoding operations
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// AMF decoding error
    Amf(AmfError),
    /// FLV tag handling error
    Media(MediaError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Amf(e) => write!(f, "AMF error: {}", e),
            Error::Media(e) => write!(f, "Media error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Amf(e) => Some(e),
            Error::Media(e) => Some(e),
        }
    }
}

impl From<AmfError> for Error {
    fn from(err: AmfError) -> Self {
        Error::Amf(err)
    }
}

impl From<MediaError> for Error {
    fn from(err: MediaError) -> Self {
        Error::Media(err)
    }
}

/// AMF0 decoding errors
///
/// Offsets are absolute positions in the buffer handed to the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmfError {
    /// A read needed more bytes than the declared region holds
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// String payload is not valid UTF-8
    InvalidUtf8 { offset: usize },
    /// Containers nested deeper than the configured limit
    NestingTooDeep { depth: usize },
    /// Unknown type marker (strict mode only)
    UnknownMarker { marker: u8, offset: usize },
    /// Keyed container ran out of data before its end marker (strict mode only)
    MissingObjectEnd { offset: usize },
    /// Metadata record name was a container or date, not a scalar
    InvalidPropertyName { offset: usize },
}

impl fmt::Display for AmfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmfError::Truncated {
                offset,
                needed,
                available,
            } => write!(
                f,
                "Unexpected end of AMF data at offset {}: needed {} bytes, {} available",
                offset, needed, available
            ),
            AmfError::InvalidUtf8 { offset } => {
                write!(f, "Invalid UTF-8 in AMF string at offset {}", offset)
            }
            AmfError::NestingTooDeep { depth } => {
                write!(f, "AMF nesting too deep (limit {})", depth)
            }
            AmfError::UnknownMarker { marker, offset } => {
                write!(f, "Unknown AMF marker 0x{:02x} at offset {}", marker, offset)
            }
            AmfError::MissingObjectEnd { offset } => {
                write!(f, "Missing object end marker at offset {}", offset)
            }
            AmfError::InvalidPropertyName { offset } => {
                write!(f, "Metadata name at offset {} is not a scalar value", offset)
            }
        }
    }
}

impl std::error::Error for AmfError {}

/// FLV tag errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// Tag type byte does not name an FLV tag
    InvalidFlvTag(u8),
    /// Metadata was requested from an audio or video tag
    NotScriptData,
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::InvalidFlvTag(t) => write!(f, "Invalid FLV tag type: {}", t),
            MediaError::NotScriptData => write!(f, "FLV tag does not carry script data"),
        }
    }
}

impl std::error::Error for MediaError {}
