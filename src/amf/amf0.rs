//! AMF0 decoder
//!
//! AMF0 is the original Action Message Format used in Flash/RTMP and in FLV
//! script-data tags.
//! Reference: AMF0 File Format Specification (amf0-file-format-specification.pdf)
//!
//! Type Markers:
//! ```text
//! 0x00 - Number (IEEE 754 double)
//! 0x01 - Boolean
//! 0x02 - String (UTF-8, 16-bit length prefix)
//! 0x03 - Object (key-value pairs until 0x000009)
//! 0x05 - Null
//! 0x06 - Undefined
//! 0x08 - ECMA Array (32-bit count hint + key-value pairs until 0x000009)
//! 0x09 - Object End (0x000009 sequence)
//! 0x0A - Strict Array (32-bit count + values)
//! 0x0B - Date (double + 16-bit timezone offset in minutes)
//! 0x0C - Long String (UTF-8, 32-bit length prefix)
//! 0x0D - Unsupported
//! 0x0F - XML Document (UTF-8, 32-bit length prefix)
//! 0x10 - Typed Object (class name + properties)
//! ```
//!
//! Any other marker (MovieClip, Reference, RecordSet, AVM+) is skipped in
//! lenient mode: the value becomes `Undefined` and consumes the rest of the
//! declared region.
//!
//! Every decode works on a borrowed `(buffer, offset, limit)` region and
//! reports how many bytes it consumed, so a demuxer can advance its own
//! cursor without re-scanning.

use crate::error::AmfError;

use super::reader::Cursor;
use super::value::{AmfDate, AmfValue, Properties};

// AMF0 type markers
const MARKER_NUMBER: u8 = 0x00;
const MARKER_BOOLEAN: u8 = 0x01;
const MARKER_STRING: u8 = 0x02;
const MARKER_OBJECT: u8 = 0x03;
const MARKER_NULL: u8 = 0x05;
const MARKER_UNDEFINED: u8 = 0x06;
const MARKER_ECMA_ARRAY: u8 = 0x08;
const MARKER_OBJECT_END: u8 = 0x09;
const MARKER_STRICT_ARRAY: u8 = 0x0A;
const MARKER_DATE: u8 = 0x0B;
const MARKER_LONG_STRING: u8 = 0x0C;
const MARKER_UNSUPPORTED: u8 = 0x0D;
const MARKER_XML_DOCUMENT: u8 = 0x0F;
const MARKER_TYPED_OBJECT: u8 = 0x10;

/// Maximum nesting depth for objects/arrays (prevent stack overflow)
pub const MAX_NESTING_DEPTH: usize = 64;

/// Empty name (u16 0) followed by the object end marker
const OBJECT_END_LEN: usize = 3;

/// Date payload: f64 timestamp + i16 offset
const DATE_LEN: usize = 10;

/// Cap on the initial allocation for strict arrays; counts come off the wire
const MAX_PREALLOC: usize = 1024;

/// Decoder settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Tolerate encoder quirks: skip unknown markers and accept keyed
    /// containers that run out of data before their end marker
    pub lenient: bool,

    /// Maximum value nesting before decoding fails
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            // Default to lenient, real-world producers omit end markers
            lenient: true,
            max_depth: MAX_NESTING_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Strict mode - reject unknown markers and missing end markers
    pub fn strict() -> Self {
        Self {
            lenient: false,
            ..Self::default()
        }
    }
}

/// A decoded value and the number of bytes it occupied, marker included
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub value: AmfValue,
    pub consumed: usize,
}

/// One name/value pair of a keyed container
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    /// `Undefined` when this is the terminator
    pub value: AmfValue,
    /// Set only for the object end sentinel
    pub is_terminator: bool,
}

/// AMF0 decoder
///
/// Holds configuration only. Each call builds its own reader, so one decoder
/// can be shared freely and no state leaks between calls.
#[derive(Debug, Clone, Default)]
pub struct Amf0Decoder {
    options: DecodeOptions,
}

impl Amf0Decoder {
    /// Create a new decoder with default (lenient) settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Create decoder with explicit lenient mode setting
    pub fn with_lenient(lenient: bool) -> Self {
        Self::with_options(DecodeOptions {
            lenient,
            ..DecodeOptions::default()
        })
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode one value starting at `offset`, reading no further than `limit`
    ///
    /// `limit` is an absolute, exclusive end position in `buf`.
    pub fn decode_value(
        &self,
        buf: &[u8],
        offset: usize,
        limit: usize,
    ) -> Result<Decoded, AmfError> {
        let mut reader = ValueReader::new(buf, offset, limit, &self.options)?;
        let value = reader.plain_value()?;
        Ok(Decoded {
            value,
            consumed: reader.consumed(),
        })
    }

    /// Decode one name/value pair starting at `offset`
    pub fn decode_property(
        &self,
        buf: &[u8],
        offset: usize,
        limit: usize,
    ) -> Result<(Property, usize), AmfError> {
        let mut reader = ValueReader::new(buf, offset, limit, &self.options)?;
        let property = reader.property()?;
        Ok((property, reader.consumed()))
    }

    /// Decode consecutive values until the buffer is exhausted
    pub fn decode_all(&self, buf: &[u8]) -> Result<Vec<AmfValue>, AmfError> {
        let mut reader = ValueReader::new(buf, 0, buf.len(), &self.options)?;
        let mut values = Vec::new();
        while !reader.cur.is_empty() {
            values.push(reader.plain_value()?);
        }
        Ok(values)
    }

    /// Decode a whole script-data payload as one named record
    pub fn decode_metadata(&self, buf: &[u8]) -> Result<Properties, AmfError> {
        self.decode_metadata_at(buf, 0, buf.len())
            .map(|(metadata, _)| metadata)
    }

    /// Decode one named record from `buf[offset..offset + size]`
    ///
    /// The record is a name value (conventionally the string `onMetaData`)
    /// followed by one value, returned as a single-entry map along with the
    /// number of bytes consumed. Scalar names are stringified; a container or
    /// date name fails with [`AmfError::InvalidPropertyName`].
    pub fn decode_metadata_at(
        &self,
        buf: &[u8],
        offset: usize,
        size: usize,
    ) -> Result<(Properties, usize), AmfError> {
        let limit = offset.saturating_add(size);
        let mut reader = ValueReader::new(buf, offset, limit, &self.options)?;

        let name = record_name(reader.plain_value()?)
            .ok_or(AmfError::InvalidPropertyName { offset })?;
        tracing::trace!(name = %name, offset = offset, size = size, "Decoding script data record");

        let value = reader.plain_value()?;
        let mut metadata = Properties::with_capacity(1);
        metadata.insert(name, value);
        Ok((metadata, reader.consumed()))
    }
}

/// Key for a metadata record, following script-engine string conversion
fn record_name(value: AmfValue) -> Option<String> {
    match value {
        AmfValue::String(name) => Some(name),
        AmfValue::Number(n) => Some(n.to_string()),
        AmfValue::Boolean(b) => Some(b.to_string()),
        AmfValue::Null => Some("null".to_string()),
        AmfValue::Undefined => Some("undefined".to_string()),
        _ => None,
    }
}

/// Result of reading one marker: a value, or the container terminator
enum Item {
    Value(AmfValue),
    ObjectEnd,
}

/// Per-call decoding state
struct ValueReader<'a, 'o> {
    cur: Cursor<'a>,
    options: &'o DecodeOptions,
    start: usize,
    depth: usize,
    /// An unknown marker swallowed the rest of the region
    skipped: bool,
}

impl<'a, 'o> ValueReader<'a, 'o> {
    fn new(
        buf: &'a [u8],
        offset: usize,
        limit: usize,
        options: &'o DecodeOptions,
    ) -> Result<Self, AmfError> {
        Ok(Self {
            cur: Cursor::new(buf, offset, limit)?,
            options,
            start: offset,
            depth: 0,
            skipped: false,
        })
    }

    fn consumed(&self) -> usize {
        self.cur.position() - self.start
    }

    /// Read a value where a terminator has no meaning; it decodes as Undefined
    fn plain_value(&mut self) -> Result<AmfValue, AmfError> {
        match self.value()? {
            Item::Value(value) => Ok(value),
            Item::ObjectEnd => Ok(AmfValue::Undefined),
        }
    }

    fn value(&mut self) -> Result<Item, AmfError> {
        let offset = self.cur.position();
        let marker = self.cur.read_u8()?;

        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(AmfError::NestingTooDeep {
                depth: self.options.max_depth,
            });
        }

        let result = self.dispatch(marker, offset);
        self.depth -= 1;
        result
    }

    fn dispatch(&mut self, marker: u8, offset: usize) -> Result<Item, AmfError> {
        let value = match marker {
            MARKER_NUMBER => AmfValue::Number(self.cur.read_f64()?),
            MARKER_BOOLEAN => AmfValue::Boolean(self.cur.read_u8()? != 0),
            MARKER_STRING => AmfValue::String(self.short_string()?),
            MARKER_OBJECT => AmfValue::Object(self.properties()?),
            MARKER_NULL => AmfValue::Null,
            MARKER_UNDEFINED | MARKER_UNSUPPORTED => AmfValue::Undefined,
            MARKER_ECMA_ARRAY => {
                // Count hint, encoders don't always fill it in correctly
                let _count = self.cur.read_u32()?;
                AmfValue::EcmaArray(self.properties()?)
            }
            MARKER_OBJECT_END => return Ok(Item::ObjectEnd),
            MARKER_STRICT_ARRAY => AmfValue::StrictArray(self.strict_array()?),
            MARKER_DATE => AmfValue::Date(self.date()?),
            MARKER_LONG_STRING => AmfValue::String(self.long_string()?),
            MARKER_XML_DOCUMENT => AmfValue::Xml(self.long_string()?),
            MARKER_TYPED_OBJECT => {
                let class_name = self.short_string()?;
                AmfValue::TypedObject {
                    class_name,
                    properties: self.properties()?,
                }
            }
            _ => {
                if !self.options.lenient {
                    return Err(AmfError::UnknownMarker { marker, offset });
                }
                let skipped = self.cur.skip_to_limit();
                self.skipped = true;
                tracing::warn!(
                    marker = marker,
                    offset = offset,
                    skipped = skipped,
                    "Unsupported AMF0 marker, skipping rest of region"
                );
                AmfValue::Undefined
            }
        };
        Ok(Item::Value(value))
    }

    /// UTF-8 string with 16-bit length prefix (no type marker)
    fn short_string(&mut self) -> Result<String, AmfError> {
        let len = self.cur.read_u16()? as usize;
        self.cur.read_utf8(len)
    }

    /// UTF-8 string with 32-bit length prefix (no type marker)
    fn long_string(&mut self) -> Result<String, AmfError> {
        let len = self.cur.read_u32()? as usize;
        self.cur.read_utf8(len)
    }

    fn date(&mut self) -> Result<AmfDate, AmfError> {
        self.cur.ensure(DATE_LEN)?;
        let timestamp = self.cur.read_f64()?;
        let offset_minutes = self.cur.read_i16()?;
        Ok(AmfDate::new(timestamp, offset_minutes))
    }

    fn strict_array(&mut self) -> Result<Vec<AmfValue>, AmfError> {
        let count = self.cur.read_u32()? as usize;

        let mut elements = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            if self.skipped && self.cur.is_empty() {
                tracing::debug!(
                    decoded = elements.len(),
                    count = count,
                    "Strict array cut short by skipped marker"
                );
                break;
            }
            elements.push(self.plain_value()?);
        }
        Ok(elements)
    }

    fn property(&mut self) -> Result<Property, AmfError> {
        let name = self.short_string()?;
        let property = match self.value()? {
            Item::Value(value) => Property {
                name,
                value,
                is_terminator: false,
            },
            Item::ObjectEnd => Property {
                name,
                value: AmfValue::Undefined,
                is_terminator: true,
            },
        };
        Ok(property)
    }

    /// Properties of an Object, ECMA Array or Typed Object body
    ///
    /// Stops at the end marker, or when the declared region can no longer
    /// hold one; some encoders omit the marker entirely.
    fn properties(&mut self) -> Result<Properties, AmfError> {
        let mut properties = Properties::new();

        loop {
            if self.cur.remaining() < OBJECT_END_LEN {
                if !self.options.lenient {
                    return Err(AmfError::MissingObjectEnd {
                        offset: self.cur.position(),
                    });
                }
                tracing::debug!(
                    offset = self.cur.position(),
                    remaining = self.cur.remaining(),
                    properties = properties.len(),
                    "Object end marker missing, ending container at declared size"
                );
                break;
            }

            let property = self.property()?;
            if property.is_terminator {
                break;
            }
            properties.insert(property.name, property.value);
        }

        Ok(properties)
    }
}

/// Convenience function to decode a single value from `buf[offset..limit]`
pub fn decode_value(buf: &[u8], offset: usize, limit: usize) -> Result<Decoded, AmfError> {
    Amf0Decoder::new().decode_value(buf, offset, limit)
}

/// Convenience function to decode a single name/value pair
pub fn decode_property(
    buf: &[u8],
    offset: usize,
    limit: usize,
) -> Result<(Property, usize), AmfError> {
    Amf0Decoder::new().decode_property(buf, offset, limit)
}

/// Convenience function to decode all values
pub fn decode_all(buf: &[u8]) -> Result<Vec<AmfValue>, AmfError> {
    Amf0Decoder::new().decode_all(buf)
}

/// Convenience function to decode an `onMetaData`-style record
pub fn decode_metadata(buf: &[u8]) -> Result<Properties, AmfError> {
    Amf0Decoder::new().decode_metadata(buf)
}

/// Convenience function to decode a record from a sub-range of `buf`
pub fn decode_metadata_at(
    buf: &[u8],
    offset: usize,
    size: usize,
) -> Result<(Properties, usize), AmfError> {
    Amf0Decoder::new().decode_metadata_at(buf, offset, size)
}
