//! FLV tag handoff
//!
//! The container demuxer owns tag framing; this module only models the tag
//! it hands over and decodes the AMF0 payload of script-data tags.
//!
//! FLV Tag Structure (for reference, framing is parsed by the caller):
//! ```text
//! +--------+-------------+-----------+-------------+---------+
//! | Type(1)| DataSize(3) | TS(3+1)   | StreamID(3) | Data(N) |
//! +--------+-------------+-----------+-------------+---------+
//! ```
//!
//! Script data payload:
//! ```text
//! [String "@setDataFrame"]  (optional, live encoders)
//! String "onMetaData"
//! ECMA Array / Object { duration, width, height, ... }
//! ```

use bytes::Bytes;

use crate::amf::{Amf0Decoder, Properties};
use crate::error::{MediaError, Result};

/// Name some encoders put in front of the metadata record
const SET_DATA_FRAME: &str = "@setDataFrame";

/// FLV tag type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlvTagType {
    Audio = 8,
    Video = 9,
    Script = 18,
}

impl FlvTagType {
    pub fn from_byte(b: u8) -> std::result::Result<Self, MediaError> {
        // Upper bits are reserved/filter flags
        match b & 0x1F {
            8 => Ok(FlvTagType::Audio),
            9 => Ok(FlvTagType::Video),
            18 => Ok(FlvTagType::Script),
            other => Err(MediaError::InvalidFlvTag(other)),
        }
    }
}

/// Tag body handed over by the demuxer
#[derive(Debug, Clone)]
pub struct FlvTag {
    /// Tag type
    pub tag_type: FlvTagType,
    /// Timestamp in milliseconds
    pub timestamp: u32,
    /// Raw tag data
    pub data: Bytes,
}

impl FlvTag {
    pub fn new(tag_type: FlvTagType, timestamp: u32, data: Bytes) -> Self {
        Self {
            tag_type,
            timestamp,
            data,
        }
    }

    /// Create a new script-data tag
    pub fn script(timestamp: u32, data: Bytes) -> Self {
        Self::new(FlvTagType::Script, timestamp, data)
    }

    /// Check if this is a script-data tag
    pub fn is_script(&self) -> bool {
        self.tag_type == FlvTagType::Script
    }

    /// Get the size of the tag data
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Decode the metadata record with default (lenient) settings
    pub fn metadata(&self) -> Result<Properties> {
        self.metadata_with(&Amf0Decoder::new())
    }

    /// Decode the metadata record, skipping a leading `@setDataFrame`
    pub fn metadata_with(&self, decoder: &Amf0Decoder) -> Result<Properties> {
        if !self.is_script() {
            return Err(MediaError::NotScriptData.into());
        }

        let data = &self.data[..];
        let first = decoder.decode_value(data, 0, data.len())?;
        let offset = if first.value.as_str() == Some(SET_DATA_FRAME) {
            tracing::trace!(timestamp = self.timestamp, "Skipping @setDataFrame wrapper");
            first.consumed
        } else {
            0
        };

        let (metadata, _) = decoder.decode_metadata_at(data, offset, data.len() - offset)?;
        Ok(metadata)
    }
}
