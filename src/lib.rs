//! flv-amf: AMF0 script-data decoder for FLV demuxers
//!
//! This library decodes the AMF0 values carried in FLV script-data tags,
//! most commonly the `onMetaData` record:
//! - Number, Boolean, String/Long String, Date, Null/Undefined
//! - Object, ECMA Array, Typed Object and Strict Array containers
//! - Lenient parsing for encoders that omit object end markers
//! - Byte-exact consumption counts so callers can advance their own cursor
//!
//! # Example: Decoding onMetaData
//!
//! ```
//! use flv_amf::amf::decode_metadata;
//!
//! let mut payload = vec![0x02, 0x00, 0x0A];
//! payload.extend_from_slice(b"onMetaData");
//! payload.extend_from_slice(&[0x08, 0x00, 0x00, 0x00, 0x01]);
//! payload.extend_from_slice(&[0x00, 0x08]);
//! payload.extend_from_slice(b"duration");
//! payload.push(0x00);
//! payload.extend_from_slice(&12.5f64.to_be_bytes());
//! payload.extend_from_slice(&[0x00, 0x00, 0x09]);
//!
//! let metadata = decode_metadata(&payload)?;
//! assert_eq!(metadata["onMetaData"].get_number("duration"), Some(12.5));
//! # Ok::<(), flv_amf::AmfError>(())
//! ```

pub mod amf;
pub mod error;
pub mod media;

// Re-export main types for convenience
pub use amf::{Amf0Decoder, AmfValue, DecodeOptions, Decoded, Properties};
pub use error::{AmfError, Error, MediaError, Result};
pub use media::{FlvTag, FlvTagType};
