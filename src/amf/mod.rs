//! AMF (Action Message Format) decoding
//!
//! AMF is Adobe's binary serialization format. FLV files carry AMF0 in
//! script-data tags, most commonly the `onMetaData` record holding duration,
//! frame size and codec hints. This module decodes AMF0 only; AMF3 payloads
//! (behind the AVM+ marker 0x11) are skipped like any unknown marker.

pub mod amf0;
pub mod reader;
pub mod value;

pub use amf0::{
    decode_all, decode_metadata, decode_metadata_at, decode_property, decode_value, Amf0Decoder,
    DecodeOptions, Decoded, Property,
};
pub use reader::Cursor;
pub use value::{AmfDate, AmfValue, Properties};
