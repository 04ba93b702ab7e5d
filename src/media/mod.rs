//! Media container glue
//!
//! This module provides the FLV script-data tag handoff between a demuxer
//! and the AMF0 decoder.

pub mod flv;

pub use flv::{FlvTag, FlvTagType};
