//! Metadata dump example
//!
//! Run with: cargo run --example dump_metadata -- video.flv
//!
//! Accepts either a whole FLV file (the first script-data tag is used) or a
//! raw script-data payload, and prints the decoded metadata.
//! Pass `--strict` to reject malformed AMF instead of recovering.

use bytes::Bytes;
use flv_amf::{Amf0Decoder, DecodeOptions, FlvTag, FlvTagType};

/// FLV file header (9) + PreviousTagSize0 (4)
const FLV_HEADER_LEN: usize = 13;
/// Type(1) + DataSize(3) + Timestamp(3+1) + StreamID(3)
const TAG_HEADER_LEN: usize = 11;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flv_amf=debug".parse()?),
        )
        .init();

    let mut path = None;
    let mut options = DecodeOptions::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--strict" => options = DecodeOptions::strict(),
            _ => path = Some(arg),
        }
    }
    let path = path.unwrap_or_else(|| {
        eprintln!("Usage: dump_metadata [--strict] <file>");
        std::process::exit(1);
    });

    let data = Bytes::from(std::fs::read(&path)?);
    let tag = if data.starts_with(b"FLV") {
        match first_script_tag(&data) {
            Some(tag) => tag,
            None => {
                eprintln!("No script-data tag found in {}", path);
                std::process::exit(1);
            }
        }
    } else {
        FlvTag::script(0, data)
    };

    println!("Script tag: {} bytes at {}ms", tag.size(), tag.timestamp);

    let decoder = Amf0Decoder::with_options(options);
    let metadata = tag.metadata_with(&decoder)?;
    for (name, value) in &metadata {
        println!("{}: {:#?}", name, value);
    }

    Ok(())
}

/// Walk FLV tag headers until the first script-data tag
fn first_script_tag(data: &Bytes) -> Option<FlvTag> {
    let mut pos = FLV_HEADER_LEN;
    while pos + TAG_HEADER_LEN <= data.len() {
        let header = &data[pos..pos + TAG_HEADER_LEN];
        let size = u32::from_be_bytes([0, header[1], header[2], header[3]]) as usize;
        let timestamp = u32::from_be_bytes([header[7], header[4], header[5], header[6]]);

        let body = pos + TAG_HEADER_LEN;
        if body + size > data.len() {
            return None;
        }

        if let Ok(FlvTagType::Script) = FlvTagType::from_byte(header[0]) {
            return Some(FlvTag::script(timestamp, data.slice(body..body + size)));
        }

        // Skip body and PreviousTagSize
        pos = body + size + 4;
    }
    None
}
