//! Decompression detection for fetched objects.
//!
//! Objects carry no reliable marker of how they were written, so decoding is a
//! sequence of attempts: gzip, then zip, then the bytes as plain text. Each
//! attempt works on a borrowed slice and either returns a fresh buffer or an
//! error, so a failed attempt leaves nothing behind for the next one.

mod archive;
mod error;
mod gzip;

pub use error::DecodeError;

use tracing::debug;

/// How an object's payload turned out to be encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Gzip,
    Zip,
    Plain,
}

/// A decompression attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    Gzip,
    Zip,
}

/// Order used when nothing hints at the encoding.
pub const SNIFF_ORDER: [DecodeStrategy; 2] = [DecodeStrategy::Gzip, DecodeStrategy::Zip];

impl DecodeStrategy {
    pub fn attempt(self, bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
        match self {
            DecodeStrategy::Gzip => gzip::decompress(bytes),
            DecodeStrategy::Zip => archive::decompress(bytes),
        }
    }

    /// Map a declared content type to the strategy it names, if any.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/gzip" | "application/x-gzip" => Some(DecodeStrategy::Gzip),
            "application/zip" | "application/x-zip-compressed" => Some(DecodeStrategy::Zip),
            _ => None,
        }
    }

    pub fn encoding(self) -> Encoding {
        match self {
            DecodeStrategy::Gzip => Encoding::Gzip,
            DecodeStrategy::Zip => Encoding::Zip,
        }
    }
}

/// Decoded text plus the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub encoding: Encoding,
}

/// Decode an object payload by sniffing.
pub fn decode(bytes: &[u8]) -> String {
    decode_with_hint(bytes, None).text
}

/// Decode an object payload, trying the strategy named by `content_type` first.
///
/// A hint only changes the order of attempts; when the hinted strategy fails
/// the remaining ones still run.
pub fn decode_with_hint(bytes: &[u8], content_type: Option<&str>) -> Decoded {
    if bytes.is_empty() {
        return Decoded {
            text: String::new(),
            encoding: Encoding::Plain,
        };
    }

    for strategy in strategy_order(content_type) {
        match strategy.attempt(bytes) {
            Ok(decompressed) => {
                debug!(
                    ?strategy,
                    compressed = bytes.len(),
                    decompressed = decompressed.len(),
                    "Object body was compressed"
                );
                return Decoded {
                    text: into_text(decompressed),
                    encoding: strategy.encoding(),
                };
            }
            Err(e) => debug!(?strategy, error = %e, "Decompression attempt failed"),
        }
    }

    debug!("Could not decompress gzip or zip, using the body as is");
    Decoded {
        text: String::from_utf8_lossy(bytes).into_owned(),
        encoding: Encoding::Plain,
    }
}

fn strategy_order(content_type: Option<&str>) -> Vec<DecodeStrategy> {
    let hinted = content_type.and_then(DecodeStrategy::from_content_type);
    let mut order = Vec::with_capacity(SNIFF_ORDER.len());
    if let Some(strategy) = hinted {
        order.push(strategy);
    }
    order.extend(SNIFF_ORDER.iter().copied().filter(|s| Some(*s) != hinted));
    order
}

fn into_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
