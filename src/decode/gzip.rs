use super::error::DecodeError;
use flate2::read::MultiGzDecoder;
use std::io::Read;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decompress a (possibly multi-member) gzip stream.
pub(super) fn decompress(bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Err(DecodeError::NotGzip);
    }

    let mut decoder = MultiGzDecoder::new(bytes);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(DecodeError::Gzip)?;
    Ok(decompressed)
}
