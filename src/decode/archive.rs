use super::error::DecodeError;
use std::io::{Cursor, Read};
use tracing::{debug, error};

/// Read every file of a zip archive, in archive order, each followed by `\n`.
///
/// Only opening the archive can fail. A member that cannot be read is logged
/// and left out; its partial content never reaches the output.
pub(super) fn decompress(bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut decompressed = Vec::new();

    for index in 0..archive.len() {
        let mut member = match archive.by_index(index) {
            Ok(member) => member,
            Err(e) => {
                error!(index, error = %e, "Encountered error while trying to read zip member");
                continue;
            }
        };

        if member.is_dir() {
            continue;
        }

        let mut content = Vec::new();
        match member.read_to_end(&mut content) {
            Ok(_) => {
                debug!(name = member.name(), size = content.len(), "Read zip member");
                decompressed.extend_from_slice(&content);
                decompressed.push(b'\n');
            }
            Err(e) => {
                error!(name = member.name(), error = %e, "Encountered error while trying to read zip member");
            }
        }
    }

    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    #[test]
    fn test_rejects_non_zip() {
        assert!(matches!(decompress(b"hello"), Err(DecodeError::Zip(_))));
    }

    #[test]
    fn test_directories_are_skipped() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .add_directory("nested/", SimpleFileOptions::default())
            .unwrap();
        writer
            .start_file("nested/app.log", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"entry").unwrap();
        let payload = writer.finish().unwrap().into_inner();

        assert_eq!(decompress(&payload).unwrap(), b"entry\n");
    }

    #[test]
    fn test_unreadable_member_is_skipped() {
        let stored = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("a.log", stored).unwrap();
        writer.write_all(b"broken member").unwrap();
        writer.start_file("b.log", stored).unwrap();
        writer.write_all(b"good").unwrap();
        let mut payload = writer.finish().unwrap().into_inner();

        // Flip a data byte so the first member fails its CRC check.
        let offset = payload
            .windows(b"broken member".len())
            .position(|window| window == b"broken member")
            .unwrap();
        payload[offset] ^= 0xff;

        assert_eq!(decompress(&payload).unwrap(), b"good\n");
    }
}
