use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Not a gzip stream")]
    NotGzip,
    #[error("Gzip decompression failed: {0}")]
    Gzip(#[source] std::io::Error),
    #[error("Zip archive could not be opened: {0}")]
    Zip(#[from] zip::result::ZipError),
}
