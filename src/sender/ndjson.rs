use super::{LogSink, SinkError};
use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Writes records as newline-delimited JSON.
pub struct NdjsonSink<W> {
    writer: Mutex<W>,
}

impl<W> NdjsonSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl NdjsonSink<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait]
impl<W> LogSink for NdjsonSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&self, records: Vec<Vec<u8>>) -> Result<usize, SinkError> {
        let mut writer = self.writer.lock().await;
        for record in &records {
            writer.write_all(record).await?;
            writer.write_all(b"\n").await?;
        }
        writer.flush().await?;
        Ok(records.len())
    }
}
