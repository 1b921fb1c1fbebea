use async_trait::async_trait;
use stockalerts_core::Alert;
use stockalerts_ports::{AlertEmitter, EmitError};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Emitter that writes each alert as one JSON line
///
/// Writes are serialized under a lock, so concurrent alerts never interleave.
/// A write cut short by an error or a cancelled `emit` (the evaluator's
/// timeout) leaves the line open; the next emit terminates it first, so the
/// following alert always starts on a fresh line.
pub struct JsonLinesEmitter<W> {
    sink: Mutex<LineSink<W>>,
}

struct LineSink<W> {
    writer: W,
    /// A line was started but not finished
    partial: bool,
}

impl<W> JsonLinesEmitter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            sink: Mutex::new(LineSink {
                writer,
                partial: false,
            }),
        }
    }

    pub fn into_inner(self) -> W {
        self.sink.into_inner().writer
    }
}

impl JsonLinesEmitter<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> LineSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn write_line(&mut self, line: &[u8]) -> std::io::Result<()> {
        if self.partial {
            self.writer.write_all(b"\n").await?;
        }
        self.partial = true;
        self.writer.write_all(line).await?;
        self.partial = false;
        self.writer.flush().await
    }
}

#[async_trait]
impl<W> AlertEmitter for JsonLinesEmitter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn emit(&self, alert: &Alert) -> Result<(), EmitError> {
        let mut line =
            serde_json::to_vec(alert).map_err(|e| EmitError::Rejected(e.to_string()))?;
        line.push(b'\n');

        let mut sink = self.sink.lock().await;
        sink.write_line(&line)
            .await
            .map_err(|e| EmitError::Io(e.to_string()))
    }

    fn name(&self) -> &str {
        "JsonLinesEmitter"
    }
}
