//! Primary output sink. Defaults to stdout; one event line per write.

use std::io::{self, Write};

use parking_lot::Mutex;

type BoxedWriter = Box<dyn Write + Send>;

/// Destination for serialized events.
///
/// Each line is written and flushed while holding the sink lock, so concurrent
/// emitters never interleave partial lines.
pub struct OutputSink {
    writer: Mutex<BoxedWriter>,
}

impl OutputSink {
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Write `line` followed by a newline as a single write.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        let mut writer = self.writer.lock();
        writer.write_all(buf.as_bytes())?;
        writer.flush()
    }

    /// Send events to `writer` until the returned guard drops, then restore the
    /// previous destination.
    ///
    /// Redirect before emitting from several threads; the swap itself is not a
    /// synchronization point for in-flight emission.
    pub fn redirect<W>(&self, writer: W) -> SinkGuard<'_>
    where
        W: Write + Send + 'static,
    {
        let previous = std::mem::replace(&mut *self.writer.lock(), Box::new(writer));
        SinkGuard {
            sink: self,
            previous: Some(previous),
        }
    }
}

impl Default for OutputSink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl std::fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputSink").finish_non_exhaustive()
    }
}

/// Scoped sink override returned by [`OutputSink::redirect`].
#[must_use = "dropping the guard immediately restores the previous sink"]
pub struct SinkGuard<'a> {
    sink: &'a OutputSink,
    previous: Option<BoxedWriter>,
}

impl Drop for SinkGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            let mut writer = self.sink.writer.lock();
            let _ = writer.flush();
            *writer = previous;
        }
    }
}
