//! In-memory destination for capturing output

use super::destination::Destination;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Cloneable in-memory buffer. Clones share the same bytes.
///
/// # Example
///
/// ```
/// use tslog::prelude::*;
/// use tslog::writer::MemoryWriter;
///
/// let memory = MemoryWriter::new();
/// let logger = new_logger([with_destinations(&[memory.destination()])]);
/// logger.infot("captured", None);
///
/// assert!(memory.contents().contains("captured"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A destination appending to this buffer
    pub fn destination(&self) -> Destination {
        Destination::named("memory", self.clone())
    }

    /// Buffer contents, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
