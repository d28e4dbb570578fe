//! Shared byte sink used as a log destination

use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// A cloneable handle to a byte sink.
///
/// Clones share the same underlying writer. Each call to
/// [`write_record`](Destination::write_record) holds the lock for the whole
/// record, so concurrent records are never interleaved within each other.
#[derive(Clone)]
pub struct Destination {
    name: Arc<str>,
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Destination {
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::named("custom", writer)
    }

    pub fn named<W>(name: impl Into<Arc<str>>, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            name: name.into(),
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write one complete record under the lock
    pub fn write_record(&self, record: &[u8]) -> io::Result<()> {
        let mut writer = self.inner.lock();
        writer.write_all(record)
    }

    pub fn flush(&self) -> io::Result<()> {
        self.inner.lock().flush()
    }

    /// True if both handles point at the same writer
    pub fn same_as(&self, other: &Destination) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Write for Destination {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.write_record(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Destination::flush(self)
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destination")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::MemoryWriter;

    #[test]
    fn test_clones_share_writer() {
        let memory = MemoryWriter::new();
        let a = memory.destination();
        let b = a.clone();

        a.write_record(b"one\n").unwrap();
        b.write_record(b"two\n").unwrap();

        assert!(a.same_as(&b));
        assert_eq!(memory.contents(), "one\ntwo\n");
    }

    #[test]
    fn test_distinct_destinations() {
        let a = Destination::new(Vec::new());
        let b = Destination::new(Vec::new());
        assert!(!a.same_as(&b));
        assert_eq!(a.name(), "custom");
    }

    #[test]
    fn test_io_write_impl() {
        let memory = MemoryWriter::new();
        let mut dest = memory.destination();
        writeln!(dest, "formatted {}", 1).unwrap();
        dest.flush().unwrap();
        assert_eq!(memory.contents(), "formatted 1\n");
    }
}
