
use crate::output::Output;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::io;
use std::io::Write;
use std::sync::Arc;
use tracing_subscriber::FmtSubscriber;

/// Collects each written "file" in memory, keyed by `{location_key}.{file_extension}`.
#[derive(Debug, Default)]
pub(crate) struct MemoryOutput(Arc<Mutex<IndexMap<String, Vec<u8>>>>);

impl MemoryOutput {
    pub(crate) fn file(&self, name: &str) -> Option<Vec<u8>> {
        self.0.lock().get(name).cloned()
    }

    pub(crate) fn file_as_string(&self, name: &str) -> Option<String> {
        self.file(name)
            .map(|bytes| String::from_utf8(bytes).expect("output should be UTF-8"))
    }

    pub(crate) fn file_names(&self) -> Vec<String> {
        self.0.lock().keys().cloned().collect()
    }
}

impl Output for &MemoryOutput {
    fn writer_for_location_key(
        &self,
        location_key: &str,
        file_extension: &str,
    ) -> anyhow::Result<impl Write> {
        let name = format!("{location_key}.{file_extension}");
        self.0.lock().insert(name.clone(), vec![]);
        Ok(MemoryFileWriter {
            files: self.0.clone(),
            name,
        })
    }
}

struct MemoryFileWriter {
    files: Arc<Mutex<IndexMap<String, Vec<u8>>>>,
    name: String,
}

impl Write for MemoryFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.files
            .lock()
            .entry(self.name.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a subscriber that records `WARN` and above as plain text, and returns that text.
pub(crate) fn capture_warnings(f: impl FnOnce()) -> String {
    let buffer: Arc<Mutex<Vec<u8>>> = Default::default();
    let writer_buffer = buffer.clone();
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || LogWriter(writer_buffer.clone()))
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let logs = buffer.lock().clone();
    String::from_utf8(logs).expect("logs should be UTF-8")
}

struct LogWriter(Arc<Mutex<Vec<u8>>>);

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
