use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::foundation::error::{GaugeError, GaugeResult};

/// In-memory zip writer with fixed entry metadata, so equal inputs give equal archive bytes.
///
/// Entries keep insertion order. Dropping the builder without [`ArchiveBuilder::finish`]
/// discards everything written so far.
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    entries: usize,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            entries: 0,
        }
    }

    fn options() -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default())
            .unix_permissions(0o644)
    }

    pub fn add(&mut self, name: &str, bytes: &[u8]) -> GaugeResult<()> {
        self.writer
            .start_file(name, Self::options())
            .map_err(|e| GaugeError::archive(format!("start entry '{name}': {e}")))?;
        self.writer
            .write_all(bytes)
            .map_err(|e| GaugeError::archive(format!("write entry '{name}': {e}")))?;
        self.entries += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    pub fn finish(self) -> GaugeResult<Vec<u8>> {
        let cursor = self
            .writer
            .finish()
            .map_err(|e| GaugeError::archive(format!("finish archive: {e}")))?;
        Ok(cursor.into_inner())
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}
