//! In-memory zip bundle

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::BundleResult;

/// Named byte buffers waiting to be written into one zip
#[derive(Debug, Default)]
pub struct BundleArchive {
    entries: Vec<(String, Vec<u8>)>,
}

impl BundleArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Re-adding a name replaces the earlier content.
    pub fn add(&mut self, name: String, data: Vec<u8>) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = data,
            None => self.entries.push((name, data)),
        }
    }

    /// Number of distinct entries added so far
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Write every entry into a zip and return its bytes
    pub fn finish(self) -> BundleResult<Vec<u8>> {
        // Tarballs are already gzip-compressed
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .large_file(self.entries.iter().any(|(_, data)| data.len() as u64 >= u32::MAX as u64));

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in &self.entries {
            writer.start_file(name.as_str(), options)?;
            writer.write_all(data)?;
        }

        Ok(writer.finish()?.into_inner())
    }
}
