//! Provides a general interface to a physical OPC package (ZIP file).
//!
//! This module handles the low-level reading and writing of ZIP archives. Every
//! member is decompressed up front; .docx packages are small and the engine
//! touches most of their XML parts anyway.

use crate::ooxml::opc::error::{OpcError, Result};
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Upper bound on the buffer reserved from a member's declared size. The
/// central directory is untrusted, so larger members grow as they are read.
const MAX_PREALLOC: usize = 1 << 20;

/// One member of a ZIP archive, decompressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Member name exactly as stored in the central directory
    pub name: String,
    /// Decompressed content (empty for directories)
    pub data: Vec<u8>,
    /// Whether the member was stored without compression
    pub stored: bool,
    /// Whether the member is a directory entry
    pub directory: bool,
}

/// Physical package reader.
pub struct PhysPkgReader;

impl PhysPkgReader {
    /// Read every member of the archive in central-directory order.
    ///
    /// # Errors
    /// Returns [`OpcError::CorruptArchive`] if the bytes are not a readable ZIP
    /// archive or any member fails to decompress.
    pub fn read_entries(data: &[u8]) -> Result<Vec<ArchiveEntry>> {
        let mut archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| OpcError::CorruptArchive(e.to_string()))?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| OpcError::CorruptArchive(format!("member #{}: {}", i, e)))?;

            let name = file.name().to_string();
            let directory = file.is_dir();
            let stored = file.compression() == CompressionMethod::Stored;

            let declared = usize::try_from(file.size()).unwrap_or(usize::MAX);
            let mut content = Vec::with_capacity(declared.min(MAX_PREALLOC));
            if !directory {
                file.read_to_end(&mut content)
                    .map_err(|e| OpcError::CorruptArchive(format!("{}: {}", name, e)))?;
            }

            entries.push(ArchiveEntry {
                name,
                data: content,
                stored,
                directory,
            });
        }

        Ok(entries)
    }
}

/// Physical package writer for creating OPC packages.
///
/// Handles the low-level writing of parts to an in-memory ZIP archive.
pub struct PhysPkgWriter {
    /// The underlying ZIP archive writer
    archive: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    /// Create a new package writer that writes to memory.
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Write a member with Deflate compression.
    pub fn write(&mut self, name: &str, blob: &[u8]) -> Result<()> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.archive.start_file(name, options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Write a member without compression (stored).
    pub fn write_stored(&mut self, name: &str, blob: &[u8]) -> Result<()> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        self.archive.start_file(name, options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Add a directory entry.
    pub fn add_directory(&mut self, name: &str) -> Result<()> {
        self.archive
            .add_directory(name, SimpleFileOptions::default())?;
        Ok(())
    }

    /// Finish writing and return the package bytes.
    ///
    /// Consumes the writer and returns the complete ZIP archive.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.archive.finish()?.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}
