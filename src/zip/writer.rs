//! In-memory ZIP archive writer.
//!
//! Builds the entire archive in a byte buffer before anything touches
//! disk, so a failed run never leaves a partial output file behind.
//!
//! ## Writing Strategy
//!
//! ZIP files are written front to back:
//! 1. A Local File Header followed by the entry payload, per file
//! 2. The Central Directory with one header per file
//! 3. The End of Central Directory (EOCD) record
//!
//! Because every payload is fully in memory before its header is emitted,
//! sizes and CRCs are known up front and no data descriptors are needed.
//!
//! ## Supported Features
//!
//! - STORED (no compression) method
//! - DEFLATE compression method, with automatic STORED fallback when
//!   DEFLATE does not shrink the payload
//!
//! ## Limitations
//!
//! - No ZIP64: entry sizes, offsets, and the entry count must fit the
//!   classic 32/16-bit header fields (far beyond any avatar bundle)
//! - No encryption, no multi-disk archives

use flate2::write::DeflateEncoder;
use flate2::{Compression, Crc};
use std::io::Write;

use anyhow::{Result, bail};

use super::structures::*;

/// Largest value representable in the classic 32-bit size/offset fields.
const MAX_FIELD_VALUE: u64 = u32::MAX as u64;

/// In-memory ZIP archive builder.
///
/// Entries are appended with [`add_file()`](Self::add_file) and the
/// finished archive is produced by [`finish()`](Self::finish). All
/// entries share the timestamp captured when the writer was created.
///
/// ## Example
///
/// ```ignore
/// let mut writer = ZipWriter::new();
/// writer.add_file("online.json", json.as_bytes())?;
/// let archive = writer.finish()?;
/// ```
pub struct ZipWriter {
    /// Archive bytes written so far (headers and payloads)
    buffer: Vec<u8>,
    /// Metadata replayed into the Central Directory by `finish()`
    entries: Vec<FinishedEntry>,
    /// Shared modification timestamp for every entry
    timestamp: DosDateTime,
}

/// Bookkeeping for one written entry.
struct FinishedEntry {
    file_name: String,
    method: CompressionMethod,
    crc32: u32,
    compressed_size: u32,
    uncompressed_size: u32,
    lfh_offset: u32,
}

impl ZipWriter {
    /// Create a writer stamping entries with the current local time.
    pub fn new() -> Self {
        Self::with_timestamp(DosDateTime::now())
    }

    /// Create a writer stamping entries with an explicit timestamp.
    pub fn with_timestamp(timestamp: DosDateTime) -> Self {
        Self {
            buffer: Vec::new(),
            entries: Vec::new(),
            timestamp,
        }
    }

    /// Append a file entry to the archive.
    ///
    /// The payload is CRC-32 checksummed and DEFLATE compressed; when
    /// compression does not reduce the size (common for PNG and BC3
    /// payloads) the entry is STORED instead.
    ///
    /// # Arguments
    ///
    /// * `file_name` - Entry name as it appears in the archive
    /// * `data` - Complete uncompressed payload
    ///
    /// # Errors
    ///
    /// Returns an error if the entry would overflow the classic ZIP
    /// header fields.
    pub fn add_file(&mut self, file_name: &str, data: &[u8]) -> Result<()> {
        if data.len() as u64 > MAX_FIELD_VALUE {
            bail!("Entry too large for ZIP format: {}", file_name);
        }
        if self.entries.len() >= u16::MAX as usize {
            bail!("Too many entries for ZIP format");
        }

        let lfh_offset = self.buffer.len() as u64;
        if lfh_offset > MAX_FIELD_VALUE {
            bail!("Archive too large for ZIP format");
        }

        let mut crc = Crc::new();
        crc.update(data);
        let crc32 = crc.sum();

        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data)?;
        let deflated = encoder.finish()?;

        // Fall back to STORED when DEFLATE does not help
        let (method, payload) = if deflated.len() < data.len() {
            (CompressionMethod::Deflate, &deflated[..])
        } else {
            (CompressionMethod::Stored, data)
        };

        let header = LocalFileHeader {
            method,
            timestamp: self.timestamp,
            crc32,
            compressed_size: payload.len() as u32,
            uncompressed_size: data.len() as u32,
            file_name,
        };
        header.write_to(&mut self.buffer)?;
        self.buffer.extend_from_slice(payload);

        self.entries.push(FinishedEntry {
            file_name: file_name.to_string(),
            method,
            crc32,
            compressed_size: header.compressed_size,
            uncompressed_size: header.uncompressed_size,
            lfh_offset: lfh_offset as u32,
        });

        Ok(())
    }

    /// Finish the archive by writing the Central Directory and EOCD.
    ///
    /// # Returns
    ///
    /// The complete archive as a byte vector, ready to be written to disk.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let cd_offset = self.buffer.len() as u64;
        if cd_offset > MAX_FIELD_VALUE {
            bail!("Archive too large for ZIP format");
        }

        for entry in &self.entries {
            let header = CentralDirectoryHeader {
                method: entry.method,
                timestamp: self.timestamp,
                crc32: entry.crc32,
                compressed_size: entry.compressed_size,
                uncompressed_size: entry.uncompressed_size,
                lfh_offset: entry.lfh_offset,
                file_name: &entry.file_name,
            };
            header.write_to(&mut self.buffer)?;
        }

        let eocd = EndOfCentralDirectory {
            total_entries: self.entries.len() as u16,
            cd_size: (self.buffer.len() as u64 - cd_offset) as u32,
            cd_offset: cd_offset as u32,
        };
        eocd.write_to(&mut self.buffer)?;

        Ok(self.buffer)
    }
}

impl Default for ZipWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    /// Deterministic pseudo-random bytes that DEFLATE cannot shrink.
    fn noise(len: usize) -> Vec<u8> {
        let mut state: u32 = 0x1234_5678;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (state >> 24) as u8
            })
            .collect()
    }

    #[test]
    fn archive_round_trips_through_independent_reader() {
        let mut writer = ZipWriter::new();
        writer.add_file("hello.txt", b"hello zip").unwrap();
        writer.add_file("zeros.bin", &[0u8; 4096]).unwrap();
        let bytes = writer.finish().unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        archive
            .by_name("hello.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "hello zip");

        let mut zeros = Vec::new();
        archive
            .by_name("zeros.bin")
            .unwrap()
            .read_to_end(&mut zeros)
            .unwrap();
        assert_eq!(zeros, vec![0u8; 4096]);
    }

    #[test]
    fn compressible_data_is_deflated() {
        let mut writer = ZipWriter::new();
        writer.add_file("zeros.bin", &[0u8; 4096]).unwrap();
        let bytes = writer.finish().unwrap();

        // Far smaller than the payload despite headers
        assert!(bytes.len() < 1024);
    }

    #[test]
    fn incompressible_data_is_stored() {
        let payload = noise(4096);
        let mut writer = ZipWriter::new();
        writer.add_file("noise.bin", &payload).unwrap();
        let bytes = writer.finish().unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut entry = archive.by_name("noise.bin").unwrap();
        assert_eq!(entry.compression(), zip::CompressionMethod::Stored);

        let mut read_back = Vec::new();
        entry.read_to_end(&mut read_back).unwrap();
        assert_eq!(read_back, payload);
    }

    #[test]
    fn empty_archive_is_valid() {
        let bytes = ZipWriter::new().finish().unwrap();
        assert_eq!(bytes.len(), 22);

        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
