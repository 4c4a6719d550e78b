//! ZIP archive assembly.
//!
//! This module provides the write-side ZIP support used to package
//! avatar bundles, producing archives compatible with stock ZIP tooling.
//!
//! ## Architecture
//!
//! The module is organized into two components:
//!
//! - [`structures`]: Data structures representing ZIP format records
//!   (local file headers, central directory headers, EOCD)
//! - [`writer`]: High-level in-memory archive builder
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and compressed data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! This implementation writes each entry's header and payload as it is
//! added, then appends the Central Directory and EOCD when the archive
//! is finished - everything in one in-memory buffer.

mod structures;
mod writer;

pub use structures::{CompressionMethod, DosDateTime};
pub use writer::ZipWriter;
