//! # xavatar
//!
//! A Rust avatar packaging utility with HTTP URL support.
//!
//! This library converts a source image - read from the local filesystem
//! or downloaded over HTTP - into a `.xavatar` archive: a ZIP container
//! holding a 440x440 PNG master, DXT5-compressed DDS thumbnails at four
//! fixed sizes, and (for activated bundles) a profile mirror set plus a
//! fixed JSON metadata stub.
//!
//! ## Features
//!
//! - Package images from the local filesystem or HTTP/HTTPS URLs
//! - Any input format the `image` crate can decode
//! - DXT5 texture compression with standard DDS containers
//! - In-memory ZIP assembly - no temp files, no partial output on failure
//!
//! ## Example
//!
//! ```no_run
//! use xavatar::{HttpImageSource, ImageSource, bundle};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Download a source image
//!     let source = HttpImageSource::new("https://example.com/pic.png".to_string())?;
//!     let payload = source.fetch().await?;
//!
//!     // Build an activated bundle and write it out
//!     let archive = bundle::build(&payload, true)?;
//!     tokio::fs::write("pic.xavatar", &archive).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod bundle;
pub mod cli;
pub mod io;
pub mod texture;
pub mod zip;

pub use cli::Cli;
pub use io::{HttpImageSource, ImageSource, LocalImageSource};
pub use zip::ZipWriter;
