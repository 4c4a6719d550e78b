//! Main entry point for the xavatar CLI application.
//!
//! This binary packages a source image - a local file or an HTTP URL -
//! into a `.xavatar` avatar archive.

use anyhow::Result;
use clap::Parser;
use std::time::Instant;

use xavatar::{Cli, HttpImageSource, ImageSource, LocalImageSource, bundle};

/// Application entry point.
///
/// Parses command-line arguments, fetches the source image from the
/// appropriate source, renders and packages the bundle on a blocking
/// thread, and writes the archive to disk.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output_path = cli.output_path();

    // Resolve the image payload from disk or over HTTP
    let payload = if cli.is_http_url() {
        HttpImageSource::new(cli.input.clone())?.fetch().await?
    } else {
        LocalImageSource::new(&cli.input).fetch().await?
    };

    // Rendering and DXT compression are CPU-bound; keep them off the
    // async runtime threads
    let started = Instant::now();
    let activated = cli.is_activated();
    let archive = tokio::task::spawn_blocking(move || bundle::build(&payload, activated)).await??;

    tokio::fs::write(&output_path, &archive).await?;

    if !cli.is_quiet() {
        println!("Converted {} to {}", cli.input, output_path.display());
        println!("Archive size: {}", format_size(archive.len() as u64));
        println!("Time taken: {:.2} seconds", started.elapsed().as_secs_f64());
    }

    Ok(())
}

/// Format a byte size into a human-readable string.
///
/// Automatically selects the appropriate unit (bytes, KB, MB, GB)
/// based on the size magnitude.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_size(500), "500 bytes");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
