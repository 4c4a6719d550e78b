use clap::Parser;
use std::path::{Path, PathBuf};

/// Extension carried by every produced archive.
pub const ARCHIVE_EXTENSION: &str = "xavatar";

#[derive(Parser, Debug)]
#[command(name = "xavatar")]
#[command(version)]
#[command(about = "Package an image into a .xavatar avatar archive", long_about = None)]
#[command(after_help = "Examples:\n  \
  xavatar photo.png                          package photo.png into photo.xavatar\n  \
  xavatar photo.jpg custom                   package into custom.xavatar\n  \
  xavatar https://example.com/pic.png        download and package a remote image")]
pub struct Cli {
    /// Source image path or HTTP URL
    #[arg(value_name = "IMAGE")]
    pub input: String,

    /// Output archive path (default: input base name with .xavatar extension)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<String>,

    /// Skip the profile picture copies and the metadata stub
    #[arg(long)]
    pub no_activate: bool,

    /// Quiet mode (no summary output)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_http_url(&self) -> bool {
        self.input.starts_with("http://") || self.input.starts_with("https://")
    }

    pub fn is_activated(&self) -> bool {
        !self.no_activate
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }

    /// Resolve the path the archive will be written to.
    ///
    /// An explicit output is used as given, with the `.xavatar` extension
    /// appended when missing. Otherwise the path derives from the input:
    /// local files keep their directory and swap the extension, URLs use
    /// the last path segment of the URL in the current directory.
    pub fn output_path(&self) -> PathBuf {
        if let Some(ref output) = self.output {
            let suffix = format!(".{ARCHIVE_EXTENSION}");
            if output.ends_with(&suffix) {
                return PathBuf::from(output);
            }
            return PathBuf::from(format!("{output}{suffix}"));
        }

        if self.is_http_url() {
            PathBuf::from(url_file_name(&self.input)).with_extension(ARCHIVE_EXTENSION)
        } else {
            Path::new(&self.input).with_extension(ARCHIVE_EXTENSION)
        }
    }
}

/// Extract the file name portion of a URL, stripping query and fragment.
///
/// Falls back to `avatar` when the URL has no usable final segment
/// (e.g. ends with a slash or is a bare host).
fn url_file_name(url: &str) -> &str {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let trimmed = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or(without_scheme);

    match trimmed.rsplit('/').next() {
        Some(segment) if !segment.is_empty() && segment != trimmed => segment,
        _ => "avatar",
    }
}
