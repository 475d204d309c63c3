//! Configuration for the imagemeta CLI.
//!
//! Options come from the command line or environment variables with the
//! `IMAGEMETA_` prefix:
//!
//! - `IMAGEMETA_JSON` - emit JSON instead of plain text
//! - `IMAGEMETA_VERBOSE` - enable debug logging

use std::path::PathBuf;

use clap::Parser;

/// imagemeta - dump the EXIF/TIFF metadata tree of an image file.
///
/// Reads TIFF files directly, or JPEG files carrying an APP1 Exif
/// segment, and prints every metadata directory with its tags and any
/// recorded errors.
#[derive(Parser, Debug, Clone)]
#[command(name = "imagemeta")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Image file to inspect.
    pub file: PathBuf,

    /// Emit the directory list as JSON instead of plain text.
    #[arg(long, env = "IMAGEMETA_JSON")]
    pub json: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, env = "IMAGEMETA_VERBOSE")]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.file.as_os_str().is_empty() {
            return Err("an input file is required".to_string());
        }
        Ok(())
    }
}
