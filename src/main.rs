//! imagemeta - dump the EXIF/TIFF metadata tree of an image file.

use clap::Parser;
use serde::Serialize;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imagemeta::{config::Config, read_metadata, Directory, MetadataList};

/// JPEG start-of-image marker.
const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// APP1 Exif signature preceding the TIFF header.
const EXIF_SIGNATURE: &[u8] = b"Exif\0\0";

/// How far into a JPEG to scan for the Exif signature.
const EXIF_SCAN_WINDOW: usize = 128 * 1024;

fn main() {
    // Parse configuration from CLI and environment
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    let data = match std::fs::read(&config.file) {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to read {}: {}", config.file.display(), e);
            std::process::exit(1);
        }
    };

    let payload = exif_payload(&data).to_vec();
    let metadata = read_metadata(payload);

    if metadata.is_empty() {
        error!("{} carries no readable metadata", config.file.display());
        std::process::exit(1);
    }

    if config.json {
        print_json(&metadata);
    } else {
        print_plain(&metadata);
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose { "imagemeta=debug" } else { "imagemeta=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Slice past a JPEG APP1 `Exif\0\0` signature when present.
///
/// This is a plain signature scan, not a JPEG segment walker; files whose
/// Exif segment sits beyond the scan window are treated as TIFF.
fn exif_payload(data: &[u8]) -> &[u8] {
    if data.starts_with(&JPEG_SOI) {
        let window = &data[..data.len().min(EXIF_SCAN_WINDOW)];
        if let Some(pos) = window
            .windows(EXIF_SIGNATURE.len())
            .position(|candidate| candidate == EXIF_SIGNATURE)
        {
            debug!(offset = pos, "found Exif signature in JPEG");
            return &data[pos + EXIF_SIGNATURE.len()..];
        }
    }
    data
}

// =============================================================================
// Output
// =============================================================================

#[derive(Serialize)]
struct TagDump {
    id: u16,
    name: String,
    value: String,
    components: usize,
}

#[derive(Serialize)]
struct DirectoryDump {
    name: &'static str,
    parent: Option<usize>,
    tags: Vec<TagDump>,
    errors: Vec<String>,
}

fn dump_directory(directory: &Directory) -> DirectoryDump {
    DirectoryDump {
        name: directory.kind().name(),
        parent: directory.parent(),
        tags: directory
            .entries()
            .map(|(tag, value)| TagDump {
                id: tag,
                name: directory
                    .tag_name(tag)
                    .map_or_else(|| format!("Tag 0x{tag:04X}"), str::to_string),
                value: value.to_string(),
                components: value.component_count(),
            })
            .collect(),
        errors: directory.errors().iter().map(ToString::to_string).collect(),
    }
}

fn print_json(metadata: &MetadataList) {
    let dumps: Vec<DirectoryDump> = metadata.iter().map(dump_directory).collect();
    match serde_json::to_string_pretty(&dumps) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!("Failed to serialize metadata: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_plain(metadata: &MetadataList) {
    for directory in metadata {
        println!("[{}]", directory.kind().name());
        for (tag, value) in directory.entries() {
            let name = directory
                .tag_name(tag)
                .map_or_else(|| format!("Tag 0x{tag:04X}"), str::to_string);
            println!("  {name} = {value}");
        }
        for error in directory.errors() {
            println!("  ! {error}");
        }
    }
}
