//! Input and output stream acquisition

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use crate::error::CliError;

/// Open the FASTA source: a file, or standard input for `None` / `-`.
///
/// Files ending in `.gz` are decompressed on the fly.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn Read + Send>> {
    let Some(path) = path.filter(|p| p.as_os_str() != "-") else {
        log::debug!("Reading from standard input");
        return Ok(Box::new(io::stdin()));
    };

    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()).into());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "gz") {
        log::info!("Reading gzip-compressed input: {}", path.display());
        Ok(Box::new(MultiGzDecoder::new(file)))
    } else {
        log::info!("Reading input: {}", path.display());
        Ok(Box::new(file))
    }
}

/// Open the destination: a file, or standard output for `None` / `-`.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let Some(path) = path.filter(|p| p.as_os_str() != "-") else {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    log::info!("Writing output: {}", path.display());

    Ok(Box::new(BufWriter::new(file)))
}
