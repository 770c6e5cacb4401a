//! YAML file loading functionality.
//!
//! This module provides functions to load YAML documents from files or stdin,
//! building one document tree per YAML document in the stream.

use crate::document::node::Node;
use crate::document::parser::parse_yaml_documents;
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Loads and parses a YAML file from the filesystem.
///
/// Files ending in `.gz` are decompressed first. The result holds every
/// document of the file in stream order, each as a document wrapper node.
///
/// # Examples
///
/// ```no_run
/// use yamlptr::file::loader::load_yaml_file;
/// use yamlptr::pointer::find;
///
/// let documents = load_yaml_file("deployment.yaml").unwrap();
/// let image = find(&documents[0], "/spec/template/spec/containers/0/image").unwrap();
/// println!("{}:{}: {}", image.line, image.column, image.value);
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - The file is gzipped but corrupted
/// - The file contents are not valid YAML or contain no document
pub fn load_yaml_file<P: AsRef<Path>>(path: P) -> Result<Vec<Node>> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };
    debug!(path = %path_ref.display(), bytes = content.len(), gzipped = is_gzipped, "read YAML file");

    parse_content(&content)
        .with_context(|| format!("Failed to parse YAML in {}", path_ref.display()))
}

/// Loads and parses YAML from standard input.
///
/// Input starting with the gzip magic bytes is decompressed first.
///
/// # Errors
///
/// This function will return an error if reading stdin fails, the input is
/// not valid UTF-8, or it is not valid YAML.
pub fn load_yaml_from_stdin() -> Result<Vec<Node>> {
    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;
    load_yaml_bytes(buffer).context("Failed to parse YAML from stdin")
}

/// Parses YAML from raw bytes, decompressing them if they are gzipped.
pub fn load_yaml_bytes(bytes: Vec<u8>) -> Result<Vec<Node>> {
    // Gzip magic bytes (0x1f 0x8b)
    let content = if bytes.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&bytes)?
    } else {
        String::from_utf8(bytes).context("Invalid UTF-8 in input")?
    };
    debug!(bytes = content.len(), "read YAML input");
    parse_content(&content)
}

fn parse_content(content: &str) -> Result<Vec<Node>> {
    let documents = parse_yaml_documents(content)?;
    debug!(documents = documents.len(), "parsed YAML stream");
    Ok(documents)
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}
