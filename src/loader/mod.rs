// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Reading [GraphData] from JSON files.
//!
//! The expected structure is:
//!
//! ```json
//! {
//!   "nodes": {"1": {"lat": 4.175, "lon": 73.509}, "2": {"lat": 4.175, "lon": 73.510}},
//!   "edges": [{"from": "1", "to": "2", "distance": 0.12, "oneway": false}]
//! }
//! ```
//!
//! `distance` is expressed in kilometers; `oneway` is optional and defaults to false.

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use crate::{Graph, GraphData, GraphError};

const GZIP_MAGIC: &[u8] = b"\x1f\x8b";
const BZIP2_MAGIC: &[u8] = b"BZh";

/// Format of the input graph file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the compression based on the content
    #[default]
    Unknown,

    /// Force uncompressed JSON
    Json,

    /// Force JSON with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    JsonGz,

    /// Force JSON with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    JsonBz2,
}

impl FileFormat {
    /// Guesses the format based on the first bytes of the input.
    pub fn detect(prefix: &[u8]) -> Self {
        if prefix.starts_with(GZIP_MAGIC) {
            Self::JsonGz
        } else if prefix.starts_with(BZIP2_MAGIC) {
            Self::JsonBz2
        } else {
            Self::Json
        }
    }
}

/// Error conditions which may occur when reading graph files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Parse [GraphData] from a reader.
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn read_graph_from_io<R: io::Read>(reader: R, format: FileFormat) -> Result<GraphData, LoadError> {
    let mut b = io::BufReader::new(reader);

    let format = match format {
        FileFormat::Unknown => FileFormat::detect(b.fill_buf()?),
        known => known,
    };
    log::debug!("reading graph as {:?}", format);

    let data = match format {
        FileFormat::Unknown | FileFormat::Json => serde_json::from_reader(b)?,

        FileFormat::JsonGz => {
            let d = flate2::read::MultiGzDecoder::new(b);
            serde_json::from_reader(io::BufReader::new(d))?
        }

        FileFormat::JsonBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(b);
            serde_json::from_reader(io::BufReader::new(d))?
        }
    };
    Ok(data)
}

/// Parse [GraphData] from a file at the provided path.
pub fn read_graph_from_file<P: AsRef<Path>>(path: P, format: FileFormat) -> Result<GraphData, LoadError> {
    let f = File::open(path)?;
    read_graph_from_io(f, format)
}

/// Parse [GraphData] from a static buffer.
pub fn read_graph_from_buffer(data: &[u8], format: FileFormat) -> Result<GraphData, LoadError> {
    match format {
        // Fast path is available for in-memory JSON data
        FileFormat::Json => Ok(serde_json::from_slice(data)?),
        FileFormat::Unknown if FileFormat::detect(data) == FileFormat::Json => {
            Ok(serde_json::from_slice(data)?)
        }
        _ => read_graph_from_io(io::Cursor::new(data), format),
    }
}

/// Parse and validate a [Graph] from a file at the provided path.
pub fn load_graph_from_file<P: AsRef<Path>>(path: P, format: FileFormat) -> Result<Graph, LoadError> {
    let data = read_graph_from_file(path, format)?;
    Ok(Graph::load(data)?)
}
