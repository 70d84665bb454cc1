//! Result artifact output
//!
//! The artifact is a JSON object mapping each city to its daily statistics,
//! indented for humans. It is written once, after all workers are done.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::FairdayError;
use crate::models::ResultSet;

/// Where the artifact goes: `-` for standard output, otherwise a file path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl FromStr for OutputTarget {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "-" => OutputTarget::Stdout,
            path => OutputTarget::File(PathBuf::from(path)),
        })
    }
}

impl OutputTarget {
    /// Open the destination; a file is created or truncated
    pub fn open(&self) -> Result<Box<dyn Write>, FairdayError> {
        let writer: Box<dyn Write> = match self {
            OutputTarget::Stdout => Box::new(io::stdout().lock()),
            OutputTarget::File(path) => Box::new(BufWriter::new(File::create(path)?)),
        };
        Ok(writer)
    }
}

/// Serialize `results` as indented JSON followed by a newline
pub fn write_results<W: Write>(results: &ResultSet, mut writer: W) -> Result<(), FairdayError> {
    serde_json::to_writer_pretty(&mut writer, results)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
