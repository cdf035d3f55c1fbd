//! Error handling for libscaffold.
use std::fmt;

/// A custom error type to represent the error kinds the scaffolding core can raise.
#[derive(Debug)]
pub enum ScaffoldError {
    /// An IO error occurred reading or writing a file.
    IoError(std::io::Error),

    /// A FASTA/FASTQ record could not be parsed.
    FastxParseError(String),

    /// A PAF record was malformed beyond tolerant skipping.
    PafFormatError(String),

    /// An overlap record named a read or contig identifier that isn't in the node index.
    UnknownIdentifier(String),

    /// A per-edge length contribution during scaffold synthesis was non-positive.
    StructuralPathError(String),

    /// Error spawning or joining a worker thread.
    ThreadError(String),
}

impl fmt::Display for ScaffoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaffoldError::IoError(err) => write!(f, "IO error: {}", err),
            ScaffoldError::FastxParseError(msg) => write!(f, "FASTA/FASTQ parse error: {}", msg),
            ScaffoldError::PafFormatError(msg) => write!(f, "PAF format error: {}", msg),
            ScaffoldError::UnknownIdentifier(id) => {
                write!(f, "unknown identifier in overlap record: {}", id)
            }
            ScaffoldError::StructuralPathError(msg) => write!(f, "structural path error: {}", msg),
            ScaffoldError::ThreadError(msg) => write!(f, "error relating to threads: {}", msg),
        }
    }
}

impl std::error::Error for ScaffoldError {}

/// Converts a `std::io::Error` into a [`ScaffoldError`].
impl From<std::io::Error> for ScaffoldError {
    fn from(error: std::io::Error) -> Self {
        ScaffoldError::IoError(error)
    }
}

/// Converts a `csv::Error` into a [`ScaffoldError`].
impl From<csv::Error> for ScaffoldError {
    fn from(error: csv::Error) -> Self {
        ScaffoldError::PafFormatError(error.to_string())
    }
}
