//! Input file parsing: FASTA/FASTQ sequences and PAF overlap records, with transparent
//! compression support shared across both.
mod compress;
pub mod fastx;
pub mod paf;

pub use fastx::load_sequences;
pub use paf::load_overlaps;
