// #![deny(missing_docs)]
pub mod classify;
pub mod error;
pub mod finalize;
pub mod graph;
pub mod grouping;
pub mod io;
pub mod orchestrator;
pub mod overlap;
pub mod path;
pub mod search;
pub mod seq;
pub mod synth;

pub use error::ScaffoldError;
pub use orchestrator::{write_fasta, Scaffolder};

pub type Result<T> = std::result::Result<T, ScaffoldError>;
