use std::path::PathBuf;

use clap::Parser;

const DEFAULT_OUTPUT: &str = "scaffolds.fasta";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Contig (anchor) sequences, FASTA or FASTQ, optionally compressed
    #[arg(value_name = "CONTIGS")]
    pub contigs: PathBuf,

    /// Long read sequences, FASTA or FASTQ, optionally compressed
    #[arg(value_name = "READS")]
    pub reads: PathBuf,

    /// Contig-to-read overlaps, PAF
    #[arg(value_name = "CONTIG_READ_PAF")]
    pub contig_read_paf: PathBuf,

    /// Read-to-read overlaps, PAF
    #[arg(value_name = "READ_READ_PAF")]
    pub read_read_paf: PathBuf,

    /// Output FASTA file for the scaffolds
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Number of threads to use when classifying read-to-read overlaps
    #[arg(short, long, value_name = "INT", default_value = "1")]
    pub threads: usize,

    /// Random seed for the Monte Carlo search strategy
    #[arg(long, value_name = "INT", default_value = "0", hide_short_help = true)]
    pub seed: u64,

    /// `-q` only show errors and warnings. `-qq` only show errors. `-qqq` shows nothing.
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,

    /// `-v` show debug output. `-vv` show trace output.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
