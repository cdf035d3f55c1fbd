use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;
use libscaffold::{write_fasta, Scaffolder};
use log::{debug, info, LevelFilter};

mod cli;

fn setup_logging(quiet: u8, verbose: u8) {
    let sum = (verbose as i16) - (quiet as i16);
    let lvl = match sum {
        1 => LevelFilter::Debug,
        2.. => LevelFilter::Trace,
        -1 => LevelFilter::Warn,
        -2 => LevelFilter::Error,
        i if i < -2 => LevelFilter::Off,
        _ => LevelFilter::Info,
    };
    let mut log_builder = env_logger::Builder::new();
    log_builder.filter(None, lvl);
    log_builder.init();
}

fn main() -> Result<()> {
    let args = cli::Args::parse();
    setup_logging(args.quiet, args.verbose);
    debug!("{:?}", args);

    info!(
        "scaffolding {} against {} with {} thread(s)",
        args.contigs.display(),
        args.reads.display(),
        args.threads
    );

    let records = Scaffolder::new()
        .threads(args.threads)
        .seed(args.seed)
        .run(&args.contigs, &args.reads, &args.contig_read_paf, &args.read_read_paf)
        .context("scaffolding pipeline failed")?;

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create output file {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);
    write_fasta(&mut writer, &records).context("failed to write scaffold FASTA")?;

    info!("wrote {} record(s) to {}", records.len(), args.output.display());

    Ok(())
}
