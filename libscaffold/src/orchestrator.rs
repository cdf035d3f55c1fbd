//! Top-level orchestration: wiring the classifier, graph builder, path search, and synthesis
//! stages into one pipeline behind a chainable builder.
use std::collections::HashSet;
use std::path::Path;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::classify::ClassifyFlags;
use crate::error::ScaffoldError;
use crate::finalize::finalize_groups;
use crate::graph::builder::{install_contig_read_overlaps, install_read_read_overlaps, load_nodes};
use crate::graph::cleanup::cleanup;
use crate::graph::Graph;
use crate::grouping::{filter_path_groups, group_paths};
use crate::io::{load_overlaps, load_sequences};
use crate::path::ScaffoldPath;
use crate::search::{greedy, montecarlo, Path as SearchPath};
use crate::synth::build_scaffolds;

/// Configures and runs the scaffolding pipeline end to end: load anchors/reads and their
/// overlaps, build and clean the overlap graph, search it with all three path strategies, then
/// group, filter, and synthesize the final scaffolds.
///
/// # Examples
///
/// ```no_run
/// use libscaffold::Scaffolder;
///
/// let records = Scaffolder::new()
///     .threads(4)
///     .seed(1)
///     .run("contigs.fa", "reads.fq", "contig_read.paf", "read_read.paf")
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Scaffolder {
    threads: usize,
    check_short: bool,
    check_contained: bool,
    check_lowq: bool,
    seed: u64,
}

impl Default for Scaffolder {
    fn default() -> Self {
        Scaffolder {
            threads: 1,
            check_short: true,
            check_contained: true,
            check_lowq: true,
            seed: 0,
        }
    }
}

impl Scaffolder {
    /// Create a new builder with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of worker threads for classifying read<->read overlaps. Default 1.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Random seed for the Monte Carlo search strategy. Default 0.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Disable the short-overlap check. Enabled by default.
    pub fn check_short(mut self, enabled: bool) -> Self {
        self.check_short = enabled;
        self
    }

    /// Disable the containment check. Enabled by default.
    pub fn check_contained(mut self, enabled: bool) -> Self {
        self.check_contained = enabled;
        self
    }

    /// Disable the low-identity check. Enabled by default.
    pub fn check_lowq(mut self, enabled: bool) -> Self {
        self.check_lowq = enabled;
        self
    }

    fn classify_flags(&self) -> ClassifyFlags {
        ClassifyFlags {
            check_short: self.check_short,
            check_contained: self.check_contained,
            check_lowq: self.check_lowq,
        }
    }

    /// Run the full pipeline, returning FASTA records as `(header, sequence)` pairs. Every
    /// untouched anchor is included verbatim, so the output is never empty as long as at least
    /// one anchor was loaded.
    pub fn run<P1, P2, P3, P4>(
        &self,
        contigs: P1,
        reads: P2,
        contig_read_paf: P3,
        read_read_paf: P4,
    ) -> Result<Vec<(String, Vec<u8>)>, ScaffoldError>
    where
        P1: AsRef<Path>,
        P2: AsRef<Path>,
        P3: AsRef<Path>,
        P4: AsRef<Path>,
    {
        let anchors = load_sequences(contigs)?;
        let reads = load_sequences(reads)?;
        info!("loaded {} anchor(s) and {} read(s)", anchors.len(), reads.len());

        let mut graph = Graph::new();
        load_nodes(&mut graph, anchors, reads);

        let mut discard: HashSet<String> = HashSet::new();
        let flags = self.classify_flags();

        let contig_read_overlaps = load_overlaps(contig_read_paf)?;
        install_contig_read_overlaps(&mut graph, &contig_read_overlaps, &mut discard, flags);

        let read_read_overlaps = load_overlaps(read_read_paf)?;
        install_read_read_overlaps(&mut graph, read_read_overlaps, &mut discard, flags, self.threads)?;

        cleanup(&mut graph, &discard);

        let paths_a = greedy::search_max_overlap_score(&graph);
        let paths_b = greedy::search_max_extension_score(&graph);
        info!("strategy A found {} path(s), strategy B found {} path(s)", paths_a.len(), paths_b.len());

        let numpaths = 2 * (paths_a.len() + paths_b.len() + 1);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let paths_c = montecarlo::search(&graph, numpaths, &mut rng);
        info!("strategy C found {} path(s) (seed {})", paths_c.len(), self.seed);

        let records = self.collect_path_records(&graph, paths_a.iter().chain(paths_b.iter()).chain(paths_c.iter()));

        if records.is_empty() {
            warn!("no paths found by any search strategy; emitting every anchor verbatim");
        }

        let groups = group_paths(records);
        for g in &groups {
            debug!("group before filtering: ({}, {}, {:?}, size={})", g.sname, g.ename, g.direction, g.members.len());
        }

        let accepted = filter_path_groups(groups);
        for g in &accepted {
            debug!("group after filtering: ({}, {}, {:?}, size={})", g.sname, g.ename, g.direction, g.members.len());
        }
        info!("{} path group(s) accepted after filtering", accepted.len());

        let representatives = finalize_groups(accepted);
        for r in &representatives {
            debug!(
                "final path: ({}, {}, length={}, numNodes={}, {:?}, SIavg={:.4})",
                r.sname, r.ename, r.length, r.num_nodes, r.direction, r.si_avg
            );
        }

        let scaffolds = build_scaffolds(&graph, &representatives);
        info!("emitting {} scaffold/anchor record(s)", scaffolds.len());

        Ok(scaffolds)
    }

    fn collect_path_records<'a>(&self, graph: &Graph, paths: impl Iterator<Item = &'a SearchPath>) -> Vec<ScaffoldPath> {
        let mut records = Vec::new();
        for p in paths {
            let natural = match ScaffoldPath::from_search_path(graph, p) {
                Ok(rec) => rec,
                Err(e) => {
                    warn!("dropping structurally invalid path: {e}");
                    continue;
                }
            };
            match natural.reversed() {
                Ok(rev) => records.push(rev),
                Err(e) => warn!("dropping reversed twin of path {}->{}: {e}", natural.sname, natural.ename),
            }
            records.push(natural);
        }
        records
    }
}

/// Write FASTA records (as produced by [`Scaffolder::run`]) to a writer, one header line and one
/// sequence line per record.
pub fn write_fasta<W: std::io::Write>(writer: &mut W, records: &[(String, Vec<u8>)]) -> std::io::Result<()> {
    for (header, seq) in records {
        writeln!(writer, ">{header}")?;
        writer.write_all(seq)?;
        writeln!(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_fasta_emits_one_header_and_sequence_line_per_record() {
        let records = vec![("a".to_string(), b"ACGT".to_vec()), ("b".to_string(), b"TTTT".to_vec())];
        let mut out = Vec::new();
        write_fasta(&mut out, &records).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ">a\nACGT\n>b\nTTTT\n");
    }
}
