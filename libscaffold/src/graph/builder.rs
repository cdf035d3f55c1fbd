//! Construction of the overlap graph from anchor/read sequences and classified overlaps.
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crossbeam_channel as channel;
use log::{debug, info, trace, warn};
use rayon::prelude::*;

use crate::classify::{classify, ClassifyFlags, RejectKind};
use crate::error::ScaffoldError;
use crate::graph::{Edge, Graph, NodeId, NodeKind};
use crate::overlap::RawOverlap;
use crate::seq::Sequence;

/// Tallies of why overlap records were dropped during graph construction, mirroring the
/// `nusable`/`ncontained`/`nshort`/`nlowqual`/`nzeroes` counters the classifier reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct RejectionCounts {
    pub usable: u32,
    pub contained: u32,
    pub short: u32,
    pub low_quality: u32,
    pub zero_extension: u32,
    pub unknown_identifier: u32,
}

impl RejectionCounts {
    fn record(&mut self, kind: RejectKind) {
        match kind {
            RejectKind::Contained => self.contained += 1,
            RejectKind::Short => self.short += 1,
            RejectKind::LowQuality => self.low_quality += 1,
            RejectKind::ZeroExtension => self.zero_extension += 1,
        }
    }

    fn merge(&mut self, other: &RejectionCounts) {
        self.usable += other.usable;
        self.contained += other.contained;
        self.short += other.short;
        self.low_quality += other.low_quality;
        self.zero_extension += other.zero_extension;
        self.unknown_identifier += other.unknown_identifier;
    }

    pub fn log_summary(&self, stage: &str) {
        info!(
            "{stage}: {} usable, {} contained, {} short, {} low-quality, {} zero-extension, {} unknown identifier",
            self.usable, self.contained, self.short, self.low_quality, self.zero_extension, self.unknown_identifier
        );
    }
}

/// Populate the graph's node set from loaded anchor and read sequences. Must be called before
/// any overlap is installed.
pub fn load_nodes(graph: &mut Graph, anchors: Vec<Sequence>, reads: Vec<Sequence>) {
    for anchor in anchors {
        graph.add_node(NodeKind::Anchor, anchor);
    }
    for read in reads {
        graph.add_node(NodeKind::Read, read);
    }
}

fn make_edge_pair(raw: &RawOverlap, ovl_si: f64, ovl_os: f64, qes1: f64, qes2: f64, tes1: f64, tes2: f64) -> (Edge, Edge) {
    let fwd = Edge {
        start: 0,
        end: 0,
        strand: raw.strand,
        si: ovl_si,
        os: ovl_os,
        es_left: qes1.max(0.0),
        es_right: qes2.max(0.0),
        s_len: raw.qlen,
        s_start: raw.qstart,
        s_end: raw.qend,
        e_len: raw.tlen,
        e_start: raw.tstart,
        e_end: raw.tend,
    };
    let rev = Edge {
        start: 0,
        end: 0,
        strand: raw.strand,
        si: ovl_si,
        os: ovl_os,
        es_left: tes1.max(0.0),
        es_right: tes2.max(0.0),
        s_len: raw.tlen,
        s_start: raw.tstart,
        s_end: raw.tend,
        e_len: raw.qlen,
        e_start: raw.qstart,
        e_end: raw.qend,
    };
    (fwd, rev)
}

/// Single-threaded contig<->read overlap installation.
pub fn install_contig_read_overlaps(
    graph: &mut Graph,
    raws: &[RawOverlap],
    discard: &mut HashSet<String>,
    flags: ClassifyFlags,
) -> RejectionCounts {
    let mut counts = RejectionCounts::default();

    for raw in raws {
        let q = graph.node_id(&raw.qname);
        let t = graph.node_id(&raw.tname);
        let (q, t) = match (q, t) {
            (Some(q), Some(t)) => (q, t),
            _ => {
                warn!(
                    "overlap references unknown identifier(s): {} / {}",
                    raw.qname, raw.tname
                );
                counts.unknown_identifier += 1;
                continue;
            }
        };

        match classify(raw, discard, flags) {
            Ok(ovl) => {
                counts.usable += 1;
                let (fwd, rev) = make_edge_pair(raw, ovl.si, ovl.os, ovl.qes1, ovl.qes2, ovl.tes1, ovl.tes2);
                graph.push_edge(Edge { start: q, end: t, ..fwd });
                graph.push_edge(Edge { start: t, end: q, ..rev });
            }
            Err(kind) => counts.record(kind),
        }
    }

    counts.log_summary("contig-read overlaps");

    let isolated = graph
        .anchor_ids()
        .filter(|&id| graph.edges_of(id).count() == 0)
        .count();
    if isolated > 0 {
        info!("{isolated} anchor(s) have no contig-read overlaps and will be skipped by path search");
    }

    counts
}

struct EdgeInstall {
    start: NodeId,
    edge: Edge,
}

/// Read<->read overlap installation, sharded across `threads` rayon workers.
///
/// Workers classify their share of the overlap stream independently, producing partial edge
/// lists and local discard sets without touching the graph. This coordinator then installs every
/// partial edge exactly once. The resulting edge set is independent of `threads`; per-node
/// adjacency order is only guaranteed deterministic for `threads = 1`.
pub fn install_read_read_overlaps(
    graph: &mut Graph,
    raws: Vec<RawOverlap>,
    discard: &mut HashSet<String>,
    flags: ClassifyFlags,
    threads: usize,
) -> Result<RejectionCounts, ScaffoldError> {
    let index: std::collections::HashMap<String, NodeId> = graph
        .nodes()
        .map(|(id, node)| (node.id().to_string(), id))
        .collect();
    let index = Arc::new(index);

    let (sender, receiver) = channel::bounded(10_000);
    let producer = std::thread::spawn(move || {
        for raw in raws {
            if sender.send(raw).is_err() {
                break;
            }
        }
    });

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .map_err(|e| ScaffoldError::ThreadError(format!("error setting number of threads: {e}")))?;

    let installs: Arc<Mutex<Vec<EdgeInstall>>> = Arc::new(Mutex::new(Vec::new()));
    let discard_acc: Arc<Mutex<HashSet<String>>> = Arc::new(Mutex::new(HashSet::new()));
    let usable = AtomicU32::new(0);
    let contained = AtomicU32::new(0);
    let short = AtomicU32::new(0);
    let low_quality = AtomicU32::new(0);
    let zero_extension = AtomicU32::new(0);
    let unknown = AtomicU32::new(0);

    debug!("classifying read-read overlaps across {} worker(s)", threads.max(1));

    pool.install(|| {
        receiver.into_iter().par_bridge().for_each(|raw| {
            let q = index.get(&raw.qname).copied();
            let t = index.get(&raw.tname).copied();
            let (q, t) = match (q, t) {
                (Some(q), Some(t)) => (q, t),
                _ => {
                    trace!(
                        "read-read overlap references unknown identifier(s): {} / {}",
                        raw.qname, raw.tname
                    );
                    unknown.fetch_add(1, Ordering::Relaxed);
                    return;
                }
            };

            let mut local_discard = HashSet::new();
            match classify(&raw, &mut local_discard, flags) {
                Ok(ovl) => {
                    usable.fetch_add(1, Ordering::Relaxed);
                    let (fwd, rev) =
                        make_edge_pair(&raw, ovl.si, ovl.os, ovl.qes1, ovl.qes2, ovl.tes1, ovl.tes2);
                    let mut lock = installs.lock().unwrap();
                    lock.push(EdgeInstall {
                        start: q,
                        edge: Edge { start: q, end: t, ..fwd },
                    });
                    lock.push(EdgeInstall {
                        start: t,
                        edge: Edge { start: t, end: q, ..rev },
                    });
                }
                Err(kind) => match kind {
                    RejectKind::Contained => {
                        contained.fetch_add(1, Ordering::Relaxed);
                    }
                    RejectKind::Short => {
                        short.fetch_add(1, Ordering::Relaxed);
                    }
                    RejectKind::LowQuality => {
                        low_quality.fetch_add(1, Ordering::Relaxed);
                    }
                    RejectKind::ZeroExtension => {
                        zero_extension.fetch_add(1, Ordering::Relaxed);
                    }
                },
            }

            if !local_discard.is_empty() {
                discard_acc.lock().unwrap().extend(local_discard);
            }
        });
    });

    producer
        .join()
        .map_err(|e| ScaffoldError::ThreadError(format!("thread panicked when joining: {e:?}")))?;

    let installs = Arc::try_unwrap(installs)
        .map_err(|_| ScaffoldError::ThreadError("error unwrapping edge install Arc<Mutex<...>>".into()))?
        .into_inner()
        .map_err(|_| ScaffoldError::ThreadError("error unwrapping edge install Mutex<...>".into()))?;

    // coordinator installs every partial edge exactly once
    for install in installs {
        graph.push_edge(install.edge);
        let _ = install.start; // start is redundant with edge.start, kept for clarity at the call site
    }

    let worker_discard = Arc::try_unwrap(discard_acc)
        .map_err(|_| ScaffoldError::ThreadError("error unwrapping discard Arc<Mutex<...>>".into()))?
        .into_inner()
        .map_err(|_| ScaffoldError::ThreadError("error unwrapping discard Mutex<...>".into()))?;
    discard.extend(worker_discard);

    let counts = RejectionCounts {
        usable: usable.load(Ordering::Relaxed),
        contained: contained.load(Ordering::Relaxed),
        short: short.load(Ordering::Relaxed),
        low_quality: low_quality.load(Ordering::Relaxed),
        zero_extension: zero_extension.load(Ordering::Relaxed),
        unknown_identifier: unknown.load(Ordering::Relaxed),
    };
    counts.log_summary("read-read overlaps");

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlap::Strand;

    fn raw(qname: &str, tname: &str) -> RawOverlap {
        RawOverlap {
            qname: qname.to_string(),
            qlen: 100,
            qstart: 10,
            qend: 100,
            strand: Strand::Forward,
            tname: tname.to_string(),
            tlen: 200,
            tstart: 0,
            tend: 90,
            nrm: 85,
            abl: 90,
            mq: 60,
        }
    }

    fn sample_graph() -> Graph {
        let mut g = Graph::new();
        load_nodes(
            &mut g,
            vec![Sequence::new("anchor1", b"A".repeat(200))],
            vec![Sequence::new("read1", b"A".repeat(100))],
        );
        g
    }

    #[test]
    fn accepted_overlap_installs_two_edges() {
        let mut g = sample_graph();
        let mut discard = HashSet::new();
        let counts = install_contig_read_overlaps(
            &mut g,
            &[raw("read1", "anchor1")],
            &mut discard,
            ClassifyFlags::default(),
        );
        assert_eq!(counts.usable, 1);
        let a = g.node_id("anchor1").unwrap();
        let r = g.node_id("read1").unwrap();
        assert_eq!(g.edges_of(a).count(), 1);
        assert_eq!(g.edges_of(r).count(), 1);
    }

    #[test]
    fn unknown_identifier_is_skipped_not_fatal() {
        let mut g = sample_graph();
        let mut discard = HashSet::new();
        let counts = install_contig_read_overlaps(
            &mut g,
            &[raw("read1", "nonexistent")],
            &mut discard,
            ClassifyFlags::default(),
        );
        assert_eq!(counts.unknown_identifier, 1);
        assert_eq!(counts.usable, 0);
    }

    #[test]
    fn read_read_install_is_threads_independent_in_edge_count() {
        let mut g1 = Graph::new();
        load_nodes(
            &mut g1,
            vec![],
            vec![
                Sequence::new("r1", b"A".repeat(200)),
                Sequence::new("r2", b"A".repeat(100)),
            ],
        );
        let mut g2 = Graph::new();
        load_nodes(
            &mut g2,
            vec![],
            vec![
                Sequence::new("r1", b"A".repeat(200)),
                Sequence::new("r2", b"A".repeat(100)),
            ],
        );
        let raws = vec![raw("r2", "r1")];
        let mut d1 = HashSet::new();
        let mut d2 = HashSet::new();
        install_read_read_overlaps(&mut g1, raws.clone(), &mut d1, ClassifyFlags::default(), 1).unwrap();
        install_read_read_overlaps(&mut g2, raws, &mut d2, ClassifyFlags::default(), 4).unwrap();
        assert_eq!(g1.edge_count(), g2.edge_count());
    }
}
