//! Chaining final representative paths into scaffolds and assembling their sequences.
use std::collections::{HashMap, HashSet};

use log::warn;

use crate::graph::{Edge, Graph};
use crate::overlap::Strand;
use crate::path::ScaffoldPath;
use crate::search::Direction;
use crate::seq::{revcomp, Sequence};

/// A run of representative paths stitched together anchor-to-anchor.
#[derive(Debug, Clone)]
pub struct Chain {
    /// Anchor identifiers in walk order, each appearing once.
    pub anchors: Vec<String>,
    /// The combined edge list used for sequence assembly, in walk order.
    pub edges: Vec<Edge>,
}

/// Link representatives sharing an endpoint into maximal chains. A *leftmost* anchor is one that
/// never appears as any representative's `ename`; each leftmost anchor starts exactly one chain,
/// extended greedily while some representative's `sname` matches the chain's current end.
///
/// Since filtering guarantees no two representatives share an `sname` or an `ename`, this forms
/// disjoint simple chains with no branching. A representative whose endpoints form a pure cycle
/// (every node in it also appears as some other representative's `ename`) has no leftmost entry
/// point and is left out of every chain; its anchors fall back to verbatim emission.
pub fn chain_representatives(representatives: &[ScaffoldPath]) -> Vec<Chain> {
    let enames: HashSet<&str> = representatives.iter().map(|r| r.ename.as_str()).collect();
    let by_sname: HashMap<&str, &ScaffoldPath> = representatives.iter().map(|r| (r.sname.as_str(), r)).collect();

    let mut chains = Vec::new();
    for start in representatives.iter().filter(|r| !enames.contains(r.sname.as_str())) {
        let mut anchors = vec![start.sname.clone(), start.ename.clone()];
        let mut edges = start.edges.clone();
        let mut current_end = start.ename.clone();

        while let Some(&next) = by_sname.get(current_end.as_str()) {
            // next.edges[0] duplicates the shared anchor already spliced in by the previous
            // representative; only the edges past it extend the chain.
            edges.extend(next.edges.iter().skip(1).copied());
            anchors.push(next.ename.clone());
            current_end = next.ename.clone();
        }

        chains.push(Chain { anchors, edges });
    }
    chains
}

fn toggle(strand: Strand) -> Strand {
    match strand {
        Strand::Forward => Strand::Reverse,
        Strand::Reverse => Strand::Forward,
    }
}

/// Assemble the sequence for one chain. All edges in a chain share the `RIGHT` direction, since
/// chains are only built from filtered (`RIGHT`-only) representatives.
pub fn assemble_chain(graph: &Graph, chain: &Chain) -> Sequence {
    let start_id = graph
        .node_id(&chain.anchors[0])
        .unwrap_or_else(|| panic!("chain references unknown anchor {}", chain.anchors[0]));
    let mut bases = graph.node(start_id).seq.bases.clone();
    let mut strand = Strand::Forward;

    for e in &chain.edges {
        let mut next = graph.node(e.end).seq.bases.clone();
        if e.strand == Strand::Reverse {
            strand = toggle(strand);
        }
        if strand == Strand::Reverse {
            next = revcomp(&next);
        }

        // RIGHT-branch splice index carries a `+1` that looks asymmetric with the LEFT branch;
        // this is load-bearing, not a transcription slip, and must not be "corrected".
        let start = e.e_end as usize + (e.s_len as usize - e.s_end as usize) + 1;
        if start < next.len() {
            bases.extend_from_slice(&next[start..]);
        } else if start > next.len() {
            warn!(
                "splice start {start} past end of node {} (len {}); appending nothing",
                e.end,
                next.len()
            );
        }
    }

    Sequence::new(format!("chain:{}", chain.anchors[0]), bases)
}

/// Emit every chain as `Scaffold%04d <anchor0>,<anchor1>,...` and every anchor untouched by any
/// chain verbatim under its own identifier. Chains are numbered in order of their first anchor's
/// identifier, for run-to-run reproducibility independent of search/group iteration order.
pub fn build_scaffolds(graph: &Graph, representatives: &[ScaffoldPath]) -> Vec<(String, Vec<u8>)> {
    let mut chains = chain_representatives(representatives);
    chains.sort_by(|a, b| a.anchors[0].cmp(&b.anchors[0]));

    let touched: HashSet<&str> = chains.iter().flat_map(|c| c.anchors.iter().map(String::as_str)).collect();

    let mut records = Vec::new();
    for (i, chain) in chains.iter().enumerate() {
        let seq = assemble_chain(graph, chain);
        let header = format!("Scaffold{:04} {}", i + 1, chain.anchors.join(","));
        records.push((header, seq.bases));
    }

    for node in graph.anchor_ids().map(|id| graph.node(id)) {
        if !touched.contains(node.id()) {
            records.push((node.id().to_string(), node.seq.bases.clone()));
        }
    }

    records
}
