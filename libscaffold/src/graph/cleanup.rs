//! Graph cleanup: dropping discarded reads, then keeping at most one anchor per read.
use std::collections::HashSet;

use log::{debug, info};

use crate::graph::{Graph, NodeId};

/// Remove every outgoing edge whose end is a discarded read, then remove the discarded read
/// nodes themselves from the live graph.
pub fn discard_reads(graph: &mut Graph, discard: &HashSet<String>) {
    if discard.is_empty() {
        return;
    }

    let discard_ids: Vec<NodeId> = discard.iter().filter_map(|name| graph.node_id(name)).collect();
    let discard_id_set: HashSet<NodeId> = discard_ids.iter().copied().collect();

    let all_ids: Vec<NodeId> = graph.nodes().map(|(id, _)| id).collect();
    for id in all_ids {
        graph.retain_edges_of(id, |e| !discard_id_set.contains(&e.end));
    }

    for id in discard_ids {
        graph.remove_node(id);
    }

    info!("discarded {} read(s) flagged as contained", discard_id_set.len());
}

/// For every read, keep only its outgoing edge to the anchor with the greatest overlap score,
/// removing the others and their reverse twins. Ties are broken by insertion order: the first
/// anchor encountered with the current-best score is kept.
pub fn keep_best_anchor_per_read(graph: &mut Graph) {
    let read_ids: Vec<NodeId> = graph.read_ids().collect();
    let mut removed_edges = 0usize;

    for r in read_ids {
        let edge_ids: Vec<usize> = graph.edge_ids_of(r).collect();

        let mut anchor_edges: Vec<(usize, NodeId, f64)> = Vec::new();
        for eid in &edge_ids {
            let e = graph.edge(*eid);
            if graph.node(e.end).is_anchor() {
                anchor_edges.push((*eid, e.end, e.os));
            }
        }

        if anchor_edges.len() <= 1 {
            continue;
        }

        let mut best = anchor_edges[0];
        for &(eid, anchor, os) in &anchor_edges[1..] {
            if os > best.2 {
                best = (eid, anchor, os);
            }
        }

        let other_anchors: HashSet<NodeId> = anchor_edges
            .iter()
            .filter(|(eid, _, _)| *eid != best.0)
            .map(|(_, anchor, _)| *anchor)
            .collect();

        if other_anchors.is_empty() {
            continue;
        }

        graph.retain_edges_of(r, |e| !other_anchors.contains(&e.end));
        for &anchor in &other_anchors {
            graph.retain_edges_of(anchor, |e| e.end != r);
        }
        removed_edges += other_anchors.len();
    }

    debug!("cleanup removed {removed_edges} redundant read-anchor edge pair(s)");
}

/// Run both cleanup passes. Idempotent: running it twice in a row is a no-op the second time.
pub fn cleanup(graph: &mut Graph, discard: &HashSet<String>) {
    discard_reads(graph, discard);
    keep_best_anchor_per_read(graph);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, NodeKind};
    use crate::overlap::Strand;
    use crate::seq::Sequence;

    fn edge(start: NodeId, end: NodeId, os: f64) -> Edge {
        Edge {
            start,
            end,
            strand: Strand::Forward,
            si: 0.9,
            os,
            es_left: 5.0,
            es_right: 5.0,
            s_len: 100,
            s_start: 0,
            s_end: 90,
            e_len: 100,
            e_start: 0,
            e_end: 90,
        }
    }

    #[test]
    fn discard_reads_removes_node_and_incoming_edges() {
        let mut g = Graph::new();
        let a = g.add_node(NodeKind::Anchor, Sequence::new("a", b"A".repeat(100)));
        let r = g.add_node(NodeKind::Read, Sequence::new("r", b"A".repeat(100)));
        g.push_edge(edge(a, r, 10.0));
        g.push_edge(edge(r, a, 10.0));

        let mut discard = HashSet::new();
        discard.insert("r".to_string());
        discard_reads(&mut g, &discard);

        assert_eq!(g.edges_of(a).count(), 0);
        assert_eq!(g.read_ids().count(), 0);
    }

    #[test]
    fn keeps_only_best_scoring_anchor_for_each_read() {
        let mut g = Graph::new();
        let a1 = g.add_node(NodeKind::Anchor, Sequence::new("a1", b"A".repeat(100)));
        let a2 = g.add_node(NodeKind::Anchor, Sequence::new("a2", b"A".repeat(100)));
        let r = g.add_node(NodeKind::Read, Sequence::new("r", b"A".repeat(100)));
        g.push_edge(edge(r, a1, 10.0));
        g.push_edge(edge(r, a2, 20.0));
        g.push_edge(edge(a1, r, 10.0));
        g.push_edge(edge(a2, r, 20.0));

        keep_best_anchor_per_read(&mut g);

        let r_anchors: Vec<NodeId> = g.edges_of(r).map(|e| e.end).collect();
        assert_eq!(r_anchors, vec![a2]);
        assert_eq!(g.edges_of(a1).count(), 0);
        assert_eq!(g.edges_of(a2).count(), 1);
    }

    #[test]
    fn ties_keep_first_encountered_anchor() {
        let mut g = Graph::new();
        let a1 = g.add_node(NodeKind::Anchor, Sequence::new("a1", b"A".repeat(100)));
        let a2 = g.add_node(NodeKind::Anchor, Sequence::new("a2", b"A".repeat(100)));
        let r = g.add_node(NodeKind::Read, Sequence::new("r", b"A".repeat(100)));
        g.push_edge(edge(r, a1, 15.0));
        g.push_edge(edge(r, a2, 15.0));

        keep_best_anchor_per_read(&mut g);

        let r_anchors: Vec<NodeId> = g.edges_of(r).map(|e| e.end).collect();
        assert_eq!(r_anchors, vec![a1]);
    }

    #[test]
    fn cleanup_is_idempotent() {
        let mut g = Graph::new();
        let a1 = g.add_node(NodeKind::Anchor, Sequence::new("a1", b"A".repeat(100)));
        let a2 = g.add_node(NodeKind::Anchor, Sequence::new("a2", b"A".repeat(100)));
        let r = g.add_node(NodeKind::Read, Sequence::new("r", b"A".repeat(100)));
        g.push_edge(edge(r, a1, 10.0));
        g.push_edge(edge(r, a2, 20.0));
        g.push_edge(edge(a1, r, 10.0));
        g.push_edge(edge(a2, r, 20.0));

        let discard = HashSet::new();
        cleanup(&mut g, &discard);
        let after_first: Vec<NodeId> = g.edges_of(r).map(|e| e.end).collect();
        cleanup(&mut g, &discard);
        let after_second: Vec<NodeId> = g.edges_of(r).map(|e| e.end).collect();

        assert_eq!(after_first, after_second);
    }

    #[test]
    fn single_anchor_per_read_is_left_untouched() {
        let mut g = Graph::new();
        let a1 = g.add_node(NodeKind::Anchor, Sequence::new("a1", b"A".repeat(100)));
        let r = g.add_node(NodeKind::Read, Sequence::new("r", b"A".repeat(100)));
        g.push_edge(edge(r, a1, 10.0));

        keep_best_anchor_per_read(&mut g);

        assert_eq!(g.edges_of(r).count(), 1);
    }
}
