//! Path search: three strategies for walking the overlap graph from anchor to anchor through
//! chains of reads, sharing a direction invariant and a per-search visited set.
pub mod greedy;
pub mod montecarlo;

use std::collections::HashSet;

use crate::graph::{Edge, EdgeId, Graph, NodeId};

/// The side of an anchor a path is extending, fixed by the first edge taken and required to
/// stay constant for the rest of the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// One walk from a starting anchor through zero or more reads to a terminating anchor.
#[derive(Debug, Clone)]
pub struct Path {
    pub start: NodeId,
    pub direction: Direction,
    pub edges: Vec<EdgeId>,
}

impl Path {
    pub fn end(&self, graph: &Graph) -> NodeId {
        match self.edges.last() {
            Some(&eid) => graph.edge(eid).end,
            None => self.start,
        }
    }
}

const MAX_BRANCH_GREEDY: usize = 20;
const MAX_BRANCH_MONTECARLO: usize = 10;

fn directional_score(e: &Edge, d: Direction) -> f64 {
    match d {
        Direction::Left => e.es_left,
        Direction::Right => e.es_right,
    }
}

fn dominant_direction(e: &Edge) -> Direction {
    if e.es_left >= e.es_right {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// Whether an edge is a legal continuation of a walk going in direction `d`: its own larger
/// extension score lies on the `d` side, and that score is strictly positive.
fn direction_matches(e: &Edge, d: Direction) -> bool {
    dominant_direction(e) == d && directional_score(e, d) > 0.0
}

/// Partition a node's outgoing edges into candidates leading to another anchor and candidates
/// leading to an unvisited read, both restricted to the current walking direction.
fn collect_candidates(
    graph: &Graph,
    from: NodeId,
    origin_anchor: NodeId,
    d: Direction,
    visited: &HashSet<NodeId>,
) -> (Vec<(EdgeId, Edge)>, Vec<(EdgeId, Edge)>) {
    let mut anchor_edges = Vec::new();
    let mut read_edges = Vec::new();
    for (eid, e) in graph.edges_with_ids_of(from) {
        if !direction_matches(e, d) {
            continue;
        }
        if graph.node(e.end).is_anchor() {
            if e.end != origin_anchor {
                anchor_edges.push((eid, *e));
            }
        } else if !visited.contains(&e.end) {
            read_edges.push((eid, *e));
        }
    }
    (anchor_edges, read_edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;
    use crate::overlap::Strand;
    use crate::seq::Sequence;

    fn edge(start: NodeId, end: NodeId, es_left: f64, es_right: f64) -> Edge {
        Edge {
            start,
            end,
            strand: Strand::Forward,
            si: 0.9,
            os: 10.0,
            es_left,
            es_right,
            s_len: 100,
            s_start: 0,
            s_end: 90,
            e_len: 100,
            e_start: 0,
            e_end: 90,
        }
    }

    #[test]
    fn direction_matches_requires_dominant_side_and_positivity() {
        let e = edge(0, 1, 10.0, 2.0);
        assert!(direction_matches(&e, Direction::Left));
        assert!(!direction_matches(&e, Direction::Right));

        let dead = edge(0, 1, -1.0, -5.0);
        assert!(!direction_matches(&dead, Direction::Left));
        assert!(!direction_matches(&dead, Direction::Right));
    }

    #[test]
    fn collect_candidates_splits_anchors_from_reads_and_skips_visited() {
        let mut g = Graph::new();
        let a0 = g.add_node(NodeKind::Anchor, Sequence::new("a0", b"A".repeat(100)));
        let a1 = g.add_node(NodeKind::Anchor, Sequence::new("a1", b"A".repeat(100)));
        let r1 = g.add_node(NodeKind::Read, Sequence::new("r1", b"A".repeat(100)));
        let r2 = g.add_node(NodeKind::Read, Sequence::new("r2", b"A".repeat(100)));
        g.push_edge(edge(a0, a1, 10.0, 0.0));
        g.push_edge(edge(a0, r1, 10.0, 0.0));
        g.push_edge(edge(a0, r2, 10.0, 0.0));

        let mut visited = HashSet::new();
        visited.insert(r2);
        let (anchors, reads) = collect_candidates(&g, a0, a0, Direction::Left, &visited);
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].1.end, a1);
        assert_eq!(reads.len(), 1);
        assert_eq!(reads[0].1.end, r1);
    }
}
