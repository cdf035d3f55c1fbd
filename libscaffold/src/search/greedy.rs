//! Strategies A and B: deterministic greedy traversal, differing only in the sort key used to
//! rank candidate edges at each step.
use std::collections::HashSet;

use crate::graph::{Edge, EdgeId, Graph, NodeId};
use crate::search::{collect_candidates, dominant_direction, Direction, Path, MAX_BRANCH_GREEDY};

/// Rank candidates by overlap score, descending. Used by both anchor and read candidate lists.
pub fn by_overlap_score(e: &Edge, _d: Direction) -> f64 {
    e.os
}

/// Rank candidates by the extension score on the walk's own direction, descending.
pub fn by_extension_score(e: &Edge, d: Direction) -> f64 {
    match d {
        Direction::Left => e.es_left,
        Direction::Right => e.es_right,
    }
}

/// The first candidate with the highest key wins ties, matching a stable
/// sort-descending-then-take-first reading of "sort, take the first".
fn best_by_key(candidates: &[(EdgeId, Edge)], d: Direction, key: impl Fn(&Edge, Direction) -> f64) -> (EdgeId, Edge) {
    let mut best = candidates[0];
    let mut best_key = key(&best.1, d);
    for &candidate in &candidates[1..] {
        let k = key(&candidate.1, d);
        if k > best_key {
            best = candidate;
            best_key = k;
        }
    }
    best
}

fn top_n_by_key(
    candidates: &[(EdgeId, Edge)],
    d: Direction,
    n: usize,
    key: impl Fn(&Edge, Direction) -> f64,
) -> Vec<(EdgeId, Edge)> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| key(&b.1, d).partial_cmp(&key(&a.1, d)).unwrap());
    sorted.truncate(n);
    sorted
}

/// Run one deterministic walk starting from `anchor` via initial edge `e0`, using `key` to break
/// ties among candidate edges at every step. Returns `None` if the walk dead-ends without
/// reaching a second anchor.
pub fn traverse(graph: &Graph, anchor: NodeId, e0: EdgeId, key: impl Fn(&Edge, Direction) -> f64) -> Option<Path> {
    let first = *graph.edge(e0);
    let d = dominant_direction(&first);

    let mut visited: HashSet<NodeId> = HashSet::new();
    visited.insert(anchor);
    let mut stack: Vec<EdgeId> = vec![e0];
    let mut path: Vec<EdgeId> = Vec::new();

    while let Some(eid) = stack.pop() {
        let e = *graph.edge(eid);
        let v = e.end;
        path.push(eid);
        visited.insert(v);

        if graph.node(v).is_anchor() {
            return Some(Path { start: anchor, direction: d, edges: path });
        }

        let (anchor_edges, read_edges) = collect_candidates(graph, v, anchor, d, &visited);

        if !anchor_edges.is_empty() {
            let (best_eid, _) = best_by_key(&anchor_edges, d, &key);
            path.push(best_eid);
            return Some(Path { start: anchor, direction: d, edges: path });
        } else if !read_edges.is_empty() {
            let top = top_n_by_key(&read_edges, d, MAX_BRANCH_GREEDY, &key);
            for (child_eid, _) in top.into_iter().rev() {
                stack.push(child_eid);
            }
        } else {
            path.pop();
            visited.remove(&v);
        }
    }

    None
}

/// Exhaustively run a greedy strategy from every outgoing edge of every anchor, collecting every
/// walk that reaches a second anchor.
pub fn search(graph: &Graph, key: impl Fn(&Edge, Direction) -> f64 + Copy) -> Vec<Path> {
    let mut paths = Vec::new();
    for anchor in graph.anchor_ids() {
        for (eid, _) in graph.edges_with_ids_of(anchor) {
            if let Some(path) = traverse(graph, anchor, eid, key) {
                paths.push(path);
            }
        }
    }
    paths
}

/// Strategy A: candidates at every step are ranked by overlap score.
pub fn search_max_overlap_score(graph: &Graph) -> Vec<Path> {
    search(graph, by_overlap_score)
}

/// Strategy B: candidates at every step are ranked by the direction-relative extension score.
pub fn search_max_extension_score(graph: &Graph) -> Vec<Path> {
    search(graph, by_extension_score)
}
