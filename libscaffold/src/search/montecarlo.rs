//! Strategy C: randomized traversal. Starting anchor and initial edge are drawn at random;
//! continuation reads are sampled with replacement weighted by extension score.
use std::collections::HashSet;

use rand::Rng;

use crate::graph::{Edge, EdgeId, Graph, NodeId};
use crate::search::{collect_candidates, directional_score, dominant_direction, Direction, Path, MAX_BRANCH_MONTECARLO};

const MAX_ITERATIONS: usize = 10_000;

/// Draw an index into `weights` proportional to its value. Returns `None` if every weight is
/// non-positive (nothing is reachable).
fn weighted_index(weights: &[f64], rng: &mut impl Rng) -> Option<usize> {
    let total: f64 = weights.iter().filter(|&&w| w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }
    let mut draw = rng.random::<f64>() * total;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        if draw < w {
            return Some(i);
        }
        draw -= w;
    }
    weights.iter().rposition(|&w| w > 0.0)
}

fn pick_initial_edge(graph: &Graph, anchor: NodeId, rng: &mut impl Rng) -> Option<(EdgeId, Edge)> {
    let candidates: Vec<(EdgeId, Edge)> = graph.edges_with_ids_of(anchor).map(|(id, e)| (id, *e)).collect();
    if candidates.is_empty() {
        return None;
    }
    let weights: Vec<f64> = candidates.iter().map(|(_, e)| e.es_left.max(e.es_right)).collect();
    let idx = weighted_index(&weights, rng)?;
    Some(candidates[idx])
}

fn pick_anchor_edge(candidates: &[(EdgeId, Edge)], rng: &mut impl Rng) -> (EdgeId, Edge) {
    let idx = rng.random_range(0..candidates.len());
    candidates[idx]
}

fn sample_read_edges(candidates: &[(EdgeId, Edge)], d: Direction, n: usize, rng: &mut impl Rng) -> Vec<EdgeId> {
    let weights: Vec<f64> = candidates.iter().map(|(_, e)| directional_score(e, d)).collect();
    let mut drawn = Vec::with_capacity(n);
    for _ in 0..n {
        if let Some(idx) = weighted_index(&weights, rng) {
            drawn.push(candidates[idx].0);
        }
    }
    drawn
}

/// One randomized walk attempt. Returns `None` if it dead-ends before reaching an anchor.
pub fn attempt(graph: &Graph, anchor: NodeId, e0: EdgeId, rng: &mut impl Rng) -> Option<Path> {
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
            let (chosen_eid, _) = pick_anchor_edge(&anchor_edges, rng);
            path.push(chosen_eid);
            return Some(Path { start: anchor, direction: d, edges: path });
        } else if !read_edges.is_empty() {
            for child_eid in sample_read_edges(&read_edges, d, MAX_BRANCH_MONTECARLO, rng) {
                stack.push(child_eid);
            }
        } else {
            path.pop();
            visited.remove(&v);
        }
    }

    None
}

/// Repeatedly draw a random anchor and initial edge, walking from each, until `numpaths` paths
/// have been collected or `max_iterations` attempts have been made.
pub fn search(graph: &Graph, numpaths: usize, rng: &mut impl Rng) -> Vec<Path> {
    let anchors: Vec<NodeId> = graph.anchor_ids().collect();
    if anchors.is_empty() || numpaths == 0 {
        return Vec::new();
    }

    let mut paths = Vec::new();
    for _ in 0..MAX_ITERATIONS {
        if paths.len() >= numpaths {
            break;
        }
        let anchor = anchors[rng.random_range(0..anchors.len())];
        let Some((e0, _)) = pick_initial_edge(graph, anchor, rng) else {
            continue;
        };
        if let Some(path) = attempt(graph, anchor, e0, rng) {
            paths.push(path);
        }
    }
    paths
}
