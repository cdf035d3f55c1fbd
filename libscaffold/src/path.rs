//! Derived path records: length/direction/quality summaries computed from a raw search path,
//! plus the reversal that lets downstream grouping consider either endpoint as the start.
use crate::error::ScaffoldError;
use crate::graph::{Edge, Graph};
use crate::search::{Direction, Path as SearchPath};

/// The length contribution of one edge extending `start` with `end`, in the direction the walk
/// is travelling.
fn edge_delta(direction: Direction, e: &Edge) -> i64 {
    match direction {
        Direction::Right => e.s_start as i64 - e.e_start as i64,
        Direction::Left => {
            (e.s_len as i64 - e.s_end as i64) - (e.e_len as i64 - e.e_end as i64)
        }
    }
}

fn path_length(direction: Direction, edges: &[Edge]) -> Result<i64, ScaffoldError> {
    let mut total = 0i64;
    for e in edges {
        let delta = edge_delta(direction, e);
        if delta <= 0 {
            return Err(ScaffoldError::StructuralPathError(format!(
                "non-positive length contribution ({delta}) extending node {} with node {}",
                e.start, e.end
            )));
        }
        total += delta;
    }
    total += edges.last().map(|e| e.e_len as i64).unwrap_or(0);
    Ok(total)
}

fn mean_si(edges: &[Edge]) -> f64 {
    if edges.is_empty() {
        return 0.0;
    }
    edges.iter().map(|e| e.si).sum::<f64>() / edges.len() as f64
}

/// A search path annotated with the derived info groups and filtering need: its endpoint
/// identifiers, length, node count, and mean overlap identity.
#[derive(Debug, Clone)]
pub struct ScaffoldPath {
    pub sname: String,
    pub ename: String,
    pub direction: Direction,
    pub length: i64,
    pub num_nodes: usize,
    pub si_avg: f64,
    /// Edges in walk order from `sname` to `ename`. Owned rather than graph edge ids because the
    /// reversed twin synthesizes edges that don't exist in the graph.
    pub edges: Vec<Edge>,
}

impl ScaffoldPath {
    /// Materialize a [`ScaffoldPath`] from a raw search path's edge ids.
    pub fn from_search_path(graph: &Graph, path: &SearchPath) -> Result<ScaffoldPath, ScaffoldError> {
        let edges: Vec<Edge> = path.edges.iter().map(|&id| *graph.edge(id)).collect();
        let sname = graph.node(path.start).id().to_string();
        let ename = graph.node(path.end(graph)).id().to_string();
        let length = path_length(path.direction, &edges)?;

        Ok(ScaffoldPath {
            sname,
            ename,
            direction: path.direction,
            length,
            num_nodes: edges.len() + 1,
            si_avg: mean_si(&edges),
            edges,
        })
    }

    /// The reversed twin: same set of edges, walked end-to-start, with direction flipped. See the
    /// scaffold synthesis edge-reversal rule for the per-edge transform.
    pub fn reversed(&self) -> Result<ScaffoldPath, ScaffoldError> {
        let direction = match self.direction {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        };
        let edges: Vec<Edge> = self.edges.iter().rev().map(Edge::reversed).collect();
        let length = path_length(direction, &edges)?;

        Ok(ScaffoldPath {
            sname: self.ename.clone(),
            ename: self.sname.clone(),
            direction,
            length,
            num_nodes: self.num_nodes,
            si_avg: mean_si(&edges),
            edges,
        })
    }
}
