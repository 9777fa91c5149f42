//! Partitions a weight matrix into strongly connected components.
//!
//! Components of size 1 or 2 can never host a cycle of length ≥ 3, so they
//! are set aside as isolated vertices; components of size ≥ 3 are handed
//! back as induced sub-matrices together with the map from sub-graph index
//! back to the original vertex index, mirroring the source's
//! `componentVerticesMap`.

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;

/// A strongly connected component of size ≥ 3, worth searching for a cycle.
pub struct Component {
    /// Dense sub-matrix induced on this component's vertices.
    pub matrix: Vec<Vec<f64>>,
    /// `sub_to_original[i]` is the original graph's vertex index for
    /// sub-graph vertex `i`.
    pub sub_to_original: Vec<usize>,
}

/// Result of partitioning a matrix by strongly connected components.
pub struct Partition {
    pub components: Vec<Component>,
    pub isolated: Vec<usize>,
}

/// Builds strongly connected components over the vertices with a nonzero
/// edge weight in `matrix` (an N×N dense adjacency with `0.0` meaning "no
/// edge").
pub fn partition(matrix: &[Vec<f64>]) -> Partition {
    let n = matrix.len();
    let mut graph: DiGraphMap<usize, ()> = DiGraphMap::with_capacity(n, 0);
    for i in 0..n {
        graph.add_node(i);
    }
    for i in 0..n {
        for j in 0..n {
            if i != j && matrix[i][j] != 0.0 {
                graph.add_edge(i, j, ());
            }
        }
    }

    let sccs = tarjan_scc(&graph);

    let mut components = Vec::new();
    let mut isolated = Vec::new();

    for scc in sccs {
        if scc.len() < 3 {
            isolated.extend(scc);
            continue;
        }

        let sub_to_original = scc;
        let size = sub_to_original.len();
        let mut sub_matrix = vec![vec![0.0_f64; size]; size];
        for (si, &oi) in sub_to_original.iter().enumerate() {
            for (sj, &oj) in sub_to_original.iter().enumerate() {
                if si != sj {
                    sub_matrix[si][sj] = matrix[oi][oj];
                }
            }
        }

        components.push(Component {
            matrix: sub_matrix,
            sub_to_original,
        });
    }

    Partition {
        components,
        isolated,
    }
}
