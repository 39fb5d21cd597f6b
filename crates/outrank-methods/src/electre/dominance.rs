//! Dominance relation, cycle detection and cycle breaking.

use std::collections::HashSet;
use std::fmt;

use outrank_core::{ConcordanceMatrix, NonDiscordanceMatrix, OutrankError, PairMatrix, Result};
use smallvec::SmallVec;
use tracing::debug;

/// Builds the raw dominance relation.
///
/// `a -> b` iff `concordance[a][b] >= threshold` and no criterion vetoes it.
/// The diagonal is always empty because non-discordance never holds there.
pub fn compute_dominance(
    concordance: &ConcordanceMatrix,
    non_discordance: &NonDiscordanceMatrix,
    threshold: f64,
) -> DominanceGraph {
    let n = concordance.size();
    let mut edges = PairMatrix::filled(n, false);
    for (a, b) in concordance.off_diagonal() {
        edges[(a, b)] = concordance[(a, b)] >= threshold && non_discordance[(a, b)];
    }
    DominanceGraph { edges }
}

/// A simple cycle `[v0, v1, ..., vk-1]` closing back on `v0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle(SmallVec<[usize; 8]>);

impl Cycle {
    pub fn from_slice(vertices: &[usize]) -> Self {
        Self(SmallVec::from_slice(vertices))
    }

    pub fn vertices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consecutive edges, wrapping from the last vertex to the first.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let k = self.0.len();
        (0..k).map(move |i| (self.0[i], self.0[(i + 1) % k]))
    }

    /// Sorted vertex list; two cycles with the same key are the same cycle.
    pub fn member_key(&self) -> SmallVec<[usize; 8]> {
        let mut key = self.0.clone();
        key.sort_unstable();
        key
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.0 {
            write!(f, "{v} -> ")?;
        }
        match self.0.first() {
            Some(first) => write!(f, "{first}"),
            None => Ok(()),
        }
    }
}

/// How one detected cycle was broken.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleBreak {
    pub cycle: Cycle,
    /// Edge with the highest concordance; first one wins ties.
    pub kept: (usize, usize),
    /// Every other edge of the cycle.
    pub removed: Vec<(usize, usize)>,
}

/// Directed dominance edges between alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct DominanceGraph {
    edges: PairMatrix<bool>,
}

impl DominanceGraph {
    pub fn from_matrix(edges: PairMatrix<bool>) -> Self {
        Self { edges }
    }

    pub fn size(&self) -> usize {
        self.edges.size()
    }

    #[inline]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.edges[(from, to)]
    }

    /// Dominated alternatives of `from`, in index order.
    pub fn successors(&self, from: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .row(from)
            .iter()
            .enumerate()
            .filter_map(|(to, &edge)| edge.then_some(to))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.count_true()
    }

    pub fn matrix(&self) -> &PairMatrix<bool> {
        &self.edges
    }

    /// Finds the cycles of the graph, one per distinct vertex set.
    ///
    /// A depth-first search runs from every vertex in index order, following
    /// successors in index order and keeping the current path. Reaching a
    /// vertex already on the path reports the path from that vertex to the
    /// tail. The first report of each vertex set is kept.
    ///
    /// Subtrees that can only repeat earlier reports are skipped, so the
    /// result equals that of the exhaustive path search while transitive
    /// chains stay polynomial.
    ///
    /// # Errors
    ///
    /// Returns [`OutrankError::TooManyCycles`] once more than `limit` cycle
    /// reports have been produced.
    pub fn detect_cycles(&self, limit: usize) -> Result<Vec<Cycle>> {
        let mut search = CycleSearch::new(self, limit);
        for start in 0..self.size() {
            search.visit(start)?;
            // every cycle through `start` has been reported by now
            search.retired[start] = true;
        }
        debug!(
            reports = search.reports as u64,
            distinct = search.found.len() as u64,
            "Cycle search finished"
        );
        Ok(search.found)
    }

    /// Breaks every cycle in `cycles`, in order.
    ///
    /// Per cycle, keeps the edge with the highest concordance and removes the
    /// others. Cycles are not re-detected afterwards.
    pub fn break_cycles(
        &mut self,
        cycles: &[Cycle],
        concordance: &ConcordanceMatrix,
    ) -> Vec<CycleBreak> {
        cycles
            .iter()
            .filter(|cycle| !cycle.is_empty())
            .map(|cycle| {
                let kept = strongest_edge(cycle, concordance);
                let removed: Vec<_> = cycle.edges().filter(|&edge| edge != kept).collect();
                for &(from, to) in &removed {
                    self.edges[(from, to)] = false;
                }
                debug!(
                    cycle = %cycle,
                    kept_from = kept.0 as u64,
                    kept_to = kept.1 as u64,
                    removed = removed.len() as u64,
                    "Cycle broken"
                );
                CycleBreak {
                    cycle: cycle.clone(),
                    kept,
                    removed,
                }
            })
            .collect()
    }
}

/// First edge of the cycle with maximal concordance.
fn strongest_edge(cycle: &Cycle, concordance: &ConcordanceMatrix) -> (usize, usize) {
    let mut edges = cycle.edges();
    let first = match edges.next() {
        Some(edge) => edge,
        None => return (0, 0),
    };
    edges.fold(first, |best, edge| {
        if concordance[edge] > concordance[best] {
            edge
        } else {
            best
        }
    })
}

/// Recursive path search state shared by all start vertices.
struct CycleSearch<'a> {
    graph: &'a DominanceGraph,
    limit: usize,
    path: Vec<usize>,
    /// Position of each vertex on the current path.
    position: Vec<Option<usize>>,
    /// Strongly connected component of each vertex.
    component: Vec<usize>,
    /// Path vertices per component.
    on_path: Vec<usize>,
    /// Vertices whose whole subtree was explored with no path vertex reachable.
    exhausted: Vec<bool>,
    /// Finished start vertices.
    retired: Vec<bool>,
    seen: HashSet<SmallVec<[usize; 8]>>,
    found: Vec<Cycle>,
    reports: usize,
}

impl<'a> CycleSearch<'a> {
    fn new(graph: &'a DominanceGraph, limit: usize) -> Self {
        let n = graph.size();
        let component = strongly_connected_components(graph);
        let components = component.iter().copied().max().map_or(0, |c| c + 1);
        Self {
            graph,
            limit,
            path: Vec::with_capacity(n),
            position: vec![None; n],
            component,
            on_path: vec![0; components],
            exhausted: vec![false; n],
            retired: vec![false; n],
            seen: HashSet::new(),
            found: Vec::new(),
            reports: 0,
        }
    }

    fn visit(&mut self, vertex: usize) -> Result<()> {
        if self.retired[vertex] {
            return Ok(());
        }
        if let Some(start) = self.position[vertex] {
            return self.report(start);
        }

        // Nothing on the path is reachable from a vertex outside every path
        // component, so its subtree reports the same cycles each time.
        let detached = self.on_path[self.component[vertex]] == 0;
        if detached && self.exhausted[vertex] {
            return Ok(());
        }

        self.position[vertex] = Some(self.path.len());
        self.path.push(vertex);
        self.on_path[self.component[vertex]] += 1;

        let successors: SmallVec<[usize; 16]> = self.graph.successors(vertex).collect();
        let mut outcome = Ok(());
        for next in successors {
            outcome = self.visit(next);
            if outcome.is_err() {
                break;
            }
        }

        self.on_path[self.component[vertex]] -= 1;
        self.path.pop();
        self.position[vertex] = None;
        if detached && outcome.is_ok() {
            self.exhausted[vertex] = true;
        }
        outcome
    }

    fn report(&mut self, start: usize) -> Result<()> {
        self.reports += 1;
        if self.reports > self.limit {
            return Err(OutrankError::TooManyCycles { limit: self.limit });
        }
        let cycle = Cycle::from_slice(&self.path[start..]);
        if self.seen.insert(cycle.member_key()) {
            self.found.push(cycle);
        }
        Ok(())
    }
}

/// Labels every vertex with its strongly connected component (Kosaraju).
fn strongly_connected_components(graph: &DominanceGraph) -> Vec<usize> {
    let n = graph.size();

    // finish order on the forward graph
    let mut order = Vec::with_capacity(n);
    let mut visited = vec![false; n];
    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        let mut stack = vec![(root, 0usize)];
        while let Some((vertex, cursor)) = stack.pop() {
            match (cursor..n).find(|&to| graph.has_edge(vertex, to)) {
                Some(to) => {
                    stack.push((vertex, to + 1));
                    if !visited[to] {
                        visited[to] = true;
                        stack.push((to, 0));
                    }
                }
                None => order.push(vertex),
            }
        }
    }

    // label on the reversed graph, latest finish first
    let mut component = vec![usize::MAX; n];
    let mut next = 0;
    for &root in order.iter().rev() {
        if component[root] != usize::MAX {
            continue;
        }
        component[root] = next;
        let mut stack = vec![root];
        while let Some(vertex) = stack.pop() {
            for from in 0..n {
                if graph.has_edge(from, vertex) && component[from] == usize::MAX {
                    component[from] = next;
                    stack.push(from);
                }
            }
        }
        next += 1;
    }
    component
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(rows: Vec<Vec<bool>>) -> DominanceGraph {
        DominanceGraph::from_matrix(PairMatrix::from_rows(rows).unwrap())
    }

    #[test]
    fn test_dominance_requires_threshold_and_no_veto() {
        let concordance =
            PairMatrix::from_rows(vec![vec![0.0, 0.6, 0.6], vec![0.4, 0.0, 0.8], vec![0.4, 0.2, 0.0]])
                .unwrap();
        let mut nd = PairMatrix::filled(3, true);
        for a in 0..3 {
            nd[(a, a)] = false;
        }
        nd[(1, 2)] = false;

        let d = compute_dominance(&concordance, &nd, 0.5);
        assert_eq!(d.matrix().true_pairs(), vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn test_acyclic_graph_has_no_cycles() {
        let g = graph(vec![
            vec![false, true, true],
            vec![false, false, true],
            vec![false, false, false],
        ]);
        assert!(g.detect_cycles(100).unwrap().is_empty());
    }

    #[test]
    fn test_three_cycle_reported_once() {
        let g = graph(vec![
            vec![false, true, false],
            vec![false, false, true],
            vec![true, false, false],
        ]);
        let cycles = g.detect_cycles(100).unwrap();
        assert_eq!(cycles, vec![Cycle::from_slice(&[0, 1, 2])]);
        assert_eq!(cycles[0].to_string(), "0 -> 1 -> 2 -> 0");
    }

    #[test]
    fn test_cycle_reached_through_prefix_is_sliced() {
        // 0 -> 1 -> 2 -> 1: the reported cycle excludes 0
        let g = graph(vec![
            vec![false, true, false],
            vec![false, false, true],
            vec![false, true, false],
        ]);
        assert_eq!(g.detect_cycles(100).unwrap(), vec![Cycle::from_slice(&[1, 2])]);
    }

    #[test]
    fn test_same_vertex_set_deduplicated() {
        // complete digraph on 3 vertices: 2-cycles plus both 3-cycle orientations
        let g = graph(vec![
            vec![false, true, true],
            vec![true, false, true],
            vec![true, true, false],
        ]);
        let cycles = g.detect_cycles(1000).unwrap();
        let mut keys: Vec<_> = cycles.iter().map(|c| c.member_key().to_vec()).collect();
        keys.sort();
        assert_eq!(keys, vec![vec![0, 1], vec![0, 1, 2], vec![0, 2], vec![1, 2]]);
        // the first orientation found wins
        assert!(cycles.contains(&Cycle::from_slice(&[0, 1, 2])));
    }

    #[test]
    fn test_cycle_cap_fails_search() {
        let g = graph(vec![
            vec![false, true, true],
            vec![true, false, true],
            vec![true, true, false],
        ]);
        let err = g.detect_cycles(2).unwrap_err();
        assert!(matches!(err, OutrankError::TooManyCycles { limit: 2 }));
    }

    #[test]
    fn test_break_keeps_strongest_edge() {
        let mut g = graph(vec![
            vec![false, true, false],
            vec![false, false, true],
            vec![true, false, false],
        ]);
        let concordance =
            PairMatrix::from_rows(vec![vec![0.0, 0.6, 0.0], vec![0.0, 0.0, 0.9], vec![0.7, 0.0, 0.0]])
                .unwrap();
        let cycles = g.detect_cycles(100).unwrap();
        let breaks = g.break_cycles(&cycles, &concordance);

        assert_eq!(breaks[0].kept, (1, 2));
        assert_eq!(breaks[0].removed, vec![(0, 1), (2, 0)]);
        assert_eq!(g.matrix().true_pairs(), vec![(1, 2)]);
    }

    #[test]
    fn test_break_tie_keeps_first_edge() {
        let mut g = graph(vec![vec![false, true], vec![true, false]]);
        let concordance = PairMatrix::from_rows(vec![vec![0.0, 0.5], vec![0.5, 0.0]]).unwrap();
        let cycles = g.detect_cycles(100).unwrap();
        g.break_cycles(&cycles, &concordance);

        assert!(g.has_edge(0, 1));
        assert!(!g.has_edge(1, 0));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_long_transitive_chain_is_fast() {
        let n = 40;
        let mut rows = vec![vec![false; n]; n];
        for (a, row) in rows.iter_mut().enumerate() {
            for cell in row.iter_mut().skip(a + 1) {
                *cell = true;
            }
        }
        let g = graph(rows);
        assert!(g.detect_cycles(10).unwrap().is_empty());
    }

    #[test]
    fn test_components() {
        let g = graph(vec![
            vec![false, true, false, false],
            vec![true, false, true, false],
            vec![false, false, false, true],
            vec![false, false, true, false],
        ]);
        let c = strongly_connected_components(&g);
        assert_eq!(c[0], c[1]);
        assert_eq!(c[2], c[3]);
        assert_ne!(c[0], c[2]);
    }
}
