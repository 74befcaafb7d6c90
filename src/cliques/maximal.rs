// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
// Bron, C.; Kerbosch, J. (1973). "Algorithm 457: finding all cliques of an undirected graph". Communications of the ACM. 16 (9): 575–577. doi:10.1145/362342.362367.
// Tomita, E.; Tanaka, A.; Takahashi, H. (2006). "The worst-case time complexity for generating all maximal cliques and computational experiments". Theoretical Computer Science. 363 (1): 28–42.

//! Bron-Kerbosch with pivoting, driven by an explicit work-stack.
//!
//! Every frame owns its own candidate set `P` and exclusion set `X`. After a
//! branch on `v` is spawned, `v` moves from `P` to `X` in the parent frame
//! only, so siblings never share mutable state and each maximal clique is
//! reported exactly once.
//!
//! Worst case is exponential: a graph can have up to `3^(n/3)` maximal
//! cliques. Pivoting bounds the practical branching factor only.

use fixedbitset::FixedBitSet;
use rayon::prelude::*;

use super::adjacency::Adjacency;
use super::config::Budget;
use crate::error::CliqueResult;

/// Receives the leaves of the search.
pub(crate) trait CliqueSink {
    /// Called once per maximal clique, as compacted indices in insertion order.
    fn report(&mut self, clique: &[usize]) -> CliqueResult<()>;

    /// Whether a branch whose clique has `depth` members and `candidates`
    /// remaining candidates can be abandoned.
    fn prune(&self, _depth: usize, _candidates: usize) -> bool {
        false
    }
}

/// A search state `(R, P, X)` that has not been expanded yet.
struct Seed {
    clique: Vec<usize>,
    candidates: FixedBitSet,
    excluded: FixedBitSet,
}

impl Seed {
    fn root(adj: &Adjacency) -> Self {
        Seed {
            clique: Vec::new(),
            candidates: adj.all_vertices(),
            excluded: adj.empty_set(),
        }
    }

    fn is_leaf(&self) -> bool {
        self.candidates.is_clear() && self.excluded.is_clear()
    }
}

struct Frame {
    state: Seed,
    /// `P \ N(pivot)`, the vertices still to branch on.
    pending: FixedBitSet,
}

impl Frame {
    fn new(adj: &Adjacency, state: Seed) -> Self {
        let pending = match choose_pivot(adj, &state.candidates, &state.excluded) {
            Some(pivot) => {
                let mut pending = state.candidates.clone();
                pending.difference_with(adj.neighbors(pivot));
                pending
            }
            None => adj.empty_set(),
        };
        Frame { state, pending }
    }

    /// Spawns the child for `v` and moves `v` from `P` to `X`.
    fn branch(&mut self, adj: &Adjacency, v: usize) -> Seed {
        self.pending.set(v, false);
        let neighbors = adj.neighbors(v);

        let mut candidates = self.state.candidates.clone();
        candidates.intersect_with(neighbors);
        let mut excluded = self.state.excluded.clone();
        excluded.intersect_with(neighbors);
        let mut clique = Vec::with_capacity(self.state.clique.len() + 1);
        clique.extend_from_slice(&self.state.clique);
        clique.push(v);

        self.state.candidates.set(v, false);
        self.state.excluded.insert(v);
        Seed {
            clique,
            candidates,
            excluded,
        }
    }

    fn next_pending(&self) -> Option<usize> {
        self.pending.ones().next()
    }
}

/// Picks `u ∈ P ∪ X` maximizing `|N(u) ∩ P|`, smallest index on ties.
fn choose_pivot(
    adj: &Adjacency,
    candidates: &FixedBitSet,
    excluded: &FixedBitSet,
) -> Option<usize> {
    let candidate_count = candidates.count_ones(..);
    let mut pool = candidates.clone();
    pool.union_with(excluded);

    let mut best: Option<(usize, usize)> = None;
    for u in pool.ones() {
        let score = adj.neighbors(u).intersection(candidates).count();
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((u, score));
            if score == candidate_count {
                break;
            }
        }
    }
    best.map(|(u, _)| u)
}

fn push_or_report<S: CliqueSink>(
    adj: &Adjacency,
    budget: &Budget,
    seed: Seed,
    stack: &mut Vec<Frame>,
    sink: &mut S,
) -> CliqueResult<()> {
    budget.charge(seed.clique.len())?;
    if seed.is_leaf() {
        return sink.report(&seed.clique);
    }
    if sink.prune(seed.clique.len(), seed.candidates.count_ones(..)) {
        return Ok(());
    }
    stack.push(Frame::new(adj, seed));
    Ok(())
}

/// Runs the search below `seed` to completion.
fn search_from<S: CliqueSink>(
    adj: &Adjacency,
    budget: &Budget,
    seed: Seed,
    sink: &mut S,
) -> CliqueResult<()> {
    let mut stack = Vec::new();
    push_or_report(adj, budget, seed, &mut stack, sink)?;

    while let Some(frame) = stack.last_mut() {
        if sink.prune(
            frame.state.clique.len(),
            frame.state.candidates.count_ones(..),
        ) {
            stack.pop();
            continue;
        }
        let Some(v) = frame.next_pending() else {
            stack.pop();
            continue;
        };
        let child = frame.branch(adj, v);
        push_or_report(adj, budget, child, &mut stack, sink)?;
    }
    Ok(())
}

/// The children of the root frame, in the order and with the `P`/`X` state
/// the sequential loop would give them.
fn root_seeds(adj: &Adjacency) -> Vec<Seed> {
    let mut root = Frame::new(adj, Seed::root(adj));
    let mut seeds = Vec::new();
    while let Some(v) = root.next_pending() {
        seeds.push(root.branch(adj, v));
    }
    seeds
}

/// Runs the whole search, returning one sink per explored subtree.
///
/// Sequential runs use a single sink. Parallel runs hand each root branch its
/// own sink; the caller merges them.
pub(crate) fn run<S, F>(
    adj: &Adjacency,
    budget: &Budget,
    parallel: bool,
    make_sink: F,
) -> CliqueResult<Vec<S>>
where
    S: CliqueSink + Send,
    F: Fn() -> S + Sync,
{
    if adj.is_empty() {
        return Ok(Vec::new());
    }
    if !parallel {
        let mut sink = make_sink();
        search_from(adj, budget, Seed::root(adj), &mut sink)?;
        return Ok(vec![sink]);
    }
    // The root frame costs one step, as it does in the sequential loop.
    budget.charge(0)?;
    root_seeds(adj)
        .into_par_iter()
        .map(|seed| {
            let mut sink = make_sink();
            search_from(adj, budget, seed, &mut sink)?;
            Ok(sink)
        })
        .collect()
}

/// Collects every maximal clique, each sorted ascending.
struct CollectCliques<'a> {
    budget: &'a Budget<'a>,
    cliques: Vec<Vec<usize>>,
}

impl CliqueSink for CollectCliques<'_> {
    fn report(&mut self, clique: &[usize]) -> CliqueResult<()> {
        self.budget.admit_result()?;
        let mut clique = clique.to_vec();
        clique.sort_unstable();
        self.cliques.push(clique);
        Ok(())
    }
}

/// All maximal cliques, sorted lexicographically.
pub(crate) fn maximal_cliques(
    adj: &Adjacency,
    budget: &Budget,
    parallel: bool,
) -> CliqueResult<Vec<Vec<usize>>> {
    let sinks = run(adj, budget, parallel, || CollectCliques {
        budget,
        cliques: Vec::new(),
    })?;
    let mut cliques: Vec<Vec<usize>> = sinks.into_iter().flat_map(|s| s.cliques).collect();
    cliques.sort_unstable();
    Ok(cliques)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cliques::adjacency::AdjacencyView;
    use crate::cliques::config::SearchConfig;
    use crate::graph::SimpleGraph;

    fn view(edges: &[(u32, u32)], isolated: &[u32]) -> AdjacencyView<u32> {
        let mut g = SimpleGraph::from_edges(edges.iter().copied());
        for &v in isolated {
            g.add_vertex(v);
        }
        AdjacencyView::build(&g).unwrap()
    }

    fn cliques(adj: &Adjacency, parallel: bool) -> Vec<Vec<usize>> {
        let config = SearchConfig::default();
        let budget = Budget::new(&config);
        maximal_cliques(adj, &budget, parallel).unwrap()
    }

    #[test]
    fn pivot_prefers_most_connected_then_smallest_index() {
        // Star centered on 2: vertex 2 sees every other candidate.
        let v = view(&[(0, 2), (1, 2), (2, 3)], &[]);
        let adj = v.adjacency();
        let all = adj.all_vertices();
        assert_eq!(choose_pivot(adj, &all, &adj.empty_set()), Some(2));

        // Two disjoint edges: 0 and 1 tie with one neighbor in P, 0 wins.
        let v = view(&[(0, 1), (2, 3)], &[]);
        let adj = v.adjacency();
        let all = adj.all_vertices();
        assert_eq!(choose_pivot(adj, &all, &adj.empty_set()), Some(0));
    }

    #[test]
    fn pivot_may_come_from_excluded() {
        let v = view(&[(0, 1), (0, 2), (1, 2)], &[]);
        let adj = v.adjacency();
        let mut candidates = adj.empty_set();
        candidates.insert(1);
        candidates.insert(2);
        let mut excluded = adj.empty_set();
        excluded.insert(0);
        assert_eq!(choose_pivot(adj, &candidates, &excluded), Some(0));
        assert_eq!(choose_pivot(adj, &adj.empty_set(), &adj.empty_set()), None);
    }

    #[test]
    fn finds_overlapping_triangles_once_each() {
        // Two triangles sharing edge 1-2, plus a pendant 3-4.
        let v = view(&[(0, 1), (0, 2), (1, 2), (1, 3), (2, 3), (3, 4)], &[]);
        let adj = v.adjacency();
        assert_eq!(
            cliques(adj, false),
            vec![vec![0, 1, 2], vec![1, 2, 3], vec![3, 4]]
        );
    }

    #[test]
    fn isolated_vertices_are_singletons() {
        let v = view(&[(0, 1)], &[2, 3]);
        let adj = v.adjacency();
        assert_eq!(cliques(adj, false), vec![vec![0, 1], vec![2], vec![3]]);
    }

    #[test]
    fn parallel_matches_sequential() {
        let edges = [
            (0, 1),
            (0, 2),
            (0, 3),
            (1, 2),
            (1, 3),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 6),
            (4, 6),
            (6, 7),
        ];
        let v = view(&edges, &[8]);
        let adj = v.adjacency();
        assert_eq!(cliques(adj, true), cliques(adj, false));
    }

    #[test]
    fn complete_graph_is_a_single_clique() {
        let n = 200u32;
        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                edges.push((i, j));
            }
        }
        let v = view(&edges, &[]);
        let adj = v.adjacency();
        let found = cliques(adj, false);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].len(), n as usize);
    }
}
