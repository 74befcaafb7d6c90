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

//! Enumeration of every clique with exactly `k` vertices.
//!
//! Members are appended in strictly increasing index order, so each k-subset
//! is produced once and results come out in lexicographic order.

use fixedbitset::FixedBitSet;
use rayon::prelude::*;

use super::adjacency::Adjacency;
use super::config::Budget;
use crate::error::CliqueResult;

struct Frame {
    clique: Vec<usize>,
    /// Common neighbors of `clique` with an index above its last member.
    candidates: FixedBitSet,
}

impl Frame {
    #[inline]
    fn can_reach(&self, k: usize) -> bool {
        self.clique.len() + self.candidates.count_ones(..) >= k
    }
}

fn extend(
    adj: &Adjacency,
    budget: &Budget,
    k: usize,
    start: Frame,
) -> CliqueResult<Vec<Vec<usize>>> {
    let mut found = Vec::new();
    budget.charge(start.clique.len())?;
    if start.clique.len() == k {
        budget.admit_result()?;
        found.push(start.clique);
        return Ok(found);
    }
    if !start.can_reach(k) {
        return Ok(found);
    }

    let mut stack = vec![start];
    while let Some(frame) = stack.last_mut() {
        if !frame.can_reach(k) {
            stack.pop();
            continue;
        }
        let Some(v) = frame.candidates.ones().next() else {
            stack.pop();
            continue;
        };
        frame.candidates.set(v, false);

        // Everything left in `frame.candidates` is above `v`.
        let mut candidates = frame.candidates.clone();
        candidates.intersect_with(adj.neighbors(v));
        let mut clique = Vec::with_capacity(frame.clique.len() + 1);
        clique.extend_from_slice(&frame.clique);
        clique.push(v);

        budget.charge(clique.len())?;
        let child = Frame { clique, candidates };
        if child.clique.len() == k {
            budget.admit_result()?;
            found.push(child.clique);
        } else if child.can_reach(k) {
            stack.push(child);
        }
    }
    Ok(found)
}

/// All cliques of exactly `k` vertices, each sorted ascending, in
/// lexicographic order.
pub(crate) fn cliques_of_size(
    adj: &Adjacency,
    budget: &Budget,
    k: usize,
    parallel: bool,
) -> CliqueResult<Vec<Vec<usize>>> {
    if k == 0 || k > adj.len() {
        return Ok(Vec::new());
    }
    if !parallel {
        let root = Frame {
            clique: Vec::new(),
            candidates: adj.all_vertices(),
        };
        return extend(adj, budget, k, root);
    }

    // One subtree per smallest member; rayon keeps the indexed order. The
    // root is charged once and stops where the sequential root loop stops,
    // so both modes spend the same number of steps.
    budget.charge(0)?;
    let chunks: Vec<Vec<Vec<usize>>> = (0..=adj.len() - k)
        .into_par_iter()
        .map(|v| {
            let mut candidates = adj.neighbors(v).clone();
            candidates.set_range(..v + 1, false);
            extend(
                adj,
                budget,
                k,
                Frame {
                    clique: vec![v],
                    candidates,
                },
            )
        })
        .collect::<CliqueResult<_>>()?;
    Ok(chunks.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cliques::adjacency::AdjacencyView;
    use crate::cliques::config::SearchConfig;
    use crate::graph::SimpleGraph;

    fn k_cliques(
        edges: &[(u32, u32)],
        isolated: &[u32],
        k: usize,
        parallel: bool,
    ) -> Vec<Vec<usize>> {
        let mut g = SimpleGraph::from_edges(edges.iter().copied());
        for &v in isolated {
            g.add_vertex(v);
        }
        let view = AdjacencyView::build(&g).unwrap();
        let config = SearchConfig::default();
        let budget = Budget::new(&config);
        cliques_of_size(view.adjacency(), &budget, k, parallel).unwrap()
    }

    const DIAMOND: [(u32, u32); 5] = [(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)];

    #[test]
    fn finds_non_maximal_cliques() {
        assert_eq!(
            k_cliques(&DIAMOND, &[], 2, false),
            vec![vec![0, 1], vec![0, 2], vec![1, 2], vec![1, 3], vec![2, 3]]
        );
        assert_eq!(
            k_cliques(&DIAMOND, &[], 3, false),
            vec![vec![0, 1, 2], vec![1, 2, 3]]
        );
        assert!(k_cliques(&DIAMOND, &[], 4, false).is_empty());
    }

    #[test]
    fn singletons_include_isolated_vertices() {
        assert_eq!(
            k_cliques(&[(0, 1)], &[2], 1, false),
            vec![vec![0], vec![1], vec![2]]
        );
        assert_eq!(
            k_cliques(&[(0, 1)], &[2], 1, true),
            vec![vec![0], vec![1], vec![2]]
        );
    }

    #[test]
    fn zero_and_oversized_k_are_empty() {
        assert!(k_cliques(&DIAMOND, &[], 0, false).is_empty());
        assert!(k_cliques(&DIAMOND, &[], 5, false).is_empty());
    }

    #[test]
    fn parallel_preserves_order() {
        for k in 1..=4 {
            assert_eq!(
                k_cliques(&DIAMOND, &[4], k, true),
                k_cliques(&DIAMOND, &[4], k, false)
            );
        }
    }
}
