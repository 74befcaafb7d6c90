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

//! Dense, bitset-backed adjacency built once per search.
//!
//! External ids are sorted ascending and compacted to `0..n`; compacted index
//! order therefore equals id order, which is what makes pivot choice and tie
//! breaking reproducible.

use std::hash::Hash;

use fixedbitset::FixedBitSet;
use foldhash::fast::RandomState;
use indexmap::IndexSet;

use crate::error::{CliqueError, CliqueResult};
use crate::graph::GraphModel;

/// Symmetric neighbor rows over compacted indices.
pub(crate) struct Adjacency {
    rows: Vec<FixedBitSet>,
}

impl Adjacency {
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub(crate) fn neighbors(&self, v: usize) -> &FixedBitSet {
        &self.rows[v]
    }

    #[inline]
    pub(crate) fn is_adjacent(&self, u: usize, v: usize) -> bool {
        self.rows[u].contains(v)
    }

    /// A set holding every compacted index.
    pub(crate) fn all_vertices(&self) -> FixedBitSet {
        let mut all = FixedBitSet::with_capacity(self.len());
        all.insert_range(..);
        all
    }

    /// An empty set sized for this graph.
    pub(crate) fn empty_set(&self) -> FixedBitSet {
        FixedBitSet::with_capacity(self.len())
    }
}

/// Compaction of external ids plus the adjacency built over them.
pub(crate) struct AdjacencyView<N> {
    ids: IndexSet<N, RandomState>,
    adjacency: Adjacency,
}

impl<N> AdjacencyView<N>
where
    N: Clone + Ord + Hash,
{
    /// Compacts `graph` and builds symmetric neighbor rows, dropping
    /// self-loops and collapsing parallel edges.
    pub(crate) fn build<G>(graph: &G) -> CliqueResult<Self>
    where
        G: GraphModel<VertexId = N>,
    {
        if graph.is_directed() {
            return Err(CliqueError::InvalidGraphKind);
        }

        let mut sorted: Vec<N> = graph.vertex_ids().collect();
        sorted.sort_unstable();
        sorted.dedup();
        let node_count = sorted.len();
        let ids: IndexSet<N, RandomState> = sorted.into_iter().collect();

        let mut rows = vec![FixedBitSet::with_capacity(node_count); node_count];
        for (i, v) in ids.iter().enumerate() {
            for w in graph.neighbors(v) {
                let Some(j) = ids.get_index_of(&w) else {
                    return Err(CliqueError::InconsistentGraph(format!(
                        "a neighbor of vertex #{i} is not a vertex of the graph"
                    )));
                };
                if i == j {
                    continue;
                }
                rows[i].insert(j);
                rows[j].insert(i);
            }
        }

        Ok(Self {
            ids,
            adjacency: Adjacency { rows },
        })
    }

    #[inline]
    pub(crate) fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub(crate) fn index_of(&self, id: &N) -> Option<usize> {
        self.ids.get_index_of(id)
    }

    /// Maps compacted indices back to ids, ascending.
    pub(crate) fn to_ids(&self, indices: &[usize]) -> Vec<N> {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted
            .into_iter()
            .filter_map(|i| self.ids.get_index(i).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SimpleGraph;

    #[test]
    fn compaction_follows_id_order() {
        let g = SimpleGraph::from_edges([(30, 10), (20, 30)]);
        let view = AdjacencyView::build(&g).unwrap();
        assert_eq!(view.len(), 3);
        assert_eq!(view.index_of(&10), Some(0));
        assert_eq!(view.index_of(&20), Some(1));
        assert_eq!(view.index_of(&30), Some(2));
        assert_eq!(view.to_ids(&[2, 0]), vec![10, 30]);
    }

    #[test]
    fn self_loops_and_parallel_edges_are_normalized() {
        let g = SimpleGraph::from_edges([(1, 1), (1, 2), (2, 1), (1, 2)]);
        let view = AdjacencyView::build(&g).unwrap();
        assert_eq!(view.adjacency().neighbors(0).ones().collect::<Vec<_>>(), vec![1]);
        assert_eq!(view.adjacency().neighbors(1).ones().collect::<Vec<_>>(), vec![0]);
        assert!(!view.adjacency().is_adjacent(0, 0));
    }

    #[test]
    fn isolated_vertices_have_empty_rows() {
        let mut g = SimpleGraph::new_undirected();
        g.add_vertex("solo");
        let view = AdjacencyView::build(&g).unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view.adjacency().neighbors(0).count_ones(..), 0);
    }

    #[test]
    fn directed_graphs_are_rejected() {
        let mut g = SimpleGraph::new_directed();
        g.add_edge(1, 2);
        assert_eq!(
            AdjacencyView::build(&g).err(),
            Some(CliqueError::InvalidGraphKind)
        );
    }

    struct Dangling;

    impl GraphModel for Dangling {
        type VertexId = u8;

        fn vertex_ids(&self) -> impl Iterator<Item = u8> + '_ {
            [0u8].into_iter()
        }

        fn neighbors<'a>(&'a self, _v: &'a u8) -> impl Iterator<Item = u8> + 'a {
            [5u8].into_iter()
        }

        fn is_directed(&self) -> bool {
            false
        }
    }

    #[test]
    fn unknown_neighbors_are_reported() {
        assert!(matches!(
            AdjacencyView::build(&Dangling),
            Err(CliqueError::InconsistentGraph(_))
        ));
    }
}
