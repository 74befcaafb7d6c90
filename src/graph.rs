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

//! The graph model consumed by the clique engine.
//!
//! The engine only needs three things from a graph: its vertex ids, the
//! neighbors of a vertex, and whether it is directed. [`GraphModel`] captures
//! exactly that, and is implemented for petgraph's [`Graph`] and [`GraphMap`]
//! as well as for the owned multigraph [`SimpleGraph`].

use std::hash::{BuildHasher, Hash};

use foldhash::fast::RandomState;
use indexmap::IndexMap;
use petgraph::graph::{Graph, IndexType, NodeIndex};
use petgraph::graphmap::{GraphMap, NodeTrait};
use petgraph::EdgeType;

/// Read-only access to a graph snapshot.
///
/// Implementations may contain self-loops and parallel edges; the clique
/// engine normalizes them away. The snapshot must not change while a search
/// is running.
pub trait GraphModel {
    /// Opaque vertex identifier.
    type VertexId: Clone + Ord + Hash;

    /// Every vertex of the graph.
    fn vertex_ids(&self) -> impl Iterator<Item = Self::VertexId> + '_;

    /// Vertices adjacent to `v`. For directed graphs, the successors of `v`.
    fn neighbors<'a>(
        &'a self,
        v: &'a Self::VertexId,
    ) -> impl Iterator<Item = Self::VertexId> + 'a;

    /// Whether edges are directed.
    fn is_directed(&self) -> bool;
}

impl<N, E, Ty, Ix> GraphModel for Graph<N, E, Ty, Ix>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    type VertexId = NodeIndex<Ix>;

    fn vertex_ids(&self) -> impl Iterator<Item = NodeIndex<Ix>> + '_ {
        self.node_indices()
    }

    fn neighbors<'a>(
        &'a self,
        v: &'a NodeIndex<Ix>,
    ) -> impl Iterator<Item = NodeIndex<Ix>> + 'a {
        if Ty::is_directed() {
            Graph::neighbors_directed(self, *v, petgraph::Direction::Outgoing)
        } else {
            Graph::neighbors_undirected(self, *v)
        }
    }

    fn is_directed(&self) -> bool {
        Ty::is_directed()
    }
}

impl<N, E, Ty, S> GraphModel for GraphMap<N, E, Ty, S>
where
    N: NodeTrait,
    Ty: EdgeType,
    S: BuildHasher,
{
    type VertexId = N;

    fn vertex_ids(&self) -> impl Iterator<Item = N> + '_ {
        self.nodes()
    }

    fn neighbors<'a>(&'a self, v: &'a N) -> impl Iterator<Item = N> + 'a {
        GraphMap::neighbors(self, *v)
    }

    fn is_directed(&self) -> bool {
        Ty::is_directed()
    }
}

/// An owned multigraph over arbitrary identifiers.
///
/// Parallel edges and self-loops are stored as given. Vertex order is
/// insertion order.
#[derive(Debug, Clone)]
pub struct SimpleGraph<N> {
    directed: bool,
    adjacency: IndexMap<N, Vec<N>, RandomState>,
    edge_count: usize,
}

impl<N> SimpleGraph<N>
where
    N: Clone + Ord + Hash,
{
    /// Creates an empty undirected graph.
    pub fn new_undirected() -> Self {
        Self::with_kind(false)
    }

    /// Creates an empty directed graph.
    pub fn new_directed() -> Self {
        Self::with_kind(true)
    }

    fn with_kind(directed: bool) -> Self {
        Self {
            directed,
            adjacency: IndexMap::default(),
            edge_count: 0,
        }
    }

    /// Builds an undirected graph from an edge list.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut graph = Self::new_undirected();
        for (a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    /// Adds `v` if it is not already present.
    pub fn add_vertex(&mut self, v: N) {
        self.adjacency.entry(v).or_default();
    }

    /// Adds an edge `a -> b` (or `a - b` when undirected), adding missing
    /// endpoints.
    pub fn add_edge(&mut self, a: N, b: N) {
        self.add_vertex(a.clone());
        self.add_vertex(b.clone());
        if !self.directed && a != b {
            if let Some(back) = self.adjacency.get_mut(&b) {
                back.push(a.clone());
            }
        }
        if let Some(forward) = self.adjacency.get_mut(&a) {
            forward.push(b);
        }
        self.edge_count += 1;
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges added, counting parallel edges and self-loops.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns an undirected copy in which every edge `a -> b` becomes
    /// `a - b`. Opposite directed edges become parallel undirected edges.
    pub fn to_undirected(&self) -> Self {
        if !self.directed {
            return self.clone();
        }
        let mut graph = Self::new_undirected();
        for v in self.adjacency.keys() {
            graph.add_vertex(v.clone());
        }
        for (a, targets) in &self.adjacency {
            for b in targets {
                graph.add_edge(a.clone(), b.clone());
            }
        }
        graph
    }
}

impl<N> GraphModel for SimpleGraph<N>
where
    N: Clone + Ord + Hash,
{
    type VertexId = N;

    fn vertex_ids(&self) -> impl Iterator<Item = N> + '_ {
        self.adjacency.keys().cloned()
    }

    fn neighbors<'a>(&'a self, v: &'a N) -> impl Iterator<Item = N> + 'a {
        self.adjacency.get(v).into_iter().flatten().cloned()
    }

    fn is_directed(&self) -> bool {
        self.directed
    }
}
