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

//! Clique enumeration on simple undirected graphs.
//!
//! Every entry point compacts the graph once into dense bitset rows, runs the
//! search over compacted indices and maps the answer back to the caller's
//! vertex ids. Cliques are returned with their ids sorted ascending.
//!
//! Self-loops and parallel edges are ignored. Directed graphs are rejected
//! with [`CliqueError::InvalidGraphKind`]; symmetrize them first if that is
//! what you mean (see [`SimpleGraph::to_undirected`]).
//!
//! [`SimpleGraph::to_undirected`]: crate::graph::SimpleGraph::to_undirected

mod adjacency;
mod config;
mod k_cliques;
mod maximal;
mod maximum;

use foldhash::{HashSet, HashSetExt};
use tracing::debug;

pub use config::SearchConfig;

use self::adjacency::AdjacencyView;
use self::config::Budget;
use crate::error::{CliqueError, CliqueResult};
use crate::graph::GraphModel;

/// Find one clique of maximum cardinality.
///
/// Returns an empty vector for a graph without vertices. When several
/// cliques share the maximum size, the one whose sorted id list is
/// lexicographically smallest is returned. The ids come back ascending.
///
/// # Errors
///
/// [`CliqueError::InvalidGraphKind`] for a directed graph and
/// [`CliqueError::InconsistentGraph`] when a neighbor is not a vertex.
pub fn max_clique<G: GraphModel>(graph: &G) -> CliqueResult<Vec<G::VertexId>> {
    max_clique_with(graph, &SearchConfig::default())
}

/// [`max_clique`] with explicit search limits.
///
/// `config.max_results` does not apply here. With `config.parallel` set, the
/// number of steps spent depends on scheduling, so a tight `max_steps` may
/// pass on one run and fail on the next.
///
/// # Errors
///
/// As [`max_clique`], plus [`CliqueError::ResourceExhausted`] when a bound in
/// `config` is hit.
pub fn max_clique_with<G: GraphModel>(
    graph: &G,
    config: &SearchConfig,
) -> CliqueResult<Vec<G::VertexId>> {
    let view = AdjacencyView::build(graph)?;
    let budget = Budget::new(config);
    debug!(
        vertices = view.len(),
        parallel = config.parallel,
        "searching for a maximum clique"
    );
    let best = maximum::maximum_clique(view.adjacency(), &budget, config.parallel)?;
    debug!(
        size = best.len(),
        steps = budget.steps(),
        elapsed_ms = budget.elapsed().as_millis() as u64,
        "maximum clique search finished"
    );
    Ok(view.to_ids(&best))
}

/// The size of the largest clique, 0 for a graph without vertices.
///
/// # Errors
///
/// As [`max_clique`].
pub fn clique_number<G: GraphModel>(graph: &G) -> CliqueResult<usize> {
    Ok(max_clique(graph)?.len())
}

/// Find all maximal cliques in a graph.
///
/// These are the complete subgraphs to which no other vertex can be added.
/// Isolated vertices come back as singleton cliques; a graph without vertices
/// has none at all.
///
/// This implementation uses the Bron-Kerbosch algorithm with greedy pivoting
/// over bitsets and an explicit work-stack. Each clique comes back as
/// ascending ids, and the list is sorted lexicographically.
///
/// # Errors
///
/// [`CliqueError::InvalidGraphKind`] for a directed graph and
/// [`CliqueError::InconsistentGraph`] when a neighbor is not a vertex.
pub fn all_maximal_cliques<G: GraphModel>(graph: &G) -> CliqueResult<Vec<Vec<G::VertexId>>> {
    all_maximal_cliques_with(graph, &SearchConfig::default())
}

/// [`all_maximal_cliques`] with explicit search limits.
///
/// # Errors
///
/// As [`all_maximal_cliques`], plus [`CliqueError::ResourceExhausted`] when a
/// bound in `config` is hit.
pub fn all_maximal_cliques_with<G: GraphModel>(
    graph: &G,
    config: &SearchConfig,
) -> CliqueResult<Vec<Vec<G::VertexId>>> {
    let view = AdjacencyView::build(graph)?;
    let budget = Budget::new(config);
    debug!(
        vertices = view.len(),
        parallel = config.parallel,
        "enumerating maximal cliques"
    );
    let cliques = maximal::maximal_cliques(view.adjacency(), &budget, config.parallel)?;
    debug!(
        cliques = cliques.len(),
        steps = budget.steps(),
        elapsed_ms = budget.elapsed().as_millis() as u64,
        "maximal clique enumeration finished"
    );
    Ok(cliques.iter().map(|clique| view.to_ids(clique)).collect())
}

/// Find every clique with exactly `k` vertices, maximal or not.
///
/// `k <= 0` is not an error: the result is simply empty, as it is when `k`
/// exceeds the clique number. `k == 1` yields one singleton per vertex.
/// Output order matches [`all_maximal_cliques`].
///
/// # Errors
///
/// [`CliqueError::InvalidGraphKind`] for a directed graph and
/// [`CliqueError::InconsistentGraph`] when a neighbor is not a vertex. Neither
/// is raised for `k <= 0`.
pub fn k_cliques<G: GraphModel>(graph: &G, k: i64) -> CliqueResult<Vec<Vec<G::VertexId>>> {
    k_cliques_with(graph, k, &SearchConfig::default())
}

/// [`k_cliques`] with explicit search limits.
///
/// # Errors
///
/// As [`k_cliques`], plus [`CliqueError::ResourceExhausted`] when a bound in
/// `config` is hit.
pub fn k_cliques_with<G: GraphModel>(
    graph: &G,
    k: i64,
    config: &SearchConfig,
) -> CliqueResult<Vec<Vec<G::VertexId>>> {
    if k <= 0 {
        return Ok(Vec::new());
    }
    let k = usize::try_from(k).unwrap_or(usize::MAX);
    let view = AdjacencyView::build(graph)?;
    let budget = Budget::new(config);
    debug!(
        vertices = view.len(),
        k,
        parallel = config.parallel,
        "enumerating k-cliques"
    );
    let cliques = k_cliques::cliques_of_size(view.adjacency(), &budget, k, config.parallel)?;
    debug!(
        cliques = cliques.len(),
        steps = budget.steps(),
        elapsed_ms = budget.elapsed().as_millis() as u64,
        "k-clique enumeration finished"
    );
    Ok(cliques.iter().map(|clique| view.to_ids(clique)).collect())
}

/// Whether `vertices` is a non-empty set of distinct, pairwise adjacent
/// vertices of `graph`. Unknown ids make the answer `false`.
///
/// # Errors
///
/// As [`max_clique`].
pub fn is_clique<G: GraphModel>(graph: &G, vertices: &[G::VertexId]) -> CliqueResult<bool> {
    let view = AdjacencyView::build(graph)?;
    if vertices.is_empty() {
        return Ok(false);
    }
    let mut indices = Vec::with_capacity(vertices.len());
    let mut seen = HashSet::with_capacity(vertices.len());
    for id in vertices {
        match view.index_of(id) {
            Some(i) if seen.insert(i) => indices.push(i),
            _ => return Ok(false),
        }
    }
    let adj = view.adjacency();
    Ok(indices
        .iter()
        .enumerate()
        .all(|(pos, &u)| indices[pos + 1..].iter().all(|&v| adj.is_adjacent(u, v))))
}
