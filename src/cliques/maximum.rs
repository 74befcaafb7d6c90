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

//! Maximum clique via branch-and-bound over the maximal-clique search.
//!
//! Among several maximum cliques the lexicographically smallest index set is
//! returned. Pruning only drops branches with `|R| + |P| < best`, so every
//! maximum clique stays reachable and the choice does not depend on how the
//! search was scheduled.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::trace;

use super::adjacency::Adjacency;
use super::config::Budget;
use super::maximal::{run, CliqueSink};
use crate::error::CliqueResult;

struct BestClique<'a> {
    /// Best size seen by any branch, shared across workers.
    bound: &'a AtomicUsize,
    best: Vec<usize>,
}

impl BestClique<'_> {
    fn offer(&mut self, candidate: Vec<usize>) {
        if is_better(&candidate, &self.best) {
            trace!(size = candidate.len(), "found a larger clique");
            self.bound.fetch_max(candidate.len(), Ordering::Relaxed);
            self.best = candidate;
        }
    }
}

impl CliqueSink for BestClique<'_> {
    fn report(&mut self, clique: &[usize]) -> CliqueResult<()> {
        if clique.len() < self.bound.load(Ordering::Relaxed) {
            return Ok(());
        }
        let mut clique = clique.to_vec();
        clique.sort_unstable();
        self.offer(clique);
        Ok(())
    }

    fn prune(&self, depth: usize, candidates: usize) -> bool {
        depth + candidates < self.bound.load(Ordering::Relaxed)
    }
}

/// Larger wins; equal sizes fall back to the smaller sorted index list.
fn is_better(candidate: &[usize], best: &[usize]) -> bool {
    candidate.len() > best.len() || (candidate.len() == best.len() && candidate < best)
}

/// One maximum clique as sorted compacted indices; empty for an empty graph.
pub(crate) fn maximum_clique(
    adj: &Adjacency,
    budget: &Budget,
    parallel: bool,
) -> CliqueResult<Vec<usize>> {
    let bound = AtomicUsize::new(0);
    let sinks = run(adj, budget, parallel, || BestClique {
        bound: &bound,
        best: Vec::new(),
    })?;

    let mut best: Vec<usize> = Vec::new();
    for sink in sinks {
        if is_better(&sink.best, &best) {
            best = sink.best;
        }
    }
    Ok(best)
}
