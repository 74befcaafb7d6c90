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

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use tracing::warn;

use crate::error::{CliqueError, CliqueResult, Resource};

// Reading the clock on every step is measurable in tight searches.
const TIME_CHECK_INTERVAL: u64 = 1024;

/// Options shared by every clique search.
///
/// The default is an unbounded, sequential search. Any bound that is hit makes
/// the search fail with [`CliqueError::ResourceExhausted`] instead of
/// returning a partial answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Largest clique size the search may build.
    pub max_depth: Option<usize>,
    /// Largest number of search branches to expand.
    ///
    /// Enumerations spend the same number of steps with or without
    /// `parallel`. The maximum-clique search prunes against a bound shared
    /// between threads, so its parallel step count depends on scheduling.
    pub max_steps: Option<u64>,
    /// Wall-clock budget for one call.
    pub time_limit: Option<Duration>,
    /// Largest number of cliques an enumeration may report.
    ///
    /// Only the enumerations honor it. The maximum-clique search returns a
    /// single clique and ignores this bound.
    pub max_results: Option<usize>,
    /// Explore the top-level branches on the rayon thread pool.
    pub parallel: bool,
}

impl SearchConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Tracks resource use for one top-level call. Shared by reference across
/// parallel branches.
pub(crate) struct Budget<'a> {
    config: &'a SearchConfig,
    started: Instant,
    steps: AtomicU64,
    results: AtomicUsize,
}

impl<'a> Budget<'a> {
    pub(crate) fn new(config: &'a SearchConfig) -> Self {
        Self {
            config,
            started: Instant::now(),
            steps: AtomicU64::new(0),
            results: AtomicUsize::new(0),
        }
    }

    /// Accounts for one expanded branch whose clique has `depth` members.
    pub(crate) fn charge(&self, depth: usize) -> CliqueResult<()> {
        if let Some(max_depth) = self.config.max_depth {
            if depth > max_depth {
                return Err(exhausted(Resource::Depth, max_depth as u64));
            }
        }
        let steps = self.steps.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(max_steps) = self.config.max_steps {
            if steps > max_steps {
                return Err(exhausted(Resource::Steps, max_steps));
            }
        }
        if let Some(limit) = self.config.time_limit {
            if (steps == 1 || steps % TIME_CHECK_INTERVAL == 0) && self.started.elapsed() >= limit
            {
                let millis = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
                return Err(exhausted(Resource::Time, millis));
            }
        }
        Ok(())
    }

    /// Accounts for one reported clique.
    pub(crate) fn admit_result(&self) -> CliqueResult<()> {
        let results = self.results.fetch_add(1, Ordering::Relaxed) + 1;
        match self.config.max_results {
            Some(max_results) if results > max_results => {
                Err(exhausted(Resource::Results, max_results as u64))
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn steps(&self) -> u64 {
        self.steps.load(Ordering::Relaxed)
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

fn exhausted(resource: Resource, limit: u64) -> CliqueError {
    warn!(%resource, limit, "clique search stopped at its resource limit");
    CliqueError::ResourceExhausted { resource, limit }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_unbounded() {
        let config = SearchConfig::default();
        let budget = Budget::new(&config);
        for depth in 0..10_000 {
            budget.charge(depth).unwrap();
            budget.admit_result().unwrap();
        }
        assert_eq!(budget.steps(), 10_000);
    }

    #[test]
    fn step_limit_is_exclusive_of_the_next_step() {
        let config = SearchConfig::default().with_max_steps(2);
        let budget = Budget::new(&config);
        assert!(budget.charge(0).is_ok());
        assert!(budget.charge(1).is_ok());
        assert_eq!(
            budget.charge(1),
            Err(CliqueError::ResourceExhausted {
                resource: Resource::Steps,
                limit: 2,
            })
        );
    }

    #[test]
    fn depth_and_result_limits() {
        let config = SearchConfig::default()
            .with_max_depth(3)
            .with_max_results(1);
        let budget = Budget::new(&config);
        assert!(budget.charge(3).is_ok());
        assert!(matches!(
            budget.charge(4),
            Err(CliqueError::ResourceExhausted {
                resource: Resource::Depth,
                ..
            })
        ));
        assert!(budget.admit_result().is_ok());
        assert!(budget.admit_result().is_err());
    }

    #[test]
    fn zero_time_limit_trips_on_first_step() {
        let config = SearchConfig::default().with_time_limit(Duration::ZERO);
        let budget = Budget::new(&config);
        assert!(matches!(
            budget.charge(0),
            Err(CliqueError::ResourceExhausted {
                resource: Resource::Time,
                limit: 0,
            })
        ));
    }
}
