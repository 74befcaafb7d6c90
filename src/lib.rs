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

//! # cliquework
//!
//! Exact clique enumeration for simple undirected graphs:
//!
//! - [`max_clique`]: one clique of maximum size,
//! - [`all_maximal_cliques`]: every inclusion-maximal clique, once,
//! - [`k_cliques`]: every clique with exactly `k` vertices.
//!
//! Any type implementing [`GraphModel`] can be searched; petgraph's `Graph`
//! and `GraphMap` work out of the box, and [`SimpleGraph`] covers arbitrary
//! identifiers such as strings.
//!
//! ```
//! use cliquework::{all_maximal_cliques, k_cliques, max_clique, SimpleGraph};
//!
//! let g = SimpleGraph::from_edges([(1, 2), (2, 3), (1, 3), (3, 4)]);
//! assert_eq!(max_clique(&g).unwrap(), vec![1, 2, 3]);
//! assert_eq!(
//!     all_maximal_cliques(&g).unwrap(),
//!     vec![vec![1, 2, 3], vec![3, 4]]
//! );
//! assert_eq!(k_cliques(&g, 2).unwrap().len(), 4);
//! ```
//!
//! Searches are exponential in the worst case. [`SearchConfig`] bounds depth,
//! steps, time and result count, and can spread the top-level branches over
//! rayon's thread pool:
//!
//! ```
//! use std::time::Duration;
//!
//! use cliquework::{all_maximal_cliques_with, SearchConfig, SimpleGraph};
//!
//! let g = SimpleGraph::from_edges([("a", "b"), ("b", "c")]);
//! let config = SearchConfig::default()
//!     .with_time_limit(Duration::from_secs(5))
//!     .with_parallel(true);
//! assert_eq!(all_maximal_cliques_with(&g, &config).unwrap().len(), 2);
//! ```

pub mod cliques;
pub mod error;
pub mod graph;

pub use cliques::{
    all_maximal_cliques, all_maximal_cliques_with, clique_number, is_clique, k_cliques,
    k_cliques_with, max_clique, max_clique_with, SearchConfig,
};
pub use error::{CliqueError, CliqueResult, Resource};
pub use graph::{GraphModel, SimpleGraph};
