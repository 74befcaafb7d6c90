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

//! Error types for clique searches.

use std::fmt;

use thiserror::Error;

/// Result type alias for clique operations.
pub type CliqueResult<T> = Result<T, CliqueError>;

/// The resource whose configured bound stopped a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Size of the clique under construction (search depth).
    Depth,
    /// Number of search branches expanded.
    Steps,
    /// Wall-clock time, in milliseconds.
    Time,
    /// Number of cliques reported.
    Results,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Depth => "depth",
            Resource::Steps => "step",
            Resource::Time => "time (ms)",
            Resource::Results => "result",
        };
        f.write_str(name)
    }
}

/// Errors reported by the clique engine.
///
/// A search never returns a partial answer: if it cannot finish within the
/// configured bounds it fails with [`CliqueError::ResourceExhausted`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliqueError {
    /// A directed graph was passed where an undirected one is required.
    #[error("clique search requires an undirected graph, got a directed one")]
    InvalidGraphKind,

    /// The graph model reported a neighbor that is not one of its vertices.
    #[error("graph model is inconsistent: {0}")]
    InconsistentGraph(String),

    /// A configured search bound was exceeded.
    #[error("clique search exhausted its {resource} budget (limit {limit})")]
    ResourceExhausted { resource: Resource, limit: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_exhausted_message_names_the_resource() {
        let err = CliqueError::ResourceExhausted {
            resource: Resource::Steps,
            limit: 10,
        };
        assert_eq!(
            err.to_string(),
            "clique search exhausted its step budget (limit 10)"
        );
    }
}
