//! Routing order: the total order used to break score ties.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::job::TaskGraph;
use crate::names::JobName;

/// A total order over every job in a graph.
///
/// Listed jobs come first, in the listed order; jobs the list leaves out
/// follow in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteOrder {
    order: Vec<usize>,
}

impl RouteOrder {
    /// Declaration order.
    pub fn declared(graph: &TaskGraph) -> Self {
        Self {
            order: (0..graph.len()).collect(),
        }
    }

    /// Builds the order from an externally supplied routing list.
    ///
    /// # Errors
    ///
    /// Unknown or repeated names in the list are configuration errors.
    pub fn new(graph: &TaskGraph, listed: &[JobName]) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(listed.len());
        let mut order = Vec::with_capacity(graph.len());

        for name in listed {
            let index = graph
                .index_of(name.as_str())
                .ok_or_else(|| ConfigError::UnknownRouteEntry(name.clone()))?;
            if !seen.insert(index) {
                return Err(ConfigError::DuplicateRouteEntry(name.clone()));
            }
            order.push(index);
        }

        order.extend((0..graph.len()).filter(|index| !seen.contains(index)));
        Ok(Self { order })
    }

    /// Job indices, highest tie-break precedence first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }

    /// Rank of a job in the order.
    pub fn position(&self, index: usize) -> Option<usize> {
        self.order.iter().position(|&i| i == index)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
