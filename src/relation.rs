//! Building a [`Forest`] from a child-to-parent relation.
//!
//! Process tables and similar sources describe each entry by its parent
//! rather than by its children. The builders here follow every entry's parent
//! chain up to a root and insert the resulting path.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, warn};

use crate::forest::{Forest, InsertError};
use crate::table::Table;

/// A value that knows the identity of its parent node.
///
/// Implemented by the per-node values of a [`Table`] so that
/// [`Forest::from_table`] can derive the hierarchy.
pub trait HasParent<N> {
    /// Returns the parent's identity, or `None` for a root.
    fn parent(&self) -> Option<N>;
}

impl<N: Clone> HasParent<N> for Option<N> {
    #[inline]
    fn parent(&self) -> Option<N> {
        self.clone()
    }
}

impl<N: Ord + Clone> Forest<N> {
    /// Builds a forest from a set of nodes and a parent relation.
    ///
    /// See [`Forest::add_parent_relation`].
    ///
    /// # Errors
    ///
    /// Fails when the relation contains a cycle.
    pub fn from_parent_relation<I, F>(nodes: I, parent_of: F) -> Result<Self, BuildError<N>>
    where
        I: IntoIterator<Item = N>,
        F: FnMut(&N) -> Option<N>,
    {
        let mut forest = Self::new();
        forest.add_parent_relation(nodes, parent_of)?;
        Ok(forest)
    }

    /// Builds a forest from a table whose values name their parents.
    ///
    /// Parents that have no entry of their own are still inserted, as roots.
    ///
    /// # Errors
    ///
    /// Fails when the parent relation contains a cycle.
    pub fn from_table<V>(table: &Table<N, V>) -> Result<Self, BuildError<N>>
    where
        V: HasParent<N>,
    {
        Self::from_parent_relation(table.keys().cloned(), |node| {
            table.get(node).and_then(|value| value.parent())
        })
    }

    /// Inserts every node together with its chain of ancestors.
    ///
    /// `parent_of` is followed from each node until it returns `None`. A node
    /// reported as its own parent ends the chain as well, so it becomes a
    /// root. Parents are inserted even when they are not among `nodes`.
    ///
    /// # Errors
    ///
    ///  - When following a chain revisits a node, i.e. the relation is cyclic.
    ///  - When inserting a chain fails, see [`Forest::add`].
    ///
    /// Nodes processed before the error stay inserted.
    pub fn add_parent_relation<I, F>(
        &mut self,
        nodes: I,
        mut parent_of: F,
    ) -> Result<(), BuildError<N>>
    where
        I: IntoIterator<Item = N>,
        F: FnMut(&N) -> Option<N>,
    {
        let mut count = 0usize;
        for node in nodes {
            let chain = chain(node, &mut parent_of)?;
            self.add(chain.into_iter().rev())?;
            count += 1;
        }

        debug!(
            entries = count,
            nodes = self.len(),
            roots = self.roots().len(),
            "built forest from parent relation"
        );
        Ok(())
    }
}

/// Collects `node` and its ancestors, nearest first.
fn chain<N, F>(node: N, parent_of: &mut F) -> Result<Vec<N>, BuildError<N>>
where
    N: Ord + Clone,
    F: FnMut(&N) -> Option<N>,
{
    let mut visited = BTreeSet::from([node.clone()]);
    let mut chain = vec![node];

    while let Some(parent) = chain.last().and_then(|last| {
        parent_of(last).filter(|parent| parent != last)
    }) {
        if !visited.insert(parent.clone()) {
            warn!(length = chain.len(), "cyclic parent relation");
            return Err(BuildError::Cycle { node: parent });
        }
        chain.push(parent);
    }

    Ok(chain)
}

/// Error returned when building a forest from a parent relation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError<N> {
    #[error("cyclic parent relation detected at node {node:?}")]
    Cycle { node: N },
    #[error(transparent)]
    Insert(#[from] InsertError<N>),
}
