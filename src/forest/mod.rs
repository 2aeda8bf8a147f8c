//! Multi-rooted hierarchies keyed by node identity.
//!
//! A [`Forest`] stores every node once, in an arena, together with the
//! ordered list of its children. Nodes do not know their parents: ancestry is
//! always recovered by walking down from the roots, so there is no parent
//! link that could dangle or form a cycle.
//!
//! # Example
//!
//! ```
//! # use procforest::Forest;
//! let mut forest = Forest::new();
//! forest.add(["A", "B", "D"]).unwrap();
//! forest.add(["A", "C"]).unwrap();
//! forest.add(["A", "B", "E"]).unwrap();
//!
//! assert_eq!(forest.depth(), 3);
//! assert_eq!(forest.ancestors(&"E"), vec!["A", "B"]);
//!
//! // Children ordered by descending identity.
//! let walk: Vec<_> = forest.ordered_nodes(|a, b| b.cmp(a)).collect();
//! assert_eq!(
//!     walk,
//!     vec![(0, &"A"), (1, &"C"), (1, &"B"), (2, &"E"), (2, &"D")]
//! );
//!
//! let family = forest.family(&"B");
//! assert!(!family.contains(&"C"));
//! assert_eq!(family.len(), 4);
//! ```
mod iter;

pub use iter::{Children, Nodes, OrderedNodes};

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{ForestConfig, ReinsertPolicy};
use crate::memory::{Arena, EntityIndex, NodeIndex};

/// A set of trees over totally ordered node identities.
///
/// Each identity occurs at most once. Children keep the order in which they
/// were first inserted; [`Forest::ordered_nodes`] imposes any other order at
/// traversal time.
#[derive(Debug, Clone)]
pub struct Forest<N> {
    nodes: Arena<NodeIndex, NodeData<N>>,
    roots: Vec<NodeIndex>,
    index: BTreeMap<N, NodeIndex>,
    config: ForestConfig,
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData<N> {
    pub(crate) node: N,
    pub(crate) children: Vec<NodeIndex>,
}

impl<N> Default for Forest<N> {
    fn default() -> Self {
        Self::with_config(ForestConfig::default())
    }
}

impl<N> Forest<N> {
    /// Creates a new empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty forest with the given construction settings.
    pub fn with_config(config: ForestConfig) -> Self {
        Self {
            nodes: Arena::new(),
            roots: Vec::new(),
            index: BTreeMap::new(),
            config,
        }
    }

    /// Returns the construction settings.
    #[inline]
    pub fn config(&self) -> ForestConfig {
        self.config
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the forest has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over the root nodes in insertion order.
    pub fn roots(&self) -> Children<'_, N> {
        Children::new(self, &self.roots)
    }

    /// Walks the forest depth first, yielding each node with its depth.
    ///
    /// Roots are at depth 0 and siblings come in insertion order. The walk is
    /// lazy; dropping the iterator stops it.
    pub fn nodes(&self) -> Nodes<'_, N> {
        Nodes::new(self)
    }

    /// Returns the number of levels, i.e. the maximum leaf depth plus one.
    ///
    /// An empty forest has depth 0.
    pub fn depth(&self) -> usize {
        self.nodes().map(|(depth, _)| depth + 1).max().unwrap_or(0)
    }

    #[inline]
    pub(crate) fn data(&self, index: NodeIndex) -> &NodeData<N> {
        &self.nodes[index]
    }

    #[inline]
    pub(crate) fn root_indices(&self) -> &[NodeIndex] {
        &self.roots
    }
}

impl<N: Ord + Clone> Forest<N> {
    /// Builds a forest from root-to-leaf paths.
    ///
    /// # Errors
    ///
    /// Fails on the first path that [`Forest::add`] rejects.
    pub fn from_paths<P, I>(paths: P) -> Result<Self, InsertError<N>>
    where
        P: IntoIterator<Item = I>,
        I: IntoIterator<Item = N>,
    {
        let mut forest = Self::new();
        forest.extend_paths(paths)?;
        Ok(forest)
    }

    /// Adds several root-to-leaf paths, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first path that [`Forest::add`] rejects. Paths before it
    /// stay inserted.
    pub fn extend_paths<P, I>(&mut self, paths: P) -> Result<(), InsertError<N>>
    where
        P: IntoIterator<Item = I>,
        I: IntoIterator<Item = N>,
    {
        paths.into_iter().try_for_each(|path| self.add(path))
    }

    /// Adds a root-to-leaf path.
    ///
    /// Every node on the path becomes a child of the one before it, the first
    /// node being a root. Nodes that already exist keep their subtrees, so
    /// adding the same path twice changes nothing. An empty path is a no-op.
    ///
    /// # Errors
    ///
    ///  - When a node occurs twice in the path.
    ///  - When an existing node would end up under a different parent and the
    ///    forest's [`ReinsertPolicy`] is [`ReinsertPolicy::Reject`].
    ///  - When the forest can not address another node.
    ///
    /// The forest is left unchanged when the path is rejected for the first
    /// two reasons.
    pub fn add<I>(&mut self, path: I) -> Result<(), InsertError<N>>
    where
        I: IntoIterator<Item = N>,
    {
        let path: Vec<N> = path.into_iter().collect();
        self.check_path(&path)?;

        let mut parent = None;
        for node in path {
            let index = match self.index.get(&node) {
                Some(&index) => {
                    self.place(index, parent);
                    index
                }
                None => self.push_node(node, parent)?,
            };
            parent = Some(index);
        }

        Ok(())
    }

    /// Whether the forest contains a node.
    #[inline]
    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Iterates over a node's children in insertion order.
    ///
    /// Unknown nodes have no children.
    pub fn children(&self, node: &N) -> Children<'_, N> {
        match self.index.get(node) {
            Some(&index) => Children::new(self, &self.nodes[index].children),
            None => Children::new(self, &[]),
        }
    }

    /// Returns a node's parent, or `None` if it is a root or absent.
    ///
    /// Parents are not stored; this searches the forest.
    pub fn parent(&self, node: &N) -> Option<&N> {
        let index = *self.index.get(node)?;
        let parent = self.parent_index(index)?;
        Some(&self.nodes[parent].node)
    }

    /// Walks the forest depth first with siblings sorted by `cmp`.
    ///
    /// The comparator is applied to every sibling group independently. Nodes
    /// it considers equal are ordered by their identity, so the walk is fully
    /// deterministic. Sorting happens lazily, one sibling group at a time.
    pub fn ordered_nodes<F>(&self, cmp: F) -> OrderedNodes<'_, N, F>
    where
        F: Fn(&N, &N) -> std::cmp::Ordering,
    {
        OrderedNodes::new(self, cmp)
    }

    /// Returns the path from a root down to the node's parent.
    ///
    /// The node itself is not included. Roots and absent nodes have no
    /// ancestors.
    pub fn ancestors(&self, target: &N) -> Vec<N> {
        if !self.contains(target) {
            return Vec::new();
        }

        let mut path: Vec<&N> = Vec::new();
        for (depth, node) in self.nodes() {
            path.truncate(depth);
            if node == target {
                return path.into_iter().cloned().collect();
            }
            path.push(node);
        }

        Vec::new()
    }

    /// Returns a copy of the subtree rooted at `target`.
    ///
    /// The result has `target` as its only root. Returns `None` if the node
    /// does not occur in the forest.
    pub fn find_subtree(&self, target: &N) -> Option<Forest<N>> {
        let &index = self.index.get(target)?;
        let mut subtree = Self::with_config(self.config);
        subtree.copy_subtree(self, index, None).ok()?;
        Some(subtree)
    }

    /// Returns the family of `target`: its chain of ancestors followed by
    /// its complete subtree.
    ///
    /// Siblings and cousins are pruned, so every ancestor has exactly one
    /// child in the result. For a root this is just its subtree. An absent
    /// node has an empty family.
    pub fn family(&self, target: &N) -> Forest<N> {
        let mut family = Self::with_config(self.config);
        let Some(&index) = self.index.get(target) else {
            return family;
        };

        let mut build = || {
            let mut parent = None;
            for ancestor in self.ancestors(target) {
                parent = Some(family.push_node(ancestor, parent)?);
            }
            family.copy_subtree(self, index, parent)
        };

        // A family never holds more nodes than `self`, so it can not run out
        // of indices.
        match build() {
            Ok(()) => family,
            Err(_) => Self::with_config(self.config),
        }
    }

    /// Validates a path before anything is inserted.
    fn check_path(&self, path: &[N]) -> Result<(), InsertError<N>> {
        let mut seen = BTreeSet::new();
        for node in path {
            if !seen.insert(node) {
                return Err(InsertError::RepeatedNode { node: node.clone() });
            }
        }

        if self.config.reinsert == ReinsertPolicy::Reparent {
            return Ok(());
        }

        // Index of the previous node on the path, `None` once the path has
        // left the existing part of the forest.
        let mut previous: Option<Option<NodeIndex>> = Some(None);
        for (position, node) in path.iter().enumerate() {
            let Some(&index) = self.index.get(node) else {
                previous = None;
                continue;
            };

            let attached = match previous {
                Some(None) => self.roots.contains(&index),
                Some(Some(parent)) => self.nodes[parent].children.contains(&index),
                None => false,
            };

            if !attached {
                let requested = position
                    .checked_sub(1)
                    .and_then(|parent| path.get(parent))
                    .cloned();
                return Err(InsertError::Conflict {
                    node: node.clone(),
                    parent: self.parent(node).cloned(),
                    requested,
                });
            }
            previous = Some(Some(index));
        }

        Ok(())
    }

    /// Creates a node and attaches it under `parent`, or as a root.
    fn push_node(
        &mut self,
        node: N,
        parent: Option<NodeIndex>,
    ) -> Result<NodeIndex, InsertError<N>> {
        let index = self
            .nodes
            .push(NodeData {
                node: node.clone(),
                children: Vec::new(),
            })
            .ok_or(InsertError::Capacity)?;
        self.index.insert(node, index);
        self.siblings_mut(parent).push(index);
        trace!(node = index.index(), parent = ?parent.map(EntityIndex::index), "created node");
        Ok(index)
    }

    /// Makes sure an existing node sits under `parent`, moving it if needed.
    fn place(&mut self, index: NodeIndex, parent: Option<NodeIndex>) {
        if self.siblings(parent).contains(&index) {
            return;
        }

        let previous = self.parent_index(index);
        self.siblings_mut(previous).retain(|&sibling| sibling != index);
        self.siblings_mut(parent).push(index);
        debug!(
            node = index.index(),
            from = ?previous.map(EntityIndex::index),
            to = ?parent.map(EntityIndex::index),
            "reparented node"
        );
    }

    /// Copies the subtree of `root` in `source` into `self`, under `parent`.
    fn copy_subtree(
        &mut self,
        source: &Forest<N>,
        root: NodeIndex,
        parent: Option<NodeIndex>,
    ) -> Result<(), InsertError<N>> {
        let mut stack = vec![(root, parent)];
        while let Some((index, parent)) = stack.pop() {
            let data = &source.nodes[index];
            let copy = self.push_node(data.node.clone(), parent)?;
            stack.extend(data.children.iter().rev().map(|&child| (child, Some(copy))));
        }
        Ok(())
    }

    fn parent_index(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .find(|(_, data)| data.children.contains(&index))
            .map(|(parent, _)| parent)
    }

    fn siblings(&self, parent: Option<NodeIndex>) -> &[NodeIndex] {
        match parent {
            Some(parent) => &self.nodes[parent].children,
            None => &self.roots,
        }
    }

    fn siblings_mut(&mut self, parent: Option<NodeIndex>) -> &mut Vec<NodeIndex> {
        match parent {
            Some(parent) => &mut self.nodes[parent].children,
            None => &mut self.roots,
        }
    }
}

/// Structural equality: the same nodes under the same parents.
///
/// Sibling order and configuration are ignored.
impl<N: Ord> PartialEq for Forest<N> {
    fn eq(&self, other: &Self) -> bool {
        fn identities<'a, N: Ord>(forest: &'a Forest<N>, indices: &[NodeIndex]) -> BTreeSet<&'a N> {
            indices.iter().map(|&index| &forest.nodes[index].node).collect()
        }

        self.len() == other.len()
            && identities(self, &self.roots) == identities(other, &other.roots)
            && self.index.iter().all(|(node, &index)| {
                other.index.get(node).map_or(false, |&other_index| {
                    identities(self, &self.nodes[index].children)
                        == identities(other, &other.nodes[other_index].children)
                })
            })
    }
}

impl<N: Ord> Eq for Forest<N> {}

/// Error returned by [`Forest::add`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError<N> {
    #[error("node {node:?} occurs more than once in the path")]
    RepeatedNode { node: N },
    #[error("node {node:?} is attached under {parent:?}, can not add it under {requested:?}")]
    Conflict {
        node: N,
        /// The node's current parent, `None` for a root.
        parent: Option<N>,
        /// The parent the path asked for, `None` for a root.
        requested: Option<N>,
    },
    #[error("the forest can not address more nodes")]
    Capacity,
}
