//! Per-node values kept next to a [`Forest`].
//!
//! The forest only stores identities. Display data such as command names or
//! resource usage lives in a [`Table`], which is consulted when ordering a
//! walk and when rendering it, never for the structure itself.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::btree_map::{self, BTreeMap};
use std::iter::FusedIterator;

use crate::forest::{Forest, OrderedNodes};

/// A mapping from node identity to an arbitrary value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<N, V> {
    values: BTreeMap<N, V>,
}

impl<N, V> Default for Table<N, V> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<N: Ord, V> Table<N, V> {
    /// Creates a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the one it replaces.
    pub fn insert(&mut self, node: N, value: V) -> Option<V> {
        self.values.insert(node, value)
    }

    #[inline]
    pub fn get<Q>(&self, node: &Q) -> Option<&V>
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.values.get(node)
    }

    #[inline]
    pub fn contains<Q>(&self, node: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.values.contains_key(node)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the identities in ascending order.
    pub fn keys(&self) -> btree_map::Keys<'_, N, V> {
        self.values.keys()
    }

    /// Iterates over the entries in ascending identity order.
    pub fn iter(&self) -> btree_map::Iter<'_, N, V> {
        self.values.iter()
    }

    /// Lifts an ordering on values to an ordering on nodes.
    ///
    /// Nodes without a value sort after all nodes with one. Typical use is
    /// ordering children by resource usage:
    ///
    /// ```
    /// # use procforest::{Forest, Table};
    /// let forest = Forest::from_paths([[1, 2], [1, 3]]).unwrap();
    /// let cpu: Table<u32, f64> = [(2, 0.5), (3, 7.0)].into_iter().collect();
    ///
    /// let busiest_first = cpu.compare_by(|a, b| b.total_cmp(a));
    /// let order: Vec<_> = forest.ordered_nodes(busiest_first).map(|(_, n)| *n).collect();
    /// assert_eq!(order, vec![1, 3, 2]);
    /// ```
    pub fn compare_by<'a, F>(&'a self, cmp: F) -> impl Fn(&N, &N) -> Ordering + 'a
    where
        F: Fn(&V, &V) -> Ordering + 'a,
    {
        move |a: &N, b: &N| match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => cmp(a, b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl<N: Ord + Clone, V> Table<N, V> {
    /// Walks `forest` in the order given by `cmp`, joining each node with its
    /// value.
    ///
    /// Yields `(depth, node, value)`; nodes without an entry, such as
    /// placeholder parents, come with `None`.
    pub fn rows<'a, F>(&'a self, forest: &'a Forest<N>, cmp: F) -> Rows<'a, N, V, F>
    where
        F: Fn(&N, &N) -> Ordering,
    {
        Rows {
            table: self,
            walk: forest.ordered_nodes(cmp),
        }
    }
}

impl<N: Ord, V> FromIterator<(N, V)> for Table<N, V> {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<N: Ord, V> Extend<(N, V)> for Table<N, V> {
    fn extend<I: IntoIterator<Item = (N, V)>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl<'a, N, V> IntoIterator for &'a Table<N, V> {
    type Item = (&'a N, &'a V);
    type IntoIter = btree_map::Iter<'a, N, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Ordered walk of a forest joined with table values.
///
/// Returned by [`Table::rows`].
pub struct Rows<'a, N, V, F> {
    table: &'a Table<N, V>,
    walk: OrderedNodes<'a, N, F>,
}

impl<'a, N, V, F> Iterator for Rows<'a, N, V, F>
where
    N: Ord,
    F: Fn(&N, &N) -> Ordering,
{
    type Item = (usize, &'a N, Option<&'a V>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.walk.next()?;
        Some((depth, node, self.table.values.get(node)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.walk.size_hint()
    }
}

impl<'a, N, V, F> FusedIterator for Rows<'a, N, V, F>
where
    N: Ord,
    F: Fn(&N, &N) -> Ordering,
{
}
