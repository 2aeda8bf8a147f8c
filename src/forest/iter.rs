use std::cmp::Ordering;
use std::iter::FusedIterator;

use super::Forest;
use crate::memory::NodeIndex;

/// Iterator over a list of sibling nodes.
///
/// Returned by [`Forest::roots`] and [`Forest::children`].
#[derive(Debug, Clone)]
pub struct Children<'a, N> {
    forest: &'a Forest<N>,
    iter: std::slice::Iter<'a, NodeIndex>,
}

impl<'a, N> Children<'a, N> {
    pub(super) fn new(forest: &'a Forest<N>, siblings: &'a [NodeIndex]) -> Self {
        Self {
            forest,
            iter: siblings.iter(),
        }
    }
}

impl<'a, N> Iterator for Children<'a, N> {
    type Item = &'a N;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = *self.iter.next()?;
        Some(&self.forest.data(index).node)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, N> DoubleEndedIterator for Children<'a, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = *self.iter.next_back()?;
        Some(&self.forest.data(index).node)
    }
}

impl<'a, N> ExactSizeIterator for Children<'a, N> {}

impl<'a, N> FusedIterator for Children<'a, N> {}

/// Depth-first walk in insertion order.
///
/// Returned by [`Forest::nodes`].
#[derive(Debug, Clone)]
pub struct Nodes<'a, N> {
    forest: &'a Forest<N>,
    /// Nodes still to visit, the next one on top.
    stack: Vec<(usize, NodeIndex)>,
}

impl<'a, N> Nodes<'a, N> {
    pub(super) fn new(forest: &'a Forest<N>) -> Self {
        let stack = forest
            .root_indices()
            .iter()
            .rev()
            .map(|&root| (0, root))
            .collect();
        Self { forest, stack }
    }
}

impl<'a, N> Iterator for Nodes<'a, N> {
    type Item = (usize, &'a N);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, index) = self.stack.pop()?;
        let data = self.forest.data(index);
        self.stack
            .extend(data.children.iter().rev().map(|&child| (depth + 1, child)));
        Some((depth, &data.node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.forest.len()))
    }
}

impl<'a, N> FusedIterator for Nodes<'a, N> {}

/// Depth-first walk with every sibling group sorted by a comparator.
///
/// Returned by [`Forest::ordered_nodes`]. A node's children are only sorted
/// once the walk moves past the node, so abandoning the walk early leaves the
/// remaining groups untouched.
#[derive(Clone)]
pub struct OrderedNodes<'a, N, F> {
    forest: &'a Forest<N>,
    cmp: F,
    stack: Vec<(usize, NodeIndex)>,
    /// The last yielded node, whose children have not been queued yet.
    /// `None` before the roots are queued.
    pending: Option<Option<(usize, NodeIndex)>>,
}

impl<'a, N, F> OrderedNodes<'a, N, F>
where
    N: Ord,
    F: Fn(&N, &N) -> Ordering,
{
    pub(super) fn new(forest: &'a Forest<N>, cmp: F) -> Self {
        Self {
            forest,
            cmp,
            stack: Vec::new(),
            pending: None,
        }
    }

    /// Pushes a sibling group onto the stack so that the first in order is on top.
    fn queue(&mut self, depth: usize, siblings: &[NodeIndex]) {
        let forest = self.forest;
        let cmp = &self.cmp;
        let mut sorted = siblings.to_vec();
        sorted.sort_by(|&a, &b| {
            let (a, b) = (&forest.data(a).node, &forest.data(b).node);
            cmp(a, b).then_with(|| a.cmp(b))
        });
        self.stack
            .extend(sorted.into_iter().rev().map(|index| (depth, index)));
    }
}

impl<'a, N, F> Iterator for OrderedNodes<'a, N, F>
where
    N: Ord,
    F: Fn(&N, &N) -> Ordering,
{
    type Item = (usize, &'a N);

    fn next(&mut self) -> Option<Self::Item> {
        let forest = self.forest;
        match self.pending.take() {
            None => self.queue(0, forest.root_indices()),
            Some(Some((depth, index))) => self.queue(depth + 1, &forest.data(index).children),
            Some(None) => {}
        }

        let Some((depth, index)) = self.stack.pop() else {
            self.pending = Some(None);
            return None;
        };
        self.pending = Some(Some((depth, index)));
        Some((depth, &forest.data(index).node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.forest.len()))
    }
}

impl<'a, N, F> FusedIterator for OrderedNodes<'a, N, F>
where
    N: Ord,
    F: Fn(&N, &N) -> Ordering,
{
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample() -> Forest<&'static str> {
        Forest::from_paths([
            vec!["A", "B", "D"],
            vec!["A", "C"],
            vec!["A", "B", "E"],
            vec!["F"],
        ])
        .unwrap()
    }

    #[test]
    fn walk_in_insertion_order() {
        let forest = sample();
        assert_eq!(
            forest.nodes().collect::<Vec<_>>(),
            vec![(0, &"A"), (1, &"B"), (2, &"D"), (2, &"E"), (1, &"C"), (0, &"F")]
        );
        assert!(forest.roots().eq([&"A", &"F"]));
        assert!(forest.children(&"A").rev().eq([&"C", &"B"]));
        assert_eq!(forest.children(&"B").len(), 2);
        assert_eq!(forest.children(&"Z").count(), 0);
    }

    #[test]
    fn ordered_walk_is_lazy() {
        let forest = sample();
        let mut walk = forest.ordered_nodes(|a, b| b.cmp(a));

        assert_eq!(walk.next(), Some((0, &"F")));
        // Only the roots have been sorted so far.
        assert_eq!(walk.stack, vec![(0, forest.index[&"A"])]);

        assert_eq!(walk.next(), Some((0, &"A")));
        assert_eq!(
            walk.collect::<Vec<_>>(),
            vec![(1, &"C"), (1, &"B"), (2, &"E"), (2, &"D")]
        );
    }

    #[test]
    fn ordered_walk_is_fused() {
        let forest = sample();
        let mut walk = forest.ordered_nodes(|a, b| a.cmp(b));
        assert_eq!(walk.by_ref().count(), 6);
        assert_eq!(walk.next(), None);
        assert_eq!(walk.next(), None);
    }

    #[test]
    fn empty_walks() {
        let forest = Forest::<u32>::new();
        assert_eq!(forest.nodes().next(), None);
        assert_eq!(forest.ordered_nodes(|a, b| a.cmp(b)).next(), None);
    }
}
