use std::{
    iter::FusedIterator,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use crate::memory::EntityIndex;

/// A bump arena of fixed-sized objects.
///
/// Values are never removed; the whole arena is dropped at once. Indices handed
/// out by [`Arena::push`] therefore stay valid for the arena's lifetime.
#[derive(Debug, Clone)]
pub struct Arena<K, V> {
    data: Vec<V>,
    phantom: PhantomData<K>,
}

impl<K, V> Arena<K, V>
where
    K: EntityIndex,
{
    /// Creates an empty [`Arena<K, V>`].
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            phantom: PhantomData,
        }
    }

    /// Returns the number of stored values.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns whether there is no stored value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Stores a value, returning its index.
    ///
    /// Returns `None` when the index type can not address another value.
    pub fn push(&mut self, value: V) -> Option<K> {
        let key = K::try_new(self.data.len())?;
        self.data.push(value);
        Some(key)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            iter: self.data.iter().enumerate(),
            phantom: PhantomData,
        }
    }
}

impl<K: EntityIndex, V> Default for Arena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EntityIndex, V> Index<K> for Arena<K, V> {
    type Output = V;

    #[inline]
    fn index(&self, key: K) -> &Self::Output {
        &self.data[key.index()]
    }
}

impl<K: EntityIndex, V> IndexMut<K> for Arena<K, V> {
    #[inline]
    fn index_mut(&mut self, key: K) -> &mut Self::Output {
        &mut self.data[key.index()]
    }
}

pub struct Iter<'a, K, V> {
    iter: std::iter::Enumerate<std::slice::Iter<'a, V>>,
    phantom: PhantomData<K>,
}

impl<'a, K: EntityIndex, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, value) = self.iter.next()?;
        Some((K::try_new(index)?, value))
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, K: EntityIndex, V> FusedIterator for Iter<'a, K, V> {}
