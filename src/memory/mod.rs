//! Index-addressed storage for the forest's nodes.
//!
//! Nodes live in a flat arena and refer to each other by index, so the
//! hierarchy never needs owning recursive types.
pub mod arena;

pub use arena::Arena;

/// A compact index into an [`Arena`].
pub trait EntityIndex: Copy + Eq + Ord {
    /// Creates an index, returning `None` if `index` does not fit the backing type.
    fn try_new(index: usize) -> Option<Self>;

    fn index(self) -> usize;
}

/// Macro which provides the common implementation of an n-bit entity reference
///
/// Based on [`cranelift_entity`'s `entity_impl!`](https://docs.rs/cranelift-entity/0.89.2/cranelift_entity/macro.entity_impl.html)
macro_rules! entity_impl {
    ($entity:ident, $backing:ty) => {
        impl $crate::memory::EntityIndex for $entity {
            #[inline(always)]
            fn try_new(ix: usize) -> Option<Self> {
                <$backing>::try_from(ix).ok().map($entity)
            }

            #[inline(always)]
            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

/// Position of a node inside a forest's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(u32);

entity_impl!(NodeIndex, u32);
