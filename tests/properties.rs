//! Property-based tests for forest construction and queries.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use procforest::Forest;

/// Random parent arrays: node `i` is a root or has a parent below `i`.
fn parent_arrays() -> impl Strategy<Value = Vec<Option<u16>>> {
    (1usize..40).prop_flat_map(|len| {
        (0..len)
            .map(|i| {
                if i == 0 {
                    Just(None::<u16>).boxed()
                } else {
                    proptest::option::of(0..i as u16).boxed()
                }
            })
            .collect::<Vec<_>>()
    })
}

/// The root-to-node path of every node.
fn root_paths(parents: &[Option<u16>]) -> BTreeMap<u16, Vec<u16>> {
    let mut paths = BTreeMap::new();
    for node in 0..parents.len() as u16 {
        let mut path = vec![node];
        while let Some(parent) = parents[*path.last().unwrap() as usize] {
            path.push(parent);
        }
        path.reverse();
        paths.insert(node, path);
    }
    paths
}

fn build(paths: &BTreeMap<u16, Vec<u16>>, pick: &[bool]) -> (Forest<u16>, BTreeSet<u16>) {
    let mut forest = Forest::new();
    let mut inserted = BTreeSet::new();
    for (path, _) in paths.values().zip(pick.iter().cycle()).filter(|(_, pick)| **pick) {
        forest.add(path.iter().copied()).unwrap();
        inserted.extend(path.iter().copied());
    }
    (forest, inserted)
}

fn depths(walk: impl Iterator<Item = (usize, u16)>) -> BTreeMap<u16, usize> {
    walk.map(|(depth, node)| (node, depth)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every inserted identity is walked exactly once, nothing else.
    #[test]
    fn walk_yields_inserted_nodes(
        parents in parent_arrays(),
        pick in prop::collection::vec(any::<bool>(), 1..8)
    ) {
        let paths = root_paths(&parents);
        let (forest, inserted) = build(&paths, &pick);

        let walked: Vec<u16> = forest.nodes().map(|(_, node)| *node).collect();
        let unique: BTreeSet<u16> = walked.iter().copied().collect();
        prop_assert_eq!(walked.len(), unique.len());
        prop_assert_eq!(unique, inserted);
    }

    /// Ordering changes the sequence but never the depths.
    #[test]
    fn ordered_walk_keeps_depths(parents in parent_arrays(), descending in any::<bool>()) {
        let paths = root_paths(&parents);
        let forest = Forest::from_paths(paths.values().cloned()).unwrap();

        let plain = depths(forest.nodes().map(|(d, n)| (d, *n)));
        let ordered: Vec<_> = forest
            .ordered_nodes(|a, b| if descending { b.cmp(a) } else { a.cmp(b) })
            .map(|(d, n)| (d, *n))
            .collect();

        prop_assert_eq!(ordered.len(), plain.len());
        prop_assert_eq!(depths(ordered.into_iter()), plain);
    }

    /// Siblings come out sorted and every node follows its parent.
    #[test]
    fn ordered_walk_is_sorted_preorder(parents in parent_arrays()) {
        let paths = root_paths(&parents);
        let forest = Forest::from_paths(paths.values().cloned()).unwrap();

        let mut stack: Vec<u16> = Vec::new();
        let mut last_at_depth: BTreeMap<usize, u16> = BTreeMap::new();
        for (depth, &node) in forest.ordered_nodes(|a, b| b.cmp(a)) {
            stack.truncate(depth);
            prop_assert_eq!(&stack, &paths[&node][..depth]);
            if let Some(&previous) = last_at_depth.get(&depth) {
                if depth == 0 || forest.parent(&previous) == forest.parent(&node) {
                    prop_assert!(previous > node);
                }
            }
            last_at_depth.retain(|&d, _| d <= depth);
            last_at_depth.insert(depth, node);
            stack.push(node);
        }
    }

    /// Adding the same paths again changes nothing.
    #[test]
    fn add_is_idempotent(parents in parent_arrays()) {
        let paths = root_paths(&parents);
        let mut forest = Forest::from_paths(paths.values().cloned()).unwrap();
        let before = forest.clone();

        forest.extend_paths(paths.values().cloned()).unwrap();
        prop_assert_eq!(&forest, &before);
        prop_assert!(forest.nodes().eq(before.nodes()));
    }

    /// Ancestors followed by the node itself form its root path.
    #[test]
    fn ancestors_form_root_path(parents in parent_arrays()) {
        let paths = root_paths(&parents);
        let nodes = 0..parents.len() as u16;
        let forest = Forest::from_parent_relation(nodes, |&n| parents[n as usize]).unwrap();

        for (node, path) in &paths {
            let mut ancestors = forest.ancestors(node);
            ancestors.push(*node);
            prop_assert_eq!(&ancestors, path);
        }
    }

    /// A family holds the whole subtree and a single chain above it.
    #[test]
    fn family_is_chain_plus_subtree(
        parents in parent_arrays(),
        target in any::<prop::sample::Index>()
    ) {
        let paths = root_paths(&parents);
        let forest = Forest::from_paths(paths.values().cloned()).unwrap();
        let target = target.index(parents.len()) as u16;
        let family = forest.family(&target);

        let subtree = forest.find_subtree(&target).unwrap();
        for (_, node) in subtree.nodes() {
            prop_assert!(family.contains(node));
            prop_assert!(family.children(node).eq(forest.children(node)));
        }

        let ancestors = forest.ancestors(&target);
        prop_assert_eq!(family.len(), ancestors.len() + subtree.len());
        prop_assert_eq!(family.roots().len(), 1);
        for ancestor in &ancestors {
            prop_assert_eq!(family.children(ancestor).len(), 1);
        }
        prop_assert_eq!(family.ancestors(&target), ancestors);
    }
}
