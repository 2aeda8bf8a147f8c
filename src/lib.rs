//! Node hierarchies for system monitoring tools.
//!
//! A [`Forest`] holds any number of trees over totally ordered node
//! identities, such as process ids. It is rebuilt from scratch whenever the
//! monitored system is sampled: paths are added with [`Forest::add`], or the
//! whole forest is derived from a parent relation with
//! [`Forest::from_parent_relation`] / [`Forest::from_table`]. Afterwards it is
//! read through depth-first walks and family queries.
//!
//! - [`Forest::nodes`] and [`Forest::ordered_nodes`] walk the forest lazily,
//!   yielding `(depth, node)` pairs.
//! - [`Forest::ancestors`], [`Forest::find_subtree`] and [`Forest::family`]
//!   answer questions about a single node.
//! - A [`Table`] holds per-node display values and can order and annotate a
//!   walk, see [`Table::compare_by`] and [`Table::rows`].
//!
//! A built forest can be shared between threads for reading; it has no
//! interior mutability.
//!
//! # Example
//!
//! ```
//! # use procforest::{Forest, Table};
//! let ppid: Table<u32, Option<u32>> =
//!     [(1, None), (80, Some(1)), (81, Some(80)), (90, Some(1))].into_iter().collect();
//! let forest = Forest::from_table(&ppid).unwrap();
//!
//! let lines: Vec<String> = forest
//!     .ordered_nodes(|a, b| b.cmp(a))
//!     .map(|(depth, pid)| format!("{}{pid}", "  ".repeat(depth)))
//!     .collect();
//! assert_eq!(lines, ["1", "  90", "  80", "    81"]);
//!
//! let family = forest.family(&80);
//! assert!(family.nodes().map(|(_, pid)| *pid).eq([1, 80, 81]));
//! ```

pub mod config;
pub mod forest;
pub(crate) mod memory;
pub mod relation;
pub mod table;


pub use config::{ForestConfig, ReinsertPolicy};
pub use forest::{Forest, InsertError};
pub use relation::{BuildError, HasParent};
pub use table::Table;
