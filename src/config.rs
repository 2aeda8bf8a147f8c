//! Construction settings for a [`Forest`].
//!
//! [`Forest`]: crate::Forest

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings applied while a forest is being built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ForestConfig {
    /// What happens when a path places an existing node under a different parent.
    pub reinsert: ReinsertPolicy,
}

impl ForestConfig {
    /// Creates the default configuration, rejecting conflicting reinsertions.
    pub const fn new() -> Self {
        Self {
            reinsert: ReinsertPolicy::Reject,
        }
    }

    /// Sets the reinsertion policy.
    #[must_use]
    pub const fn with_reinsert(mut self, reinsert: ReinsertPolicy) -> Self {
        self.reinsert = reinsert;
        self
    }
}

/// Policy for a node that is added again under a different parent chain.
///
/// A node always occupies a single position in the forest. Re-adding it along
/// the path that already leads to it is never a conflict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReinsertPolicy {
    /// Fail the insertion and leave the forest untouched.
    #[default]
    Reject,
    /// Move the node, together with its subtree, under the new parent.
    Reparent,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_to_reject() {
        assert_eq!(ForestConfig::default(), ForestConfig::new());
        assert_eq!(ForestConfig::default().reinsert, ReinsertPolicy::Reject);
        assert_eq!(
            ForestConfig::new()
                .with_reinsert(ReinsertPolicy::Reparent)
                .reinsert,
            ReinsertPolicy::Reparent
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_names() {
        let config: ForestConfig = serde_json::from_str(r#"{"reinsert":"reparent"}"#).unwrap();
        assert_eq!(config.reinsert, ReinsertPolicy::Reparent);

        let config: ForestConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ForestConfig::default());

        assert_eq!(
            serde_json::to_string(&ForestConfig::default()).unwrap(),
            r#"{"reinsert":"reject"}"#
        );
    }
}
