//! Reactions - kinds offered by the client and the per-post count map

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reaction kinds the client lets a user pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Love,
    Laugh,
}

impl ReactionKind {
    /// Every kind, in display order
    pub const ALL: [ReactionKind; 3] = [Self::Like, Self::Love, Self::Laugh];

    /// Key used inside the `reactions` map of a status document
    pub const fn key(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Love => "love",
            Self::Laugh => "laugh",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error when a reaction key is not one the client offers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reaction kind: {0}")]
pub struct UnknownReactionKind(pub String);

impl FromStr for ReactionKind {
    type Err = UnknownReactionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| UnknownReactionKind(s.to_string()))
    }
}

/// Reaction counts keyed by reaction key
///
/// Stored documents may carry keys the client does not offer; they are kept
/// so nothing is lost, and missing keys read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reactions(BTreeMap<String, i64>);

impl Reactions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: ReactionKind) -> i64 {
        self.count_key(kind.key())
    }

    pub fn count_key(&self, key: &str) -> i64 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, i64>> for Reactions {
    fn from(map: BTreeMap<String, i64>) -> Self {
        Self(map)
    }
}

impl<const N: usize> From<[(ReactionKind, i64); N]> for Reactions {
    fn from(entries: [(ReactionKind, i64); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(kind, count)| (kind.key().to_string(), count))
                .collect(),
        )
    }
}
