//! Core types for blitnaut-dl

use serde::{Deserialize, Serialize};

/// Numeric identifier of a Blitnaut
///
/// This is the subgraph's `numericId`: the pagination cursor and the key for
/// the image endpoint and the on-disk file name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlitnautId(pub i64);

impl BlitnautId {
    /// Create a new BlitnautId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for BlitnautId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<BlitnautId> for i64 {
    fn from(id: BlitnautId) -> Self {
        id.0
    }
}

impl std::fmt::Display for BlitnautId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BlitnautId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A Blitnaut as indexed by the subgraph
///
/// Read-only snapshot of one subgraph entity. Field names follow the
/// subgraph schema (camelCase on the wire).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blitnaut {
    /// Entity id string
    pub id: String,
    /// Numeric id (primary key, pagination order, image key)
    pub numeric_id: BlitnautId,
    /// Owner address
    pub owner: String,
    /// Display name
    pub name: String,
    /// Frame reference
    pub frame_id: i64,
    /// Base trait
    pub base: String,
    /// Edition
    pub edition: String,
    /// Source Blitmap token reference
    pub blitmap_id: i64,
    /// Color slot ids, positionally paired with `colors`
    pub color_ids: Vec<i64>,
    /// Colors, positionally paired with `color_ids`
    pub colors: Vec<String>,
    /// Background color slot id
    pub background_color_id: i64,
    /// Background color
    pub background_color: String,
}

impl Blitnaut {
    /// Iterate `(slot id, color)` pairs
    ///
    /// Stops at the shorter of the two sequences if the subgraph ever returns
    /// them with different lengths; see [`Blitnaut::has_consistent_palette`].
    pub fn palette(&self) -> impl Iterator<Item = (i64, &str)> {
        self.color_ids
            .iter()
            .copied()
            .zip(self.colors.iter().map(String::as_str))
    }

    /// Whether `color_ids` and `colors` have matching lengths
    #[must_use]
    pub fn has_consistent_palette(&self) -> bool {
        self.color_ids.len() == self.colors.len()
    }
}

/// What [`ImageCache::fetch_and_save`](crate::images::ImageCache::fetch_and_save) did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The image was already on disk; no request was made
    Skipped,
    /// The image was downloaded and written
    Saved {
        /// Number of bytes written
        bytes: u64,
    },
}
