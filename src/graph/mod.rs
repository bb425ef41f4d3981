//! Reference graph: key lookup and outgoing-link classification.
//!
//! Resolves a focal record's `[[type:id]]` tokens against the snapshot and
//! tags each one as known or missing.

mod index;
mod outgoing;

pub use index::RecordIndex;
pub use outgoing::build_outgoing;

use serde::Serialize;

/// Whether a reference token resolves to a record in the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkRole {
    Known,
    Missing,
}

/// A single outgoing reference (focal record --> key).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLink {
    /// Reference token, e.g. `pack:1`.
    pub key: String,
    /// Target display name, or the token itself when missing.
    pub label: String,
    pub role: LinkRole,
}

impl ResolvedLink {
    pub fn is_known(&self) -> bool {
        self.role == LinkRole::Known
    }
}
