//! Outgoing-reference classification for a focal record.

use super::{LinkRole, RecordIndex, ResolvedLink};
use crate::links::extract_all_links;
use crate::record::{display_name, is_reference_token, Record};

/// Resolve the focal record's reference tokens against the snapshot.
///
/// Only `type:id`-shaped tokens are kept; output is in ascending token order
/// regardless of snapshot order.
pub fn build_outgoing(focal: &Record, index: &RecordIndex<'_>) -> Vec<ResolvedLink> {
    // extract_all_links already returns a sorted, deduplicated set
    extract_all_links(focal)
        .into_iter()
        .filter(|token| is_reference_token(token))
        .map(|token| match index.get(&token) {
            Some(target) => ResolvedLink {
                label: display_name(target),
                key: token,
                role: LinkRole::Known,
            },
            None => ResolvedLink {
                label: token.clone(),
                key: token,
                role: LinkRole::Missing,
            },
        })
        .collect()
}
