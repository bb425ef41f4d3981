//! Reference-token extraction.
//!
//! Tokens are the trimmed contents of `[[ ... ]]` markers found in a record's
//! body and in any string nested inside its fields.

mod extraction;

pub use extraction::{extract_all_links, extract_tokens, wrap_token};
