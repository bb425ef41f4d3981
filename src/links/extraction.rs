//! Token extraction from text and nested fields (regex-based).

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

use crate::record::Record;

lazy_static! {
    // Non-greedy up to the first closing marker; no nesting.
    static ref WIKI_LINK_RE: Regex = Regex::new(r"(?s)\[\[(.*?)\]\]").expect("Invalid regex pattern");
}

/// Extract `[[...]]` tokens from text, trimmed, in order of appearance.
/// Duplicates are kept.
pub fn extract_tokens(text: &str) -> Vec<String> {
    WIKI_LINK_RE
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// All distinct tokens of a record, from its body and every string in its
/// fields, in ascending order.
pub fn extract_all_links(record: &Record) -> Vec<String> {
    let mut links = BTreeSet::new();

    if let Some(body) = &record.body {
        links.extend(extract_tokens(body));
    }

    for value in record.fields.values() {
        links = value.fold_text(links, &mut |mut acc, text| {
            acc.extend(extract_tokens(text));
            acc
        });
    }

    links.into_iter().collect()
}

/// Wrap a token back into marker syntax, e.g. for list display.
pub fn wrap_token(token: &str) -> String {
    format!("[[{}]]", token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;
    use serde_json::json;

    #[test]
    fn test_extract_tokens_in_order() {
        assert_eq!(extract_tokens("a [[x:1]] b [[y:2]] c"), vec!["x:1", "y:2"]);
    }

    #[test]
    fn test_extract_tokens_no_matches() {
        assert!(extract_tokens("no links here").is_empty());
        assert!(extract_tokens("[[unterminated").is_empty());
        assert!(extract_tokens("").is_empty());
    }

    #[test]
    fn test_extract_tokens_trims_and_keeps_duplicates() {
        assert_eq!(
            extract_tokens("[[ pack:1 ]] then [[pack:1]] and [[Free text note]]"),
            vec!["pack:1", "pack:1", "Free text note"]
        );
    }

    #[test]
    fn test_extract_tokens_stops_at_first_closing_marker() {
        assert_eq!(extract_tokens("[[a]]b]]"), vec!["a"]);
        assert_eq!(extract_tokens("[[a [[b]] c]]"), vec!["a [[b"]);
    }

    #[test]
    fn test_extract_tokens_spans_lines() {
        assert_eq!(extract_tokens("see [[den:\n1]]"), vec!["den:\n1"]);
    }

    #[test]
    fn test_wrapped_tokens_reparse_identically() {
        let text = "x [[pack:1]] y [[ spaced token ]] [[a]b]] z";
        for token in extract_tokens(text) {
            assert_eq!(extract_tokens(&wrap_token(&token)), vec![token.clone()]);
        }
    }

    #[test]
    fn test_extract_all_links_body_and_nested_fields() {
        let mut record = Record::new("den", "1").with_body("Led by [[adult:2]] and [[adult:1]]");
        record.fields.insert(
            "roster".to_string(),
            FieldValue::from(&json!({
                "leaders": ["[[adult:1]]", 42, null],
                "notes": {"deep": [["see [[pack:1]]"]], "flag": true}
            })),
        );
        assert_eq!(extract_all_links(&record), vec!["adult:1", "adult:2", "pack:1"]);
    }

    #[test]
    fn test_extract_all_links_empty_record() {
        assert!(extract_all_links(&Record::new("den", "1")).is_empty());
    }
}
