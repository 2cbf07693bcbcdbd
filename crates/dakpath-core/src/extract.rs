//! Locate a JSON object inside free model text.
//!
//! Grounded (rail) responses cannot use a response schema, so the model
//! returns prose with the object somewhere inside it. A fenced ```json block
//! wins; otherwise the span from the first `{` to the last `}` is taken.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Fenced block tagged json; body captured lazily up to the first closing fence.
    static ref FENCED_JSON: Regex = Regex::new(r"(?s)```json[ \t]*\r?\n(.*?)\r?\n[ \t]*```").unwrap();
    /// Greedy outermost braces.
    static ref BRACED: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

/// Return the JSON candidate inside `text`, if any.
///
/// The result is only a candidate; callers still parse and schema-check it.
pub fn extract_json(text: &str) -> Option<&str> {
    if let Some(m) = FENCED_JSON.captures(text).and_then(|c| c.get(1)) {
        let body = m.as_str().trim();
        if !body.is_empty() {
            return Some(body);
        }
    }
    BRACED.find(text).map(|m| m.as_str())
}
