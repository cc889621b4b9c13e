//! Normalizer — turns an editorial text value into clean, single-line prose.
//!
//! Values without `<` or `>` only get whitespace cleanup. Anything that looks
//! like markup is parsed as an HTML fragment and reduced to its text nodes,
//! joined with spaces so adjacent elements do not glue words together.
//! Malformed markup is never an error; the parser recovers and we keep
//! whatever text it found.

use regex::Regex;
use scraper::Html;
use serde_json::Value;
use std::sync::LazyLock;

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("static regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// Normalize a JSON value. Only strings are touched.
pub fn normalize_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(normalize_text(&s)),
        other => other,
    }
}

/// Normalize a single text value.
pub fn normalize_text(input: &str) -> String {
    if has_markup(input) {
        collapse_whitespace(&extract_text(input))
    } else {
        collapse_whitespace(input)
    }
}

/// Whether `input` contains a markup delimiter and needs parsing.
pub fn has_markup(input: &str) -> bool {
    input.contains(['<', '>'])
}

fn extract_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    fragment.root_element().text().collect::<Vec<_>>().join(" ")
}

/// Line breaks become spaces, whitespace runs become one space, ends trimmed.
pub fn collapse_whitespace(input: &str) -> String {
    let flattened = LINE_BREAKS.replace_all(input, " ");
    WHITESPACE.replace_all(&flattened, " ").trim().to_string()
}
