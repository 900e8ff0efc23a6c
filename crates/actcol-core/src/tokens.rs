//! Multi-value cell splitting.
//!
//! Sheet authors write lists like `"Running, Yoga / Hiking"` or one value per
//! line. Each fragment becomes a [`FilterToken`] whose `value` is the
//! matching key and whose `label` is what the UI shows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::brand::Brand;
use crate::filters::FilterCategory;
use crate::sheet::SheetRecord;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterToken {
    /// Lowercase, whitespace-collapsed form used for equality.
    pub value: String,
    pub label: String,
}

/// Tokens a brand carries for one filter category.
#[must_use]
pub fn brand_tokens(brand: &Brand, category: &FilterCategory) -> Vec<FilterToken> {
    extract_tokens(&brand.columns, category.column_keys)
}

/// Collects tokens from every aliased column (not just the first populated
/// one), deduplicated by value. A repeated value keeps its first position and
/// takes the label seen last.
#[must_use]
pub fn extract_tokens(record: &SheetRecord, column_keys: &[&str]) -> Vec<FilterToken> {
    let mut tokens: Vec<FilterToken> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for key in column_keys {
        let Some(raw) = record.lookup(key).filter(|v| !v.is_empty()) else {
            continue;
        };
        for fragment in split_cell(raw) {
            let value = normalize_token(fragment);
            if value.is_empty() {
                continue;
            }
            let label = prettify_label(fragment);
            match positions.get(&value) {
                Some(&index) => tokens[index].label = label,
                None => {
                    positions.insert(value.clone(), tokens.len());
                    tokens.push(FilterToken { value, label });
                }
            }
        }
    }

    tokens
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '\n' | ',' | '/' | '|' | ';' | '&')
}

/// Splits on runs of list delimiters and trims whitespace and hyphens from
/// each fragment's ends. Empty fragments are dropped.
pub(crate) fn split_cell(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(is_delimiter)
        .map(|fragment| fragment.trim_matches(|c: char| c.is_whitespace() || c == '-'))
        .filter(|fragment| !fragment.is_empty())
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn normalize_token(fragment: &str) -> String {
    collapse_whitespace(&fragment.to_lowercase())
}

/// Whitespace-collapsed fragment; shouting (`"TRAIL RUNNING"`) is recased
/// to `"Trail Running"`, anything else keeps the author's casing.
pub(crate) fn prettify_label(fragment: &str) -> String {
    let collapsed = collapse_whitespace(fragment);
    if collapsed == collapsed.to_uppercase() {
        title_case(&collapsed.to_lowercase())
    } else {
        collapsed
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Uppercases the first character of every word.
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_is_word = false;
    for c in value.chars() {
        let is_word = is_word_char(c);
        if is_word && !prev_is_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }
    out
}
