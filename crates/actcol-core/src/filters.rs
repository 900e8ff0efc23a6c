//! Filter categories, option catalog, and brand matching.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::brand::Brand;
use crate::tokens::{brand_tokens, normalize_token, FilterToken};

/// A selectable option in the filter panel.
pub type FilterOption = FilterToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterId {
    Regions,
    Shipping,
    Activity,
    Gender,
    Price,
    Values,
}

impl FilterId {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FilterId::Regions => "regions",
            FilterId::Shipping => "shipping",
            FilterId::Activity => "activity",
            FilterId::Gender => "gender",
            FilterId::Price => "price",
            FilterId::Values => "values",
        }
    }
}

impl std::fmt::Display for FilterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FILTER_CATEGORIES
            .iter()
            .map(|c| c.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown filter category '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterCategory {
    pub id: FilterId,
    pub label: &'static str,
    /// Candidate sheet headers, in lookup order.
    pub column_keys: &'static [&'static str],
}

pub const FILTER_CATEGORIES: &[FilterCategory] = &[
    FilterCategory {
        id: FilterId::Regions,
        label: "Region",
        column_keys: &["Region", "Regions", "Location", "Country"],
    },
    FilterCategory {
        id: FilterId::Shipping,
        label: "Shipping",
        column_keys: &["Shipping", "Ships To", "Shipping Regions"],
    },
    FilterCategory {
        id: FilterId::Activity,
        label: "Activity",
        column_keys: &["Activity", "Activities", "Made For"],
    },
    FilterCategory {
        id: FilterId::Gender,
        label: "Gender",
        column_keys: &["Gender", "Genders"],
    },
    FilterCategory {
        id: FilterId::Price,
        label: "Price",
        column_keys: &["Price", "Price Point"],
    },
    FilterCategory {
        id: FilterId::Values,
        label: "Values",
        column_keys: &["Values", "Value Props", "Value Proposition"],
    },
];

/// Static category definition for `id`. The table is ordered by `FilterId`
/// declaration order.
#[must_use]
pub fn category(id: FilterId) -> &'static FilterCategory {
    &FILTER_CATEGORIES[id as usize]
}

pub type FilterOptionsMap = BTreeMap<FilterId, Vec<FilterOption>>;

/// Chosen values per category. Categories with no values impose no
/// constraint; an empty selection matches every brand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedFilters(BTreeMap<FilterId, BTreeSet<String>>);

impl SelectedFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: FilterId, value: impl Into<String>) {
        self.0.entry(id).or_default().insert(value.into());
    }

    #[must_use]
    pub fn with(mut self, id: FilterId, values: &[&str]) -> Self {
        for value in values {
            self.select(id, *value);
        }
        self
    }

    /// Builds a selection from `category` / comma-separated value pairs as
    /// they arrive on a query string or command line. Values are normalized
    /// the way sheet tokens are, so `"Trail  Running"` selects `trail running`.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first unknown category.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut selected = Self::new();
        for (key, raw) in pairs {
            let id: FilterId = key.trim().parse()?;
            for value in raw.split(',').map(normalize_token) {
                if !value.is_empty() {
                    selected.select(id, value);
                }
            }
        }
        Ok(selected)
    }

    #[must_use]
    pub fn values(&self, id: FilterId) -> Option<&BTreeSet<String>> {
        self.0.get(&id)
    }

    /// Number of selected values across all categories.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

/// Every option present across `brands`, per category, sorted by label.
#[must_use]
pub fn build_filter_options(brands: &[Brand]) -> FilterOptionsMap {
    let mut collected: BTreeMap<FilterId, (Vec<FilterOption>, HashMap<String, usize>)> =
        BTreeMap::new();

    for brand in brands {
        for category in FILTER_CATEGORIES {
            let (options, positions) = collected.entry(category.id).or_default();
            for token in brand_tokens(brand, category) {
                match positions.get(&token.value) {
                    Some(&index) => options[index].label = token.label,
                    None => {
                        positions.insert(token.value.clone(), options.len());
                        options.push(token);
                    }
                }
            }
        }
    }

    FILTER_CATEGORIES
        .iter()
        .map(|category| {
            let mut options = collected
                .remove(&category.id)
                .map(|(options, _)| options)
                .unwrap_or_default();
            options.sort_by(|a, b| locale_compare(&a.label, &b.label));
            (category.id, options)
        })
        .collect()
}

/// AND across categories with a selection, OR within each category.
#[must_use]
pub fn brand_matches_selected(brand: &Brand, selected: &SelectedFilters) -> bool {
    FILTER_CATEGORIES.iter().all(|category| {
        let Some(wanted) = selected.values(category.id).filter(|v| !v.is_empty()) else {
            return true;
        };
        brand_tokens(brand, category)
            .iter()
            .any(|token| wanted.contains(&token.value))
    })
}

/// Dictionary-style label ordering in the manner of a root-locale collator.
///
/// Labels compare first on their base letters (case and accents removed),
/// then unaccented before accented, then lowercase before uppercase, and
/// finally by code point.
pub(crate) fn locale_compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => Ordering::Equal,
                })
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.cmp(b))
}

/// Lowercase base letters: canonical decomposition with combining marks dropped.
fn primary_key(label: &str) -> impl Iterator<Item = char> + '_ {
    label
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Combining marks per base letter; a bare letter sorts before the same letter with marks.
fn accent_key(label: &str) -> Vec<Vec<char>> {
    let mut keys: Vec<Vec<char>> = Vec::new();
    for c in label.nfd() {
        match keys.last_mut() {
            Some(marks) if is_combining_mark(c) => marks.push(c),
            _ => keys.push(Vec::new()),
        }
    }
    keys
}

#[cfg(test)]
#[path = "filters_test.rs"]
mod tests;
