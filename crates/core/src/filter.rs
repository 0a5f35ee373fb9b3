//! Storefront category filter.
//!
//! Holds the selected category and hands out a [`Selection`] for every
//! change. The storefront fetches products for that selection and applies
//! the result only while the selection is still current, so out-of-order
//! responses from quick successive switches never win over the latest one.

use std::fmt;

/// Sentinel values the storefront treats as "no filter".
const ALL_SENTINELS: &[&str] = &["All", "all", "الكل"];

/// The selected category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Every product.
    #[default]
    All,
    /// Products whose category has this name.
    Named(String),
}

impl CategoryFilter {
    /// Build a filter from an optional request parameter.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            None | Some("") => Self::All,
            Some(name) if ALL_SENTINELS.contains(&name) => Self::All,
            Some(name) => Self::Named(name.to_owned()),
        }
    }

    /// Value for the `?category=` query parameter; `None` means omit it.
    #[must_use]
    pub fn query_param(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Named(name) => Some(name),
        }
    }

    /// Heading for the product grid.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::All => "All products".to_string(),
            Self::Named(name) => format!("Products: {name}"),
        }
    }

    /// Whether the category button for `name` (`None` for "All") is active.
    #[must_use]
    pub fn is_selected(&self, name: Option<&str>) -> bool {
        self.query_param() == name
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// A ticket for one product fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub generation: u64,
    pub filter: CategoryFilter,
}

/// Current filter plus a generation counter bumped on every selection.
#[derive(Debug, Clone, Default)]
pub struct CategorySelection {
    current: CategoryFilter,
    generation: u64,
}

impl CategorySelection {
    /// Starts on [`CategoryFilter::All`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn current(&self) -> &CategoryFilter {
        &self.current
    }

    /// Select a category. Re-selecting the same category still yields a
    /// fresh ticket: every selection is a new fetch.
    pub fn select(&mut self, filter: CategoryFilter) -> Selection {
        self.generation = self.generation.wrapping_add(1);
        self.current = filter;
        self.ticket()
    }

    /// A ticket for the current selection without changing it.
    #[must_use]
    pub fn ticket(&self) -> Selection {
        Selection {
            generation: self.generation,
            filter: self.current.clone(),
        }
    }

    /// Whether results fetched for `selection` may still be shown.
    #[must_use]
    pub fn is_current(&self, selection: &Selection) -> bool {
        selection.generation == self.generation
    }
}
