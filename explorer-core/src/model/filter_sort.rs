//! ``src/model/filter_sort.rs``
//! ============================================================================
//! # Filter/Sort Engine
//!
//! Pure projection from the cached raw item set to the visible ordered set.
//! Never touches the filesystem, never mutates its inputs, and is
//! idempotent by construction. Only physical items flow through here; the
//! synthetic parent link is injected by the aggregate afterwards.

use std::cmp::Ordering;

use compact_str::CompactString;

use crate::model::explorer_item::ExplorerItem;

/// Ordering applied to the visible item set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMethod {
    ByDateAsc,
    ByDateDesc,
    ByNameAsc,
    ByNameDesc,
}

impl std::fmt::Display for SortMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s: &'_ str = match self {
            Self::ByDateAsc => "date_asc",
            Self::ByDateDesc => "date_desc",
            Self::ByNameAsc => "name_asc",
            Self::ByNameDesc => "name_desc",
        };

        write!(f, "{s}")
    }
}

/// Transient projection criteria; narrows the visible set, never the
/// underlying folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Case-insensitive name substring.
    pub name_contains: Option<String>,

    /// Lower-case extension set; empty matches any. Directories always
    /// pass this criterion so they stay navigable while filtering files.
    pub extensions: Vec<CompactString>,
}

impl FilterOptions {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name_contains.is_none() && self.extensions.is_empty()
    }

    #[must_use]
    pub fn matches(&self, item: &ExplorerItem) -> bool {
        if let Some(needle) = &self.name_contains
            && !item
                .name
                .to_lowercase()
                .contains(needle.to_lowercase().as_str())
        {
            return false;
        }

        if !self.extensions.is_empty() && !item.is_dir {
            let Some(ext) = &item.extension else {
                return false;
            };

            if !self.extensions.iter().any(|e| e == ext) {
                return false;
            }
        }

        true
    }
}

/// Project the raw item set through the active filter and sort.
///
/// The input slice is expected in enumeration order; a stable sort keeps
/// that order as the tiebreak. Passing `sort = None` preserves enumeration
/// order outright.
#[must_use]
pub fn apply(
    items: &[ExplorerItem],
    filter: &FilterOptions,
    sort: Option<SortMethod>,
) -> Vec<ExplorerItem> {
    let mut visible: Vec<ExplorerItem> = items
        .iter()
        .filter(|item| item.is_physical && filter.matches(item))
        .cloned()
        .collect();

    if let Some(method) = sort {
        sort_items(&mut visible, method);
    }

    visible
}

fn sort_items(items: &mut [ExplorerItem], method: SortMethod) {
    match method {
        SortMethod::ByDateAsc => {
            items.sort_by(|a: &ExplorerItem, b: &ExplorerItem| -> Ordering {
                a.created.cmp(&b.created)
            });
        }

        SortMethod::ByDateDesc => {
            items.sort_by(|a: &ExplorerItem, b: &ExplorerItem| -> Ordering {
                b.created.cmp(&a.created)
            });
        }

        SortMethod::ByNameAsc => {
            items.sort_by(|a: &ExplorerItem, b: &ExplorerItem| -> Ordering {
                fold_name(a).cmp(&fold_name(b))
            });
        }

        SortMethod::ByNameDesc => {
            items.sort_by(|a: &ExplorerItem, b: &ExplorerItem| -> Ordering {
                fold_name(b).cmp(&fold_name(a))
            });
        }
    }
}

// Locale-independent case folding; byte order over the folded form keeps
// comparisons stable across environments.
fn fold_name(item: &ExplorerItem) -> String {
    item.name.to_lowercase().to_string()
}
