//! src/controller/actions.rs
//! ============================================================================
//! # Actions: Centralized Explorer Commands
//!
//! Defines the `Action` enum, which represents the user-issued commands an
//! explorer view responds to. This is the single interface the dispatcher
//! routes; the UI layer translates raw input into these variants.

use std::path::PathBuf;

use crate::model::filter_sort::{FilterOptions, SortMethod};

/// A high-level command against one explorer view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Drop the active filter.
    ClearFilter,

    /// Apply filter criteria to the visible projection.
    Filter(FilterOptions),

    /// Go back in the navigation history.
    GoBack,

    /// Go forward in the navigation history.
    GoForward,

    /// Go to the current folder's parent.
    GoToParent,

    /// Navigate to the specified folder.
    NavigateTo(PathBuf),

    /// No operation. Used when an event is consumed but no state change
    /// is needed.
    NoOp,

    /// Re-enumerate the current folder.
    Refresh,

    /// Highlight the item at an index.
    SelectIndex(usize),

    /// Re-order the visible items.
    Sort(SortMethod),

    /// Toggle an index in the multi-select set.
    ToggleSelected(usize),

    /// Accumulate one type-ahead character.
    TypeChar(char),
}
