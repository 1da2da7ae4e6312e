//! ``src/model/nav_history.rs``
//! ============================================================================
//! # `NavigationHistory`: Visited-Folder Sequence with Cursor
//!
//! Standard browser-history semantics: a new navigation from a non-tip
//! cursor position discards the forward tail; moving the cursor with
//! back/forward keeps skipped entries reachable until then.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::AppError;

/// Which history boundary an exhausted move ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Back,
    Forward,
}

impl std::fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Back => write!(f, "backward"),
            Self::Forward => write!(f, "forward"),
        }
    }
}

/// Visited folders with a current-position cursor.
#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    entries: Vec<Arc<PathBuf>>,
    cursor: Option<usize>,
}

impl NavigationHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a folder as the new current position.
    ///
    /// Re-recording the folder already under the cursor is a no-op, so the
    /// refresh pipeline can record its target unconditionally without
    /// clobbering a back/forward move.
    pub fn set_current(&mut self, folder: Arc<PathBuf>) {
        if self.current() == Some(&folder) {
            return;
        }

        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }

        self.entries.push(folder);
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Move the cursor one step back.
    pub fn back(&mut self) -> Result<Arc<PathBuf>, AppError> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                Ok(Arc::clone(&self.entries[cursor - 1]))
            }
            _ => Err(AppError::NoHistory(HistoryDirection::Back)),
        }
    }

    /// Move the cursor one step forward.
    pub fn forward(&mut self) -> Result<Arc<PathBuf>, AppError> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                Ok(Arc::clone(&self.entries[cursor + 1]))
            }
            _ => Err(AppError::NoHistory(HistoryDirection::Forward)),
        }
    }

    /// The folder under the cursor, if any navigation happened yet.
    #[must_use]
    pub fn current(&self) -> Option<&Arc<PathBuf>> {
        self.cursor.map(|c| &self.entries[c])
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Arc<PathBuf> {
        Arc::new(PathBuf::from(s))
    }

    #[test]
    fn empty_history_has_no_moves() {
        let mut history = NavigationHistory::new();

        assert!(history.current().is_none());
        assert!(matches!(
            history.back(),
            Err(AppError::NoHistory(HistoryDirection::Back))
        ));
        assert!(matches!(
            history.forward(),
            Err(AppError::NoHistory(HistoryDirection::Forward))
        ));
    }

    #[test]
    fn back_returns_previous_folder() {
        let mut history = NavigationHistory::new();
        history.set_current(p("/a"));
        history.set_current(p("/b"));

        let target = history.back().unwrap();
        assert_eq!(*target, PathBuf::from("/a"));
        assert_eq!(history.current(), Some(&p("/a")));
    }

    #[test]
    fn new_navigation_discards_forward_tail() {
        let mut history = NavigationHistory::new();
        history.set_current(p("/a"));
        history.set_current(p("/b"));
        history.back().unwrap();

        history.set_current(p("/c"));

        assert!(matches!(
            history.forward(),
            Err(AppError::NoHistory(HistoryDirection::Forward))
        ));
        assert_eq!(history.back().unwrap(), p("/a"));
        assert_eq!(history.forward().unwrap(), p("/c"));
    }

    #[test]
    fn forward_retraces_after_back() {
        let mut history = NavigationHistory::new();
        history.set_current(p("/a"));
        history.set_current(p("/b"));
        history.set_current(p("/c"));

        history.back().unwrap();
        history.back().unwrap();
        assert_eq!(history.current(), Some(&p("/a")));

        assert_eq!(history.forward().unwrap(), p("/b"));
        assert_eq!(history.forward().unwrap(), p("/c"));
        assert!(!history.can_go_forward());
    }

    #[test]
    fn re_recording_cursor_target_is_a_no_op() {
        let mut history = NavigationHistory::new();
        history.set_current(p("/a"));
        history.set_current(p("/b"));
        history.back().unwrap();

        // The refresh pipeline records its target after a back move.
        history.set_current(p("/a"));

        assert!(history.can_go_forward());
        assert_eq!(history.forward().unwrap(), p("/b"));
    }

    #[test]
    fn boundary_flags_track_cursor() {
        let mut history = NavigationHistory::new();
        assert!(!history.can_go_back());

        history.set_current(p("/a"));
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());

        history.set_current(p("/b"));
        assert!(history.can_go_back());

        history.back().unwrap();
        assert!(history.can_go_forward());
        assert!(!history.can_go_back());
    }
}
