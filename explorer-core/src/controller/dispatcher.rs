//! src/controller/dispatcher.rs
//! ============================================================================
//! # Dispatcher: Action Routing
//!
//! Matcher-based dispatch: each dispatcher declares which actions it can
//! handle, and the composed [`ActionDispatcher`] routes an action to the
//! first matcher that claims it, highest priority first. Adding a new
//! command family means adding a matcher, not growing a central switch.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::controller::actions::Action;
use crate::error::AppError;
use crate::model::explorer_state::ExplorerState;

/// Outcome of handing an action to a matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    Handled,
    NotHandled,
}

/// Routing priority; higher handles first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ActionPriority {
    Normal,
    High,
}

/// One family of commands.
#[async_trait]
pub trait ActionMatcher: Send + Sync {
    fn can_handle(&self, action: &Action) -> bool;

    async fn handle(
        &self,
        state: &mut ExplorerState,
        action: Action,
    ) -> Result<DispatchResult, AppError>;

    fn priority(&self) -> ActionPriority;

    fn name(&self) -> &'static str;
}

/// Folder-changing commands; these touch the filesystem.
pub struct NavigationDispatcher;

#[async_trait]
impl ActionMatcher for NavigationDispatcher {
    fn can_handle(&self, action: &Action) -> bool {
        matches!(
            action,
            Action::NavigateTo(_)
                | Action::GoToParent
                | Action::GoBack
                | Action::GoForward
                | Action::Refresh
        )
    }

    async fn handle(
        &self,
        state: &mut ExplorerState,
        action: Action,
    ) -> Result<DispatchResult, AppError> {
        match action {
            Action::NavigateTo(path) => state.set_current_folder(&path).await?,
            Action::GoToParent => state.navigate_up().await?,
            Action::GoBack => state.navigate_back().await?,
            Action::GoForward => state.navigate_forward().await?,
            Action::Refresh => state.refresh().await?,
            _ => return Ok(DispatchResult::NotHandled),
        }

        Ok(DispatchResult::Handled)
    }

    fn priority(&self) -> ActionPriority {
        ActionPriority::High
    }

    fn name(&self) -> &'static str {
        "navigation"
    }
}

/// Projection and selection commands; in-memory only.
pub struct ViewDispatcher;

#[async_trait]
impl ActionMatcher for ViewDispatcher {
    fn can_handle(&self, action: &Action) -> bool {
        matches!(
            action,
            Action::Sort(_)
                | Action::Filter(_)
                | Action::ClearFilter
                | Action::SelectIndex(_)
                | Action::ToggleSelected(_)
                | Action::TypeChar(_)
                | Action::NoOp
        )
    }

    async fn handle(
        &self,
        state: &mut ExplorerState,
        action: Action,
    ) -> Result<DispatchResult, AppError> {
        match action {
            Action::Sort(method) => state.sort(method),
            Action::Filter(options) => state.set_filter(options),
            Action::ClearFilter => state.clear_filter(),
            Action::SelectIndex(index) => {
                if !state.select_index(index) {
                    debug!("select index {index} out of bounds");
                }
            }
            Action::ToggleSelected(index) => {
                if !state.toggle_selected(index) {
                    debug!("toggle index {index} out of bounds");
                }
            }
            Action::TypeChar(c) => state.type_char(c),
            Action::NoOp => {}
            _ => return Ok(DispatchResult::NotHandled),
        }

        Ok(DispatchResult::Handled)
    }

    fn priority(&self) -> ActionPriority {
        ActionPriority::Normal
    }

    fn name(&self) -> &'static str {
        "view"
    }
}

/// Composed dispatcher routing actions onto one explorer view.
pub struct ActionDispatcher {
    matchers: Vec<Box<dyn ActionMatcher>>,
}

impl ActionDispatcher {
    /// Build the default command bindings.
    #[must_use]
    pub fn with_default_bindings() -> Self {
        Self::from_matchers(vec![
            Box::new(NavigationDispatcher),
            Box::new(ViewDispatcher),
        ])
    }

    #[must_use]
    pub fn from_matchers(mut matchers: Vec<Box<dyn ActionMatcher>>) -> Self {
        matchers.sort_by_key(|m| std::cmp::Reverse(m.priority()));
        Self { matchers }
    }

    /// Route one action to the first matcher that claims it.
    pub async fn dispatch(
        &self,
        state: &mut ExplorerState,
        action: Action,
    ) -> Result<DispatchResult, AppError> {
        for matcher in &self.matchers {
            if matcher.can_handle(&action) {
                debug!("dispatching {:?} via '{}'", action, matcher.name());
                return matcher.handle(state, action).await;
            }
        }

        warn!("no matcher for {:?}", action);
        Ok(DispatchResult::NotHandled)
    }
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self::with_default_bindings()
    }
}
