//! ``src/model/explorer_state.rs``
//! ============================================================================
//! # `ExplorerState`: Aggregate Explorer View State
//!
//! One instance per open explorer view. Owns the current folder, the cached
//! raw item set, the visible projection, selection, typed-ahead buffer,
//! busy flag, and the navigation history. A folder change runs the full
//! pipeline: enumerate, map, inject the parent link, project through the
//! active filter/sort, recompute selection. Filter and sort changes re-run
//! only the projection over the cached raw set.
//!
//! State changes are published as [`ExplorerEvent`]s over unbounded
//! channels handed out by [`ExplorerState::subscribe`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use smallvec::SmallVec;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::error::AppError;
use crate::fs::dir_scanner::scan_dir;
use crate::fs::entry_info::EntryInfo;
use crate::fs::locations::quick_access_roots;
use crate::model::explorer_item::ExplorerItem;
use crate::model::filter_sort::{self, FilterOptions, SortMethod};
use crate::model::nav_history::NavigationHistory;

/// State-change notification published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerEvent {
    FolderChanged(Arc<PathBuf>),
    ItemsChanged,
    SelectionChanged,
    BusyChanged(bool),
}

/// Aggregate state of one explorer view.
#[derive(Debug)]
pub struct ExplorerState {
    current_folder: Option<Arc<PathBuf>>,

    /// Quick-access roots shown in the location list.
    locations: Vec<Arc<PathBuf>>,

    /// Mapped physical items in enumeration order; the projection source.
    raw_entries: Vec<ExplorerItem>,

    /// Visible projection, parent link included.
    items: Vec<ExplorerItem>,

    /// Highlight index into `items`; member of the list or `None`.
    selected: Option<usize>,

    /// Multi-select indexes into `items`; cleared on every replacement.
    selected_items: SmallVec<[usize; 8]>,

    /// Path to restore as the highlight after the next replacement.
    remembered: Option<Arc<PathBuf>>,

    /// Accumulated type-ahead characters; cleared on every replacement.
    typed_text: String,

    filter: FilterOptions,
    sort: Option<SortMethod>,
    show_hidden: bool,
    is_busy: bool,

    history: NavigationHistory,

    /// One active cancellation scope per in-flight enumeration,
    /// superseded on re-navigation.
    scan_cancel: CancellationToken,

    subscribers: Vec<UnboundedSender<ExplorerEvent>>,
}

impl ExplorerState {
    #[must_use]
    pub fn new(show_hidden: bool) -> Self {
        Self {
            current_folder: None,
            locations: Vec::new(),
            raw_entries: Vec::new(),
            items: Vec::new(),
            selected: None,
            selected_items: SmallVec::new(),
            remembered: None,
            typed_text: String::new(),
            filter: FilterOptions::default(),
            sort: None,
            show_hidden,
            is_busy: false,
            history: NavigationHistory::new(),
            scan_cancel: CancellationToken::new(),
            subscribers: Vec::new(),
        }
    }

    /// Discover quick-access roots and open the start folder, defaulting
    /// to the first root.
    #[instrument(level = "info", skip(self, start))]
    pub async fn initialize(&mut self, start: Option<PathBuf>) -> Result<(), AppError> {
        self.locations = quick_access_roots();

        let target: PathBuf = match start {
            Some(path) => path,
            None => self
                .locations
                .first()
                .map(|root| root.as_ref().clone())
                .ok_or_else(|| AppError::Other("no quick-access roots available".to_string()))?,
        };

        self.set_current_folder(&target).await
    }

    // ------------------------------------------------------------
    // Observable surface
    // ------------------------------------------------------------

    /// Hand out an event stream. Closed receivers are pruned on emit.
    pub fn subscribe(&mut self) -> UnboundedReceiver<ExplorerEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    #[must_use]
    pub fn current_folder(&self) -> Option<&Arc<PathBuf>> {
        self.current_folder.as_ref()
    }

    #[must_use]
    pub fn items(&self) -> &[ExplorerItem] {
        &self.items
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&ExplorerItem> {
        self.selected.and_then(|idx| self.items.get(idx))
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Multi-selected items, in toggle order.
    #[must_use]
    pub fn selected_items(&self) -> Vec<&ExplorerItem> {
        self.selected_items
            .iter()
            .filter_map(|&idx| self.items.get(idx))
            .collect()
    }

    /// More than one item selected, all physical.
    #[must_use]
    pub fn can_group(&self) -> bool {
        let selected = self.selected_items();
        selected.len() > 1 && selected.iter().all(|item| item.is_physical)
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.is_busy
    }

    #[must_use]
    pub fn filter(&self) -> &FilterOptions {
        &self.filter
    }

    #[must_use]
    pub const fn sort_method(&self) -> Option<SortMethod> {
        self.sort
    }

    #[must_use]
    pub fn locations(&self) -> &[Arc<PathBuf>] {
        &self.locations
    }

    /// Replace the quick-access roots (embedders with custom roots).
    pub fn set_locations(&mut self, locations: Vec<Arc<PathBuf>>) {
        self.locations = locations;
    }

    /// The quick-access root the current folder lives under, if any.
    #[must_use]
    pub fn selected_location(&self) -> Option<&Arc<PathBuf>> {
        let current = self.current_folder.as_ref()?;
        self.locations
            .iter()
            .find(|root| current.starts_with(root.as_path()))
    }

    #[must_use]
    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    /// Handle for cancelling the in-flight enumeration from outside.
    #[must_use]
    pub fn cancel_handle(&self) -> CancellationToken {
        self.scan_cancel.clone()
    }

    /// Takes effect on the next enumeration.
    pub fn set_show_hidden(&mut self, show_hidden: bool) {
        self.show_hidden = show_hidden;
    }

    // ------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------

    /// Switch to `folder`, recording it in the navigation history.
    ///
    /// # Errors
    /// `NotFound` when the folder vanished, `PermissionDenied` when it
    /// cannot be listed. The previous state is left unchanged on any
    /// error; there is no partial folder switch.
    pub async fn set_current_folder(&mut self, folder: &Path) -> Result<(), AppError> {
        self.refresh_folder(folder, true).await
    }

    /// Re-enumerate the current folder without touching the history.
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        let Some(current) = self.current_folder.as_ref().map(|f| f.as_ref().clone()) else {
            return Ok(());
        };

        self.refresh_folder(&current, false).await
    }

    /// Navigate to the current folder's parent; no-op at a root. The
    /// folder navigated out of becomes the highlight in the parent's
    /// listing.
    pub async fn navigate_up(&mut self) -> Result<(), AppError> {
        let Some(current) = self.current_folder.clone() else {
            return Ok(());
        };

        match current.parent() {
            Some(parent) => {
                let parent = parent.to_path_buf();
                self.remembered = Some(Arc::clone(&current));
                self.set_current_folder(&parent).await
            }
            None => {
                debug!("navigate_up: already at a root");
                Ok(())
            }
        }
    }

    /// Move one step back in the history and re-enumerate the target.
    /// The cursor is restored if the target cannot be opened anymore.
    pub async fn navigate_back(&mut self) -> Result<(), AppError> {
        let target = self.history.back()?;

        match self.refresh_folder(&target, true).await {
            Ok(()) => Ok(()),
            Err(e) => {
                let _ = self.history.forward();
                Err(e)
            }
        }
    }

    /// Move one step forward in the history and re-enumerate the target.
    pub async fn navigate_forward(&mut self) -> Result<(), AppError> {
        let target = self.history.forward()?;

        match self.refresh_folder(&target, true).await {
            Ok(()) => Ok(()),
            Err(e) => {
                let _ = self.history.back();
                Err(e)
            }
        }
    }

    #[instrument(level = "info", skip(self, folder), fields(folder = %folder.display()))]
    async fn refresh_folder(&mut self, folder: &Path, record_history: bool) -> Result<(), AppError> {
        // Busy spans the whole filesystem-touching operation so the UI
        // can suppress interaction; previous state survives any error.
        self.set_busy(true);
        let result = self.load_folder(folder, record_history).await;
        self.set_busy(false);

        result
    }

    async fn load_folder(&mut self, folder: &Path, record_history: bool) -> Result<(), AppError> {
        let meta = tokio::fs::metadata(folder)
            .await
            .map_err(|e| AppError::from_folder_io(folder, e))?;

        if !meta.is_dir() {
            return Err(AppError::NotFound(folder.to_path_buf()));
        }

        // Supersede whatever scan is still in flight from an abandoned
        // navigation; last navigation wins.
        self.scan_cancel.cancel();
        let cancel = CancellationToken::new();
        self.scan_cancel = cancel.clone();

        let target = folder.to_path_buf();
        let show_hidden = self.show_hidden;
        let scan =
            tokio::spawn(async move { scan_dir(&target, show_hidden, &cancel).await });

        let entries: Vec<EntryInfo> = match scan.await {
            Ok(result) => result?,
            Err(join_error) => {
                return Err(AppError::Other(format!(
                    "enumeration task failed: {join_error}"
                )));
            }
        };

        info!("loaded {} entries", entries.len());

        let folder = Arc::new(folder.to_path_buf());
        self.raw_entries = entries.iter().map(ExplorerItem::from_entry).collect();
        self.current_folder = Some(Arc::clone(&folder));

        if record_history {
            self.history.set_current(Arc::clone(&folder));
        }

        self.emit(ExplorerEvent::FolderChanged(folder));
        self.rebuild_projection();

        Ok(())
    }

    // ------------------------------------------------------------
    // Projection
    // ------------------------------------------------------------

    /// Apply new filter criteria over the cached raw set. Never touches
    /// the filesystem, never fails.
    pub fn set_filter(&mut self, options: FilterOptions) {
        self.filter = options;
        self.rebuild_projection();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(FilterOptions::default());
    }

    /// Re-order the visible physical items; the parent link stays pinned
    /// on top, outside the comparison.
    pub fn sort(&mut self, method: SortMethod) {
        self.sort = Some(method);
        self.rebuild_projection();
    }

    fn rebuild_projection(&mut self) {
        // Remember the highlight so the replacement list can restore it,
        // unless a caller already planted a target.
        if self.remembered.is_none() {
            self.remembered = self.selected_item().map(|item| Arc::clone(&item.path));
        }

        let mut visible = filter_sort::apply(&self.raw_entries, &self.filter, self.sort);

        if let Some(folder) = &self.current_folder
            && let Some(parent) = folder.parent()
        {
            visible.insert(0, ExplorerItem::parent_link(parent));
        }

        self.items = visible;
        self.typed_text.clear();
        self.selected_items.clear();
        self.emit(ExplorerEvent::ItemsChanged);
        self.recompute_selection();
    }

    /// Highlight policy after any list replacement: the remembered path
    /// when still present, else the first physical item, else the parent
    /// link, else nothing.
    fn recompute_selection(&mut self) {
        let remembered = self.remembered.take();

        let mut selected = remembered
            .and_then(|path| self.items.iter().position(|item| item.path == path));

        if selected.is_none() {
            selected = self
                .items
                .iter()
                .position(|item| item.is_physical)
                .or_else(|| (!self.items.is_empty()).then_some(0));
        }

        self.selected = selected;
        self.emit(ExplorerEvent::SelectionChanged);
    }

    // ------------------------------------------------------------
    // Selection and type-ahead
    // ------------------------------------------------------------

    /// Highlight the item at `index`. Returns false when out of bounds.
    pub fn select_index(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }

        if self.selected != Some(index) {
            self.selected = Some(index);
            self.emit(ExplorerEvent::SelectionChanged);
        }

        true
    }

    /// Highlight the item with the given path, if visible.
    pub fn select_path(&mut self, path: &Path) -> bool {
        match self.items.iter().position(|item| item.path.as_path() == path) {
            Some(idx) => self.select_index(idx),
            None => false,
        }
    }

    /// Toggle `index` in the multi-select set. Returns false when out of
    /// bounds.
    pub fn toggle_selected(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }

        if let Some(pos) = self.selected_items.iter().position(|&i| i == index) {
            self.selected_items.remove(pos);
        } else {
            self.selected_items.push(index);
        }

        self.emit(ExplorerEvent::SelectionChanged);
        true
    }

    /// Accumulate one type-ahead character and highlight the first item
    /// whose name starts with the buffer, case-insensitively. The buffer
    /// resets on every list replacement.
    pub fn type_char(&mut self, c: char) {
        self.typed_text.push(c);
        let needle = self.typed_text.to_lowercase();

        if let Some(idx) = self
            .items
            .iter()
            .position(|item| item.name.to_lowercase().starts_with(needle.as_str()))
            && self.selected != Some(idx)
        {
            self.selected = Some(idx);
            self.emit(ExplorerEvent::SelectionChanged);
        }
    }

    #[must_use]
    pub fn typed_text(&self) -> &str {
        &self.typed_text
    }

    // ------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------

    fn set_busy(&mut self, busy: bool) {
        if self.is_busy != busy {
            self.is_busy = busy;
            self.emit(ExplorerEvent::BusyChanged(busy));
        }
    }

    fn emit(&mut self, event: ExplorerEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::new(false)
    }
}
