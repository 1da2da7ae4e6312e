pub mod error;

pub mod config;

pub mod logging;

pub mod fs {
    pub mod dir_scanner;

    pub mod entry_info;
    pub use entry_info::EntryInfo;

    pub mod locations;
}

pub mod model {
    pub mod explorer_item;
    pub use explorer_item::ExplorerItem;

    pub mod nav_history;
    pub use nav_history::{HistoryDirection, NavigationHistory};

    pub mod filter_sort;
    pub use filter_sort::{FilterOptions, SortMethod};

    pub mod explorer_state;
    pub use explorer_state::{ExplorerEvent, ExplorerState};
}

pub mod controller {
    pub mod actions;
    pub use actions::Action;

    pub mod dispatcher;
    pub use dispatcher::{ActionDispatcher, ActionMatcher, DispatchResult};
}

pub use error::AppError;

pub use model::{
    explorer_state::{ExplorerEvent, ExplorerState},
    filter_sort::{FilterOptions, SortMethod},
    nav_history::NavigationHistory,
};
