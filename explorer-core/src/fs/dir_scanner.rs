//! ``src/fs/dir_scanner.rs``
//!
//! # `Directory Scanner`: Asynchronous Folder Enumeration
//!
//! Lists a folder's entries without blocking the caller's loop. Entry-level
//! failures degrade the listing instead of aborting it; folder-level
//! failures surface to the caller. A `CancellationToken` supersedes stale
//! scans when the user navigates again mid-enumeration.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, ReadDir};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, trace};

use crate::error::AppError;
use crate::fs::entry_info::EntryInfo;

/// Scans the given directory and returns its entries in enumeration order.
///
/// # Arguments
/// * `path` - The directory to scan.
/// * `show_hidden` - Whether to include entries whose names start with '.'.
/// * `cancel` - Cancellation scope; a cancelled token yields `AppError::Cancelled`.
///
/// # Errors
/// `NotFound` or `PermissionDenied` when the folder itself cannot be read;
/// unreadable individual entries are mapped best-effort instead.
#[instrument(level = "debug", skip(cancel), fields(dir = %path.display()))]
pub async fn scan_dir(
    path: &Path,
    show_hidden: bool,
    cancel: &CancellationToken,
) -> Result<Vec<EntryInfo>, AppError> {
    if cancel.is_cancelled() {
        return Err(AppError::Cancelled);
    }

    let mut read_dir: ReadDir = fs::read_dir(path)
        .await
        .map_err(|e: io::Error| AppError::from_folder_io(path, e))?;

    let mut entries: Vec<EntryInfo> = Vec::new();

    loop {
        let next = tokio::select! {
            () = cancel.cancelled() => return Err(AppError::Cancelled),
            next = read_dir.next_entry() => next,
        };

        let Some(entry) = next.map_err(|e: io::Error| AppError::from_folder_io(path, e))? else {
            break;
        };

        let entry_path: PathBuf = entry.path();

        if !show_hidden && is_hidden(&entry_path) {
            continue;
        }

        match EntryInfo::from_path_async(&entry_path).await {
            Ok(info) => {
                trace!("scan_dir: added entry {}", info.name);
                entries.push(info);
            }

            Err(e) if e.is_permission_denied() => {
                debug!("scan_dir: best-effort entry for {:?}: {}", entry_path, e);
                entries.push(EntryInfo::best_effort(&entry_path));
            }

            Err(e) => {
                // Entry vanished between readdir and stat; skip it.
                debug!("scan_dir: skipping {:?}: {}", entry_path, e);
            }
        }
    }

    trace!("scan_dir: total entries = {}", entries.len());
    Ok(entries)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|name: &str| name.starts_with('.'))
}
