//! ``src/model/explorer_item.rs``
//! ============================================================================
//! # `ExplorerItem`: Display-Ready Item Records
//!
//! The item mapper converts raw [`EntryInfo`] records into the rows an
//! explorer view binds to, and synthesizes the one non-physical row: the
//! "go up" link to the parent folder. Items are immutable; every refresh
//! replaces the visible list wholesale.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytesize::ByteSize;
use chrono::{DateTime, Local, TimeZone};
use compact_str::CompactString;

use crate::fs::entry_info::EntryInfo;

/// Display name of the synthetic parent-folder link.
pub const PARENT_LINK_NAME: &str = "..";

/// One visible row of an explorer view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerItem {
    /// Shared absolute path; for the parent link this is the parent folder.
    pub path: Arc<PathBuf>,

    /// Row label.
    pub name: CompactString,

    /// Lower-case extension (physical files only).
    pub extension: Option<CompactString>,

    /// Byte length (0 for directories and synthetic rows).
    pub size: u64,

    /// Creation timestamp; epoch when unknown.
    pub created: SystemTime,

    pub is_dir: bool,

    /// True for rows backed by a real filesystem object; false for the
    /// synthetic "go up" link.
    pub is_physical: bool,

    /// False when the source entry was mapped best-effort.
    pub metadata_loaded: bool,
}

impl ExplorerItem {
    /// Map one raw storage entry to a display row.
    #[must_use]
    pub fn from_entry(entry: &EntryInfo) -> Self {
        Self {
            path: Arc::clone(&entry.path),
            name: entry.name.clone(),
            extension: entry.extension.clone(),
            size: entry.size,
            created: entry.created,
            is_dir: entry.is_dir,
            is_physical: true,
            metadata_loaded: entry.metadata_loaded,
        }
    }

    /// Synthesize the "go up" link for the given parent folder.
    #[must_use]
    pub fn parent_link(parent: &Path) -> Self {
        Self {
            path: Arc::new(parent.to_path_buf()),
            name: CompactString::const_new(PARENT_LINK_NAME),
            extension: None,
            size: 0,
            created: UNIX_EPOCH,
            is_dir: true,
            is_physical: false,
            metadata_loaded: false,
        }
    }

    /// Human-readable size string.
    #[inline]
    #[must_use]
    pub fn size_human(&self) -> String {
        ByteSize::b(self.size).to_string()
    }

    /// Format the creation date for display.
    #[expect(clippy::cast_possible_wrap, reason = "Expected")]
    #[must_use]
    pub fn format_date(&self, fmt: &str) -> String {
        let dur: Duration = self
            .created
            .duration_since(UNIX_EPOCH)
            .unwrap_or_else(|_| -> Duration { Duration::from_secs(0) });

        let dt: DateTime<Local> = Local
            .timestamp_opt(dur.as_secs() as i64, dur.subsec_nanos())
            .single()
            .unwrap_or_else(|| -> DateTime<Local> { Local::now() });

        dt.format(fmt).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, size: u64) -> EntryInfo {
        EntryInfo {
            path: Arc::new(PathBuf::from("/tmp").join(name)),
            size,
            created: UNIX_EPOCH + Duration::from_secs(86_400),
            name: CompactString::new(name),
            extension: name.rsplit_once('.').map(|(_, e)| CompactString::new(e)),
            is_dir: false,
            is_symlink: false,
            metadata_loaded: true,
        }
    }

    #[test]
    fn mapped_item_is_physical_and_keeps_identity() {
        let raw = entry("report.txt", 42);
        let item = ExplorerItem::from_entry(&raw);

        assert!(item.is_physical);
        assert_eq!(item.name, "report.txt");
        assert_eq!(item.size, 42);
        assert_eq!(*item.path, PathBuf::from("/tmp/report.txt"));
    }

    #[test]
    fn parent_link_is_synthetic() {
        let link = ExplorerItem::parent_link(Path::new("/tmp"));

        assert!(!link.is_physical);
        assert!(link.is_dir);
        assert_eq!(link.name, PARENT_LINK_NAME);
        assert_eq!(*link.path, PathBuf::from("/tmp"));
        assert_eq!(link.created, UNIX_EPOCH);
    }

    #[test]
    fn best_effort_entry_maps_with_epoch_date() {
        let raw = EntryInfo::best_effort(Path::new("/tmp/locked.bin"));
        let item = ExplorerItem::from_entry(&raw);

        assert!(item.is_physical);
        assert!(!item.metadata_loaded);
        assert_eq!(item.created, UNIX_EPOCH);
    }
}
