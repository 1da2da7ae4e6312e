//! `src/fs/entry_info.rs`
//! ============================================================
//! Raw storage entry metadata for the explorer core.
//!
//! `EntryInfo` is what the directory scanner hands to the item mapper:
//! one record per filesystem object, built from a single `stat` call.
//! Entries whose metadata cannot be read (permission denied) are built
//! best-effort instead of failing the whole listing.

use std::sync::Arc;

use std::path::{Path, PathBuf};

use std::ffi::OsStr;

use std::fs::{self, FileType, Metadata};

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use compact_str::CompactString;

use bytesize::ByteSize;

use chrono::{DateTime, Local, TimeZone};

use tokio::fs as tokio_fs;

use crate::error::AppError;

/// Metadata snapshot of one filesystem object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Shared absolute path.
    pub path: Arc<PathBuf>,

    /// Byte length (0 for directories).
    pub size: u64,

    /// Creation timestamp; `UNIX_EPOCH` when the filesystem cannot
    /// report one.
    pub created: SystemTime,

    /// File or directory name.
    pub name: CompactString,

    /// Lower-case extension (files only).
    pub extension: Option<CompactString>,

    pub is_dir: bool,
    pub is_symlink: bool,

    /// False for best-effort entries whose `stat` failed.
    pub metadata_loaded: bool,
}

impl EntryInfo {
    /// Synchronous constructor (fast path).
    pub fn from_path_sync(path: &Path) -> Result<Self, AppError> {
        let meta: Metadata = fs::symlink_metadata(path).map_err(|e| AppError::Metadata {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self::from_meta(path, &meta))
    }

    /// Async constructor for scanner use.
    pub async fn from_path_async(path: &Path) -> Result<Self, AppError> {
        let meta: Metadata =
            tokio_fs::symlink_metadata(path)
                .await
                .map_err(|e| AppError::Metadata {
                    path: path.to_path_buf(),
                    source: e,
                })?;

        Ok(Self::from_meta(path, &meta))
    }

    /// Best-effort constructor for entries whose metadata is unreadable.
    /// Name and path survive; everything else degrades to placeholders.
    #[must_use]
    pub fn best_effort(path: &Path) -> Self {
        Self {
            path: Arc::new(path.to_path_buf()),
            size: 0,
            created: UNIX_EPOCH,
            name: Self::name_of(path),
            extension: None,
            is_dir: false,
            is_symlink: false,
            metadata_loaded: false,
        }
    }

    // Internal builder shared by both entry points.
    fn from_meta(path: &Path, meta: &Metadata) -> Self {
        let ftype: FileType = meta.file_type();
        let is_dir: bool = ftype.is_dir();
        let is_link: bool = ftype.is_symlink();

        let ext: Option<CompactString> = if ftype.is_file() {
            path.extension()
                .and_then(OsStr::to_str)
                .map(|s: &str| -> CompactString { CompactString::new(s.to_lowercase()) })
        } else {
            None
        };

        let size: u64 = if is_dir { 0 } else { meta.len() };

        // Not every filesystem records a birth time; degrade to epoch.
        let created: SystemTime = meta.created().unwrap_or(UNIX_EPOCH);

        Self {
            path: Arc::new(path.to_path_buf()),
            size,
            created,
            name: Self::name_of(path),
            extension: ext,
            is_dir,
            is_symlink: is_link,
            metadata_loaded: true,
        }
    }

    fn name_of(path: &Path) -> CompactString {
        CompactString::new(path.file_name().and_then(OsStr::to_str).unwrap_or(""))
    }

    /// Human-readable size string.
    #[inline]
    #[must_use]
    pub fn size_human(&self) -> String {
        ByteSize::b(self.size).to_string()
    }

    /// Format the creation date.
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

impl Default for EntryInfo {
    fn default() -> Self {
        Self {
            path: Arc::new(PathBuf::new()),
            size: 0,
            created: UNIX_EPOCH,
            name: CompactString::new(""),
            extension: None,
            is_dir: false,
            is_symlink: false,
            metadata_loaded: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn file_entry_carries_name_size_and_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Report.TXT");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"hello").unwrap();

        let info = EntryInfo::from_path_sync(&path).unwrap();

        assert_eq!(info.name, "Report.TXT");
        assert_eq!(info.extension.as_deref(), Some("txt"));
        assert_eq!(info.size, 5);
        assert!(!info.is_dir);
        assert!(info.metadata_loaded);
    }

    #[test]
    fn directory_entry_has_zero_size_and_no_extension() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("nested.d");
        std::fs::create_dir(&sub).unwrap();

        let info = EntryInfo::from_path_sync(&sub).unwrap();

        assert!(info.is_dir);
        assert_eq!(info.size, 0);
        assert!(info.extension.is_none());
    }

    #[test]
    fn best_effort_entry_degrades_to_epoch() {
        let info = EntryInfo::best_effort(Path::new("/nowhere/locked.bin"));

        assert_eq!(info.name, "locked.bin");
        assert_eq!(info.created, UNIX_EPOCH);
        assert!(!info.metadata_loaded);
    }

    #[test]
    fn missing_entry_surfaces_metadata_error() {
        let err = EntryInfo::from_path_sync(Path::new("/nowhere/at/all")).unwrap_err();
        assert!(matches!(err, AppError::Metadata { .. }));
    }

    #[tokio::test]
    async fn async_constructor_matches_sync() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("same.rs");
        std::fs::write(&path, b"fn main() {}").unwrap();

        let sync_info = EntryInfo::from_path_sync(&path).unwrap();
        let async_info = EntryInfo::from_path_async(&path).await.unwrap();

        assert_eq!(sync_info, async_info);
    }
}
