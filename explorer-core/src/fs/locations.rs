//! ``src/fs/locations.rs``
//!
//! Quick-access root discovery. Produces the ordered list of per-user
//! standard folders shown in the location list, independent of current
//! navigation. Folders the platform does not provide (or that do not
//! exist) are left out.

use std::path::PathBuf;
use std::sync::Arc;

use directories::UserDirs;
use tracing::debug;

/// Ordered quick-access roots for the current user.
#[must_use]
pub fn quick_access_roots() -> Vec<Arc<PathBuf>> {
    let Some(user_dirs) = UserDirs::new() else {
        debug!("quick_access_roots: no home directory available");
        return Vec::new();
    };

    let candidates = [
        Some(user_dirs.home_dir()),
        user_dirs.desktop_dir(),
        user_dirs.document_dir(),
        user_dirs.download_dir(),
        user_dirs.picture_dir(),
    ];

    let mut roots: Vec<Arc<PathBuf>> = Vec::new();
    for dir in candidates.into_iter().flatten() {
        if dir.is_dir() && !roots.iter().any(|r| r.as_path() == dir) {
            roots.push(Arc::new(dir.to_path_buf()));
        }
    }

    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roots_exist_and_are_unique() {
        let roots = quick_access_roots();

        for root in &roots {
            assert!(root.is_dir(), "{} should be a directory", root.display());
        }

        for (i, a) in roots.iter().enumerate() {
            for b in roots.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
