//! Directory inventory
//!
//! Walks the cache root and records every regular file with its size and
//! last-access time. The walk is best effort: an entry that cannot be read is
//! logged and skipped, and a missing root yields an empty inventory.

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// One regular file under the cache root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Path of the file
    pub path: PathBuf,
    /// Size in bytes at inventory time
    pub size: u64,
    /// Last access time at inventory time
    pub accessed: SystemTime,
}

impl CacheEntry {
    /// Build an entry from file metadata
    ///
    /// Falls back to the modification time on platforms that do not report
    /// access times. Returns `None` if neither is available.
    pub fn from_metadata(path: PathBuf, metadata: &Metadata) -> Option<Self> {
        let accessed = metadata.accessed().or_else(|_| metadata.modified()).ok()?;
        Some(Self {
            path,
            size: metadata.len(),
            accessed,
        })
    }
}

/// Snapshot of the regular files under a cache root
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    entries: Vec<CacheEntry>,
    total_size: u64,
    errors: usize,
}

impl Inventory {
    /// Build an inventory from entries, summing their sizes
    pub fn from_entries(entries: Vec<CacheEntry>) -> Self {
        let total_size = entries
            .iter()
            .fold(0u64, |total, e| total.saturating_add(e.size));
        Self {
            entries,
            total_size,
            errors: 0,
        }
    }

    /// Walk `root` recursively and record every regular file
    ///
    /// Symlinks are not followed and are not counted. Directories that cannot
    /// be listed and files that cannot be stat'd are skipped with a warning.
    pub fn scan(root: &Path) -> Self {
        match fs::metadata(root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                tracing::warn!(root = %root.display(), "Cache root is not a directory");
                return Self::default();
            }
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "Failed to stat cache root");
                return Self::default();
            }
        }

        let mut inventory = Self::default();

        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(root).display().to_string();
                    tracing::warn!(path = %path, error = %e, "Skipping unreadable cache entry");
                    inventory.errors += 1;
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(
                        path = %entry.path().display(),
                        error = %e,
                        "Failed to stat cache file"
                    );
                    inventory.errors += 1;
                    continue;
                }
            };

            let path = entry.into_path();
            match CacheEntry::from_metadata(path.clone(), &metadata) {
                Some(cache_entry) => inventory.push(cache_entry),
                None => {
                    tracing::warn!(
                        path = %path.display(),
                        "Cache file reports neither access nor modification time"
                    );
                    inventory.errors += 1;
                }
            }
        }

        inventory
    }

    fn push(&mut self, entry: CacheEntry) {
        self.total_size = self.total_size.saturating_add(entry.size);
        self.entries.push(entry);
    }

    /// Entries in traversal order
    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    /// Consume the inventory, yielding its entries
    pub fn into_entries(self) -> Vec<CacheEntry> {
        self.entries
    }

    /// Number of files recorded
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no files were recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the recorded file sizes
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Entries skipped because they could not be read
    pub fn errors(&self) -> usize {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_nested_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a"), vec![0u8; 100]).unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("sub/b"), vec![0u8; 50]).unwrap();
        fs::write(dir.path().join("sub/deeper/c"), vec![0u8; 25]).unwrap();

        let inventory = Inventory::scan(dir.path());

        assert_eq!(inventory.len(), 3);
        assert_eq!(inventory.total_size(), 175);
        assert_eq!(inventory.errors(), 0);
        assert!(inventory.entries().iter().all(|e| e.path.is_file()));
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();

        let inventory = Inventory::scan(dir.path());
        assert!(inventory.is_empty());
        assert_eq!(inventory.total_size(), 0);
    }

    #[test]
    fn test_scan_missing_root() {
        let dir = TempDir::new().unwrap();
        let inventory = Inventory::scan(&dir.path().join("does-not-exist"));
        assert!(inventory.is_empty());
        assert_eq!(inventory.total_size(), 0);
    }

    #[test]
    fn test_scan_root_is_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, b"data").unwrap();

        let inventory = Inventory::scan(&file);
        assert!(inventory.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_symlinks() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("target"), vec![0u8; 1000]).unwrap();
        fs::write(dir.path().join("real"), vec![0u8; 10]).unwrap();
        std::os::unix::fs::symlink(outside.path().join("target"), dir.path().join("link")).unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("dirlink")).unwrap();

        let inventory = Inventory::scan(dir.path());
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.total_size(), 10);
    }

    #[test]
    fn test_from_entries_sums_sizes() {
        let now = SystemTime::now();
        let inventory = Inventory::from_entries(vec![
            CacheEntry { path: "x".into(), size: 3, accessed: now },
            CacheEntry { path: "y".into(), size: 4, accessed: now },
        ]);
        assert_eq!(inventory.total_size(), 7);
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_from_entries_saturates_total() {
        let now = SystemTime::now();
        let inventory = Inventory::from_entries(vec![
            CacheEntry { path: "x".into(), size: u64::MAX, accessed: now },
            CacheEntry { path: "y".into(), size: 1, accessed: now },
        ]);
        assert_eq!(inventory.total_size(), u64::MAX);
    }
}
