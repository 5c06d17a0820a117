//! Page Directory Discovery
//!
//! Lists one level of the pages tree at a time and classifies what it finds.
//! A directory that directly contains the entry file is a route directory;
//! anything else is a transparent container whose matched descendants hoist
//! one level up. Listing order is the filesystem's order and becomes the
//! emitted route order, so entries are never re-sorted.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Reserved file that makes a directory routable; default-exports the page.
pub const ENTRY_FILE: &str = "index.tsx";
/// Optional reserved file default-exporting a wrapper component.
pub const GUARD_FILE: &str = "guard.tsx";
/// Directories whose name contains this literal are never scanned.
pub const EXCLUDED_SEGMENT: &str = "components";

/// One listed directory level.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    pub path: PathBuf,
    pub has_entry: bool,
    pub has_guard: bool,
    /// Non-excluded subdirectories, in filesystem listing order.
    pub subdirectories: Vec<PathBuf>,
}

pub fn is_excluded(dir_name: &str) -> bool {
    dir_name.contains(EXCLUDED_SEGMENT)
}

/// List a single directory level. Unreadable entries are skipped; files
/// other than the reserved names are non-route assets and ignored.
pub fn scan_directory(dir: &Path) -> DirectoryListing {
    let mut listing = DirectoryListing {
        path: dir.to_path_buf(),
        has_entry: false,
        has_guard: false,
        subdirectories: Vec::new(),
    };

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                if !is_excluded(name) {
                    listing.subdirectories.push(entry.path().to_path_buf());
                }
            }
        } else if entry.file_type().is_file() {
            match entry.file_name().to_str() {
                Some(ENTRY_FILE) => listing.has_entry = true,
                Some(GUARD_FILE) => listing.has_guard = true,
                _ => {}
            }
        }
    }

    listing
}
