use anyhow::{Context, Result};
use log::{debug, warn};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::UNIX_EPOCH;
use walkdir::{DirEntry, WalkDir};

use super::cache::{ContentCache, NoCache};
use super::fileset::RepositoryFileSet;

/// Directories never descended into.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "build",
    "dist",
    "target",
    "venv",
    "env",
    ".env",
    "__pycache__",
    ".pytest_cache",
];

const BINARY_SNIFF_LEN: usize = 8192;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub max_files: usize,
    /// Files larger than this many bytes are left out.
    pub max_file_size: u64,
    /// Directory levels below the root that are still visited.
    pub max_depth: usize,
    pub skip_dirs: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_files: 50,
            max_file_size: 100_000,
            max_depth: 4,
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|dir| dir.to_string()).collect(),
        }
    }
}

/// Collects a [`RepositoryFileSet`] from a directory on disk.
pub struct FileScanner {
    options: ScanOptions,
    cache: Arc<dyn ContentCache>,
}

impl FileScanner {
    pub fn new() -> Self {
        Self::with_options(ScanOptions::default())
    }

    pub fn with_options(options: ScanOptions) -> Self {
        Self {
            options,
            cache: Arc::new(NoCache),
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn ContentCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Walk `root_path` in file-name order and load text files, keyed by
    /// `/`-separated paths relative to the root.
    pub fn scan_directory(&self, root_path: &Path) -> Result<RepositoryFileSet> {
        let metadata = fs::metadata(root_path)
            .with_context(|| format!("Cannot read input directory {}", root_path.display()))?;
        if !metadata.is_dir() {
            anyhow::bail!("Input path is not a directory: {}", root_path.display());
        }

        let candidates: Vec<(PathBuf, String, u64, u64)> = WalkDir::new(root_path)
            .follow_links(false)
            .max_depth(self.options.max_depth + 1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_skipped_dir(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Skipping unreadable entry: {err}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let metadata = entry.metadata().ok()?;
                if metadata.len() > self.options.max_file_size {
                    debug!("skipping oversized file {}", entry.path().display());
                    return None;
                }
                let modified = metadata
                    .modified()
                    .ok()
                    .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
                    .map(|elapsed| elapsed.as_secs())
                    .unwrap_or_default();
                let relative = relative_key(root_path, entry.path())?;
                Some((entry.into_path(), relative, modified, metadata.len()))
            })
            .collect();

        // Read in walk order, one batch per remaining slot, so files past the
        // limit are never opened. Rejected files free their slot for the next batch.
        let mut files =
            RepositoryFileSet::with_capacity(self.options.max_files.min(candidates.len()));
        let mut pending = candidates.as_slice();
        while files.len() < self.options.max_files && !pending.is_empty() {
            let open_slots = self.options.max_files - files.len();
            let (batch, rest) = pending.split_at(pending.len().min(open_slots));
            pending = rest;

            let loaded: Vec<Option<(String, String)>> = batch
                .par_iter()
                .map(|(path, relative, modified, size)| {
                    let content = self.load(path, *modified, *size)?;
                    Some((relative.clone(), content))
                })
                .collect();

            for (relative, content) in loaded.into_iter().flatten() {
                files.insert(relative, content);
            }
        }

        debug!(
            "scanned {} candidate files, kept {}",
            candidates.len(),
            files.len()
        );
        Ok(files)
    }

    /// Cache-first read of one file. The key changes whenever the file does.
    fn load(&self, path: &Path, modified: u64, size: u64) -> Option<String> {
        let cache_key = content_cache_key(path, modified, size);
        if let Some(content) = self.cache.get(&cache_key) {
            return Some(content);
        }
        let content = read_text_file(path)?;
        self.cache.put(&cache_key, content.clone());
        Some(content)
    }

    fn is_skipped_dir(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .map_or(false, |name| self.options.skip_dirs.iter().any(|dir| dir == name))
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Path, modification time in whole seconds, and size in bytes.
fn content_cache_key(path: &Path, modified: u64, size: u64) -> String {
    format!("{}:{}:{}", path.display(), modified, size)
}

fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

/// `None` for unreadable, binary, or non-UTF-8 files.
fn read_text_file(path: &Path) -> Option<String> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("Failed to read {}: {err}", path.display());
            return None;
        }
    };
    if is_binary(&bytes) {
        debug!("skipping binary file {}", path.display());
        return None;
    }
    match String::from_utf8(bytes) {
        Ok(content) => Some(content),
        Err(_) => {
            debug!("skipping non-UTF-8 file {}", path.display());
            None
        }
    }
}

fn is_binary(bytes: &[u8]) -> bool {
    bytes.iter().take(BINARY_SNIFF_LEN).any(|&byte| byte == 0)
}
