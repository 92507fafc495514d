use std::path::{Path, PathBuf};

use crate::config::PlatformConfig;

/// Resolves `name` against the read-only program data root.
pub fn program_file_path(config: &PlatformConfig, name: &str) -> PathBuf {
    config.program_root.join(name)
}

/// Resolves `name` against the user data root.
pub fn user_file_path(config: &PlatformConfig, name: &str) -> PathBuf {
    config.user_root.join(name)
}

/// Last modification time in seconds since the Unix epoch, or 0 when unknown.
#[cfg(not(target_arch = "wasm32"))]
pub fn file_modification_date(path: &Path) -> u64 {
    modified_time(path)
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// The browser has no file timestamps.
#[cfg(target_arch = "wasm32")]
pub fn file_modification_date(_path: &Path) -> u64 {
    0
}

/// Polls a file's modification time to detect edits, for hot reload.
pub struct FileWatcher {
    path: PathBuf,
    last_seen_modified: Option<Modified>,
}

impl FileWatcher {
    pub fn new(path: PathBuf) -> Self {
        let last_seen_modified = modified_time(&path);
        Self {
            path,
            last_seen_modified,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once per observed change, including the file appearing.
    pub fn should_reload(&mut self) -> bool {
        let current = modified_time(&self.path);
        match (self.last_seen_modified, current) {
            (Some(old), Some(now)) if now > old => {
                self.last_seen_modified = Some(now);
                true
            }
            (None, Some(now)) => {
                self.last_seen_modified = Some(now);
                true
            }
            _ => false,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
type Modified = std::time::SystemTime;

#[cfg(not(target_arch = "wasm32"))]
fn modified_time(path: &Path) -> Option<Modified> {
    std::fs::metadata(path).ok()?.modified().ok()
}

#[cfg(target_arch = "wasm32")]
type Modified = u64;

#[cfg(target_arch = "wasm32")]
fn modified_time(_path: &Path) -> Option<Modified> {
    None
}
