// SPDX-License-Identifier: MPL-2.0
//! Inbox selector.
//!
//! The inbound receiver drops each uploaded photo into the inbox under an
//! opaque name, so the newest file is the one to process. File names carry
//! no meaning and no extension filtering is applied.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Returns the most recently created regular file in `dir`.
///
/// Creation time falls back to modification time on filesystems that do not
/// report it. Hidden files and subdirectories are skipped. Equal timestamps
/// resolve to the greatest file name.
///
/// # Errors
///
/// - [`Error::EmptyInbox`] if the directory holds no candidate file
/// - [`Error::ImageIo`] if the directory cannot be read
pub fn latest_artifact(dir: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(dir)
        .map_err(|e| Error::ImageIo(format!("cannot read inbox {}: {e}", dir.display())))?;

    let mut latest: Option<(SystemTime, PathBuf)> = None;

    for entry in entries {
        let entry = entry
            .map_err(|e| Error::ImageIo(format!("cannot read inbox {}: {e}", dir.display())))?;
        let path = entry.path();

        if is_hidden(&path) {
            continue;
        }
        // Follows symlinks, so a link to a regular file counts.
        let Ok(metadata) = fs::metadata(&path) else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }

        let stamp = metadata
            .created()
            .or_else(|_| metadata.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let newer = match &latest {
            None => true,
            Some((best_stamp, best_path)) => {
                (stamp, path.file_name()) > (*best_stamp, best_path.file_name())
            }
        };
        if newer {
            latest = Some((stamp, path));
        }
    }

    match latest {
        Some((_, path)) => {
            tracing::debug!(path = %path.display(), "selected latest inbox artifact");
            Ok(path)
        }
        None => Err(Error::EmptyInbox(dir.to_path_buf())),
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
