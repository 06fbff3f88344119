//! Static asset resolution and loading
//!
//! The asset directory is anchored to the executable's own location, not the
//! ambient working directory, so the index page is found regardless of where
//! the process was launched from.

use std::io;
use std::path::{Path, PathBuf};

/// Resolve the configured static directory to a concrete path
///
/// Absolute paths pass through unchanged. Relative paths are joined onto the
/// directory containing the running executable; if that candidate does not
/// exist (e.g. `cargo run` from the crate root), the path is kept as given
/// and resolves against the working directory as a fallback.
pub fn resolve_static_dir(configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        return configured.to_path_buf();
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));

    match exe_dir {
        Some(dir) => {
            let candidate = dir.join(configured);
            if candidate.exists() {
                candidate
            } else {
                configured.to_path_buf()
            }
        }
        None => configured.to_path_buf(),
    }
}

/// Read the index page from the resolved static directory
///
/// The contents are returned byte-for-byte; a missing file surfaces as the
/// underlying I/O error with no translation.
pub async fn load_index(static_dir: &Path) -> io::Result<String> {
    tokio::fs::read_to_string(static_dir.join("index.html")).await
}
