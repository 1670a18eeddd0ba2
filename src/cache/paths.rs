// Cache path utilities.
// Maps store keys onto files under the platform cache directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/nyx-site on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "nyx-site").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path of the file backing `key` inside `dir`.
pub fn key_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", sanitize_name(key)))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
