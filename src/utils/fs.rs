//! Filesystem helpers.

use std::fs;
use std::io;
use std::path::Path;

/// Recursively copy `from` into `to`, creating `to` if needed.
///
/// Files that already exist under `to` are overwritten. Symlinks are
/// followed, so the copy holds regular files only.
pub fn copy_dir_recursive(from: &Path, to: &Path) -> io::Result<u64> {
    fs::create_dir_all(to)?;

    let mut copied = 0;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let path = entry.path();
        let target = to.join(entry.file_name());

        if path.is_dir() {
            copied += copy_dir_recursive(&path, &target)?;
        } else {
            fs::copy(&path, &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Sanitize a string for use as a filename.
///
/// Replaces characters that are invalid in filenames across platforms
/// and prevents path traversal.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            _ => c,
        })
        .collect();

    sanitized.replace("..", "__")
}
