//! Locating source files named by compiler-recorded paths.

use std::path::{Path, PathBuf};

/// Finds the file a call-site path refers to.
///
/// Paths recorded by the compiler are relative to the directory the build was
/// invoked from, which is not necessarily the current directory (tests of a
/// workspace member run inside the member's directory, for instance). If
/// `path` does not name a file as given, it is joined onto each ancestor of
/// the current directory in turn and the first existing file wins.
pub fn resolve_source_path(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    if path.is_absolute() {
        return None;
    }
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(path))
        .find(|candidate| candidate.is_file())
}
