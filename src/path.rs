use std::path::{Component, Path, PathBuf};

/// Resolves `path` against `cwd` unless it is already absolute and inlines
/// the `.` and `..` components of the result. `..` never climbs above the
/// root.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in cwd.join(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
            component => result.push(component),
        }
    }
    result
}
