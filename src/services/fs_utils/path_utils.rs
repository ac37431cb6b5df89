use std::path::{Component, Path, PathBuf};

/// Returns true when `relative` stays inside whatever directory it is joined onto.
///
/// Archive entry names and media manifest targets are untrusted, so absolute
/// paths are rejected outright and `..` segments may never climb above the root.
pub fn is_path_safe(relative: &Path) -> bool {
    if relative.is_absolute() {
        return false;
    }

    let mut depth = 0;
    for component in relative.components() {
        match component {
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            Component::Normal(_) => {
                depth += 1;
            }
            Component::CurDir => {}
            // A root or drive prefix inside a "relative" name is never legitimate.
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }

    true
}

/// Join an untrusted `name` onto `base`, or `None` if it would escape `base`.
pub fn resolve_safe_path(base: &Path, name: &str) -> Option<PathBuf> {
    // Leading "/" is checked on the raw string as well: on Windows
    // `Path::is_absolute` is false for "/etc/passwd".
    if name.starts_with('/') || name.starts_with('\\') {
        return None;
    }
    let target = Path::new(name);
    if !is_path_safe(target) {
        return None;
    }
    Some(base.join(target))
}

#[cfg(test)]
#[path = "tests/path_utils_tests.rs"]
mod tests;
