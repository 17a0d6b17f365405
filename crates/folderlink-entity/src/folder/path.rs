//! Helpers for hierarchical folder paths.

/// Split a folder path into its non-empty segments.
///
/// Leading, trailing and doubled slashes are ignored, as are `.` segments,
/// so `"/a//b/./c/"` yields `["a", "b", "c"]`.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

/// Join a base path and a child name with a single `/`.
pub fn join(base: &str, name: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}/{name}")
    }
}
