//! Slash-separated path helpers for collection paths.

/// Join path segments with single slashes, keeping a leading slash of the
/// first segment. Empty segments are skipped.
pub fn join_paths<S: AsRef<str>>(segments: &[S]) -> String {
    let leading = segments
        .first()
        .is_some_and(|first| first.as_ref().starts_with('/'));

    let joined = segments
        .iter()
        .map(|s| s.as_ref().trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if leading {
        format!("/{joined}")
    } else {
        joined
    }
}

/// The last segment of a path, ignoring a trailing slash.
pub fn file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Everything before the last segment, without trailing slash. The parent of
/// a top-level path is the empty string (or `/` for absolute paths).
pub fn parent_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => "/",
        Some(idx) => &trimmed[..idx],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_paths() {
        assert_eq!(join_paths(&["/coll", "dir/", "/file.txt"]), "/coll/dir/file.txt");
        assert_eq!(join_paths(&["coll", "", "file.txt"]), "coll/file.txt");
        assert_eq!(join_paths(&["/", "file.txt"]), "/file.txt");
        assert_eq!(join_paths::<&str>(&[]), "");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("/coll/dir/file.txt"), "file.txt");
        assert_eq!(file_name("/coll/dir/"), "dir");
        assert_eq!(file_name("file.txt"), "file.txt");
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("/coll/dir/file.txt"), "/coll/dir");
        assert_eq!(parent_path("/coll/dir/"), "/coll");
        assert_eq!(parent_path("/coll"), "/");
        assert_eq!(parent_path("coll"), "");
    }
}
