//! Path canonicalization.
//!
//! Registered paths and incoming request paths both pass through
//! [`normalize`] before they touch the registry, so the router only ever
//! compares two canonical strings for equality. There is no pattern
//! matching: `/users/42` and `/users/{id}` are simply different keys.
//!
//! | Input | Output |
//! |---|---|
//! | `""` | `/` |
//! | `api/foo` | `/api/foo` |
//! | `/a//b` | `/a/b` |
//! | `/a/./b/../c` | `/a/c` |
//! | `/a/` | `/a/` |
//! | `/../` | `/` |

/// Canonicalizes `raw` into a registry key.
///
/// Empty input maps to `/`, a leading `/` is added when missing, `.` and
/// empty segments are dropped and `..` removes the preceding segment (it
/// never climbs above the root). A trailing `/` on the input survives unless
/// the result is the root itself.
///
/// The function is idempotent: `normalize(&normalize(p)) == normalize(p)`.
///
/// ```rust
/// use turnstile::path::normalize;
///
/// assert_eq!(normalize(""), "/");
/// assert_eq!(normalize("/a//b"), "/a/b");
/// assert_eq!(normalize("/a/"), "/a/");
/// ```
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return "/".to_owned();
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut out = String::with_capacity(raw.len() + 1);
    for segment in &segments {
        out.push('/');
        out.push_str(segment);
    }

    if out.is_empty() {
        out.push('/');
    } else if raw.ends_with('/') {
        out.push('/');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn empty_is_root() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
    }

    #[test]
    fn relative_paths_get_a_leading_slash() {
        assert_eq!(normalize("api/foo"), "/api/foo");
        assert_eq!(normalize("api/foo/"), "/api/foo/");
    }

    #[test]
    fn repeated_separators_collapse() {
        assert_eq!(normalize("/a//b"), "/a/b");
        assert_eq!(normalize("//a///b//"), "/a/b/");
    }

    #[test]
    fn dot_segments_resolve() {
        assert_eq!(normalize("/a/./b"), "/a/b");
        assert_eq!(normalize("/a/b/../c"), "/a/c");
        assert_eq!(normalize("/a/."), "/a");
        assert_eq!(normalize("/a/.."), "/");
    }

    #[test]
    fn dot_dot_stops_at_root() {
        assert_eq!(normalize("/.."), "/");
        assert_eq!(normalize("/../../a"), "/a");
        assert_eq!(normalize("/../"), "/");
    }

    #[test]
    fn trailing_slash_is_kept_except_for_root() {
        assert_eq!(normalize("/a/"), "/a/");
        assert_eq!(normalize("/a/b/../"), "/a/");
        assert_eq!(normalize("/a/../"), "/");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "", "/", "a", "/a/", "//", "/a//b", "/./", "../x", "/a/b/../../..",
            "x/y/./z/", "/api/v1//users/", "/%20/..", "/a/.../b",
        ];
        for p in samples {
            let once = normalize(p);
            assert_eq!(normalize(&once), once, "not idempotent for {p:?}");
        }
    }
}
