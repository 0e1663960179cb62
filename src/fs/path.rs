use std::path::PathBuf;

/// A normalized, absolute path in the virtual filesystem
///
/// Always rooted at `/`. Backslashes are unified to forward slashes, empty
/// and `.` segments are dropped, and `..` pops the previous segment.
/// Popping past the root is a no-op, mirroring `dirname` on `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalPath {
    /// Path segments (e.g., ["var", "data", "file.txt"])
    segments: Vec<String>,
}

impl CanonicalPath {
    /// Parse and normalize a raw path string
    ///
    /// The input is treated as rooted regardless of leading separators, so
    /// `parse("../../x")` yields `/x` rather than an error.
    pub fn parse(raw: &str) -> Self {
        let mut segments: Vec<String> = Vec::new();

        for segment in raw.replace('\\', "/").split('/') {
            match segment {
                "" | "." => continue,
                ".." => {
                    segments.pop();
                }
                other => segments.push(other.to_string()),
            }
        }

        CanonicalPath { segments }
    }

    /// The root path `/`
    pub fn root() -> Self {
        CanonicalPath {
            segments: Vec::new(),
        }
    }

    /// Join a sub-path onto this path and renormalize
    ///
    /// `..` segments in `sub` pop into this path; no boundary is enforced
    /// here. Callers that jail paths check the result's prefix themselves.
    pub fn join(&self, sub: &str) -> Self {
        Self::parse(&format!("{}/{}", self, sub))
    }

    /// Append a single literal segment
    ///
    /// The segment must not contain separators; used when wrapping names
    /// coming back from a directory listing.
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        CanonicalPath { segments }
    }

    /// Parent path; the root is its own parent
    pub fn parent(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();
        CanonicalPath { segments }
    }

    /// Get the path segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, if any
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_str())
    }

    /// Check whether this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check whether `ancestor` is this path or one of its ancestors
    pub fn starts_with(&self, ancestor: &CanonicalPath) -> bool {
        self.segments.len() >= ancestor.segments.len()
            && self.segments[..ancestor.segments.len()] == ancestor.segments[..]
    }

    /// Convert to an OS path for syscalls
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(self.to_string())
    }
}

impl std::fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.segments.is_empty() {
            write!(f, "/")
        } else {
            write!(f, "/{}", self.segments.join("/"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collapses_dots() {
        assert_eq!(CanonicalPath::parse("/a/b/../c").to_string(), "/a/c");
        assert_eq!(CanonicalPath::parse("a/./b").to_string(), "/a/b");
        assert_eq!(CanonicalPath::parse("a//b///c").to_string(), "/a/b/c");
    }

    #[test]
    fn test_parse_pops_past_root_without_error() {
        assert_eq!(CanonicalPath::parse("../../x").to_string(), "/x");
        assert_eq!(CanonicalPath::parse("..").to_string(), "/");
        assert_eq!(CanonicalPath::parse("/..").to_string(), "/");
    }

    #[test]
    fn test_parse_unifies_backslashes() {
        assert_eq!(CanonicalPath::parse("a\\b\\c").to_string(), "/a/b/c");
        assert_eq!(CanonicalPath::parse("\\a\\.\\b").to_string(), "/a/b");
    }

    #[test]
    fn test_parse_is_idempotent() {
        for raw in ["/a/b/../c", "a/./b", "../../x", "", "/", "a\\b", "a/b/c/"] {
            let once = CanonicalPath::parse(raw);
            let twice = CanonicalPath::parse(&once.to_string());
            assert_eq!(once, twice, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_empty_input_is_root() {
        assert_eq!(CanonicalPath::parse("").to_string(), "/");
        assert!(CanonicalPath::parse("/").is_root());
    }

    #[test]
    fn test_join_pops_into_origin() {
        let origin = CanonicalPath::parse("/a/b");
        assert_eq!(origin.join("../c").to_string(), "/a/c");
        assert_eq!(origin.join("c/d").to_string(), "/a/b/c/d");
        assert_eq!(origin.join("../../../../x").to_string(), "/x");
    }

    #[test]
    fn test_parent_of_root_is_root() {
        assert_eq!(CanonicalPath::root().parent(), CanonicalPath::root());
        assert_eq!(
            CanonicalPath::parse("/a/b").parent().to_string(),
            "/a"
        );
    }

    #[test]
    fn test_starts_with() {
        let base = CanonicalPath::parse("/a/b");
        assert!(CanonicalPath::parse("/a/b/c").starts_with(&base));
        assert!(CanonicalPath::parse("/a/b").starts_with(&base));
        assert!(!CanonicalPath::parse("/a/bc").starts_with(&base));
        assert!(!CanonicalPath::parse("/a").starts_with(&base));
        assert!(CanonicalPath::parse("/a").starts_with(&CanonicalPath::root()));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(CanonicalPath::parse("/a/b.txt").file_name(), Some("b.txt"));
        assert_eq!(CanonicalPath::root().file_name(), None);
    }
}
