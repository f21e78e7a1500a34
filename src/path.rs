use std::{fmt, sync::LazyLock};

use regex::Regex;

static FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]+(\.[A-Za-z0-9_\-]+)*$").expect("field name pattern is valid"));

/// Whether `name` can be written as a field: identifier characters in
/// non-empty, dot-separated segments.
pub fn is_field_name(name: &str) -> bool {
    FIELD_NAME.is_match(name)
}

/// The dotted field address reached while descending through nested scopes.
///
/// Paths are immutable: descending returns a new path, so the compiler can
/// hand the same parent path to every sibling.
///
/// # Examples
///
/// - root → `""`
/// - `contribution:{...}` → `["contribution"]` → `"contribution"`
/// - `contribution:{ agent:{...} }` → `["contribution", "agent"]` → `"contribution.agent"`
///
/// A segment may itself contain dots (`contribution.agent:{...}` adds the
/// single segment `"contribution.agent"`); the dotted form is the same either way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The empty path at the compilation root.
    pub fn root() -> Self {
        FieldPath::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// A new path one segment deeper.
    pub fn child(&self, segment: &str) -> FieldPath {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        FieldPath { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Dot-joined form, empty at the root.
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_empty() {
        let root = FieldPath::root();
        assert!(root.is_root());
        assert_eq!(root.dotted(), "");
    }

    #[test]
    fn child_appends_one_segment_and_leaves_parent_alone() {
        let root = FieldPath::root();
        let contribution = root.child("contribution");
        let agent = contribution.child("agent");

        assert!(root.is_root());
        assert_eq!(contribution.segments(), ["contribution".to_string()]);
        assert_eq!(agent.dotted(), "contribution.agent");
        assert_eq!(agent.to_string(), "contribution.agent");
    }

    #[test]
    fn dotted_segment_counts_once() {
        let path = FieldPath::root().child("contribution.agent");
        assert_eq!(path.segments().len(), 1);
        assert_eq!(path.dotted(), "contribution.agent");
    }

    #[test]
    fn field_names() {
        assert!(is_field_name("contribution.agent"));
        assert!(is_field_name("first_name"));
        assert!(is_field_name("978-91"));
        assert!(!is_field_name(""));
        assert!(!is_field_name("hello world"));
        assert!(!is_field_name("a:b"));
        assert!(!is_field_name("a..b"));
        assert!(!is_field_name(".a"));
        assert!(!is_field_name("a."));
    }
}
