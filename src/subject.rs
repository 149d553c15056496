//! The matcher capability a subject document exposes to query evaluation.

/// One raw occurrence reported by a subject.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hit {
    /// 1-based line number within the subject.
    pub line_number: usize,
    /// The text of the matching line, when the subject keeps it.
    pub line_text: Option<String>,
    /// Set only when the hit occurred inside an included sub-resource.
    pub sub_file_path: Option<String>,
}

impl Hit {
    pub fn new(line_number: usize) -> Self {
        Hit {
            line_number,
            ..Hit::default()
        }
    }

    pub fn with_text(line_number: usize, line_text: impl Into<String>) -> Self {
        Hit {
            line_number,
            line_text: Some(line_text.into()),
            sub_file_path: None,
        }
    }
}

/// A document that queries are evaluated against.
///
/// Each leaf of a query calls exactly one of these methods once per
/// evaluation. What counts as a hit is up to the implementation. A subject
/// that is `Sync` can be evaluated from several threads at once; the
/// evaluator never calls it concurrently for the same evaluation.
pub trait Subject {
    /// Anchors (link targets) equal to `path`.
    fn match_anchor(&self, path: &str) -> Vec<Hit>;

    /// Occurrences of `text`, compared exactly.
    fn match_case_sensitive_string(&self, text: &str) -> Vec<Hit>;

    /// Occurrences of `text`, ignoring letter case.
    fn match_case_insensitive_string(&self, text: &str) -> Vec<Hit>;

    /// Elements carrying every one of `names` as classes.
    fn match_class_names(&self, names: &[String]) -> Vec<Hit>;

    /// Elements whose id is `id`.
    fn match_css_id(&self, id: &str) -> Vec<Hit>;

    /// Stylesheet references to `path` (without its `.css` suffix).
    fn match_css(&self, path: &str) -> Vec<Hit>;

    /// Script references to `path` (without its `.js` suffix).
    fn match_js(&self, path: &str) -> Vec<Hit>;

    /// Image references to `path`.
    fn match_image(&self, path: &str) -> Vec<Hit>;
}
