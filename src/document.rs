//! A line-oriented [`Subject`] over HTML-like text.
//!
//! Matching is deliberately shallow: every capability looks at one line at a
//! time, so an element or attribute split across lines is not seen. Literals
//! from the query are always escaped before they reach a regex.

use std::{fs, io, path::Path};

use regex::{Regex, RegexBuilder};

use crate::subject::{Hit, Subject};

/// A subject document held in memory.
#[derive(Debug, Clone)]
pub struct Document {
    path: String,
    lines: Vec<String>,
}

/// `attr="value"` or `attr='value'`, where the value is given as a regex.
/// With `allow_suffix`, a `?query` or `#fragment` may follow the value.
fn attribute_pattern(attr: &str, value: &str, allow_suffix: bool) -> String {
    let (double_tail, single_tail) = if allow_suffix {
        (r#"(?:[?#][^"]*)?"#, r"(?:[?#][^']*)?")
    } else {
        ("", "")
    };
    format!(
        r#"(?:^|\s){attr}\s*=\s*(?:"{value}{double_tail}"|'{value}{single_tail}')"#
    )
}

impl Document {
    pub fn from_text(path: impl Into<String>, text: &str) -> Self {
        Document {
            path: path.into(),
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// Read a whole file into memory.
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        log::debug!("loaded {} ({} bytes)", path.display(), text.len());
        Ok(Document::from_text(path.display().to_string(), &text))
    }

    /// The path the document was loaded from.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn scan_lines(&self, mut is_hit: impl FnMut(&str) -> bool) -> Vec<Hit> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| is_hit(line))
            .map(|(index, line)| Hit::with_text(index + 1, line.trim()))
            .collect()
    }

    fn scan_regex(&self, pattern: &str, case_insensitive: bool) -> Vec<Hit> {
        match RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
        {
            Ok(regex) => self.scan_lines(|line| regex.is_match(line)),
            Err(e) => {
                log::warn!("{}: cannot build matcher: {}", self.path, e);
                Vec::new()
            }
        }
    }

    fn scan_attribute(&self, attr: &str, value: &str, allow_suffix: bool) -> Vec<Hit> {
        let pattern = attribute_pattern(attr, &regex::escape(value), allow_suffix);
        self.scan_regex(&pattern, false)
    }
}

impl Subject for Document {
    fn match_anchor(&self, path: &str) -> Vec<Hit> {
        self.scan_attribute("href", path, true)
    }

    fn match_case_sensitive_string(&self, text: &str) -> Vec<Hit> {
        self.scan_lines(|line| line.contains(text))
    }

    fn match_case_insensitive_string(&self, text: &str) -> Vec<Hit> {
        self.scan_regex(&regex::escape(text), true)
    }

    fn match_class_names(&self, names: &[String]) -> Vec<Hit> {
        let regex = match Regex::new(r#"(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)')"#) {
            Ok(regex) => regex,
            Err(e) => {
                log::warn!("{}: cannot build matcher: {}", self.path, e);
                return Vec::new();
            }
        };

        self.scan_lines(|line| {
            regex.captures_iter(line).any(|caps| {
                let value = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
                let classes: Vec<&str> = value.split_whitespace().collect();
                names.iter().all(|name| classes.contains(&name.as_str()))
            })
        })
    }

    fn match_css_id(&self, id: &str) -> Vec<Hit> {
        self.scan_attribute("id", id, false)
    }

    fn match_css(&self, path: &str) -> Vec<Hit> {
        self.scan_attribute("href", &format!("{}.css", path), true)
    }

    fn match_js(&self, path: &str) -> Vec<Hit> {
        self.scan_attribute("src", &format!("{}.js", path), true)
    }

    fn match_image(&self, path: &str) -> Vec<Hit> {
        self.scan_attribute("src", path, true)
    }
}
