//! URL template compilation — turn `{name}` templates into anchored matchers.
//!
//! A template is a `/`-delimited path in which any `{identifier}` stands for one path
//! component. Identifiers and captured values are both restricted to `[A-Za-z0-9_-]+`.
//!
//! | Template                 | Matches                      | Captured params             |
//! |--------------------------|------------------------------|-----------------------------|
//! | `/users`                 | `/users`, `users`, `/users/` | *(none)*                    |
//! | `/users/{id}`            | `/users/42`                  | `id → "42"`                 |
//! | `//files//{name}.json`   | `/files/report.json`         | `name → "report"`           |
//!
//! Compilation collapses repeated slashes, escapes literal text, and anchors the result at
//! both ends while tolerating one optional leading and trailing slash. Every malformed
//! template is rejected by [`Pattern::compile`]; matching itself never fails.

use std::fmt;

use regex::Regex;
use thiserror::Error;

pub mod params;

pub use params::PathParams;

// Regex fragment substituted for every placeholder.
const PARAM_CAPTURE: &str = "([A-Za-z0-9_-]+)";

/// Errors produced while compiling or expanding a URL template.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("unbalanced brace at byte {position} in template {template:?}")]
    UnbalancedBrace { template: String, position: usize },

    #[error("empty placeholder `{{}}` in template {template:?}")]
    EmptyParameter { template: String },

    #[error("invalid placeholder name {name:?} in template {template:?}")]
    InvalidParameter { template: String, name: String },

    #[error("placeholder {name:?} appears more than once in template {template:?}")]
    DuplicateParameter { template: String, name: String },

    #[error("no value supplied for placeholder {name:?} of template {template:?}")]
    MissingParameter { template: String, name: String },

    #[error("value {value:?} for placeholder {name:?} would not match template {template:?}")]
    InvalidValue {
        template: String,
        name: String,
        value: String,
    },

    #[error("regex backend rejected template: {0}")]
    Regex(#[from] regex::Error),
}

// One parsed chunk of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Param(String),
}

/// A compiled URL template.
///
/// Cheap to clone (the underlying regex is reference counted) and safe to share across
/// threads.
///
/// # Examples
///
/// ```
/// use routetree::pattern::Pattern;
///
/// let pattern = Pattern::compile("/user/{id}/contact/{contact_id}").unwrap();
/// let params = pattern.matches("/user/7/contact/abc-1").unwrap();
/// assert_eq!(params.get("id"), Some("7"));
/// assert_eq!(params.get("contact_id"), Some("abc-1"));
/// assert!(pattern.matches("/user/7").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    template: String,
    pieces: Vec<Piece>,
    params: Vec<String>,
    regex: Regex,
}

impl Pattern {
    /// Compile a URL template into a matcher.
    ///
    /// # Errors
    ///
    /// - [`PatternError::UnbalancedBrace`] — a `{` without its `}` or a stray `}`.
    /// - [`PatternError::EmptyParameter`] — a `{}` placeholder.
    /// - [`PatternError::InvalidParameter`] — a placeholder name outside `[A-Za-z0-9_-]`.
    /// - [`PatternError::DuplicateParameter`] — the same name used twice.
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        let template = collapse_slashes(template);
        let pieces = parse_pieces(&template)?;

        let params: Vec<String> = pieces
            .iter()
            .filter_map(|piece| match piece {
                Piece::Param(name) => Some(name.clone()),
                Piece::Literal(_) => None,
            })
            .collect();

        let regex = Regex::new(&format!("^/?{}/?$", regex_body(&pieces)))?;

        Ok(Self {
            template,
            pieces,
            params,
            regex,
        })
    }

    /// Try to match `path`, returning the captured [`PathParams`] on success.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let captures = self.regex.captures(path)?;
        let mut params = PathParams::new();
        for (i, name) in self.params.iter().enumerate() {
            if let Some(value) = captures.get(i + 1) {
                params.insert(name.as_str(), value.as_str());
            }
        }
        Some(params)
    }

    /// Returns `true` if `path` matches, without extracting parameters.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Substitute placeholder values back into the template.
    ///
    /// The result is the slash-collapsed template with each `{name}` replaced by its value,
    /// so it always matches this pattern again.
    ///
    /// # Errors
    ///
    /// - [`PatternError::MissingParameter`] — `values` has no entry for a placeholder.
    /// - [`PatternError::InvalidValue`] — a value is empty or contains characters outside
    ///   `[A-Za-z0-9_-]`.
    pub fn expand(&self, values: &PathParams) -> Result<String, PatternError> {
        let mut url = String::with_capacity(self.template.len());
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => url.push_str(text),
                Piece::Param(name) => {
                    let value = values.get(name).ok_or_else(|| PatternError::MissingParameter {
                        template: self.template.clone(),
                        name: name.clone(),
                    })?;
                    if value.is_empty() || !value.chars().all(is_param_char) {
                        return Err(PatternError::InvalidValue {
                            template: self.template.clone(),
                            name: name.clone(),
                            value: value.to_owned(),
                        });
                    }
                    url.push_str(value);
                }
            }
        }
        Ok(url)
    }

    /// The slash-collapsed template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Placeholder names in order of appearance.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The anchored regular expression source.
    ///
    /// Placeholder names do not appear in it, so `/a/{x}` and `/a/{y}` share one source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.template == other.template
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.regex.as_str())
    }
}

/// Collapse every run of consecutive `/` into a single `/`.
///
/// # Examples
///
/// ```
/// use routetree::pattern::collapse_slashes;
///
/// assert_eq!(collapse_slashes("//user///{id}/"), "/user/{id}/");
/// ```
pub fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !prev_slash {
                out.push(c);
            }
            prev_slash = true;
        } else {
            out.push(c);
            prev_slash = false;
        }
    }
    out
}

/// If `segment` is exactly one placeholder `{name}`, return `name`.
pub(crate) fn placeholder_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('{')?
        .strip_suffix('}')
        .filter(|name| !name.is_empty() && name.chars().all(is_param_char))
}

fn is_param_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn parse_pieces(template: &str) -> Result<Vec<Piece>, PatternError> {
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut seen: Vec<&str> = Vec::new();
    let mut chars = template.char_indices();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' => {
                let start = position + 1;
                let mut end = None;
                for (i, inner) in chars.by_ref() {
                    match inner {
                        '}' => {
                            end = Some(i);
                            break;
                        }
                        '{' => {
                            return Err(PatternError::UnbalancedBrace {
                                template: template.to_owned(),
                                position: i,
                            });
                        }
                        _ => {}
                    }
                }
                let end = end.ok_or_else(|| PatternError::UnbalancedBrace {
                    template: template.to_owned(),
                    position,
                })?;

                let name = &template[start..end];
                if name.is_empty() {
                    return Err(PatternError::EmptyParameter {
                        template: template.to_owned(),
                    });
                }
                if !name.chars().all(is_param_char) {
                    return Err(PatternError::InvalidParameter {
                        template: template.to_owned(),
                        name: name.to_owned(),
                    });
                }
                if seen.contains(&name) {
                    return Err(PatternError::DuplicateParameter {
                        template: template.to_owned(),
                        name: name.to_owned(),
                    });
                }
                seen.push(name);

                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(Piece::Param(name.to_owned()));
            }
            '}' => {
                return Err(PatternError::UnbalancedBrace {
                    template: template.to_owned(),
                    position,
                });
            }
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    Ok(pieces)
}

// Escaped regex body with the outer slashes trimmed; the anchors re-add them as optional.
fn regex_body(pieces: &[Piece]) -> String {
    let last = pieces.len().saturating_sub(1);
    let mut body = String::new();
    for (i, piece) in pieces.iter().enumerate() {
        match piece {
            Piece::Literal(text) => {
                let mut text = text.as_str();
                if i == 0 {
                    text = text.strip_prefix('/').unwrap_or(text);
                }
                if i == last {
                    text = text.strip_suffix('/').unwrap_or(text);
                }
                body.push_str(&regex::escape(text));
            }
            Piece::Param(_) => body.push_str(PARAM_CAPTURE),
        }
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── collapse_slashes ──────────────────────────────────────────────────────

    #[test]
    fn collapse_leaves_single_slashes_alone() {
        assert_eq!(collapse_slashes("/a/b"), "/a/b");
    }

    #[test]
    fn collapse_runs() {
        assert_eq!(collapse_slashes("///a////b//"), "/a/b/");
        assert_eq!(collapse_slashes("//"), "/");
        assert_eq!(collapse_slashes(""), "");
    }

    // ── Pattern::compile ──────────────────────────────────────────────────────

    #[test]
    fn compile_root() {
        let pat = Pattern::compile("/").unwrap();
        assert_eq!(pat.as_str(), "^/?/?$");
        assert!(pat.params().is_empty());
    }

    #[test]
    fn compile_static() {
        let pat = Pattern::compile("/users").unwrap();
        assert_eq!(pat.as_str(), "^/?users/?$");
    }

    #[test]
    fn compile_collapses_slashes() {
        let pat = Pattern::compile("//users///list").unwrap();
        assert_eq!(pat.template(), "/users/list");
        assert_eq!(pat.as_str(), "^/?users/list/?$");
    }

    #[test]
    fn compile_placeholders() {
        let pat = Pattern::compile("/user/{id}/contact/{contact_id}").unwrap();
        assert_eq!(pat.params(), ["id", "contact_id"]);
        assert_eq!(
            pat.as_str(),
            "^/?user/([A-Za-z0-9_-]+)/contact/([A-Za-z0-9_-]+)/?$"
        );
    }

    #[test]
    fn compile_escapes_literals() {
        let pat = Pattern::compile("/files/{name}.json").unwrap();
        assert!(pat.is_match("/files/report.json"));
        assert!(!pat.is_match("/files/reportxjson"));
    }

    #[test]
    fn compile_hyphenated_placeholder() {
        let pat = Pattern::compile("/posts/{post-id}").unwrap();
        let params = pat.matches("/posts/abc").unwrap();
        assert_eq!(params.get("post-id"), Some("abc"));
    }

    #[test]
    fn compile_rejects_unclosed_brace() {
        let err = Pattern::compile("/users/{id").unwrap_err();
        assert!(matches!(err, PatternError::UnbalancedBrace { position: 7, .. }));
    }

    #[test]
    fn compile_rejects_stray_closing_brace() {
        let err = Pattern::compile("/users/id}").unwrap_err();
        assert!(matches!(err, PatternError::UnbalancedBrace { position: 9, .. }));
    }

    #[test]
    fn compile_rejects_nested_brace() {
        let err = Pattern::compile("/users/{{id}}").unwrap_err();
        assert!(matches!(err, PatternError::UnbalancedBrace { .. }));
    }

    #[test]
    fn compile_rejects_empty_placeholder() {
        let err = Pattern::compile("/users/{}").unwrap_err();
        assert!(matches!(err, PatternError::EmptyParameter { .. }));
    }

    #[test]
    fn compile_rejects_illegal_identifier() {
        let err = Pattern::compile("/users/{user id}").unwrap_err();
        match err {
            PatternError::InvalidParameter { name, .. } => assert_eq!(name, "user id"),
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn compile_rejects_duplicate_placeholder() {
        let err = Pattern::compile("/{id}/child/{id}").unwrap_err();
        assert!(matches!(err, PatternError::DuplicateParameter { name, .. } if name == "id"));
    }

    // ── Pattern::matches ──────────────────────────────────────────────────────

    #[test]
    fn matches_tolerates_optional_slashes() {
        let pat = Pattern::compile("/users").unwrap();
        assert!(pat.is_match("/users"));
        assert!(pat.is_match("users"));
        assert!(pat.is_match("/users/"));
        assert!(!pat.is_match("/users//"));
    }

    #[test]
    fn trailing_slash_in_template_is_equivalent() {
        let a = Pattern::compile("/users/").unwrap();
        let b = Pattern::compile("/users").unwrap();
        assert_eq!(a.as_str(), b.as_str());
        assert!(a.is_match("/users"));
    }

    #[test]
    fn matches_is_anchored() {
        let pat = Pattern::compile("/users").unwrap();
        assert!(!pat.is_match("/api/users"));
        assert!(!pat.is_match("/users/42"));
    }

    #[test]
    fn matches_root() {
        let pat = Pattern::compile("/").unwrap();
        assert!(pat.is_match("/"));
        assert!(pat.is_match(""));
        assert!(!pat.is_match("/other"));
    }

    #[test]
    fn matches_extracts_values() {
        let pat = Pattern::compile("/{a}/and/{b}").unwrap();
        let params = pat.matches("/left/and/right").unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some("left"));
        assert_eq!(params.get("b"), Some("right"));
    }

    #[test]
    fn placeholder_does_not_cross_segments() {
        let pat = Pattern::compile("/files/{name}").unwrap();
        assert!(pat.matches("/files/docs/readme").is_none());
    }

    #[test]
    fn placeholder_rejects_disallowed_characters() {
        let pat = Pattern::compile("/search/{term}").unwrap();
        assert!(pat.matches("/search/a%20b").is_none());
        assert!(pat.matches("/search/").is_none());
    }

    #[test]
    fn substitution_round_trip() {
        let pat = Pattern::compile("/org/{a}/repo/{b}/").unwrap();
        for (a, b) in [("x", "y"), ("acme-corp", "tool_2"), ("0", "Z-9")] {
            let path = format!("/org/{a}/repo/{b}/");
            let params = pat.matches(&path).unwrap();
            assert_eq!(params.get("a"), Some(a));
            assert_eq!(params.get("b"), Some(b));
            assert_eq!(params.len(), 2);
        }
    }

    // ── Pattern::expand ───────────────────────────────────────────────────────

    #[test]
    fn expand_substitutes_values() {
        let pat = Pattern::compile("//user/{id}/contact/{contact_id}").unwrap();
        let values: PathParams = [("id", "7"), ("contact_id", "c-3")].into_iter().collect();
        let url = pat.expand(&values).unwrap();
        assert_eq!(url, "/user/7/contact/c-3");
        assert_eq!(pat.matches(&url), Some(values));
    }

    #[test]
    fn expand_reports_missing_value() {
        let pat = Pattern::compile("/user/{id}").unwrap();
        let err = pat.expand(&PathParams::new()).unwrap_err();
        assert!(matches!(err, PatternError::MissingParameter { name, .. } if name == "id"));
    }

    #[test]
    fn expand_rejects_unmatchable_value() {
        let pat = Pattern::compile("/user/{id}").unwrap();
        let values: PathParams = [("id", "a/b")].into_iter().collect();
        assert!(matches!(
            pat.expand(&values),
            Err(PatternError::InvalidValue { .. })
        ));
    }

    // ── placeholder_name ──────────────────────────────────────────────────────

    #[test]
    fn placeholder_name_requires_whole_segment() {
        assert_eq!(placeholder_name("{id}"), Some("id"));
        assert_eq!(placeholder_name("file-{id}"), None);
        assert_eq!(placeholder_name("{}"), None);
        assert_eq!(placeholder_name("users"), None);
    }
}
