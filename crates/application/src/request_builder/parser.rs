//! Placeholder parser for `{name}` path templates
//!
//! Parses path templates to extract placeholder references with their positions.

use std::ops::Range;

use crate::error::BuildError;

/// A `{name}` reference in a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The variable name (without braces).
    pub name: String,

    /// Byte range in the template covering the braces.
    pub span: Range<usize>,
}

/// Parses a path template and extracts all placeholders in order.
///
/// # Examples
///
/// ```
/// use probe_application::request_builder::parse_placeholders;
///
/// let refs = parse_placeholders("/users/{user_id}/carts/{cart}").unwrap();
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "user_id");
/// assert_eq!(refs[1].span, 23..29);
/// ```
///
/// # Errors
///
/// Returns `BuildError::MalformedTemplate` for an unclosed `{`, a stray `}`,
/// or a placeholder whose name is empty or not a valid identifier.
pub fn parse_placeholders(template: &str) -> Result<Vec<Placeholder>, BuildError> {
    let malformed = |reason: String| BuildError::MalformedTemplate {
        template: template.to_string(),
        reason,
    };

    let mut placeholders = Vec::new();
    let mut chars = template.char_indices();

    while let Some((start, ch)) = chars.next() {
        match ch {
            '{' => {
                let mut name = String::new();
                let mut end = None;
                for (idx, inner) in chars.by_ref() {
                    match inner {
                        '}' => {
                            end = Some(idx + 1);
                            break;
                        }
                        '{' => return Err(malformed(format!("nested '{{' at byte {idx}"))),
                        other => name.push(other),
                    }
                }

                let Some(end) = end else {
                    return Err(malformed(format!("unclosed '{{' at byte {start}")));
                };
                let name = name.trim();
                if !is_valid_variable_name(name) {
                    return Err(malformed(format!("invalid placeholder name '{name}'")));
                }
                placeholders.push(Placeholder {
                    name: name.to_string(),
                    span: start..end,
                });
            }
            '}' => return Err(malformed(format!("unmatched '}}' at byte {start}"))),
            _ => {}
        }
    }

    Ok(placeholders)
}

/// Validates a placeholder name.
/// Valid names start with a letter or underscore and continue with
/// alphanumerics, underscores or hyphens.
#[must_use]
pub fn is_valid_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}
