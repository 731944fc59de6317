//! Minimal JSON path queries and path formatting.
//!
//! Supports `$`, `$.field`, `$.field.nested`, `$.array[0]` and `$[0]`.

use serde_json::Value;

/// Root path of a document.
pub const ROOT: &str = "$";

/// Query a JSON value using a simple JSONPath-like syntax.
///
/// Returns `Ok(None)` if the path is well formed but nothing exists there.
///
/// # Errors
///
/// Returns a description of the problem if the path is malformed.
pub fn query<'a>(json: &'a Value, path: &str) -> Result<Option<&'a Value>, String> {
    let path = path.trim();
    let Some(rest) = path.strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };

    let rest = rest.strip_prefix('.').unwrap_or(rest);
    let mut current = json;

    for segment in split_path_segments(rest) {
        let (name, indices) = parse_segment(&segment)?;
        if !name.is_empty() {
            current = match current.get(name) {
                Some(v) => v,
                None => return Ok(None),
            };
        }
        for index in indices {
            current = match current.get(index) {
                Some(v) => v,
                None => return Ok(None),
            };
        }
    }

    Ok(Some(current))
}

/// Path of an object member.
#[must_use]
pub fn child_key(parent: &str, key: &str) -> String {
    format!("{parent}.{key}")
}

/// Path of an array element.
#[must_use]
pub fn child_index(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// Split a path into segments, respecting array brackets.
fn split_path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                in_bracket = true;
                current.push(ch);
            }
            ']' => {
                in_bracket = false;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Parse a segment like `field[0][1]` into `("field", [0, 1])`.
fn parse_segment(segment: &str) -> Result<(&str, Vec<usize>), String> {
    let Some(bracket_start) = segment.find('[') else {
        return Ok((segment, Vec::new()));
    };

    let name = &segment[..bracket_start];
    let mut indices = Vec::new();
    let mut rest = &segment[bracket_start..];
    while let Some(inner) = rest.strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            return Err(format!("Unclosed '[' in segment '{segment}'"));
        };
        let index = inner[..close]
            .trim()
            .parse()
            .map_err(|_| format!("Invalid array index: {}", &inner[..close]))?;
        indices.push(index);
        rest = &inner[close + 1..];
    }
    if !rest.is_empty() {
        return Err(format!("Unexpected '{rest}' in segment '{segment}'"));
    }

    Ok((name, indices))
}
