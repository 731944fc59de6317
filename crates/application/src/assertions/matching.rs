//! Subset matching for `JsonMatch` and `JsonLike`.

use probe_domain::LikeOptions;
use probe_domain::testing::{ExpectationKind, Failure};
use serde_json::{Number, Value};

use super::json_path::{child_index, child_key};

/// How leaf values are compared.
#[derive(Debug, Clone, Copy)]
pub enum MatchMode {
    /// Deep, type-sensitive equality. Numbers compare exactly.
    Exact,
    /// Tolerant comparison using the given options.
    Like(LikeOptions),
}

impl MatchMode {
    const fn expectation(self) -> ExpectationKind {
        match self {
            Self::Exact => ExpectationKind::JsonMatch,
            Self::Like(_) => ExpectationKind::JsonLike,
        }
    }
}

/// Checks that `expected` is a subset of `actual`, appending one
/// `ValueMismatch` per differing leaf path.
///
/// Objects are compared as subsets: keys absent from `expected` are ignored.
/// In `Exact` mode arrays must have the same length and match element-wise;
/// in `Like` mode every expected element must match some actual element.
pub fn match_subset(
    expected: &Value,
    actual: Option<&Value>,
    path: &str,
    mode: MatchMode,
    failures: &mut Vec<Failure>,
) {
    let mismatch = |actual: Option<&Value>| Failure::ValueMismatch {
        expectation: mode.expectation(),
        path: path.to_string(),
        expected: expected.clone(),
        actual: actual.cloned(),
    };

    let Some(actual) = actual else {
        failures.push(mismatch(None));
        return;
    };

    match (expected, actual) {
        (Value::Object(expected_members), Value::Object(actual_members)) => {
            for (key, expected_value) in expected_members {
                match_subset(
                    expected_value,
                    actual_members.get(key),
                    &child_key(path, key),
                    mode,
                    failures,
                );
            }
        }
        (Value::Array(expected_items), Value::Array(actual_items)) => match mode {
            MatchMode::Exact => {
                if expected_items.len() == actual_items.len() {
                    for (index, (e, a)) in expected_items.iter().zip(actual_items).enumerate() {
                        match_subset(e, Some(a), &child_index(path, index), mode, failures);
                    }
                } else {
                    failures.push(mismatch(Some(actual)));
                }
            }
            MatchMode::Like(_) => {
                for (index, e) in expected_items.iter().enumerate() {
                    let found = actual_items.iter().any(|a| {
                        let mut scratch = Vec::new();
                        match_subset(e, Some(a), path, mode, &mut scratch);
                        scratch.is_empty()
                    });
                    if !found {
                        failures.push(Failure::ValueMismatch {
                            expectation: mode.expectation(),
                            path: child_index(path, index),
                            expected: e.clone(),
                            actual: None,
                        });
                    }
                }
            }
        },
        (Value::Object(_) | Value::Array(_), _) => failures.push(mismatch(Some(actual))),
        _ => {
            if !scalars_match(expected, actual, mode) {
                failures.push(mismatch(Some(actual)));
            }
        }
    }
}

fn scalars_match(expected: &Value, actual: &Value, mode: MatchMode) -> bool {
    match (expected, actual, mode) {
        (Value::Number(e), Value::Number(a), MatchMode::Exact) => numbers_equal(e, a),
        (Value::Number(e), Value::Number(a), MatchMode::Like(options)) => {
            numbers_equal(e, a)
                || matches!(
                    (e.as_f64(), a.as_f64()),
                    (Some(x), Some(y)) if (x - y).abs() <= options.epsilon
                )
        }
        (Value::String(e), Value::String(a), MatchMode::Like(options)) => {
            normalize(e, options) == normalize(a, options)
        }
        _ => expected == actual,
    }
}

/// Exact numeric equality: integers compare as integers, anything else as
/// `f64` without rounding, so `1` equals `1.0` but `9.99` never equals `9.990001`.
#[allow(clippy::float_cmp)]
fn numbers_equal(expected: &Number, actual: &Number) -> bool {
    if let (Some(e), Some(a)) = (expected.as_i64(), actual.as_i64()) {
        return e == a;
    }
    if let (Some(e), Some(a)) = (expected.as_u64(), actual.as_u64()) {
        return e == a;
    }
    match (expected.as_f64(), actual.as_f64()) {
        (Some(e), Some(a)) => e == a,
        _ => false,
    }
}

fn normalize(value: &str, options: LikeOptions) -> String {
    let value = if options.normalize_whitespace {
        value.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        value.to_string()
    };
    if options.ignore_case {
        value.to_lowercase()
    } else {
        value
    }
}
