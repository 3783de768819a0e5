//! Ordering of resolved literal values

use std::cmp::Ordering;

use serde_json::Value as Json;

/// Compares two literals of the same kind.
///
/// Numbers compare numerically (integers exactly, anything else as `f64`),
/// strings lexicographically, booleans with `false < true`. Literals of
/// different kinds, lists and objects have no order and yield `None`.
pub fn compare_values(a: &Json, b: &Json) -> Option<Ordering> {
    match (a, b) {
        (Json::Null, Json::Null) => Some(Ordering::Equal),
        (Json::Bool(a), Json::Bool(b)) => Some(a.cmp(b)),
        (Json::Number(a), Json::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                return Some(a.cmp(&b));
            }
            if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
                return Some(a.cmp(&b));
            }
            a.as_f64()?.partial_cmp(&b.as_f64()?)
        }
        (Json::String(a), Json::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Maps an ordering onto `-1`, `0` or `1`
pub fn signum(ordering: Ordering) -> i64 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compare_numbers() {
        assert_eq!(compare_values(&json!(42), &json!(64)), Some(Ordering::Less));
        assert_eq!(compare_values(&json!(42), &json!(42.0)), Some(Ordering::Equal));
        assert_eq!(compare_values(&json!(1.5), &json!(1)), Some(Ordering::Greater));
        assert_eq!(
            compare_values(&json!(i64::MAX), &json!(i64::MAX - 1)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_compare_strings_and_bools() {
        assert_eq!(compare_values(&json!("a"), &json!("b")), Some(Ordering::Less));
        assert_eq!(compare_values(&json!(true), &json!(false)), Some(Ordering::Greater));
        assert_eq!(compare_values(&json!(null), &json!(null)), Some(Ordering::Equal));
    }

    #[test]
    fn test_incomparable_values() {
        assert_eq!(compare_values(&json!("1"), &json!(1)), None);
        assert_eq!(compare_values(&json!([1]), &json!([1])), None);
        assert_eq!(compare_values(&json!({}), &json!({})), None);
    }

    #[test]
    fn test_signum() {
        assert_eq!(signum(Ordering::Less), -1);
        assert_eq!(signum(Ordering::Equal), 0);
        assert_eq!(signum(Ordering::Greater), 1);
    }
}
