// Built-in rule checks

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// Common regex patterns
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap()
});

static ALPHA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

static ALPHANUM_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

/// A single rule check with typed parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    Required,
    StringType,
    Numeric,
    Integer,
    Boolean,
    ArrayType,
    Email,
    Url,
    Uuid,
    Alpha,
    AlphaNum,
    Min(f64),
    Max(f64),
    Between(f64, f64),
    In(Vec<String>),
    NotIn(Vec<String>),
}

impl Check {
    /// Whether `value` satisfies this check.
    ///
    /// `numeric` hints that the surrounding rule list declares the field
    /// numeric, which switches min/max/between on strings from length to
    /// value comparison.
    pub fn passes(&self, value: &Value, numeric: bool) -> bool {
        match self {
            Check::Required => is_present(Some(value)),
            Check::StringType => value.is_string(),
            Check::Numeric => numeric_value(value).is_some(),
            Check::Integer => is_integer(value),
            Check::Boolean => is_boolean(value),
            Check::ArrayType => value.is_array(),
            Check::Email => matches_pattern(value, &EMAIL_REGEX),
            Check::Url => matches_pattern(value, &URL_REGEX),
            Check::Uuid => matches_pattern(value, &UUID_REGEX),
            Check::Alpha => matches_pattern(value, &ALPHA_REGEX),
            Check::AlphaNum => matches_pattern(value, &ALPHANUM_REGEX),
            Check::Min(min) => size_of(value, numeric).is_some_and(|size| size >= *min),
            Check::Max(max) => size_of(value, numeric).is_some_and(|size| size <= *max),
            Check::Between(min, max) => {
                size_of(value, numeric).is_some_and(|size| size >= *min && size <= *max)
            }
            Check::In(list) => in_list(value, list),
            Check::NotIn(list) => !in_list(value, list),
        }
    }

    /// Failure message for `field`.
    pub fn message(&self, field: &str) -> String {
        match self {
            Check::Required => format!("{field} is required"),
            Check::StringType => format!("{field} must be a string"),
            Check::Numeric => format!("{field} must be a number"),
            Check::Integer => format!("{field} must be an integer"),
            Check::Boolean => format!("{field} must be a boolean"),
            Check::ArrayType => format!("{field} must be an array"),
            Check::Email => format!("{field} must be a valid email"),
            Check::Url => format!("{field} must be a valid URL"),
            Check::Uuid => format!("{field} must be a valid UUID"),
            Check::Alpha => format!("{field} must contain only letters"),
            Check::AlphaNum => format!("{field} must contain only letters and numbers"),
            Check::Min(min) => format!("{field} must be at least {min}"),
            Check::Max(max) => format!("{field} must be at most {max}"),
            Check::Between(min, max) => format!("{field} must be between {min} and {max}"),
            Check::In(list) => format!("{field} must be one of: {}", list.join(", ")),
            Check::NotIn(list) => format!("{field} must not be one of: {}", list.join(", ")),
        }
    }
}

/// Presence of a value: absent, null, empty strings, and empty collections
/// all count as missing.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(_) => true,
    }
}

fn matches_pattern(value: &Value, pattern: &Regex) -> bool {
    value.as_str().is_some_and(|s| pattern.is_match(s))
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => s.parse::<i64>().is_ok(),
        _ => false,
    }
}

fn is_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::Number(n) => matches!(n.as_i64(), Some(0) | Some(1)),
        Value::String(s) => s == "0" || s == "1",
        _ => false,
    }
}

/// The comparable size of a value: numbers by value, strings by char count
/// (by value when the field is declared numeric), arrays by element count.
fn size_of(value: &Value, numeric: bool) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            if numeric {
                if let Ok(parsed) = s.parse::<f64>() {
                    return Some(parsed);
                }
            }
            Some(s.chars().count() as f64)
        }
        Value::Array(a) => Some(a.len() as f64),
        _ => None,
    }
}

fn in_list(value: &Value, list: &[String]) -> bool {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return false,
    };
    list.iter().any(|item| item == &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required() {
        assert!(Check::Required.passes(&json!("x"), false));
        assert!(Check::Required.passes(&json!(0), false));
        assert!(!Check::Required.passes(&json!(""), false));
        assert!(!Check::Required.passes(&json!(null), false));
        assert!(!Check::Required.passes(&json!([]), false));
    }

    #[test]
    fn test_presence() {
        assert!(!is_present(None));
        assert!(!is_present(Some(&json!(null))));
        assert!(!is_present(Some(&json!(""))));
        assert!(!is_present(Some(&json!({}))));
        assert!(is_present(Some(&json!(false))));
        assert!(is_present(Some(&json!([1]))));
    }

    #[test]
    fn test_numeric() {
        assert!(Check::Numeric.passes(&json!(5), false));
        assert!(Check::Numeric.passes(&json!(-1.5), false));
        assert!(Check::Numeric.passes(&json!("10"), false));
        assert!(!Check::Numeric.passes(&json!("askjaksjakjskasj"), false));
        assert!(!Check::Numeric.passes(&json!(true), false));
    }

    #[test]
    fn test_integer() {
        assert!(Check::Integer.passes(&json!(5), false));
        assert!(Check::Integer.passes(&json!("42"), false));
        assert!(!Check::Integer.passes(&json!(1.5), false));
        assert!(!Check::Integer.passes(&json!("1.5"), false));
    }

    #[test]
    fn test_boolean() {
        assert!(Check::Boolean.passes(&json!(true), false));
        assert!(Check::Boolean.passes(&json!(0), false));
        assert!(Check::Boolean.passes(&json!("1"), false));
        assert!(!Check::Boolean.passes(&json!("true"), false));
        assert!(!Check::Boolean.passes(&json!(2), false));
    }

    #[test]
    fn test_min_max_on_numbers() {
        assert!(Check::Min(1.0).passes(&json!(5), true));
        assert!(!Check::Min(1.0).passes(&json!(-1), true));
        assert!(Check::Max(10.0).passes(&json!(10), true));
        assert!(!Check::Max(10.0).passes(&json!(100), true));
    }

    #[test]
    fn test_min_max_on_strings() {
        // Without a numeric hint string sizes are char counts.
        assert!(Check::Min(3.0).passes(&json!("abcd"), false));
        assert!(!Check::Min(3.0).passes(&json!("ab"), false));
        // With the hint, numeric strings compare by value.
        assert!(Check::Min(3.0).passes(&json!("10"), true));
        assert!(!Check::Min(3.0).passes(&json!("2"), true));
    }

    #[test]
    fn test_min_max_on_arrays() {
        assert!(Check::Min(2.0).passes(&json!([1, 2]), false));
        assert!(!Check::Min(3.0).passes(&json!([1, 2]), false));
    }

    #[test]
    fn test_between() {
        assert!(Check::Between(1.0, 10.0).passes(&json!(1), true));
        assert!(Check::Between(1.0, 10.0).passes(&json!(10), true));
        assert!(!Check::Between(1.0, 10.0).passes(&json!(0), true));
        assert!(!Check::Between(1.0, 10.0).passes(&json!(11), true));
    }

    #[test]
    fn test_in_and_not_in() {
        let list = vec!["red".to_string(), "green".to_string()];
        assert!(Check::In(list.clone()).passes(&json!("red"), false));
        assert!(!Check::In(list.clone()).passes(&json!("blue"), false));
        assert!(Check::NotIn(list.clone()).passes(&json!("blue"), false));
        assert!(!Check::NotIn(list).passes(&json!("green"), false));
    }

    #[test]
    fn test_in_compares_numbers_as_text() {
        let list = vec!["1".to_string(), "2".to_string()];
        assert!(Check::In(list.clone()).passes(&json!(1), false));
        assert!(!Check::In(list).passes(&json!(3), false));
    }

    #[test]
    fn test_string_formats() {
        assert!(Check::Email.passes(&json!("user@example.com"), false));
        assert!(!Check::Email.passes(&json!("invalid"), false));
        assert!(Check::Url.passes(&json!("https://example.com"), false));
        assert!(!Check::Url.passes(&json!("not a url"), false));
        assert!(Check::Uuid.passes(&json!("550e8400-e29b-41d4-a716-446655440000"), false));
        assert!(!Check::Uuid.passes(&json!("not-a-uuid"), false));
        assert!(Check::Alpha.passes(&json!("abcXYZ"), false));
        assert!(!Check::Alpha.passes(&json!("abc123"), false));
        assert!(Check::AlphaNum.passes(&json!("abc123"), false));
        assert!(!Check::AlphaNum.passes(&json!("abc-123"), false));
    }

    #[test]
    fn test_messages_name_the_field() {
        assert_eq!(Check::Required.message("name"), "name is required");
        assert_eq!(Check::Min(1.0).message("int"), "int must be at least 1");
        assert_eq!(
            Check::Between(1.0, 10.0).message("score"),
            "score must be between 1 and 10"
        );
        assert_eq!(
            Check::In(vec!["a".to_string(), "b".to_string()]).message("kind"),
            "kind must be one of: a, b"
        );
    }
}
