//! Named validation rules applied to single argument and option values.
//!
//! The registry is fixed at compile time. Each rule is a predicate over an
//! optional string value; absent values (`None`) flow through the
//! predicates and fail everything except `empty`, so an option whose flag
//! was never given still fails a `required` or `number` rule.
//!
//! # Examples
//!
//! ```
//! use commandeer_core::rules;
//!
//! assert!(rules::check(Some("123"), "number").is_ok());
//! assert!(rules::check(Some("foobar"), "number").is_err());
//! assert!(rules::check(None, "empty").is_ok());
//! assert!(!rules::is_known("someRuleThatCantPossiblyExist"));
//! ```

use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static regex must compile"));

/// Failure modes of a single rule application.
///
/// An unknown rule name is distinct from a violated rule; callers surface
/// the two with different message shapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The rule name is not in the registry.
    #[error("unknown rule: {0}")]
    Unknown(String),
    /// The value did not satisfy the rule.
    #[error("value must be {0}")]
    Violated(String),
}

type Predicate = fn(Option<&str>) -> bool;

const RULES: &[(&str, Predicate)] = &[
    ("alphanumeric", is_alphanumeric),
    ("boolean", is_boolean),
    ("decimal", is_decimal),
    ("email", is_email),
    ("empty", is_empty),
    ("int", is_int),
    ("ip", is_ip),
    ("number", is_number),
    ("required", is_required),
];

/// Names of every registered rule, in registry order.
pub fn rule_names() -> impl Iterator<Item = &'static str> {
    RULES.iter().map(|(name, _)| *name)
}

/// `true` when `rule` is in the registry.
pub fn is_known(rule: &str) -> bool {
    lookup(rule).is_some()
}

/// Applies a named rule to a value.
///
/// Returns [`RuleError::Unknown`] when the rule name is not registered and
/// [`RuleError::Violated`] when the value does not satisfy it. Callers stop
/// at the first failure in a rule list.
pub fn check(value: Option<&str>, rule: &str) -> Result<(), RuleError> {
    match lookup(rule) {
        None => Err(RuleError::Unknown(rule.to_string())),
        Some(predicate) if predicate(value) => Ok(()),
        Some(_) => Err(RuleError::Violated(rule.to_string())),
    }
}

fn lookup(rule: &str) -> Option<Predicate> {
    RULES
        .iter()
        .find(|(name, _)| *name == rule)
        .map(|(_, predicate)| *predicate)
}

// A present, non-empty string. Whitespace counts as content.
fn is_required(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

fn is_empty(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

fn is_number(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.parse::<f64>().is_ok_and(f64::is_finite))
}

fn is_int(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.parse::<i64>().is_ok())
}

// Plain decimal notation: optional sign, digits, at most one point.
fn is_decimal(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        let digits = v.strip_prefix(['+', '-']).unwrap_or(v);
        !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
            && digits.chars().any(|c| c.is_ascii_digit())
            && digits.matches('.').count() <= 1
    })
}

fn is_boolean(value: Option<&str>) -> bool {
    matches!(value, Some("true") | Some("false"))
}

fn is_alphanumeric(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty() && v.chars().all(char::is_alphanumeric))
}

fn is_ip(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.parse::<IpAddr>().is_ok())
}

fn is_email(value: Option<&str>) -> bool {
    value.is_some_and(|v| EMAIL_RE.is_match(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_rule_is_distinct_from_violation() {
        assert_eq!(
            check(Some("123"), "someRuleThatCantPossiblyExist"),
            Err(RuleError::Unknown(
                "someRuleThatCantPossiblyExist".to_string()
            ))
        );
        assert_eq!(
            check(Some("foobar"), "number"),
            Err(RuleError::Violated("number".to_string()))
        );
    }

    #[test]
    fn test_required_accepts_non_empty_strings_only() {
        assert!(check(Some("x"), "required").is_ok());
        assert!(check(Some(" "), "required").is_ok());
        assert!(check(Some(""), "required").is_err());
        assert!(check(None, "required").is_err());
    }

    #[test]
    fn test_number() {
        assert!(check(Some("123"), "number").is_ok());
        assert!(check(Some("-1.5"), "number").is_ok());
        assert!(check(Some("1e3"), "number").is_ok());
        assert!(check(Some("foobar"), "number").is_err());
        assert!(check(Some("inf"), "number").is_err());
        assert!(check(None, "number").is_err());
    }

    #[test]
    fn test_int() {
        assert!(check(Some("42"), "int").is_ok());
        assert!(check(Some("-7"), "int").is_ok());
        assert!(check(Some("1.5"), "int").is_err());
        assert!(check(Some("x"), "int").is_err());
    }

    #[test]
    fn test_decimal() {
        assert!(check(Some("3.25"), "decimal").is_ok());
        assert!(check(Some("-10"), "decimal").is_ok());
        assert!(check(Some("1e3"), "decimal").is_err());
        assert!(check(Some("."), "decimal").is_err());
        assert!(check(Some("1.2.3"), "decimal").is_err());
    }

    #[test]
    fn test_boolean() {
        assert!(check(Some("true"), "boolean").is_ok());
        assert!(check(Some("false"), "boolean").is_ok());
        assert!(check(Some("yes"), "boolean").is_err());
        assert!(check(Some("True"), "boolean").is_err());
    }

    #[test]
    fn test_alphanumeric() {
        assert!(check(Some("abc123"), "alphanumeric").is_ok());
        assert!(check(Some("abc-123"), "alphanumeric").is_err());
        assert!(check(Some(""), "alphanumeric").is_err());
    }

    #[test]
    fn test_ip() {
        assert!(check(Some("127.0.0.1"), "ip").is_ok());
        assert!(check(Some("::1"), "ip").is_ok());
        assert!(check(Some("999.0.0.1"), "ip").is_err());
    }

    #[test]
    fn test_email() {
        assert!(check(Some("dev@example.com"), "email").is_ok());
        assert!(check(Some("not-an-email"), "email").is_err());
        assert!(check(Some("a@b"), "email").is_err());
    }

    #[test]
    fn test_empty_is_the_only_rule_passing_absent_values() {
        for name in rule_names() {
            let outcome = check(None, name);
            if name == "empty" {
                assert!(outcome.is_ok());
            } else {
                assert!(outcome.is_err(), "rule {name} accepted an absent value");
            }
        }
    }
}
