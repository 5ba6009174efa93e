use crate::order::{natural_cmp, structural_cmp};
use regex::Regex;
use samegraph_common::{Node, SameGraphError};
use std::cmp::Ordering;
use thiserror::Error;

/// Failure raised by a rule invoked against values it cannot judge, e.g. the
/// comparable rule applied to a node with no natural ordering. The engine
/// attaches the offending traversal path and surfaces it as a configuration
/// error.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("{0}")]
    Unsupported(String),
}

/// A registered comparison strategy. Returns whether the actual value is
/// equivalent to the expected value; a rule fully replaces structural
/// recursion for the subtree it is resolved at.
pub trait PropertyRule {
    fn matches(&self, expected: &Node, actual: &Node) -> Result<bool, RuleError>;

    /// Short name used in trace logging.
    fn name(&self) -> &'static str;
}

/// Exact value equality.
pub struct IsEqual;

impl PropertyRule for IsEqual {
    fn matches(&self, expected: &Node, actual: &Node) -> Result<bool, RuleError> {
        if expected.is_null() || actual.is_null() {
            return Ok(expected.is_null() && actual.is_null());
        }
        match natural_cmp(expected, actual) {
            Some(ordering) => Ok(ordering == Ordering::Equal),
            None => Ok(structural_cmp(expected, actual) == Ordering::Equal),
        }
    }

    fn name(&self) -> &'static str {
        "IsEqual"
    }
}

/// Case-insensitive string equality.
pub struct IsEqualIgnoreCase;

impl PropertyRule for IsEqualIgnoreCase {
    fn matches(&self, expected: &Node, actual: &Node) -> Result<bool, RuleError> {
        match (expected, actual) {
            (Node::Null, Node::Null) => Ok(true),
            (Node::Null, _) | (_, Node::Null) => Ok(false),
            (Node::Text(e), Node::Text(a)) => Ok(e.to_lowercase() == a.to_lowercase()),
            _ => Err(RuleError::Unsupported(format!(
                "IsEqualIgnoreCase requires string values, got {} and {}",
                expected.type_name(),
                actual.type_name()
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "IsEqualIgnoreCase"
    }
}

/// Equality through natural ordering, for values whose representation may
/// differ while the ordered value is the same (decimals, instants).
pub struct IsComparable;

impl PropertyRule for IsComparable {
    fn matches(&self, expected: &Node, actual: &Node) -> Result<bool, RuleError> {
        if expected.is_null() && actual.is_null() {
            return Ok(true);
        }
        match natural_cmp(expected, actual) {
            Some(ordering) => Ok(ordering == Ordering::Equal),
            None => Err(RuleError::Unsupported(format!(
                "type {} must support natural ordering",
                expected.type_name()
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "IsComparable"
    }
}

/// The actual value must be a string matching the whole pattern.
pub struct HasPattern {
    regex: Regex,
}

impl HasPattern {
    pub fn new(pattern: &str) -> samegraph_common::Result<Self> {
        // Anchored so the entire value has to match, not a substring.
        let regex = Regex::new(&format!("^(?:{})$", pattern))
            .map_err(|e| SameGraphError::Pattern(e.to_string()))?;
        Ok(HasPattern { regex })
    }
}

impl PropertyRule for HasPattern {
    fn matches(&self, expected: &Node, actual: &Node) -> Result<bool, RuleError> {
        if expected.is_null() {
            return Ok(actual.is_null());
        }
        match actual {
            Node::Text(s) => Ok(self.regex.is_match(s)),
            _ => Ok(false),
        }
    }

    fn name(&self) -> &'static str {
        "HasPattern"
    }
}

/// Instant equality truncated to day granularity.
pub struct IsEqualDate;

impl PropertyRule for IsEqualDate {
    fn matches(&self, expected: &Node, actual: &Node) -> Result<bool, RuleError> {
        match (expected, actual) {
            (Node::Null, Node::Null) => Ok(true),
            (Node::Null, _) | (_, Node::Null) => Ok(false),
            (Node::Instant(e), Node::Instant(a)) => Ok(e.date_naive() == a.date_naive()),
            _ => Err(RuleError::Unsupported(format!(
                "IsEqualDate requires temporal values, got {} and {}",
                expected.type_name(),
                actual.type_name()
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "IsEqualDate"
    }
}

/// Instant equality at millisecond granularity.
pub struct IsEqualTimestamp;

impl PropertyRule for IsEqualTimestamp {
    fn matches(&self, expected: &Node, actual: &Node) -> Result<bool, RuleError> {
        match (expected, actual) {
            (Node::Null, Node::Null) => Ok(true),
            (Node::Null, _) | (_, Node::Null) => Ok(false),
            (Node::Instant(e), Node::Instant(a)) => {
                Ok(e.timestamp_millis() == a.timestamp_millis())
            }
            _ => Err(RuleError::Unsupported(format!(
                "IsEqualTimestamp requires temporal values, got {} and {}",
                expected.type_name(),
                actual.type_name()
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "IsEqualTimestamp"
    }
}

/// Always equivalent; registering this at any scope excludes the subtree
/// from the comparison.
pub struct Excluded;

impl PropertyRule for Excluded {
    fn matches(&self, _expected: &Node, _actual: &Node) -> Result<bool, RuleError> {
        Ok(true)
    }

    fn name(&self) -> &'static str {
        "Excluded"
    }
}

/// Adapter for an arbitrary two-argument predicate.
pub struct Predicate {
    check: Box<dyn Fn(&Node, &Node) -> bool>,
}

impl Predicate {
    pub fn new(check: impl Fn(&Node, &Node) -> bool + 'static) -> Self {
        Predicate {
            check: Box::new(check),
        }
    }
}

impl PropertyRule for Predicate {
    fn matches(&self, expected: &Node, actual: &Node) -> Result<bool, RuleError> {
        Ok((self.check)(expected, actual))
    }

    fn name(&self) -> &'static str {
        "Predicate"
    }
}

/// Adapter for a single-argument value predicate, applied to both sides.
pub struct ValuePredicate {
    check: Box<dyn Fn(&Node) -> bool>,
}

impl ValuePredicate {
    pub fn new(check: impl Fn(&Node) -> bool + 'static) -> Self {
        ValuePredicate {
            check: Box::new(check),
        }
    }
}

impl PropertyRule for ValuePredicate {
    fn matches(&self, expected: &Node, actual: &Node) -> Result<bool, RuleError> {
        Ok((self.check)(expected) && (self.check)(actual))
    }

    fn name(&self) -> &'static str {
        "ValuePredicate"
    }
}
