use crate::order::{decimal_cmp, natural_cmp, structural_cmp};
use crate::path::GraphPath;
use crate::registry::OverrideRegistry;
use crate::report::{MatchContext, MatchReport};
use crate::rules::{Excluded, Predicate, PropertyRule, RuleError};
use samegraph_common::{Node, ObjectRef, Result, SameGraphError, ToNode};
use std::cmp::Ordering;
use std::rc::Rc;
use tracing::{debug, trace};

type FallbackOrdering = Rc<dyn Fn(&Node, &Node) -> Ordering>;

/// Deep structural-equivalence engine.
///
/// Holds the expected graph and a registry of comparison overrides, then
/// walks expected/actual pairs top-down on every match call, accumulating
/// path-qualified mismatches:
///
/// ```
/// use samegraph_core::GraphMatcher;
///
/// let matcher = GraphMatcher::named(&vec![1, 2, 3], "Numbers");
/// assert!(matcher.matches(&vec![3, 1, 2]).unwrap());
/// assert!(!matcher.matches(&vec![1, 2]).unwrap());
/// ```
///
/// One instance can be reused for sequential match calls; the cycle guard
/// and mismatch ledger are created fresh per call.
pub struct GraphMatcher {
    expected: Node,
    root_name: String,
    overrides: OverrideRegistry,
    fallback_ordering: FallbackOrdering,
}

impl GraphMatcher {
    /// Match against `expected`, reporting paths under its simple type name.
    pub fn new(expected: &impl ToNode) -> Self {
        let node = expected.to_node();
        let root_name = node.type_name();
        Self::from_node(node, root_name)
    }

    /// Match against `expected`, reporting paths under the given root name.
    pub fn named(expected: &impl ToNode, root_name: impl Into<String>) -> Self {
        Self::from_node(expected.to_node(), root_name.into())
    }

    fn from_node(expected: Node, root_name: String) -> Self {
        GraphMatcher {
            expected,
            root_name,
            overrides: OverrideRegistry::new(),
            fallback_ordering: Rc::new(structural_cmp),
        }
    }

    /// Exclude a full path from the comparison, e.g. `Person.LastName`.
    pub fn exclude_path(mut self, path: &str) -> Self {
        self.overrides.put_path(path, Rc::new(Excluded));
        self
    }

    /// Exclude a property name wherever it appears, e.g. `LastName`.
    pub fn exclude_property(mut self, property: &str) -> Self {
        self.overrides.put_property(property, Rc::new(Excluded));
        self
    }

    /// Exclude every value of the named runtime type, e.g. `DateTime`.
    pub fn exclude_type(mut self, type_name: &str) -> Self {
        self.overrides.put_type(type_name, Rc::new(Excluded));
        self
    }

    /// Override the rule used for a full path.
    pub fn compare_path(mut self, path: &str, rule: impl PropertyRule + 'static) -> Self {
        self.overrides.put_path(path, Rc::new(rule));
        self
    }

    /// Override the rule used for a property name.
    pub fn compare_property(mut self, property: &str, rule: impl PropertyRule + 'static) -> Self {
        self.overrides.put_property(property, Rc::new(rule));
        self
    }

    /// Override the rule used for a runtime type.
    pub fn compare_type(mut self, type_name: &str, rule: impl PropertyRule + 'static) -> Self {
        self.overrides.put_type(type_name, Rc::new(rule));
        self
    }

    /// Override a path with a two-argument predicate.
    pub fn compare_path_with(
        self,
        path: &str,
        check: impl Fn(&Node, &Node) -> bool + 'static,
    ) -> Self {
        self.compare_path(path, Predicate::new(check))
    }

    /// Override a property name with a two-argument predicate.
    pub fn compare_property_with(
        self,
        property: &str,
        check: impl Fn(&Node, &Node) -> bool + 'static,
    ) -> Self {
        self.compare_property(property, Predicate::new(check))
    }

    /// Override a runtime type with a two-argument predicate.
    pub fn compare_type_with(
        self,
        type_name: &str,
        check: impl Fn(&Node, &Node) -> bool + 'static,
    ) -> Self {
        self.compare_type(type_name, Predicate::new(check))
    }

    /// Replace the fallback ordering used to sort collection elements with
    /// no natural order before the order-insensitive pairwise comparison.
    pub fn with_fallback_ordering(
        mut self,
        ordering: impl Fn(&Node, &Node) -> Ordering + 'static,
    ) -> Self {
        self.fallback_ordering = Rc::new(ordering);
        self
    }

    /// Whether `actual` is structurally equivalent to the expected graph.
    pub fn matches(&self, actual: &impl ToNode) -> Result<bool> {
        Ok(self.report(actual)?.is_match())
    }

    /// Full mismatch ledger for `actual` against the expected graph.
    pub fn report(&self, actual: &impl ToNode) -> Result<MatchReport> {
        let actual = actual.to_node();
        let mut ctx = MatchContext::default();
        let path = GraphPath::root(self.root_name.clone());
        self.compare_nodes(&self.expected, &actual, &path, &mut ctx)?;
        Ok(ctx.report)
    }

    fn compare_nodes(
        &self,
        expected: &Node,
        actual: &Node,
        path: &GraphPath,
        ctx: &mut MatchContext,
    ) -> Result<()> {
        trace!(path = %path, expected = %expected, actual = %actual, "compare node");

        // Accessor failures are fatal; a partial comparison would be
        // misleading, so no override gets a chance to mask one.
        if let Node::Unreadable(reason) = expected {
            return Err(SameGraphError::Introspection {
                path: path.to_string(),
                reason: reason.clone(),
            });
        }
        if let Node::Unreadable(reason) = actual {
            return Err(SameGraphError::Introspection {
                path: path.to_string(),
                reason: reason.clone(),
            });
        }

        if expected.is_null() && actual.is_null() {
            return Ok(());
        }

        if let (Some(e), Some(a)) = (expected.identity(), actual.identity()) {
            if ctx.guard.seen(e, a) {
                trace!(path = %path, "pair already compared");
                return Ok(());
            }
            ctx.guard.mark_seen(e, a);
        }

        // Overrides fully replace structural recursion, and get first go at
        // one-sided nulls; the runtime type comes from the non-null side.
        let type_source = if expected.is_null() { actual } else { expected };
        if let Some(rule) = self.overrides.resolve(path, type_source) {
            debug!(path = %path, rule = rule.name(), "compare using override rule");
            return self.apply_rule(rule.as_ref(), expected, actual, path, ctx);
        }

        if expected.is_null() || actual.is_null() {
            ctx.report.record(expected, actual, path);
            return Ok(());
        }

        if expected.kind() != actual.kind() {
            // Different classifications never coerce.
            ctx.report.record(expected, actual, path);
            return Ok(());
        }

        match (expected, actual) {
            (Node::Seq(e), Node::Seq(a)) | (Node::Set(e), Node::Set(a)) => {
                self.compare_sequences(e, a, path, ctx)
            }
            (Node::Map(e), Node::Map(a)) => self.compare_maps(e, a, path, ctx),
            (Node::Object(e), Node::Object(a)) => self.compare_objects(e, a, path, ctx),
            _ => self.compare_scalars(expected, actual, path, ctx),
        }
    }

    fn apply_rule(
        &self,
        rule: &dyn PropertyRule,
        expected: &Node,
        actual: &Node,
        path: &GraphPath,
        ctx: &mut MatchContext,
    ) -> Result<()> {
        match rule.matches(expected, actual) {
            Ok(true) => Ok(()),
            Ok(false) => {
                ctx.report.record(expected, actual, path);
                Ok(())
            }
            Err(RuleError::Unsupported(message)) => Err(SameGraphError::Configuration {
                path: path.to_string(),
                message,
            }),
        }
    }

    /// Built-in equivalence for value types: decimals by numeric value,
    /// instants by absolute point in time, floats within epsilon, enums by
    /// declaring type and variant. Cross-variant pairs are a mismatch.
    fn compare_scalars(
        &self,
        expected: &Node,
        actual: &Node,
        path: &GraphPath,
        ctx: &mut MatchContext,
    ) -> Result<()> {
        debug!(path = %path, "compare as value type");
        let equal = match (expected, actual) {
            (Node::Bool(e), Node::Bool(a)) => e == a,
            (Node::Int(e), Node::Int(a)) => e == a,
            (Node::Float(e), Node::Float(a)) => (e - a).abs() < f64::EPSILON,
            (Node::Decimal(e), Node::Decimal(a)) => match decimal_cmp(e, a) {
                Some(ordering) => ordering == Ordering::Equal,
                None => {
                    return Err(SameGraphError::Configuration {
                        path: path.to_string(),
                        message: format!("'{}' or '{}' is not a decimal literal", e, a),
                    })
                }
            },
            (Node::Text(e), Node::Text(a)) => e == a,
            (Node::Instant(e), Node::Instant(a)) => e == a,
            (
                Node::Enum {
                    type_name: et,
                    variant: ev,
                },
                Node::Enum {
                    type_name: at,
                    variant: av,
                },
            ) => et == at && ev == av,
            _ => false,
        };
        if !equal {
            ctx.report.record(expected, actual, path);
        }
        Ok(())
    }

    /// Order-insensitive collection comparison: size first, then both sides
    /// sorted and compared pairwise, so collections holding the same
    /// elements in different orders are equivalent.
    fn compare_sequences(
        &self,
        expected: &[Node],
        actual: &[Node],
        path: &GraphPath,
        ctx: &mut MatchContext,
    ) -> Result<()> {
        debug!(path = %path, "compare as collection");
        if expected.is_empty() && actual.is_empty() {
            return Ok(());
        }
        if expected.len() != actual.len() {
            ctx.report.record(
                &Node::Int(expected.len() as i64),
                &Node::Int(actual.len() as i64),
                &path.child("size"),
            );
            return Ok(());
        }

        let mut expected: Vec<Node> = expected.to_vec();
        let mut actual: Vec<Node> = actual.to_vec();
        self.sort_for_comparison(&mut expected);
        self.sort_for_comparison(&mut actual);

        for (i, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
            self.compare_nodes(e, a, &path.index(i), ctx)?;
        }
        Ok(())
    }

    fn sort_for_comparison(&self, items: &mut [Node]) {
        items.sort_by(|x, y| {
            natural_cmp(x, y).unwrap_or_else(|| (self.fallback_ordering)(x, y))
        });
    }

    fn compare_maps(
        &self,
        expected: &[(String, Node)],
        actual: &[(String, Node)],
        path: &GraphPath,
        ctx: &mut MatchContext,
    ) -> Result<()> {
        debug!(path = %path, "compare as map");
        if expected.len() != actual.len() {
            ctx.report.record(
                &Node::Int(expected.len() as i64),
                &Node::Int(actual.len() as i64),
                &path.child("size"),
            );
            return Ok(());
        }
        for (key, expected_value) in expected {
            let child = path.key(key);
            match actual.iter().find(|(k, _)| k == key) {
                Some((_, actual_value)) => {
                    self.compare_nodes(expected_value, actual_value, &child, ctx)?
                }
                None => ctx.report.record(expected_value, &Node::Null, &child),
            }
        }
        Ok(())
    }

    /// Composite comparison is driven by the expected side's property list;
    /// properties the actual side lacks are mismatches, extra actual-side
    /// properties are ignored.
    fn compare_objects(
        &self,
        expected: &ObjectRef,
        actual: &ObjectRef,
        path: &GraphPath,
        ctx: &mut MatchContext,
    ) -> Result<()> {
        let expected = expected.borrow();
        let actual = actual.borrow();
        debug!(path = %path, type_name = expected.type_name(), "compare as composite");
        for (name, expected_value) in expected.properties() {
            let child = path.child(name);
            match actual.property(name) {
                Some(actual_value) => {
                    self.compare_nodes(expected_value, actual_value, &child, ctx)?
                }
                None => ctx.report.record(expected_value, &Node::Null, &child),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{HasPattern, IsComparable, IsEqualIgnoreCase};
    use samegraph_common::{ObjectNode, ValueKind};
    use std::collections::BTreeMap;

    #[derive(Clone)]
    struct Person {
        first_name: String,
        last_name: String,
        age: i64,
    }

    impl ToNode for Person {
        fn to_node(&self) -> Node {
            ObjectNode::builder("Person")
                .property("FirstName", &self.first_name)
                .property("LastName", &self.last_name)
                .property("Age", &self.age)
                .build()
        }
    }

    fn person(first: &str, last: &str, age: i64) -> Person {
        Person {
            first_name: first.to_string(),
            last_name: last.to_string(),
            age,
        }
    }

    #[test]
    fn test_reflexivity() {
        let jane = person("Jane", "Doe", 30);
        assert!(GraphMatcher::new(&jane).matches(&jane.clone()).unwrap());
        assert!(GraphMatcher::new(&vec![1, 2, 3]).matches(&vec![1, 2, 3]).unwrap());
        assert!(GraphMatcher::new(&"abc").matches(&"abc").unwrap());
    }

    #[test]
    fn test_mismatch_is_rendered_with_path() {
        let report = GraphMatcher::new(&person("Jane", "Doe", 30))
            .report(&person("Jane", "Smith", 30))
            .unwrap();
        assert!(!report.is_match());
        assert_eq!(
            report.render(),
            "Person.LastName is <\"Smith\"> instead of <\"Doe\">"
        );
    }

    #[test]
    fn test_detection_is_symmetric() {
        let a = person("Jane", "Doe", 30);
        let b = person("Jane", "Doe", 31);
        let forward = GraphMatcher::new(&a).report(&b).unwrap();
        let reverse = GraphMatcher::new(&b).report(&a).unwrap();
        assert_eq!(forward.mismatches()[0].path, "Person.Age");
        assert_eq!(reverse.mismatches()[0].path, "Person.Age");
    }

    #[test]
    fn test_size_before_content() {
        let report = GraphMatcher::named(&vec![1, 2, 3], "Numbers")
            .report(&vec![9, 8])
            .unwrap();
        assert_eq!(report.mismatches().len(), 1);
        assert_eq!(report.mismatches()[0].path, "Numbers.size");
        assert_eq!(report.render(), "Numbers.size is <2> instead of <3>");
    }

    #[test]
    fn test_order_independence() {
        let matcher = GraphMatcher::new(&vec![1, 2, 3]);
        assert!(matcher.matches(&vec![3, 1, 2]).unwrap());
        assert!(!matcher.matches(&vec![3, 1, 2, 2]).unwrap());
    }

    #[test]
    fn test_unordered_objects_sort_structurally() {
        let expected = vec![person("Jane", "Doe", 30), person("John", "Doe", 31)];
        let actual = vec![person("John", "Doe", 31), person("Jane", "Doe", 30)];
        assert!(GraphMatcher::new(&expected).matches(&actual).unwrap());
    }

    #[test]
    fn test_element_mismatch_reported_at_indexed_path() {
        let report = GraphMatcher::named(&vec![person("Jane", "Doe", 30)], "People")
            .report(&vec![person("Jane", "Doe", 31)])
            .unwrap();
        assert_eq!(report.mismatches().len(), 1);
        assert_eq!(report.mismatches()[0].path, "People[0].Age");
    }

    #[test]
    fn test_empty_collections_are_equivalent() {
        assert!(GraphMatcher::new(&Vec::<i32>::new())
            .matches(&Vec::<i32>::new())
            .unwrap());
    }

    #[test]
    fn test_path_rule_beats_type_rule() {
        // The two rules disagree: the path rule accepts anything, the type
        // rule rejects everything. Age differs, so only the path rule can
        // make the whole comparison pass.
        let matcher = GraphMatcher::new(&person("Jane", "Doe", 30))
            .exclude_path("Person.Age")
            .compare_type_with("Integer", |_, _| false);
        assert!(matcher.matches(&person("Jane", "Doe", 99)).unwrap());

        let reversed = GraphMatcher::new(&person("Jane", "Doe", 30))
            .compare_path_with("Person.Age", |_, _| false)
            .exclude_type("Integer");
        let report = reversed.report(&person("Jane", "Doe", 30)).unwrap();
        assert_eq!(report.mismatches().len(), 1);
        assert_eq!(report.mismatches()[0].path, "Person.Age");
    }

    #[test]
    fn test_exclusion_idempotence() {
        let same = person("Jane", "Doe", 30);
        assert!(GraphMatcher::new(&same)
            .exclude_property("LastName")
            .matches(&same.clone())
            .unwrap());

        let differs = person("Jane", "Smith", 30);
        assert!(!GraphMatcher::new(&same).matches(&differs).unwrap());
        assert!(GraphMatcher::new(&same)
            .exclude_property("LastName")
            .matches(&differs)
            .unwrap());
    }

    #[test]
    fn test_null_handling() {
        let none: Option<i32> = None;
        assert!(GraphMatcher::new(&none).matches(&none).unwrap());
        assert!(!GraphMatcher::new(&none).matches(&Some(3)).unwrap());
        assert!(!GraphMatcher::named(&Some(3), "Value").matches(&none).unwrap());

        // An override intercepts before the one-sided null mismatch.
        assert!(GraphMatcher::named(&none, "Value")
            .exclude_property("Value")
            .matches(&Some(3))
            .unwrap());
    }

    #[test]
    fn test_null_property_mismatch_path() {
        let expected = ObjectNode::builder("Person")
            .property("Nickname", &Option::<String>::None)
            .build();
        let actual = ObjectNode::builder("Person")
            .property("Nickname", &Some("JJ".to_string()))
            .build();
        let report = GraphMatcher::new(&expected).report(&actual).unwrap();
        assert_eq!(report.render(), "Person.Nickname is <\"JJ\"> instead of <null>");
    }

    #[test]
    fn test_cycle_termination_self_referential() {
        let node = ObjectNode::builder("Node").property("Value", &1i64).build_ref();
        node.borrow_mut()
            .add_property("Next", Node::Object(node.clone()));

        // Same instance on both sides short-circuits through the guard.
        assert!(GraphMatcher::new(&node).matches(&node).unwrap());
    }

    #[test]
    fn test_cycle_termination_equivalent_cycles() {
        let a = ObjectNode::builder("Node").property("Value", &1i64).build_ref();
        a.borrow_mut().add_property("Next", Node::Object(a.clone()));
        let b = ObjectNode::builder("Node").property("Value", &1i64).build_ref();
        b.borrow_mut().add_property("Next", Node::Object(b.clone()));

        assert!(GraphMatcher::new(&a).matches(&b).unwrap());

        let c = ObjectNode::builder("Node").property("Value", &2i64).build_ref();
        c.borrow_mut().add_property("Next", Node::Object(c.clone()));
        let report = GraphMatcher::new(&a).report(&c).unwrap();
        assert_eq!(report.mismatches()[0].path, "Node.Value");
    }

    #[test]
    fn test_shared_substructure_compared_once() {
        let expected_child = ObjectNode::builder("Leaf").property("Value", &1i64).build_ref();
        let actual_child = ObjectNode::builder("Leaf").property("Value", &2i64).build_ref();

        let expected = ObjectNode::builder("Root")
            .property_node("Left", Node::Object(expected_child.clone()))
            .property_node("Right", Node::Object(expected_child))
            .build();
        let actual = ObjectNode::builder("Root")
            .property_node("Left", Node::Object(actual_child.clone()))
            .property_node("Right", Node::Object(actual_child))
            .build();

        let report = GraphMatcher::new(&expected).report(&actual).unwrap();
        assert_eq!(report.mismatches().len(), 1);
        assert_eq!(report.mismatches()[0].path, "Root.Left.Value");
    }

    #[test]
    fn test_map_semantics() {
        let mut expected = BTreeMap::new();
        expected.insert("a", 1);
        expected.insert("b", 2);

        let mut same = BTreeMap::new();
        same.insert("b", 2);
        same.insert("a", 1);
        assert!(GraphMatcher::new(&expected).matches(&same).unwrap());

        let mut missing_key = BTreeMap::new();
        missing_key.insert("a", 1);
        missing_key.insert("c", 2);
        let report = GraphMatcher::new(&expected).report(&missing_key).unwrap();
        assert_eq!(report.mismatches().len(), 1);
        assert_eq!(report.render(), "Map[b] is <null> instead of <2>");

        let mut smaller = BTreeMap::new();
        smaller.insert("a", 1);
        let report = GraphMatcher::new(&expected).report(&smaller).unwrap();
        assert_eq!(report.mismatches().len(), 1);
        assert_eq!(report.mismatches()[0].path, "Map.size");
    }

    #[test]
    fn test_map_value_mismatch_at_keyed_path() {
        let mut expected = BTreeMap::new();
        expected.insert("a", person("Jane", "Doe", 30));
        let mut actual = BTreeMap::new();
        actual.insert("a", person("Jane", "Doe", 31));

        let report = GraphMatcher::new(&expected).report(&actual).unwrap();
        assert_eq!(report.mismatches()[0].path, "Map[a].Age");
    }

    #[test]
    fn test_different_classifications_mismatch_without_coercion() {
        let expected = vec![1, 2];
        let mut actual = BTreeMap::new();
        actual.insert("a", 1);

        let report = GraphMatcher::named(&expected, "Value").report(&actual).unwrap();
        assert_eq!(report.mismatches().len(), 1);
        assert_eq!(report.mismatches()[0].path, "Value");

        // Ordered vs unordered collections classify differently too.
        let set: std::collections::BTreeSet<i32> = [1, 2].into_iter().collect();
        assert!(!GraphMatcher::named(&expected, "Value").matches(&set).unwrap());
    }

    #[test]
    fn test_cross_variant_scalars_mismatch() {
        let report = GraphMatcher::named(&1i64, "Value")
            .report(&"1")
            .unwrap();
        assert_eq!(report.render(), "Value is <\"1\"> instead of <1>");
    }

    #[test]
    fn test_decimal_compares_by_numeric_value() {
        let matcher = GraphMatcher::named(&Node::decimal("1.0"), "Amount");
        assert!(matcher.matches(&Node::decimal("1.00")).unwrap());
        assert!(!matcher.matches(&Node::decimal("1.01")).unwrap());
    }

    #[test]
    fn test_garbage_decimal_is_a_configuration_error() {
        let err = GraphMatcher::named(&Node::decimal("1.0"), "Amount")
            .report(&Node::decimal("not-a-number"))
            .unwrap_err();
        let SameGraphError::Configuration { path, .. } = err else {
            panic!("expected configuration error")
        };
        assert_eq!(path, "Amount");
    }

    #[test]
    fn test_unreadable_property_is_fatal_with_path() {
        let expected = ObjectNode::builder("Record")
            .property("Id", &7i64)
            .property_result::<i64, String>("Payload", Err("backing store gone".into()))
            .build();
        let actual = ObjectNode::builder("Record")
            .property("Id", &7i64)
            .property("Payload", &7i64)
            .build();

        let err = GraphMatcher::new(&expected).report(&actual).unwrap_err();
        let SameGraphError::Introspection { path, reason } = err else {
            panic!("expected introspection error")
        };
        assert_eq!(path, "Record.Payload");
        assert_eq!(reason, "backing store gone");
    }

    #[test]
    fn test_comparable_rule_on_composite_is_a_configuration_error() {
        let err = GraphMatcher::new(&person("Jane", "Doe", 30))
            .compare_type("Person", IsComparable)
            .report(&person("Jane", "Doe", 30))
            .unwrap_err();
        let SameGraphError::Configuration { path, message } = err else {
            panic!("expected configuration error")
        };
        assert_eq!(path, "Person");
        assert!(message.contains("natural ordering"));
    }

    #[test]
    fn test_ignore_case_rule_at_property_scope() {
        let matcher = GraphMatcher::new(&person("Jane", "Doe", 30))
            .compare_property("FirstName", IsEqualIgnoreCase);
        assert!(matcher.matches(&person("JANE", "Doe", 30)).unwrap());
        assert!(!matcher.matches(&person("John", "Doe", 30)).unwrap());
    }

    #[test]
    fn test_pattern_rule_at_path_scope() {
        let matcher = GraphMatcher::new(&person("Jane", "Doe", 30))
            .compare_path("Person.FirstName", HasPattern::new("J\\w+").unwrap());
        assert!(matcher.matches(&person("John", "Doe", 30)).unwrap());
        assert!(!matcher.matches(&person("Bob", "Doe", 30)).unwrap());
    }

    #[test]
    fn test_injected_fallback_ordering_is_used() {
        let expected = vec![person("Jane", "Doe", 30), person("John", "Doe", 31)];
        let actual = vec![person("John", "Doe", 31), person("Jane", "Doe", 30)];

        // An ordering that never reorders anything turns the comparison
        // positional, so the swapped lists no longer match.
        let positional = GraphMatcher::new(&expected)
            .with_fallback_ordering(|_, _| Ordering::Equal);
        assert!(!positional.matches(&actual).unwrap());
        assert!(GraphMatcher::new(&expected).matches(&actual).unwrap());
    }

    #[test]
    fn test_engine_reuse_across_calls() {
        let matcher = GraphMatcher::new(&person("Jane", "Doe", 30));
        assert!(!matcher.matches(&person("Jane", "Smith", 30)).unwrap());
        // Fresh ledger and guard per call: the earlier mismatch must not leak.
        assert!(matcher.matches(&person("Jane", "Doe", 30)).unwrap());
        let report = matcher.report(&person("Jane", "Doe", 30)).unwrap();
        assert!(report.is_match());
    }

    #[test]
    fn test_root_name_defaults_to_type_name() {
        let report = GraphMatcher::new(&person("Jane", "Doe", 30))
            .report(&person("John", "Doe", 30))
            .unwrap();
        assert!(report.mismatches()[0].path.starts_with("Person."));

        let report = GraphMatcher::new(&"abc").report(&"abd").unwrap();
        assert_eq!(report.mismatches()[0].path, "String");
    }

    #[test]
    fn test_enum_scalars() {
        let red = Node::enumeration("Color", "Red");
        let blue = Node::enumeration("Color", "Blue");
        assert!(GraphMatcher::new(&red).matches(&red).unwrap());
        assert!(!GraphMatcher::new(&red).matches(&blue).unwrap());
        assert!(GraphMatcher::new(&red)
            .exclude_type("Color")
            .matches(&blue)
            .unwrap());
        assert_eq!(red.kind(), ValueKind::Scalar);
    }

    #[test]
    fn test_nested_size_mismatch_path() {
        let expected = ObjectNode::builder("Order")
            .property("Lines", &vec![1, 2, 3])
            .build();
        let actual = ObjectNode::builder("Order")
            .property("Lines", &vec![1, 2])
            .build();
        let report = GraphMatcher::new(&expected).report(&actual).unwrap();
        assert_eq!(report.mismatches()[0].path, "Order.Lines.size");
    }
}
