use crate::path::GraphPath;
use crate::rules::PropertyRule;
use samegraph_common::Node;
use std::collections::HashMap;
use std::rc::Rc;

/// User-registered comparison rules, keyed case-insensitively at three
/// scopes. Resolution precedence is fixed: exact normalized path, then
/// trailing property name, then runtime type. The first match wins and no
/// rules are combined across scopes.
#[derive(Default)]
pub struct OverrideRegistry {
    paths: HashMap<String, Rc<dyn PropertyRule>>,
    properties: HashMap<String, Rc<dyn PropertyRule>>,
    types: HashMap<String, Rc<dyn PropertyRule>>,
}

impl OverrideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule for a full path, matched with collection indices and
    /// map keys stripped: `Person.Siblings[0].Name` is keyed as
    /// `person.siblings.name`.
    pub fn put_path(&mut self, path: &str, rule: Rc<dyn PropertyRule>) {
        self.paths.insert(normalize_key(path), rule);
    }

    /// Register a rule for a bare property name, matched against the
    /// trailing segment of the current path.
    pub fn put_property(&mut self, property: &str, rule: Rc<dyn PropertyRule>) {
        self.properties.insert(property.to_lowercase(), rule);
    }

    /// Register a rule for a runtime type name. Composite nodes match their
    /// declared type name; the classifier kind names (`Scalar`, `List`,
    /// `Set`, `Map`, `Object`) act as the supertype level, and an exact type
    /// name always wins over a kind name.
    pub fn put_type(&mut self, type_name: &str, rule: Rc<dyn PropertyRule>) {
        self.types.insert(type_name.to_lowercase(), rule);
    }

    /// Resolve the rule for the current position, if any. `type_source` is
    /// the non-null side of the pair, supplying the runtime type for the
    /// type scope.
    pub fn resolve(
        &self,
        path: &GraphPath,
        type_source: &Node,
    ) -> Option<Rc<dyn PropertyRule>> {
        if let Some(rule) = self.paths.get(&path.normalized()) {
            return Some(rule.clone());
        }
        if let Some(rule) = self.properties.get(&path.property_name()) {
            return Some(rule.clone());
        }
        self.resolve_type(type_source)
    }

    fn resolve_type(&self, node: &Node) -> Option<Rc<dyn PropertyRule>> {
        if let Some(rule) = self.types.get(&node.type_name().to_lowercase()) {
            return Some(rule.clone());
        }
        self.types.get(&node.kind_name().to_lowercase()).cloned()
    }
}

/// Same normalization the traversal applies before path lookup.
fn normalize_key(path: &str) -> String {
    GraphPath::root(path).normalized()
}
