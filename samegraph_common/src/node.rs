use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared handle to a composite node. Composites are reference-counted so a
/// graph can contain shared substructure and cycles.
pub type ObjectRef = Rc<RefCell<ObjectNode>>;

/// A value in an object graph under comparison.
///
/// Scalars are stored directly; collections own their elements; composite
/// objects are held behind an [`ObjectRef`] so the same instance can appear
/// at several positions in the graph (or point back at itself).
#[derive(Debug, Clone)]
pub enum Node {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Arbitrary-precision decimal literal, compared by numeric value.
    Decimal(String),
    Text(String),
    /// A point in time, compared by absolute instant.
    Instant(DateTime<Utc>),
    /// An enumerated constant with its declaring type name.
    Enum { type_name: String, variant: String },
    /// Ordered sequence (arrays, slices and vectors all land here).
    Seq(Vec<Node>),
    /// Collection without meaningful order.
    Set(Vec<Node>),
    /// Keyed entries; keys are rendered into the traversal path.
    Map(Vec<(String, Node)>),
    Object(ObjectRef),
    /// A property whose accessor failed; carries the failure reason.
    Unreadable(String),
}

/// Comparison strategy category of a node, computed once per node and
/// dispatched with exhaustive matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Scalar,
    Sequence,
    Set,
    Map,
    Object,
    Unreadable,
}

impl Node {
    /// Build a decimal node from its literal representation.
    pub fn decimal(literal: impl Into<String>) -> Self {
        Node::Decimal(literal.into())
    }

    /// Build an enumerated-constant node.
    pub fn enumeration(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Node::Enum {
            type_name: type_name.into(),
            variant: variant.into(),
        }
    }

    /// Build an unreadable-property marker.
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Node::Unreadable(reason.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Classify this node for dispatch.
    pub fn kind(&self) -> ValueKind {
        match self {
            Node::Null => ValueKind::Null,
            Node::Bool(_)
            | Node::Int(_)
            | Node::Float(_)
            | Node::Decimal(_)
            | Node::Text(_)
            | Node::Instant(_)
            | Node::Enum { .. } => ValueKind::Scalar,
            Node::Seq(_) => ValueKind::Sequence,
            Node::Set(_) => ValueKind::Set,
            Node::Map(_) => ValueKind::Map,
            Node::Object(_) => ValueKind::Object,
            Node::Unreadable(_) => ValueKind::Unreadable,
        }
    }

    /// Simple runtime type name, used for type overrides and as the default
    /// root name in reported paths.
    pub fn type_name(&self) -> String {
        match self {
            Node::Null => "Null".to_string(),
            Node::Bool(_) => "Boolean".to_string(),
            Node::Int(_) => "Integer".to_string(),
            Node::Float(_) => "Float".to_string(),
            Node::Decimal(_) => "Decimal".to_string(),
            Node::Text(_) => "String".to_string(),
            Node::Instant(_) => "DateTime".to_string(),
            Node::Enum { type_name, .. } => type_name.clone(),
            Node::Seq(_) => "List".to_string(),
            Node::Set(_) => "Set".to_string(),
            Node::Map(_) => "Map".to_string(),
            Node::Object(obj) => obj.borrow().type_name().to_string(),
            Node::Unreadable(_) => "Unreadable".to_string(),
        }
    }

    /// Classifier-level name, the coarse match target for type overrides
    /// when no exact type name is registered.
    pub fn kind_name(&self) -> &'static str {
        match self.kind() {
            ValueKind::Null => "Null",
            ValueKind::Scalar => "Scalar",
            ValueKind::Sequence => "List",
            ValueKind::Set => "Set",
            ValueKind::Map => "Map",
            ValueKind::Object => "Object",
            ValueKind::Unreadable => "Unreadable",
        }
    }

    /// Storage identity of a composite node, used for cycle tracking.
    /// Identity is the reference address, never content equality.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Node::Object(obj) => Some(Rc::as_ptr(obj) as usize),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => write!(f, "null"),
            Node::Bool(b) => write!(f, "{}", b),
            Node::Int(i) => write!(f, "{}", i),
            Node::Float(x) => write!(f, "{}", x),
            Node::Decimal(d) => write!(f, "{}", d),
            Node::Text(s) => write!(f, "\"{}\"", s),
            Node::Instant(t) => write!(f, "{}", t.to_rfc3339()),
            Node::Enum { type_name, variant } => write!(f, "{}::{}", type_name, variant),
            Node::Seq(items) => write!(f, "[list of {}]", items.len()),
            Node::Set(items) => write!(f, "[set of {}]", items.len()),
            Node::Map(entries) => write!(f, "{{map of {}}}", entries.len()),
            Node::Object(obj) => write!(f, "{{{}}}", obj.borrow().type_name()),
            Node::Unreadable(reason) => write!(f, "<unreadable: {}>", reason),
        }
    }
}

/// A composite node: a declared type name plus an ordered list of named
/// property values.
#[derive(Debug, Clone)]
pub struct ObjectNode {
    type_name: String,
    properties: Vec<(String, Node)>,
}

impl ObjectNode {
    pub fn builder(type_name: impl Into<String>) -> ObjectBuilder {
        ObjectBuilder {
            type_name: type_name.into(),
            properties: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn properties(&self) -> &[(String, Node)] {
        &self.properties
    }

    /// Look up a property value by case-insensitive name.
    pub fn property(&self, name: &str) -> Option<&Node> {
        self.properties
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Append a property after construction. This is how callers close a
    /// cycle: build the object, then push a property holding its own handle.
    pub fn add_property(&mut self, name: impl Into<String>, value: Node) {
        self.properties.push((name.into(), value));
    }
}

/// Builder for composite nodes. Properties keep their insertion order, which
/// is also the order they are compared and reported in.
pub struct ObjectBuilder {
    type_name: String,
    properties: Vec<(String, Node)>,
}

impl ObjectBuilder {
    pub fn property(mut self, name: impl Into<String>, value: &impl crate::ToNode) -> Self {
        self.properties.push((name.into(), value.to_node()));
        self
    }

    pub fn property_node(mut self, name: impl Into<String>, value: Node) -> Self {
        self.properties.push((name.into(), value));
        self
    }

    /// Record a fallible accessor: an `Err` becomes an unreadable property
    /// that surfaces as an introspection failure if the comparison reaches it.
    pub fn property_result<T, E>(
        mut self,
        name: impl Into<String>,
        value: std::result::Result<T, E>,
    ) -> Self
    where
        T: crate::ToNode,
        E: fmt::Display,
    {
        let node = match value {
            Ok(v) => v.to_node(),
            Err(e) => Node::Unreadable(e.to_string()),
        };
        self.properties.push((name.into(), node));
        self
    }

    pub fn build(self) -> Node {
        Node::Object(self.build_ref())
    }

    pub fn build_ref(self) -> ObjectRef {
        Rc::new(RefCell::new(ObjectNode {
            type_name: self.type_name,
            properties: self.properties,
        }))
    }
}
