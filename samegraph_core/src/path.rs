use std::fmt;

/// Dotted/bracketed address of a node in the expected graph, e.g.
/// `Person.Siblings[0].FirstName` or `Order.Lines[sku-1]`.
///
/// The display form keeps indices and keys for uniqueness; override lookup
/// uses [`GraphPath::normalized`], which lowercases the path and strips every
/// bracketed segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphPath(String);

impl GraphPath {
    pub fn root(name: impl Into<String>) -> Self {
        GraphPath(name.into())
    }

    /// Append a property segment: `Person` -> `Person.FirstName`.
    pub fn child(&self, property: &str) -> Self {
        if self.0.is_empty() {
            GraphPath(property.to_string())
        } else {
            GraphPath(format!("{}.{}", self.0, property))
        }
    }

    /// Append a collection index: `Person.Siblings` -> `Person.Siblings[2]`.
    pub fn index(&self, i: usize) -> Self {
        GraphPath(format!("{}[{}]", self.0, i))
    }

    /// Append a map key: `Order.Lines` -> `Order.Lines[sku-1]`.
    pub fn key(&self, key: &str) -> Self {
        GraphPath(format!("{}[{}]", self.0, key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased path with every bracketed segment removed, the form
    /// path overrides are keyed by.
    pub fn normalized(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut depth = 0usize;
        for c in self.0.chars() {
            match c {
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                _ if depth == 0 => out.extend(c.to_lowercase()),
                _ => {}
            }
        }
        out
    }

    /// Trailing segment of the normalized path, the form property-name
    /// overrides are keyed by.
    pub fn property_name(&self) -> String {
        let normalized = self.normalized();
        match normalized.rfind('.') {
            Some(pos) => normalized[pos + 1..].to_string(),
            None => normalized,
        }
    }
}

impl fmt::Display for GraphPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
