use crate::node::{Node, ObjectRef};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Conversion of a value into the comparable graph model.
///
/// Built-in scalar and collection types are covered below; composite types
/// implement this by hand with [`crate::ObjectNode::builder`], listing their
/// properties in the order they should be compared and reported:
///
/// ```
/// use samegraph_common::{Node, ObjectNode, ToNode};
///
/// struct Person {
///     first_name: String,
///     last_name: String,
/// }
///
/// impl ToNode for Person {
///     fn to_node(&self) -> Node {
///         ObjectNode::builder("Person")
///             .property("FirstName", &self.first_name)
///             .property("LastName", &self.last_name)
///             .build()
///     }
/// }
/// ```
pub trait ToNode {
    fn to_node(&self) -> Node;
}

impl ToNode for Node {
    fn to_node(&self) -> Node {
        self.clone()
    }
}

impl ToNode for ObjectRef {
    fn to_node(&self) -> Node {
        Node::Object(self.clone())
    }
}

impl<T: ToNode + ?Sized> ToNode for &T {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }
}

impl<T: ToNode + ?Sized> ToNode for Box<T> {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }
}

impl ToNode for bool {
    fn to_node(&self) -> Node {
        Node::Bool(*self)
    }
}

macro_rules! impl_to_node_int {
    ($($ty:ty),*) => {
        $(
            impl ToNode for $ty {
                fn to_node(&self) -> Node {
                    Node::Int(*self as i64)
                }
            }
        )*
    };
}

impl_to_node_int!(i8, i16, i32, i64, isize, u8, u16, u32);

impl ToNode for u64 {
    fn to_node(&self) -> Node {
        // Values beyond i64 keep full precision as a decimal literal.
        match i64::try_from(*self) {
            Ok(v) => Node::Int(v),
            Err(_) => Node::Decimal(self.to_string()),
        }
    }
}

impl ToNode for usize {
    fn to_node(&self) -> Node {
        (*self as u64).to_node()
    }
}

impl ToNode for f32 {
    fn to_node(&self) -> Node {
        Node::Float(f64::from(*self))
    }
}

impl ToNode for f64 {
    fn to_node(&self) -> Node {
        Node::Float(*self)
    }
}

impl ToNode for char {
    fn to_node(&self) -> Node {
        Node::Text(self.to_string())
    }
}

impl ToNode for str {
    fn to_node(&self) -> Node {
        Node::Text(self.to_string())
    }
}

impl ToNode for String {
    fn to_node(&self) -> Node {
        Node::Text(self.clone())
    }
}

impl<Tz: TimeZone> ToNode for DateTime<Tz> {
    fn to_node(&self) -> Node {
        Node::Instant(self.with_timezone(&Utc))
    }
}

impl ToNode for NaiveDateTime {
    fn to_node(&self) -> Node {
        Node::Instant(self.and_utc())
    }
}

impl ToNode for NaiveDate {
    fn to_node(&self) -> Node {
        Node::Instant(self.and_time(NaiveTime::MIN).and_utc())
    }
}

impl<T: ToNode> ToNode for Option<T> {
    fn to_node(&self) -> Node {
        match self {
            Some(v) => v.to_node(),
            None => Node::Null,
        }
    }
}

impl<T: ToNode> ToNode for Vec<T> {
    fn to_node(&self) -> Node {
        Node::Seq(self.iter().map(ToNode::to_node).collect())
    }
}

impl<T: ToNode> ToNode for [T] {
    fn to_node(&self) -> Node {
        Node::Seq(self.iter().map(ToNode::to_node).collect())
    }
}

impl<T: ToNode, const N: usize> ToNode for [T; N] {
    fn to_node(&self) -> Node {
        Node::Seq(self.iter().map(ToNode::to_node).collect())
    }
}

impl<T: ToNode> ToNode for HashSet<T> {
    fn to_node(&self) -> Node {
        Node::Set(self.iter().map(ToNode::to_node).collect())
    }
}

impl<T: ToNode> ToNode for BTreeSet<T> {
    fn to_node(&self) -> Node {
        Node::Set(self.iter().map(ToNode::to_node).collect())
    }
}

impl<K: ToString, V: ToNode> ToNode for HashMap<K, V> {
    fn to_node(&self) -> Node {
        Node::Map(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.to_node()))
                .collect(),
        )
    }
}

impl<K: ToString, V: ToNode> ToNode for BTreeMap<K, V> {
    fn to_node(&self) -> Node {
        Node::Map(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.to_node()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ValueKind;

    #[test]
    fn test_scalar_conversions() {
        assert!(matches!(42i32.to_node(), Node::Int(42)));
        assert!(matches!(true.to_node(), Node::Bool(true)));
        assert!(matches!("abc".to_node(), Node::Text(s) if s == "abc"));
        assert!(matches!('x'.to_node(), Node::Text(s) if s == "x"));
        assert!(matches!(1.5f64.to_node(), Node::Float(_)));
    }

    #[test]
    fn test_u64_beyond_i64_becomes_decimal() {
        assert!(matches!(u64::MAX.to_node(), Node::Decimal(s) if s == u64::MAX.to_string()));
        assert!(matches!(7u64.to_node(), Node::Int(7)));
    }

    #[test]
    fn test_option_conversion() {
        assert!(Option::<i32>::None.to_node().is_null());
        assert!(matches!(Some(3).to_node(), Node::Int(3)));
    }

    #[test]
    fn test_collection_conversions() {
        assert_eq!(vec![1, 2, 3].to_node().kind(), ValueKind::Sequence);
        assert_eq!([1, 2, 3].to_node().kind(), ValueKind::Sequence);

        let set: HashSet<i32> = [1, 2].into_iter().collect();
        assert_eq!(set.to_node().kind(), ValueKind::Set);

        let mut map = BTreeMap::new();
        map.insert("a", 1);
        let Node::Map(entries) = map.to_node() else {
            panic!("expected map node")
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "a");
    }

    #[test]
    fn test_temporal_conversions_use_absolute_instant() {
        let utc = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let offset = utc.with_timezone(&chrono::FixedOffset::east_opt(3600).unwrap());
        let (Node::Instant(a), Node::Instant(b)) = (utc.to_node(), offset.to_node()) else {
            panic!("expected instants")
        };
        assert_eq!(a, b);
    }
}
