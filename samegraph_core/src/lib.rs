pub mod engine;
pub mod guard;
pub mod order;
pub mod path;
pub mod registry;
pub mod report;
pub mod rules;

pub use engine::GraphMatcher;
pub use guard::CycleGuard;
pub use path::GraphPath;
pub use registry::OverrideRegistry;
pub use report::{MatchReport, Mismatch};
pub use rules::{
    Excluded, HasPattern, IsComparable, IsEqual, IsEqualDate, IsEqualIgnoreCase, IsEqualTimestamp,
    Predicate, PropertyRule, RuleError, ValuePredicate,
};

pub use samegraph_common::{Node, ObjectBuilder, ObjectNode, ObjectRef, ToNode, ValueKind};
pub use samegraph_common::{Result, SameGraphError};
