pub mod error;
pub mod node;
pub mod to_node;

pub use error::*;
pub use node::*;
pub use to_node::*;
