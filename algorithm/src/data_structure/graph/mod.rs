mod anchor;
mod node;
mod edge;
mod graph;
mod graph_iter;
mod serializing;

pub use self::anchor::{Anchor, AnchorKey};
pub use self::graph::{Graph, flavor_of_framework};
pub use self::node::{Node, NodeComparison};
pub use self::edge::Edge;
pub use self::graph_iter::*;
