pub mod compare;
pub mod error;
pub mod graph;
pub mod id;
pub mod node;
pub mod participant;
pub mod print;
pub mod snapshot;
pub mod traverse;

// Re-export commonly used types
pub use error::GraphError;
pub use graph::LevelGraph;
pub use id::{Level, NodeId};
pub use node::{Node, NodeArena};
pub use participant::Participant;
pub use print::TreeStyle;
pub use snapshot::{GraphSnapshot, Link};
pub use traverse::Action;
