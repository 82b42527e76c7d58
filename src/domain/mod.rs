//! Domain layer: entities and tree construction
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod display;
pub mod entities;
pub mod error;
pub mod grouping;
pub mod query;

pub use arena::{NodeData, TreeArena, TreeNode};
pub use builder::{Assembly, TreeBuilder, TreeResult};
pub use display::TreeDisplay;
pub use entities::*;
pub use error::DomainError;
pub use grouping::group_by_key;
pub use query::{ParentFilter, RecordPredicate, RecordQuery};
