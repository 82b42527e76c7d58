//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (DataSource, ManyAssociation, etc.)
//! but are themselves concrete structs, not traits.

mod selection;
mod tree_field;

pub use selection::{Association, SelectionService, SelectionState};
pub use tree_field::{RootQueryModifier, TreeFieldService};
