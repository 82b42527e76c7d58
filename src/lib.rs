//! selecttree: hierarchical select-tree fields.
//!
//! Flat records of a self-referencing relation (identity, label, parent) are
//! turned into nested option trees for a tree-select widget, and the widget's
//! selection is round-tripped to its association.
//!
//! Layers:
//! - [`domain`]: records, nodes and the tree builder (pure, no I/O)
//! - [`application`]: services running queries, building trees and
//!   persisting selections
//! - [`infrastructure`]: collaborator traits, file-backed implementations and
//!   the service container
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
