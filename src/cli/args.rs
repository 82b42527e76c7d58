//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::RecordKey;

/// Hierarchical select-tree field: builds nested option trees from self-referencing records
#[derive(Parser, Debug)]
#[command(name = "selecttree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more: -d -d -d)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, env = "SELECTTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the option tree built from a records file
    Tree {
        /// JSON array of records
        #[arg(value_hint = ValueHint::FilePath)]
        records: PathBuf,
    },

    /// Print the widget payload (options, state and display flags) as JSON
    Options {
        /// JSON array of records
        #[arg(value_hint = ValueHint::FilePath)]
        records: PathBuf,

        /// Association file providing the current state
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        association: Option<PathBuf>,

        /// Field name reported to the widget
        #[arg(short, long, default_value = "tree")]
        name: String,

        /// Write JSON to this file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Load or save the selected identities
    Selection {
        #[command(subcommand)]
        command: SelectionCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Selection subcommands
#[derive(Subcommand, Debug)]
pub enum SelectionCommands {
    /// Print identities currently stored in the association
    Load {
        #[arg(value_hint = ValueHint::FilePath)]
        association: PathBuf,
    },

    /// Replace the association's identities; no ids clears it
    Save {
        #[arg(value_hint = ValueHint::FilePath)]
        association: PathBuf,

        /// Identities to store (integers or strings)
        ids: Vec<RecordKey>,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented template
    Template,
    /// Show the global config file location
    Path,
}
