//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::SelectionState;
use crate::application::{ApplicationError, WidgetPayload};
use crate::cli::args::{Cli, Commands, ConfigCommands, SelectionCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::RecordKey;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let command = match &cli.command {
        Some(command) => command,
        None => return Err(CliError::Usage("no command given, see --help".into())),
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Tree { records } => cmd_tree(&container, records),
        Commands::Options {
            records,
            association,
            name,
            output,
        } => cmd_options(
            &container,
            records,
            association.as_deref(),
            name,
            output.as_deref(),
        ),
        Commands::Selection { command } => match command {
            SelectionCommands::Load { association } => cmd_selection_load(&container, association),
            SelectionCommands::Save { association, ids } => {
                cmd_selection_save(&container, association, ids)
            }
        },
        Commands::Config { command } => cmd_config(&container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, records: &Path) -> CliResult<()> {
    let service = container.tree_service(records);
    let fetched = service.fetch_records()?;
    let assembly = service
        .builder()
        .assemble(&fetched)
        .map_err(ApplicationError::from)?;

    if !assembly.unreachable.is_empty() {
        output::warning(&format!(
            "{} records not reachable from a root: {}",
            assembly.unreachable.len(),
            assembly.unreachable.iter().join(", ")
        ));
    }

    let nodes = assembly.arena.to_nodes();
    output::tree(&nodes, container.settings.display.with_count);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_options(
    container: &ServiceContainer,
    records: &Path,
    association: Option<&Path>,
    name: &str,
    out: Option<&Path>,
) -> CliResult<()> {
    let multiple = container.settings.field.relationship_kind()?.is_multiple();
    let tree = container.tree_service(records).get_tree()?;

    let state = match association {
        Some(path) => container.selection_service(path)?.current_state()?,
        None if multiple => SelectionState::Many(Vec::new()),
        None => SelectionState::Single(None),
    };

    let payload: WidgetPayload<RecordKey> =
        WidgetPayload::new(name, state, tree, &container.settings.display, multiple);
    let json = serde_json::to_string_pretty(&payload).map_err(InfraError::from)?;

    match out {
        Some(path) => {
            container
                .fs
                .write(path, &json)
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("payload written to {}", path.display()));
        }
        None => output::info(&json),
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_selection_load(container: &ServiceContainer, association: &Path) -> CliResult<()> {
    let service = container.selection_service(association)?;
    match service.load_state()? {
        Some(ids) if ids.is_empty() => output::detail("(nothing selected)"),
        Some(ids) => {
            for id in ids {
                output::info(&id);
            }
        }
        None => match service.current_state()? {
            SelectionState::Single(Some(id)) => output::info(&id),
            _ => output::detail("(nothing selected)"),
        },
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_selection_save(
    container: &ServiceContainer,
    association: &Path,
    ids: &[RecordKey],
) -> CliResult<()> {
    let service = container.selection_service(association)?;
    if !service.is_multiple() {
        output::warning("belongs_to field: the owning record stores the selection, nothing synced");
        return Ok(());
    }

    let state = if ids.is_empty() {
        None
    } else {
        Some(ids.to_vec())
    };
    debug!("cmd_selection_save: state={:?}", state);
    service.save_state(state)?;
    output::success(&format!(
        "{} ids stored in {}",
        ids.len(),
        association.display()
    ));
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("cannot determine config directory"),
        },
    }
    Ok(())
}
