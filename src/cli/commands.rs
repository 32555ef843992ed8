//! Command dispatch: every subcommand loads the taxonomy through the
//! service container and hands the projections to the package writers.

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::{display_tree, PackageSummary};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{project_dependencies, project_records, Taxonomy};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::InfraError;

/// Execute a CLI command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
    debug!("project_dir: {}", project_dir.display());

    match &cli.command {
        Some(Commands::Completion { shell }) => {
            clap_complete::generate(*shell, &mut Cli::command(), "taxforge", &mut io::stdout());
            Ok(())
        }
        Some(Commands::Config { command }) => execute_config(command, &project_dir),
        Some(command) => {
            let settings = Settings::load(Some(&project_dir))?;
            let container = ServiceContainer::new(settings);
            execute_taxonomy(command, &container, &project_dir)
        }
        None => Err(CliError::Usage(
            "no command given (try 'taxforge --help')".into(),
        )),
    }
}

fn resolve_project_dir(project_dir: Option<&Path>) -> CliResult<PathBuf> {
    match project_dir {
        Some(dir) if !dir.is_dir() => Err(CliError::InvalidArgs(format!(
            "project directory not found: {}",
            dir.display()
        ))),
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| CliError::from(InfraError::io("read current directory", e))),
    }
}

/// Output directories given on the command line are taken as is; configured
/// ones are relative to the project directory.
fn output_dir(explicit: Option<&Path>, configured: &Path, project_dir: &Path) -> PathBuf {
    match explicit {
        Some(dir) => dir.to_path_buf(),
        None if configured.is_absolute() => configured.to_path_buf(),
        None => project_dir.join(configured),
    }
}

fn execute_taxonomy(
    command: &Commands,
    container: &ServiceContainer,
    project_dir: &Path,
) -> CliResult<()> {
    match command {
        Commands::Tree { input } => {
            let taxonomy = container.taxonomy.load(input)?;
            output::info(&display_tree(&taxonomy, &input.display().to_string()));
            Ok(())
        }
        Commands::Json {
            input,
            output: target,
        } => {
            let taxonomy = container.taxonomy.load(input)?;
            match target {
                Some(path) => {
                    container.taxonomy.write_document(&taxonomy, path)?;
                    output::action("Wrote", &path.display());
                }
                None => output::info(&container.taxonomy.document_json(&taxonomy)?),
            }
            Ok(())
        }
        Commands::Records {
            input,
            output: target,
        } => {
            let taxonomy = container.taxonomy.load(input)?;
            let out_dir = output_dir(
                target.as_deref(),
                container.records.default_output_dir(),
                project_dir,
            );
            let summary = write_records(container, &taxonomy, &out_dir)?;
            report("records", &summary);
            Ok(())
        }
        Commands::Picklists {
            input,
            output: target,
        } => {
            let taxonomy = container.taxonomy.load(input)?;
            let out_dir = output_dir(
                target.as_deref(),
                container.picklists.default_output_dir(),
                project_dir,
            );
            let summary = write_picklists(container, &taxonomy, &out_dir)?;
            report("picklists", &summary);
            Ok(())
        }
        Commands::Generate {
            input,
            records_dir,
            picklists_dir,
            json,
        } => generate(
            container,
            input,
            &output_dir(
                records_dir.as_deref(),
                container.records.default_output_dir(),
                project_dir,
            ),
            &output_dir(
                picklists_dir.as_deref(),
                container.picklists.default_output_dir(),
                project_dir,
            ),
            json.as_deref(),
        ),
        Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
    }
}

fn write_records(
    container: &ServiceContainer,
    taxonomy: &Taxonomy,
    out_dir: &Path,
) -> CliResult<PackageSummary> {
    let records = project_records(taxonomy);
    if records.is_empty() {
        output::warning("taxonomy has no independent entries, record package is empty");
    }
    Ok(container.records.write_package(&records, out_dir)?)
}

fn write_picklists(
    container: &ServiceContainer,
    taxonomy: &Taxonomy,
    out_dir: &Path,
) -> CliResult<PackageSummary> {
    let projection = project_dependencies(taxonomy);
    Ok(container.picklists.write_package(&projection, out_dir)?)
}

/// Both packages are independent projections of one taxonomy, so they are
/// written concurrently.
#[instrument(level = "debug", skip(container))]
fn generate(
    container: &ServiceContainer,
    input: &Path,
    records_dir: &Path,
    picklists_dir: &Path,
    json: Option<&Path>,
) -> CliResult<()> {
    let taxonomy = container.taxonomy.load(input)?;

    let (records, picklists) = rayon::join(
        || write_records(container, &taxonomy, records_dir),
        || write_picklists(container, &taxonomy, picklists_dir),
    );
    let records = records?;
    let picklists = picklists?;

    if let Some(path) = json {
        container.taxonomy.write_document(&taxonomy, path)?;
        output::action("Wrote", &path.display());
    }

    report("records", &records);
    report("picklists", &picklists);
    Ok(())
}

fn report(kind: &str, summary: &PackageSummary) {
    output::success(&format!(
        "{} {} ({} files) -> {}",
        summary.members.len(),
        kind,
        summary.files.len(),
        summary.root.display()
    ));
    for member in &summary.members {
        debug!("member: {member}");
    }
}

fn execute_config(command: &ConfigCommands, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(project_dir))?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let fs = RealFileSystem;
            let path = local_config_path(project_dir);
            if fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            fs.write(&path, &Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
            Ok(())
        }
        ConfigCommands::Path => {
            output::header("Config paths");
            match global_config_path() {
                Some(path) => output::detail(&format!(
                    "global: {} {}",
                    path.display(),
                    exists_marker(&path)
                )),
                None => output::detail("global: (no home directory)"),
            }
            let local = local_config_path(project_dir);
            output::detail(&format!(
                "local:  {} {}",
                local.display(),
                exists_marker(&local)
            ));
            Ok(())
        }
    }
}

fn exists_marker(path: &Path) -> &'static str {
    if path.exists() {
        "(exists)"
    } else {
        "(not found)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_explicit_dir_when_resolving_output_then_used_as_is() {
        let dir = output_dir(
            Some(Path::new("out")),
            Path::new("deploy_pkg"),
            Path::new("/proj"),
        );
        assert_eq!(dir, PathBuf::from("out"));
    }

    #[test]
    fn given_relative_configured_dir_when_resolving_output_then_joined_to_project() {
        let dir = output_dir(None, Path::new("deploy_pkg"), Path::new("/proj"));
        assert_eq!(dir, PathBuf::from("/proj/deploy_pkg"));
    }

    #[test]
    fn given_absolute_configured_dir_when_resolving_output_then_kept() {
        let dir = output_dir(None, Path::new("/var/pkg"), Path::new("/proj"));
        assert_eq!(dir, PathBuf::from("/var/pkg"));
    }
}
