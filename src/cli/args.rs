//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Build a Type/SubType/Detail taxonomy from a flat table and emit metadata packages
#[derive(Parser, Debug)]
#[command(name = "taxforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project directory holding .taxforge.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the taxonomy as a tree (* marks independent entries)
    Tree {
        /// Source table (.csv) or taxonomy document (.json)
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },

    /// Emit the hierarchical JSON document
    Json {
        /// Source table (.csv) or taxonomy document (.json)
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Write to file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Write the leaf record metadata package
    Records {
        /// Source table (.csv) or taxonomy document (.json)
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Package directory (default: records.output_dir)
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        output: Option<PathBuf>,
    },

    /// Write the dependent picklist package
    Picklists {
        /// Source table (.csv) or taxonomy document (.json)
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Package directory (default: picklists.output_dir)
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        output: Option<PathBuf>,
    },

    /// Write both packages (and optionally the JSON document)
    Generate {
        /// Source table (.csv) or taxonomy document (.json)
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Record package directory (default: records.output_dir)
        #[arg(long, value_hint = ValueHint::DirPath)]
        records_dir: Option<PathBuf>,
        /// Picklist package directory (default: picklists.output_dir)
        #[arg(long, value_hint = ValueHint::DirPath)]
        picklists_dir: Option<PathBuf>,
        /// Also write the JSON document here
        #[arg(long, value_hint = ValueHint::FilePath)]
        json: Option<PathBuf>,
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

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template in the project directory
    Init {
        /// Overwrite an existing .taxforge.toml
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
