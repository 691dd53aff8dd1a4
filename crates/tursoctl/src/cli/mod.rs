//! CLI structure and command definitions
//!
//! Every database operation lives under `turso db`; shell completion support
//! sits at the top level next to it.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Command-line client for edge databases
#[derive(Parser, Debug)]
#[command(name = "turso")]
#[command(version, about = "Create, replicate and manage edge databases")]
#[command(long_about = "
Create, replicate and manage edge databases

EXAMPLES:
    # Create a database in the region closest to you
    turso db create

    # Create a named database in a specific region
    turso db create app1 --region fra

    # Add a replica in another region
    turso db replicate app1 gru

    # List databases and available regions
    turso db list
    turso db regions

    # Get JSON output for scripting
    turso db list -o json

For more help on a specific command, run:
    turso <command> --help
")]
pub struct Cli {
    /// Path to an alternate settings file
    #[arg(long, global = true, env = "TURSO_SETTINGS_FILE")]
    pub settings_file: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage databases
    #[command(subcommand)]
    Db(DbCommands),

    /// Generate shell completions
    #[command(visible_alias = "comp")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print completion candidates, one per line
    #[command(name = "__complete", hide = true)]
    Complete {
        #[arg(value_enum)]
        kind: CompletionKind,
    },
}

/// Database commands
#[derive(Subcommand, Debug)]
pub enum DbCommands {
    /// Create a database
    #[command(after_help = "EXAMPLES:
    # Random name, closest region
    turso db create

    # Explicit name and region, canary image
    turso db create app1 --region fra --canary")]
    Create {
        /// Database name (a random one is generated when omitted)
        name: Option<String>,

        /// Region ID to create the database in
        #[arg(long)]
        region: Option<String>,

        /// Use the database canary build
        #[arg(long)]
        canary: bool,
    },

    /// Destroy a database, one of its regions, or a single instance
    #[command(after_help = "EXAMPLES:
    # Destroy everything, without prompting
    turso db destroy app1 --yes

    # Remove the replicas in one region
    turso db destroy app1 --region fra

    # Remove a single instance
    turso db destroy app1 --instance fra-1")]
    Destroy {
        /// Database name
        name: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,

        /// Only destroy the instances in this region
        #[arg(long, conflicts_with = "instance")]
        region: Option<String>,

        /// Only destroy this instance
        #[arg(long)]
        instance: Option<String>,
    },

    /// Replicate a database to another region
    Replicate {
        /// Database name
        name: String,

        /// Region ID to replicate to
        region: String,

        /// Use the database canary build
        #[arg(long)]
        canary: bool,
    },

    /// List databases
    List,

    /// List available database regions
    Regions,

    /// Show information about a database
    Show {
        /// Database name
        name: String,

        /// Only print the connection URL
        #[arg(long)]
        url: bool,
    },
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bourne Again Shell
    Bash,
    /// Z Shell
    Zsh,
    /// Friendly Interactive Shell
    Fish,
    /// PowerShell
    #[value(name = "powershell", alias = "power-shell")]
    PowerShell,
    /// Elvish
    Elvish,
}

/// Dynamic completion sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CompletionKind {
    /// Names of primary databases
    DbNames,
    /// Provisionable region IDs
    Regions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_destroy_flags() {
        let cli = Cli::parse_from(["turso", "db", "destroy", "app1", "-y", "--region", "fra"]);
        match cli.command {
            Commands::Db(DbCommands::Destroy {
                name,
                yes,
                region,
                instance,
            }) => {
                assert_eq!(name, "app1");
                assert!(yes);
                assert_eq!(region.as_deref(), Some("fra"));
                assert!(instance.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_region_and_instance_conflict() {
        let result = Cli::try_parse_from([
            "turso", "db", "destroy", "app1", "--region", "fra", "--instance", "i-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["turso", "db", "list", "-o", "json", "-vv"]);
        assert!(cli.output.is_json());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_hidden_complete_command() {
        let cli = Cli::parse_from(["turso", "__complete", "db-names"]);
        assert!(matches!(
            cli.command,
            Commands::Complete {
                kind: CompletionKind::DbNames
            }
        ));
    }
}
