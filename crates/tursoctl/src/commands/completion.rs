//! Shell completion: static scripts and dynamic candidates

use crate::cli::{Cli, CompletionKind, Shell};
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use clap::CommandFactory;
use clap_complete::{generate, shells};
use std::io::Write;
use tracing::debug;
use tursoctl_core::regions::list_region_ids;
use tursoctl_core::{DatabaseCatalog, NameCache};

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, name, &mut std::io::stdout()),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, name, &mut std::io::stdout()),
        Shell::Fish => generate(shells::Fish, &mut cmd, name, &mut std::io::stdout()),
        Shell::PowerShell => generate(shells::PowerShell, &mut cmd, name, &mut std::io::stdout()),
        Shell::Elvish => generate(shells::Elvish, &mut cmd, name, &mut std::io::stdout()),
    }
}

/// Print completion candidates of `kind`, one per line.
///
/// Never fails on remote or login problems: shells get an empty list instead.
pub async fn handle_complete(
    kind: CompletionKind,
    conn_mgr: &mut ConnectionManager,
) -> CliResult<()> {
    let client = match conn_mgr.create_client() {
        Ok(client) => client,
        Err(e) => {
            debug!("No completion candidates: {}", e);
            return Ok(());
        }
    };

    let candidates = match kind {
        CompletionKind::DbNames => {
            let catalog = DatabaseCatalog::new(&client);
            NameCache::new(conn_mgr.store_mut())
                .fetch_or_load(&catalog)
                .await
        }
        CompletionKind::Regions => list_region_ids(&client).await,
    };

    let mut stdout = std::io::stdout().lock();
    for candidate in candidates {
        writeln!(stdout, "{}", candidate)?;
    }
    Ok(())
}
