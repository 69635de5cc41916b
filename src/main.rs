use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use promptvault::error_help;
use promptvault::{
    init_logging, LogConfig, PromptLibrary, Storage, VaultConfig, VaultController,
};
use std::env;
use std::time::Instant;
use tracing::debug;

mod cli;
mod commands;

use cli::{Cli, Commands, COMMAND_NAMES};
use commands::core::{
    handle_copy, handle_delete, handle_edit, handle_fav, handle_ls, handle_new, handle_show,
    handle_tags,
};

fn main() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    // clap only handles -V
    let args: Vec<String> = env::args().collect();
    if args.len() == 2 && args[1] == "-v" {
        println!("pv {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if let clap::error::ErrorKind::InvalidSubcommand = e.kind() {
                if let Some(cmd) = args.get(1) {
                    eprintln!("{}", error_help::format_command_typo(cmd, COMMAND_NAMES));
                    std::process::exit(1);
                }
            }
            e.exit();
        }
    };

    // Only initialize logging if explicitly requested; the guard flushes on drop
    let _log_guard = if env::var("PROMPTVAULT_LOG_LEVEL").is_ok() {
        init_logging(LogConfig::from_env())?
    } else {
        None
    };

    let storage = Storage::new()?;
    storage.init()?;
    let config = VaultConfig::load(&storage.config_path())?;
    let storage = storage.with_slot(config.storage.slot.clone());
    debug!(slot = %storage.slot_path().display(), "Opening prompt library");

    let Some(command) = cli.command else {
        if std::io::stdout().is_terminal() {
            return launch_tui(storage, &config);
        }
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Config { action } => return commands::handle_config(&storage, &config, action),
        Commands::Tui => return launch_tui(storage, &config),
        _ => {}
    }

    let mut controller = VaultController::new(PromptLibrary::load(storage), config.display.clone());

    match command {
        Commands::Ls {
            tag,
            favorites,
            sort,
            search,
        } => handle_ls(
            &mut controller,
            tag.as_deref(),
            favorites,
            sort,
            search.as_deref(),
            start,
        )?,
        Commands::Show { reference } => handle_show(&mut controller, &reference)?,
        Commands::New {
            title,
            tags,
            content,
        } => handle_new(&mut controller, &title, &tags, content.as_deref(), start)?,
        Commands::Edit {
            reference,
            title,
            tags,
            content,
        } => handle_edit(
            &mut controller,
            &reference,
            title.as_deref(),
            tags.as_deref(),
            content.as_deref(),
        )?,
        Commands::Delete { reference, yes } => handle_delete(&mut controller, &reference, yes)?,
        Commands::Fav { reference } => handle_fav(&mut controller, &reference)?,
        Commands::Copy { reference } => handle_copy(&mut controller, &reference)?,
        Commands::Tags => handle_tags(&controller)?,
        Commands::Tui | Commands::Config { .. } => {}
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn launch_tui(storage: Storage, config: &VaultConfig) -> Result<()> {
    use promptvault::tui::VaultTui;

    let controller = VaultController::new(PromptLibrary::load(storage), config.display.clone());
    VaultTui::new(controller).run()
}

#[cfg(not(feature = "tui"))]
fn launch_tui(_storage: Storage, _config: &VaultConfig) -> Result<()> {
    use clap::CommandFactory;
    eprintln!("This build of pv has no terminal UI; use the subcommands below.\n");
    Cli::command().print_help()?;
    Ok(())
}
