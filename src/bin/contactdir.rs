//! contactdir - contact directory with prefix search and a recent-lookup cache
//!
//! Runs the interactive REPL by default; `config` inspects or updates the
//! saved settings.

use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process;

use contactdir::cli::{config_file_path, load_config, logging, save_config};
use contactdir::cli::{Cli, Commands, SettingsArgs};
use contactdir::config::DirectoryConfig;
use contactdir::repl::{Command, CommandResult, ContactHelper, ReplConfig, ReplState};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Some(Commands::Config { settings, show }) => {
            run_config(cli.config.as_deref(), &settings, show)
        }
        Some(Commands::Repl { settings, import }) => {
            run_repl(cli.config.as_deref(), &settings, import)
        }
        None => run_repl(cli.config.as_deref(), &SettingsArgs::default(), None),
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }
}

fn resolve_settings(
    custom: Option<&Path>,
    settings: &SettingsArgs,
) -> anyhow::Result<(PathBuf, DirectoryConfig)> {
    let path = config_file_path(custom)?;
    let saved = load_config(&path)?;
    Ok((path, settings.apply(saved)))
}

fn run_config(custom: Option<&Path>, settings: &SettingsArgs, show: bool) -> anyhow::Result<()> {
    let (path, config) = resolve_settings(custom, settings)?;

    let changed = settings.key.is_some() || settings.capacity.is_some() || settings.top.is_some();
    if changed {
        save_config(&path, &config)?;
        println!("Saved settings to {}", path.display().to_string().cyan());
    }

    if show || !changed {
        println!("{}", "Settings:".bold());
        println!("  Key scheme:      {}", config.key_scheme.to_string().green());
        println!("  Cache capacity:  {}", config.capacity.to_string().green());
        println!("  Top report size: {}", config.top_limit.to_string().green());
        println!("  File:            {}", path.display().to_string().dimmed());
    }

    Ok(())
}

fn run_repl(
    custom: Option<&Path>,
    settings: &SettingsArgs,
    import: Option<PathBuf>,
) -> anyhow::Result<()> {
    let (_, config) = resolve_settings(custom, settings)?;

    print_banner(&config);

    let mut state = ReplState::with_config(config);

    if let Some(path) = import {
        match state.import_file(&path) {
            Ok(report) => {
                println!(
                    "  Loaded {} contact(s) from {}",
                    report.inserted.to_string().green().bold(),
                    path.display().to_string().cyan()
                );
                if !report.rejected.is_empty() {
                    println!(
                        "  {} {} line(s) skipped",
                        "Warning:".yellow(),
                        report.rejected.len()
                    );
                }
                println!();
            }
            Err(e) => {
                eprintln!("  {}: {:#}", "Warning".yellow(), e);
                println!();
            }
        }
    }

    let repl_config = ReplConfig::default();

    let rustyline_config = Config::builder()
        .auto_add_history(true)
        .history_ignore_dups(true)?
        .history_ignore_space(true)
        .max_history_size(repl_config.max_history)?
        .build();

    let mut editor: Editor<ContactHelper, DefaultHistory> = Editor::with_config(rustyline_config)?;
    editor.set_helper(Some(ContactHelper::new()));

    if let Some(history_path) = &repl_config.history_file {
        if history_path.exists() {
            let _ = editor.load_history(history_path);
        }
    }

    let prompt = repl_config.prompt.bright_cyan().bold().to_string();
    loop {
        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}: {:?}", "Readline error".red().bold(), err);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let outcome = Command::parse(&line).and_then(|command| command.execute(&mut state));
        match outcome {
            Ok(CommandResult::Continue(output)) => println!("{}", output),
            Ok(CommandResult::Exit) => break,
            Err(e) => eprintln!("{}: {:#}", "Error".red().bold(), e),
        }
    }

    if let Some(history_path) = &repl_config.history_file {
        if let Err(e) = editor.save_history(history_path) {
            eprintln!("{}: Failed to save history: {}", "Warning".yellow(), e);
        }
    }

    state.directory.teardown();
    Ok(())
}

fn print_banner(config: &DirectoryConfig) {
    println!();
    println!("{}", "  contactdir".bright_cyan().bold());
    println!("  Version: {}", env!("CARGO_PKG_VERSION").green());
    println!(
        "  Keyed on {}, caching the last {} lookup(s)",
        config.key_scheme.to_string().green(),
        config.capacity.to_string().green()
    );
    println!("  Type {} for available commands", "'help'".yellow().bold());
    println!(
        "  Type {} or press {} to exit",
        "'exit'".yellow().bold(),
        "Ctrl+D".yellow().bold()
    );
    println!();
}
