use clap::{Parser, Subcommand};
use std::io::Write;
use std::sync::Arc;

use dmgstat::app_state::AppState;
use dmgstat::commands;
use dmgstat::logging;
use dmgstat::repl::readline;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> Result<(), String> {
    logging::init();
    let state = Arc::new(RwLock::new(AppState::new()));

    // Arguments on the command line run a single command and exit.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        respond(args, Arc::clone(&state)).await?;
        return Ok(());
    }

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let result = match shlex::split(line) {
            Some(args) => respond(args, Arc::clone(&state)).await,
            None => Err("error: Invalid quoting".to_string()),
        };
        match result {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "combat log damage report")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add log files to the batch
    Load {
        #[arg(short, long = "path", required = true, num_args = 1..)]
        paths: Vec<String>,
    },
    /// Drop every loaded file
    Clear,
    /// Set the comma separated party allowlist
    Names {
        #[arg(short, long)]
        list: String,
    },
    UseAllowlist {
        #[arg(short, long, action = clap::ArgAction::Set)]
        enabled: bool,
    },
    Report,
    Chart,
    /// Write the chart rows of the last report as JSON
    Export {
        #[arg(short, long)]
        path: String,
    },
    /// Replace the batch with these files and print the report
    Analyze {
        #[arg(short, long = "path", required = true, num_args = 1..)]
        paths: Vec<String>,
        #[arg(short, long)]
        names: Option<String>,
        #[arg(long)]
        no_allowlist: bool,
        #[arg(long)]
        chart: bool,
    },
    Config,
    Exit,
}

async fn respond(mut args: Vec<String>, state: Arc<RwLock<AppState>>) -> Result<bool, String> {
    args.insert(0, "dmgstat".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Load { paths }) => commands::load_files(&paths, state)
            .await
            .map_err(|e| e.to_string())?,
        Some(Commands::Clear) => commands::clear(state).await,
        Some(Commands::Names { list }) => commands::set_names(&list, state).await,
        Some(Commands::UseAllowlist { enabled }) => {
            commands::set_use_allowlist(enabled, state).await
        }
        Some(Commands::Report) => commands::report(state).await,
        Some(Commands::Chart) => commands::chart(state).await.map_err(|e| e.to_string())?,
        Some(Commands::Export { path }) => commands::export_rows(&path, state)
            .await
            .map_err(|e| e.to_string())?,
        Some(Commands::Analyze {
            paths,
            names,
            no_allowlist,
            chart,
        }) => {
            state.write().await.clear_inputs();
            if let Some(names) = names {
                commands::set_names(&names, Arc::clone(&state)).await;
            }
            if no_allowlist {
                commands::set_use_allowlist(false, Arc::clone(&state)).await;
            }
            commands::load_files(&paths, Arc::clone(&state))
                .await
                .map_err(|e| e.to_string())?;
            commands::report(Arc::clone(&state)).await;
            if chart {
                commands::chart(state).await.map_err(|e| e.to_string())?;
            }
        }
        Some(Commands::Config) => commands::show_settings(state).await,
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
