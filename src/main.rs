//! Telos CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use telos::cli::commands;
use telos::cli::{Cli, Commands, OutputFormat};
use telos::config::Settings;
use telos::error::Error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.dry_run {
        telos::DRY_RUN.store(true, std::sync::atomic::Ordering::Relaxed);
    }
    if cli.format == OutputFormat::Csv {
        telos::CSV_OUTPUT.store(true, std::sync::atomic::Ordering::Relaxed);
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    // JSON only when asked for; piped output stays markdown
    let json = cli.json || cli.format == OutputFormat::Json;

    match run(&cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,reqwest=info,hyper=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli, json: bool) -> Result<(), Error> {
    // Commands that need no configuration
    match &cli.command {
        Commands::Version => return commands::version::execute(json),
        Commands::Completions { shell } => return commands::completions::execute(shell),
        Commands::Patterns => return commands::patterns::execute(json),
        Commands::Template => return commands::template::execute(json),
        _ => {}
    }

    let settings = Settings::resolve(cli.overrides());

    match &cli.command {
        Commands::Status => commands::status::execute(&settings, json),
        Commands::Files => commands::files::execute(&settings, json),

        // Model-backed commands
        Commands::Analyze {
            file,
            pattern,
            all,
            no_save,
        } => commands::analyze::execute(&settings, file, pattern.as_deref(), *all, *no_save, json),
        Commands::Assist { file, kind } => commands::assist::execute(&settings, file, kind, json),
        Commands::Search { query } => commands::search::execute(&settings, query, json),

        // Documents
        Commands::New {
            name,
            template: _,
            content,
            from,
        } => commands::new::execute(&settings, name, content.as_deref(), from.as_deref(), json),
        Commands::Journal { file, text } => commands::journal::execute(&settings, file, text, json),

        // Saved analyses and insights
        Commands::Outputs { command } => commands::outputs::execute(command, &settings, json),
        Commands::Analytics => commands::analytics::execute(&settings, json),
        Commands::Goals { file } => commands::goals::execute(&settings, file, json),

        Commands::Version
        | Commands::Completions { .. }
        | Commands::Patterns
        | Commands::Template => Ok(()),
    }
}
