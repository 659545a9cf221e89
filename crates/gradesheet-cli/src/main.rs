//! gradesheet CLI: the command-line front end for score sheets.

use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gradesheet", version, about = "Rubric score sheets and feedback reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a template or save file parses and scores cleanly
    Validate {
        /// Path to the score sheet
        #[arg(long)]
        sheet: PathBuf,
    },

    /// Show the current scoring state of a sheet
    Show {
        /// Path to the score sheet
        #[arg(long)]
        sheet: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Render the feedback report for a sheet
    Report {
        /// Path to the score sheet
        #[arg(long)]
        sheet: PathBuf,

        /// Write the report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Grade one subject for an assignment part
    Grade {
        /// Assignment part name (case-insensitive)
        #[arg(long)]
        part: String,

        /// Directory holding the subject's submission
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Check a criterion, as CATEGORY:DEDUCTION:CRITERION (applied in command-line order)
        #[arg(long, value_name = "C:D:K")]
        check: Vec<String>,

        /// Uncheck a criterion, as CATEGORY:DEDUCTION:CRITERION (applied in command-line order)
        #[arg(long, value_name = "C:D:K")]
        uncheck: Vec<String>,

        /// Replace the free-form notes
        #[arg(long)]
        notes: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List configured assignment parts
    Parts {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example rubric template
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradesheet=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let result = match cli.command {
        Commands::Validate { sheet } => commands::validate::execute(sheet),
        Commands::Show { sheet, format } => commands::show::execute(sheet, format),
        Commands::Report { sheet, output } => commands::report::execute(sheet, output),
        Commands::Grade {
            part,
            dir,
            check,
            uncheck,
            notes,
            config,
        } => {
            // Interleave --check and --uncheck by their position on the command line.
            let events = matches
                .subcommand_matches("grade")
                .map(commands::grade::ordered_events)
                .unwrap_or_else(|| {
                    let checks = check.into_iter().map(|c| (c, true));
                    checks.chain(uncheck.into_iter().map(|u| (u, false))).collect()
                });
            commands::grade::execute(part, dir, events, notes, config)
        }
        Commands::Parts { config } => commands::parts::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
