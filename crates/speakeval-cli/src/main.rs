//! speakeval CLI — score spoken answers and show what to fix.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "speakeval", version, about = "Spoken answer scoring and correction")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one answer and show the corrected rendering
    Check {
        /// The (transcribed) answer to evaluate
        #[arg(long, default_value = "")]
        candidate: String,

        /// Acceptable reference sentence (repeatable)
        #[arg(long = "reference")]
        references: Vec<String>,

        /// Exercise file or directory to take references from
        #[arg(long)]
        exercises: Option<PathBuf>,

        /// Exercise id whose references to use
        #[arg(long)]
        id: Option<String>,

        /// Output format: text, json, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Evaluate a file of attempts and write a report
    Evaluate {
        /// Exercise file or directory
        #[arg(long)]
        exercises: Option<PathBuf>,

        /// JSON file with an array of {exercise_id, transcript} attempts
        #[arg(long)]
        attempts: PathBuf,

        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, markdown, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Max concurrent evaluations
        #[arg(long)]
        parallelism: Option<usize>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate exercise files
    Validate {
        /// Exercise file or directory
        #[arg(long)]
        exercises: PathBuf,
    },

    /// List exercises
    List {
        /// Exercise file or directory
        #[arg(long)]
        exercises: PathBuf,

        /// Only show this level
        #[arg(long)]
        level: Option<u32>,
    },

    /// Show the next exercise at a level
    Next {
        /// Exercise file or directory
        #[arg(long)]
        exercises: PathBuf,

        /// Level to practice
        #[arg(long, default_value = "1")]
        level: u32,

        /// Id of the exercise just practiced
        #[arg(long)]
        after: Option<String>,
    },

    /// Create starter config and example exercises
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("speakeval=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            candidate,
            references,
            exercises,
            id,
            format,
            config,
        } => commands::check::execute(candidate, references, exercises, id, format, config),
        Commands::Evaluate {
            exercises,
            attempts,
            output,
            format,
            parallelism,
            config,
        } => {
            commands::evaluate::execute(exercises, attempts, output, format, parallelism, config)
                .await
        }
        Commands::Validate { exercises } => commands::validate::execute(exercises),
        Commands::List { exercises, level } => commands::list::execute(exercises, level),
        Commands::Next {
            exercises,
            level,
            after,
        } => commands::next::execute(exercises, level, after),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
