//! examsmith CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod paper;
mod render;

#[derive(Parser)]
#[command(
    name = "examsmith",
    version,
    about = "GCSE-style maths question generator and marker"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a single question
    Generate {
        /// Topic code (N7, N8, N9)
        #[arg(long)]
        topic: String,

        /// Total marks for the question
        #[arg(long, default_value = "3")]
        marks: u32,

        /// Paper mode: calc or noncalc
        #[arg(long, default_value = "calc")]
        mode: String,

        /// Seed: digits replay exactly, any other text is hashed
        #[arg(long)]
        seed: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Print expected answers after the question
        #[arg(long)]
        show_answers: bool,
    },

    /// Generate a whole paper from a TOML specification
    Paper {
        /// Path to the .toml paper spec
        #[arg(long)]
        spec: PathBuf,

        /// Write the paper document JSON here instead of printing text
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print expected answers after each question
        #[arg(long)]
        show_answers: bool,
    },

    /// Mark typed responses against a saved paper document
    Mark {
        /// Paper document JSON written by `paper --out`
        #[arg(long)]
        paper: PathBuf,

        /// Responses JSON mapping input ids to typed text
        #[arg(long)]
        responses: PathBuf,

        /// Show expected answers where marks were lost
        #[arg(long)]
        show_answers: bool,
    },

    /// List the topics the generator knows
    Topics,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("examsmith=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            topic,
            marks,
            mode,
            seed,
            format,
            show_answers,
        } => commands::generate::execute(topic, marks, mode, seed, format, show_answers),
        Commands::Paper {
            spec,
            out,
            show_answers,
        } => commands::paper::execute(spec, out, show_answers),
        Commands::Mark {
            paper,
            responses,
            show_answers,
        } => commands::mark::execute(paper, responses, show_answers),
        Commands::Topics => commands::topics::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
