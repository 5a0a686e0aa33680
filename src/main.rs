use clap::Parser;
use colored::Colorize;
use mason::console::StdConsole;
use mason::orchestrator::Orchestrator;
use mason::prompts;
use mason::session::{ConversationSession, OllamaGenerator};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const BANNER: &str = r#"
  _ __ ___   __ _ ___  ___  _ __
 | '_ ` _ \ / _` / __|/ _ \| '_ \
 | | | | | | (_| \__ \ (_) | | | |
 |_| |_| |_|\__,_|___/\___/|_| |_|
"#;

/// Builds an application file by file from a written specification,
/// driven by a local LLM.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Read the application specification from a file instead of prompting
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Accept every plan and generated file automatically
    #[arg(short = 'y', long)]
    yes: bool,

    /// Directory the generated tree is written into
    #[arg(short, long, default_value = "generated")]
    out: PathBuf,

    /// Model to request from the backend
    #[arg(short, long, default_value = "llama3")]
    model: String,

    /// Base URL of the Ollama server
    #[arg(long, default_value = "http://localhost:11434")]
    host: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    println!("{}", BANNER.cyan());
    println!(
        "{}",
        "Welcome to mason, your personal application builder!".bold()
    );
    println!("Generated files land under {}.\n", cli.out.display());

    let spec = match read_spec(&cli) {
        Some(spec) if !spec.trim().is_empty() => spec,
        _ => {
            eprintln!("{}", "No specification provided, nothing to build.".red());
            return ExitCode::FAILURE;
        }
    };

    let generator = OllamaGenerator::new(&cli.model, &cli.host).with_system(prompts::SYSTEM);
    let session = ConversationSession::new(Box::new(generator));
    let mut orchestrator = Orchestrator::new(session, &cli.out);
    if !cli.yes {
        orchestrator = orchestrator.interactive(Box::new(StdConsole));
    }

    match orchestrator.run(&spec) {
        Ok(report) => {
            println!(
                "\n{}",
                format!(
                    "File creation completed: {} file(s) written.",
                    report.written_count()
                )
                .green()
                .bold()
            );
            let mut failed = false;
            for failure in report.failures() {
                failed = true;
                eprintln!("{}", format!("  failed: {}", failure.path()).red());
            }
            if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("{}", format!("Build stopped: {err}").red());
            ExitCode::FAILURE
        }
    }
}

fn read_spec(cli: &Cli) -> Option<String> {
    match &cli.file {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(spec) => Some(spec),
            Err(err) => {
                eprintln!(
                    "{}",
                    format!("Could not read {}: {err}", path.display()).red()
                );
                None
            }
        },
        None => {
            print!("{} ", "Describe the application you want to build:".bold());
            io::stdout().flush().ok();
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line).ok()?;
            Some(line.trim().to_string())
        }
    }
}
