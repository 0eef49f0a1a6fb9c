// src/main.rs
// Classroom - simulated students reacting to a teacher's explanations

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use classroom::config::{ClassroomConfig, EnvConfig};
use classroom::extract::{content_type_for, extract_notes, extractor_for};
use classroom::llm::{ReasoningClient, client_from_config};
use classroom::simulation::{Session, SimulationPolicy, Student, TurnOutcome, initialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "classroom")]
#[command(about = "Teach a simulated classroom and watch the students react")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.classroom/config.toml)
    #[arg(long, global = true, env = "CLASSROOM_CONFIG")]
    config: Option<PathBuf>,

    /// Let up to two students speak per turn, no mandatory preamble
    #[arg(long, global = true)]
    loose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a classroom from notes and print it as JSON
    Init {
        /// Notes file (text, markdown or PDF)
        file: PathBuf,
    },

    /// Start an interactive teaching session from notes
    Run {
        /// Notes file (text, markdown or PDF)
        file: PathBuf,
    },

    /// Validate configuration and exit
    Check,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_policy(cli: &Cli) -> SimulationPolicy {
    let base = if cli.loose {
        SimulationPolicy::loose()
    } else {
        SimulationPolicy::default()
    };
    let file_config = match &cli.config {
        Some(path) => ClassroomConfig::load_from(path),
        None => ClassroomConfig::load(),
    };
    file_config.apply_to(base)
}

/// Read and extract notes; extraction problems are reported, not fatal
async fn read_notes(env: &EnvConfig, path: &Path) -> Result<(String, String)> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let content_type = content_type_for(path);
    let extractor = extractor_for(env.extractor);

    let notes = extract_notes(extractor.as_ref(), &bytes, &content_type);
    if let Some(err) = &notes.error {
        eprintln!("Could not read {}: {}", path.display(), err);
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok((notes.text, file_name))
}

fn print_roster(students: &[Student]) {
    for s in students {
        println!("  {} {:<24} {:>3}/100", s.avatar, s.name, s.understanding);
    }
}

fn print_turn(outcome: &TurnOutcome) {
    if outcome.origin.is_degraded() {
        println!("(the class is distracted - fallback turn)");
    }
    for s in outcome.speakers() {
        println!("{} {}: {}", s.avatar, s.name, s.response);
    }
    if let Some(concept) = &outcome.taught_concept {
        println!("Concept taught: {}", concept);
    }
    print_roster(&outcome.students);
}

async fn run_init(
    client: Arc<dyn ReasoningClient>,
    policy: SimulationPolicy,
    env: &EnvConfig,
    file: &Path,
) -> Result<()> {
    let (notes, file_name) = read_notes(env, file).await?;
    let outcome = initialize(client, policy, &notes, &file_name).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

async fn run_session(
    client: Arc<dyn ReasoningClient>,
    policy: SimulationPolicy,
    env: &EnvConfig,
    file: &Path,
) -> Result<()> {
    let (notes, file_name) = read_notes(env, file).await?;
    let mut session = Session::start(client, policy, &notes, &file_name).await;

    println!("Topic: {}", session.topic());
    print_roster(session.students());
    println!("Explain the topic to the class. /roster shows scores, /quit ends.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" => break,
            "/roster" => print_roster(session.students()),
            explanation => {
                let outcome = session.teach(explanation).await;
                print_turn(&outcome);
            }
        }
    }

    println!(
        "Session over after {} turns. Average understanding {:.1}.",
        session.turns(),
        session.average_understanding()
    );
    if !session.taught_concepts().is_empty() {
        println!("Concepts taught: {}", session.taught_concepts().join(", "));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let env = EnvConfig::load();

    if let Commands::Check = cli.command {
        let validation = env.validate();
        println!("{}", validation.report());
        validation.into_result()?;
        return Ok(());
    }

    let policy = load_policy(&cli);
    info!(
        speaker_cap = policy.speaker_cap,
        roster_size = policy.roster_size,
        "Simulation policy loaded"
    );
    let client = client_from_config(&env.backend);

    match &cli.command {
        Commands::Init { file } => run_init(client, policy, &env, file).await,
        Commands::Run { file } => run_session(client, policy, &env, file).await,
        Commands::Check => Ok(()),
    }
}
