// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use medi_minds::utils::logging::{format_error, format_heading, format_info, format_success};
use medi_minds::{Config, PipelineFactory, server};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "medi_minds")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Medical question answering over PubMed abstracts", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the question answering HTTP api
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Answer a single question and print the result
    Ask {
        /// Free-text medical question
        question: String,

        /// Also print run statistics
        #[arg(long)]
        stats: bool,
    },

    /// Validate configuration and print it with secrets redacted
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    medi_minds::utils::logging::init_logger(cli.color, cli.verbose);

    let path = if cli.config.exists() {
        info!("Loading configuration from: {}", cli.config.display());
        Some(cli.config.as_path())
    } else {
        warn!(
            "Config file {} not found, using built-in defaults and environment",
            cli.config.display()
        );
        None
    };

    match cli.command {
        Commands::Serve { host, port } => {
            let config = Config::load(path).context("Failed to load configuration")?;
            cmd_serve(config, host, port).await?;
        }
        Commands::Ask { question, stats } => {
            let config = Config::load(path).context("Failed to load configuration")?;
            cmd_ask(config, &question, stats).await?;
        }
        Commands::CheckConfig => {
            let config =
                Config::load_unvalidated(path).context("Failed to load configuration")?;
            cmd_check_config(&config)?;
        }
    }

    Ok(())
}

async fn cmd_serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        medi_minds::Validator::validate_port(port).context("Invalid --port")?;
        config.server.port = port;
    }

    server::serve(config).await.context("Server failed")?;
    Ok(())
}

async fn cmd_ask(config: Config, question: &str, show_stats: bool) -> Result<()> {
    let factory = PipelineFactory::new(config);

    let outcome = match factory.run(question).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            return Err(e).context("Failed to answer question");
        }
    };

    println!("\n{} {}", format_heading("Question:"), outcome.question);
    println!("{} {}\n", format_heading("Answer:"), outcome.answer.trim());

    if show_stats {
        let stats = &outcome.stats;
        println!(
            "{}",
            format_info(&format!(
                "{} queries ({} failed), {} documents",
                stats.queries_parsed, stats.queries_failed, stats.documents_fetched
            ))
        );
        for (stage, ms) in &stats.stage_timings_ms {
            println!("  {:<22} {:>6} ms", stage.name(), ms);
        }
        println!("  {:<22} {:>6} ms", "total", stats.total_duration_ms());
    }

    Ok(())
}

fn cmd_check_config(config: &Config) -> Result<()> {
    let validation = config.validate();
    match &validation {
        Ok(()) => println!("{}", format_success("Configuration is valid")),
        Err(e) => println!("{}", format_error(&e.to_string())),
    }

    for (key, value) in config.summary() {
        println!("  {:<30} {}", key, value);
    }

    let report = server::health_report(config);
    println!("\n{}", report.format());

    validation.context("Configuration is invalid")
}
