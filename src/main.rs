use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use learning_nexus::backend::{Backend, GeminiBackend};
use learning_nexus::config::{find_config_file, get_config, load_config, Config};
use learning_nexus::shell::{render, Phase, Shell};
use learning_nexus::ui::{is_terminal, status_icon, truncate_with_ellipsis, Spinner, Status};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Learning Nexus - Generate curated, step-by-step learning paths for any topic
#[derive(Parser, Debug)]
#[command(name = "learning-nexus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate curated, step-by-step learning paths for any topic", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Model identifier to use for generation
    #[arg(long, global = true)]
    model: Option<String>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (pretty if TTY, JSON otherwise)
    Auto,
    /// Styled, human-readable format
    Pretty,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a learning path for a topic and print it
    #[command(alias = "e")]
    Explore {
        /// The topic to explore
        topic: String,
    },

    /// Check configuration and backend connectivity
    Doctor,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("Learning Nexus - Environment Variables");
    println!();
    println!("API Keys:");
    println!("  GEMINI_API_KEY                       API key for the Gemini backend");
    println!();
    println!("Configuration Overrides:");
    println!("  LEARNING_NEXUS_BACKEND__API_KEY      Same as [backend].api_key");
    println!("  LEARNING_NEXUS_BACKEND__MODEL        Model identifier (default: gemini-2.5-flash)");
    println!("  LEARNING_NEXUS_BACKEND__TIMEOUT_SECS Request timeout in seconds (default: 30)");
    println!("  LEARNING_NEXUS_UI__THEME             Initial theme, dark or light (default: dark)");
    println!();
    println!("Other Settings:");
    println!("  RUST_LOG                             Rust logging level (e.g., debug, info, warn, error)");
    println!();
    println!("Example:");
    println!("  export GEMINI_API_KEY=\"your-key-here\"");
    println!("  export LEARNING_NEXUS_BACKEND__MODEL=\"gemini-2.5-pro\"");
    std::process::exit(0);
}

/// Resolve configuration from --config, the standard locations, or env only.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)?
    } else {
        get_config()
    };

    if let Some(model) = &cli.model {
        config.backend.model = model.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.backend.timeout_secs = timeout;
    }

    Ok(config)
}

fn build_backend(config: &Config) -> Result<GeminiBackend> {
    let api_key = config.resolved_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured. Set GEMINI_API_KEY or add [backend].api_key to the config file."
        )
    })?;

    let mut backend = GeminiBackend::new(
        api_key,
        config.backend.model.clone(),
        Duration::from_secs(config.backend.timeout_secs),
    );
    if let Some(base) = &config.backend.api_base {
        backend = backend.with_api_base(base);
    }
    Ok(backend)
}

fn output_details(
    details: &learning_nexus::models::TopicDetails,
    format: OutputFormat,
    theme: learning_nexus::shell::Theme,
) -> Result<()> {
    let actual_format = if format == OutputFormat::Auto {
        if is_terminal() {
            OutputFormat::Pretty
        } else {
            OutputFormat::Json
        }
    } else {
        format
    };

    match actual_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(details)?);
        }
        OutputFormat::Plain => {
            print!("{}", render::details_plain(details));
        }
        OutputFormat::Pretty => {
            println!("{}", render::details_pretty(details, theme));
        }
        OutputFormat::Auto => unreachable!(),
    }
    Ok(())
}

async fn run_doctor(cli: &Cli) -> Result<()> {
    println!("Learning Nexus - Diagnostics");
    println!();

    // Config resolution
    let config = match resolve_config(cli) {
        Ok(config) => {
            let source = if let Some(path) = &cli.config {
                format!("from {}", path.display())
            } else if let Some(path) = find_config_file() {
                format!("from {}", path.display())
            } else {
                "defaults and environment".to_string()
            };
            println!("{} Configuration loaded ({})", status_icon(Status::Success).green(), source);
            println!("  model: {}", config.backend.model);
            println!("  timeout: {}s", config.backend.timeout_secs);
            config
        }
        Err(err) => {
            println!("{} Configuration failed to load: {}", status_icon(Status::Error).red(), err);
            std::process::exit(1);
        }
    };

    // API key
    if config.resolved_api_key().is_none() {
        println!(
            "{} No API key found (set GEMINI_API_KEY or [backend].api_key)",
            status_icon(Status::Error).red()
        );
        std::process::exit(1);
    }
    println!("{} API key present", status_icon(Status::Success).green());

    // Connectivity: one real generation round-trip
    let backend = build_backend(&config)?;
    let spinner = Spinner::new("Checking backend connectivity...");
    match backend.generate("the water cycle").await {
        Ok(details) => {
            spinner.finish_with_success(&format!(
                "Backend reachable ({} steps returned for a probe topic)",
                details.learning_path.len()
            ));
        }
        Err(err) => {
            spinner.finish_with_error(&format!("Backend check failed: {}", err));
            std::process::exit(1);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show environment variables and exit if requested
    if cli.env {
        print_env_vars();
    }

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("learning_nexus={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Some(Commands::Doctor) => run_doctor(&cli).await,

        Some(Commands::Explore { ref topic }) => {
            let config = resolve_config(&cli)?;
            let theme = config.theme();
            let backend = Arc::new(build_backend(&config)?) as Arc<dyn Backend>;
            let mut shell = Shell::with_theme(backend, theme);

            let show_spinner = !cli.quiet && is_terminal();
            let spinner = show_spinner.then(|| {
                Spinner::new(&format!(
                    "Curating a learning path for \"{}\"...",
                    truncate_with_ellipsis(topic.trim(), 60)
                ))
            });

            let state = shell
                .run_once(topic)
                .await
                .map_err(|err| anyhow::anyhow!("{}", err))?;

            if let Some(s) = &spinner {
                s.finish_and_clear();
            }

            match &state.phase {
                Phase::Ready(details) => output_details(details, cli.output, theme)?,
                Phase::Failed(message) => {
                    eprintln!("{}", render::error_panel(message, theme));
                    std::process::exit(1);
                }
                Phase::Idle | Phase::Loading { .. } => unreachable!(),
            }
            Ok(())
        }

        None => {
            let config = resolve_config(&cli)?;
            let backend = Arc::new(build_backend(&config)?) as Arc<dyn Backend>;
            let mut shell = Shell::with_theme(backend, config.theme());
            shell.run_interactive().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_version() {
        let version = env!("CARGO_PKG_VERSION");
        assert!(!version.is_empty());
        let parts: Vec<&str> = version.split('.').collect();
        assert!(parts.len() >= 2);
        assert!(parts[0].parse::<u32>().is_ok());
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["learning-nexus"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert_eq!(cli.output, OutputFormat::Auto);
        assert!(cli.timeout.is_none());
        assert!(cli.model.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::parse_from(["learning-nexus", "-v"]);
        assert_eq!(cli.verbose, 1);

        let cli = Cli::parse_from(["learning-nexus", "-vv"]);
        assert_eq!(cli.verbose, 2);

        let cli = Cli::parse_from(["learning-nexus", "--verbose"]);
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_cli_quiet_flag() {
        let cli = Cli::parse_from(["learning-nexus", "-q"]);
        assert!(cli.quiet);
    }

    #[test]
    fn test_cli_output_format() {
        let cli = Cli::parse_from(["learning-nexus", "-o", "json"]);
        assert_eq!(cli.output, OutputFormat::Json);

        let cli = Cli::parse_from(["learning-nexus", "--output", "pretty"]);
        assert_eq!(cli.output, OutputFormat::Pretty);
    }

    #[test]
    fn test_cli_explore_alias() {
        let cli = Cli::parse_from(["learning-nexus", "e", "rust"]);
        match cli.command {
            Some(Commands::Explore { topic }) => assert_eq!(topic, "rust"),
            other => panic!("expected Explore, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_model_and_timeout_overrides() {
        let cli = Cli::parse_from([
            "learning-nexus",
            "--model",
            "gemini-2.5-pro",
            "--timeout",
            "60",
            "explore",
            "rust",
        ]);
        assert_eq!(cli.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(cli.timeout, Some(60));
    }
}
