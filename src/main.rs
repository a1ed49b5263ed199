//! tropematch: Command-line interface for the trope-based book search client

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tropematch::api::AutocompleteClient;
use tropematch::config::{self, AppConfig};
use tropematch::form::{FormOptions, SearchForm};
use tropematch::render;
use tropematch::tracking::Tracker;

// ============================================================================
// CLI Implementation
// ============================================================================

/// tropematch: find books sharing narrative tropes
#[derive(Parser)]
#[command(name = "tropematch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a config file (default: XDG config dir)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Origin of the recommendation API
    #[arg(short, long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize tropematch configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
    /// Fetch autocomplete suggestions for partial input
    Suggest {
        /// Partial work title
        input: String,
    },
    /// Search for books similar to a query and/or selected works
    Search {
        /// Free-text query
        query: Option<String>,

        /// Selected work title - can be specified multiple times
        #[arg(short, long, action = ArgAction::Append)]
        work: Vec<String>,
    },
    /// Open a search location the way a pasted link would
    Open {
        /// A `/search/?query=...&works=...` location or bare query string
        location: String,
    },
}

/// Resolve the effective configuration: file, then environment, then CLI
/// overrides.
fn load_config(cli_config: Option<&str>, cli_base_url: Option<&str>) -> Result<AppConfig> {
    let file_config = match cli_config {
        Some(path) => AppConfig::from_file(Path::new(path))?,
        None => {
            let default_path = config::get_config_dir().join("config.toml");
            if default_path.exists() {
                AppConfig::from_file(&default_path)?
            } else {
                AppConfig::default()
            }
        }
    };

    let mut merged = file_config.merge_with(&AppConfig::from_env());
    if let Some(url) = cli_base_url {
        merged = merged.with_api_base_url(url);
    }
    merged.validate()?;
    Ok(merged)
}

fn build_form(config: &AppConfig) -> SearchForm {
    let options = FormOptions {
        autocomplete_rate_limit: Duration::from_millis(config.autocomplete_rate_limit_ms()),
        max_query_works: config.max_query_works(),
        request_timeout: Duration::from_secs(config.request_timeout_secs()),
    };
    SearchForm::with_options(config.api_base_url(), options)
}

/// Accept both full locations and bare query strings on the command line
fn normalize_location(location: &str) -> String {
    if location.contains('?') {
        location.to_string()
    } else {
        format!("/search/?{}", location)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Init { force } => {
            let config_dir = config::get_config_dir();
            let config_path = config_dir.join("config.toml");

            eprintln!("Initializing tropematch configuration...");
            eprintln!("Config directory: {}", config_dir.display());

            if !config_dir.exists() {
                std::fs::create_dir_all(&config_dir)?;
                eprintln!("Created config directory");
            }

            if config_path.exists() && !force {
                eprintln!("Configuration file already exists: {}", config_path.display());
                eprintln!("Use --force to overwrite");
                return Ok(());
            }

            let default_config = AppConfig::default();
            let toml_content = default_config.to_toml()?;
            std::fs::write(&config_path, &toml_content)?;

            eprintln!("Created configuration file: {}", config_path.display());
            eprintln!("\nConfiguration initialized successfully!");
            eprintln!("Edit {} to customize settings.", config_path.display());

            Ok(())
        }
        Commands::Suggest { input } => {
            let config = load_config(cli.config.as_deref(), cli.base_url.as_deref())?;
            let client = AutocompleteClient::with_timeout(
                config.api_base_url(),
                Duration::from_secs(config.request_timeout_secs()),
            );

            let suggestions = client.suggest(&input).await;
            if suggestions.is_empty() {
                println!("No suggestions for '{}'", input);
            } else {
                for suggestion in suggestions {
                    println!("{}", suggestion.label);
                }
            }
            Ok(())
        }
        Commands::Search { query, work } => {
            let config = load_config(cli.config.as_deref(), cli.base_url.as_deref())?;
            let tracker = Tracker::new(config.tracking_id());
            let form = build_form(&config);

            if let Some(text) = &query {
                form.input_changed(text);
            }
            for title in &work {
                form.select(tropematch::Suggestion::from_name(title.clone()));
            }

            let location = form.submit_form().await;
            tracker.pageview(&location).await;

            println!("{}", render::render_state(&form.state()));
            println!("{}", render::ABOUT);
            eprintln!("Link: {}", location);
            Ok(())
        }
        Commands::Open { location } => {
            let config = load_config(cli.config.as_deref(), cli.base_url.as_deref())?;
            let tracker = Tracker::new(config.tracking_id());
            let form = build_form(&config);

            let location = normalize_location(&location);
            tracker.pageview(&location).await;
            form.navigate(&location).await;

            println!("{}", render::render_state(&form.state()));
            println!("{}", render::ABOUT);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["tropematch", "suggest", "giv"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_search_command() {
        let cli = Cli::try_parse_from([
            "tropematch",
            "search",
            "dystopia",
            "--work",
            "The Giver",
            "--work",
            "Brave New World",
        ]);
        assert!(cli.is_ok());
        if let Ok(parsed) = cli {
            if let Commands::Search { query, work } = parsed.command {
                assert_eq!(query.as_deref(), Some("dystopia"));
                assert_eq!(work.len(), 2);
                assert_eq!(work[0], "The Giver");
            }
        }
    }

    #[test]
    fn test_cli_open_command() {
        let cli = Cli::try_parse_from(["tropematch", "open", "/search/?query=giver"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_normalize_location() {
        assert_eq!(
            normalize_location("query=giver"),
            "/search/?query=giver"
        );
        assert_eq!(
            normalize_location("/search/?query=giver"),
            "/search/?query=giver"
        );
    }
}
