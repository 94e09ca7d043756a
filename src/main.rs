use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kbq::backend::SearchClientBuilder;
use kbq::controller::{SearchController, Submission, failure_message};
use kbq::format;

/// kbq - terminal client for a knowledge-base search backend
#[derive(Parser)]
#[command(name = "kbq")]
#[command(about = "Query a knowledge-base search backend and view cited answers")]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides the KB_BACKEND_URL environment variable)
    #[arg(long, value_name = "URL", global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Start the interactive TUI client
    Tui,
    /// Ask a single question and print the answer
    Ask(AskCommand),
    /// Check backend reachability and document count
    Status,
}

/// Ask a single question
#[derive(Parser)]
struct AskCommand {
    /// The query text
    #[arg(value_name = "QUERY")]
    query: String,
}

fn main() {
    // A .env file may supply KB_BACKEND_URL; absence is fine
    dotenvy::dotenv().ok();

    // Diagnostic channel: controlled by RUST_LOG, written to stderr,
    // distinct from user-visible output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Tui => kbq::tui::run(cli.backend_url.clone()),
        Commands::Ask(cmd) => handle_ask(cmd, cli.backend_url.clone()),
        Commands::Status => handle_status(cli.backend_url.clone()),
    };

    if let Err(e) = result {
        // Determine exit code based on error type
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e}");
        std::process::exit(exit_code);
    }
}

/// Determines if an error is a user error (vs internal error).
///
/// User errors include validation failures like an empty query.
/// Internal errors include network failures and backend errors.
fn is_user_error(error: &anyhow::Error) -> bool {
    error.to_string().contains("cannot be empty")
}

/// Builds a controller over the configured backend.
fn build_controller(backend_url: Option<String>) -> Result<SearchController> {
    let mut builder = SearchClientBuilder::new();
    if let Some(url) = backend_url {
        builder = builder.base_url(url);
    }
    let client = builder.build().context("Failed to create backend client")?;
    Ok(SearchController::new(Box::new(client)))
}

/// Handles the ask command: one query, one request, printed answer.
///
/// Empty-query validation lives in the controller; the `EmptyQuery` outcome
/// maps to a user error here.
fn handle_ask(cmd: &AskCommand, backend_url: Option<String>) -> Result<()> {
    let controller = build_controller(backend_url)?;

    match controller.submit(&cmd.query) {
        Submission::EmptyQuery => anyhow::bail!("Query cannot be empty"),
        Submission::Answered(response) => {
            let formatted = format::format_answer(&response.answer);
            println!("{}", formatted.to_display_string());
            println!();
            println!("{}", format::searched_chunks_line(response.num_docs_searched));
            if !response.sources.is_empty() {
                println!();
                for (idx, source) in response.sources.iter().enumerate() {
                    println!("{}", format::source_line(idx, source));
                }
            }
            Ok(())
        }
        Submission::Failed(error) => Err(anyhow::anyhow!(
            "{}",
            failure_message(&error, controller.backend_url())
        )),
    }
}

/// Handles the status command by pinging the backend health endpoint.
fn handle_status(backend_url: Option<String>) -> Result<()> {
    let mut builder = SearchClientBuilder::new();
    if let Some(url) = backend_url {
        builder = builder.base_url(url);
    }
    let client = builder.build().context("Failed to create backend client")?;

    let health = client.health().with_context(|| {
        format!(
            "Backend at {} is not reachable",
            client.base_url()
        )
    })?;

    println!(
        "Backend at {} is {} ({} documents loaded)",
        client.base_url(),
        health.status,
        health.docs_loaded
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The backend URL points at a closed port, so a "cannot be empty" error
    // proves the controller rejected the query without issuing a request.
    #[test]
    fn empty_query_is_rejected_before_any_request() {
        let cmd = AskCommand {
            query: String::new(),
        };
        let result = handle_ask(&cmd, Some("http://127.0.0.1:1".to_string()));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn whitespace_only_query_is_rejected() {
        let cmd = AskCommand {
            query: "   \n\t  ".to_string(),
        };
        let result = handle_ask(&cmd, Some("http://127.0.0.1:1".to_string()));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn empty_query_error_is_classified_as_user_error() {
        let error = anyhow::anyhow!("Query cannot be empty");
        assert!(is_user_error(&error));

        let error = anyhow::anyhow!("Network error: connection refused");
        assert!(!is_user_error(&error));
    }

    #[test]
    fn invalid_backend_url_fails_controller_construction() {
        let result = build_controller(Some("not-a-valid-url".to_string()));
        assert!(result.is_err());
    }
}
