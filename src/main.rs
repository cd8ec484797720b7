//! Email-Trawler main entry point
//!
//! This is the command-line interface for the Email-Trawler site harvester.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use email_trawler::config::{ensure_config_file, load_config_with_hash, Config};
use email_trawler::crawler::crawl;
use email_trawler::normalize_start_url;
use email_trawler::outreach::{
    load_template, select_recipients, send_in_batches, MessageSpec, Selection, SmtpMailer,
};
use email_trawler::output::{print_crawl_summary, print_email_list, print_send_report};
use email_trawler::storage::{merge_emails, EmailStore, JsonEmailStore};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Email-Trawler: a same-site email harvester
///
/// Email-Trawler crawls a single website breadth-first, collects the email
/// addresses it finds, keeps them in a JSON store, and mails stored
/// addresses in batches.
#[derive(Parser, Debug)]
#[command(name = "email-trawler")]
#[command(version = "1.0.0")]
#[command(about = "A same-site email harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a website and add the emails found to the store
    Crawl {
        /// Start URL (https:// is assumed when no scheme is given)
        url: String,
    },

    /// Print the addresses in the store
    List,

    /// Email stored addresses, then drop the ones reached from the store
    Send {
        /// Number of one address as shown by `list`
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        number: Option<usize>,

        /// Send to every stored address
        #[arg(long)]
        all: bool,
    },

    /// Validate the configuration and print it
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    ensure_config_file(&cli.config)
        .with_context(|| format!("Failed to prepare {}", cli.config.display()))?;

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    match cli.command {
        Command::Crawl { url } => handle_crawl(&config, &url).await,
        Command::List => handle_list(&config),
        Command::Send { number, all } => {
            let selection = match number {
                Some(number) if !all => Selection::One(number),
                _ => Selection::All,
            };
            handle_send(&config, selection).await
        }
        Command::CheckConfig => {
            handle_check_config(&config);
            Ok(())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("email_trawler=info,warn"),
            1 => EnvFilter::new("email_trawler=debug,info"),
            2 => EnvFilter::new("email_trawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the crawl command: crawls, merges into the store, prints a summary
async fn handle_crawl(config: &Config, input: &str) -> Result<()> {
    let start_url =
        normalize_start_url(input).with_context(|| format!("Invalid start URL: {}", input))?;

    let result = crawl(config, start_url.as_str())
        .await
        .context("Crawl failed")?;

    let mut store = JsonEmailStore::new(&config.output.emails_path);
    let merge = merge_emails(&mut store, result.emails.iter().cloned())
        .with_context(|| format!("Failed to update {}", config.output.emails_path))?;
    tracing::info!(
        "Saved {} emails to {} ({} new)",
        merge.total,
        config.output.emails_path,
        merge.added
    );

    print_crawl_summary(&result, &merge);
    Ok(())
}

/// Handles the list command: prints the store contents
fn handle_list(config: &Config) -> Result<()> {
    let store = JsonEmailStore::new(&config.output.emails_path);
    let emails = store
        .load()
        .with_context(|| format!("Failed to read {}", config.output.emails_path))?;

    print_email_list(&emails);
    Ok(())
}

/// Handles the send command: mails the selected addresses in batches
async fn handle_send(config: &Config, selection: Selection) -> Result<()> {
    let sender = config
        .sender
        .as_ref()
        .context("Sending needs a [sender] section in the configuration")?;
    let smtp = config
        .smtp
        .as_ref()
        .context("Sending needs an [smtp] section in the configuration")?;

    let mut store = JsonEmailStore::new(&config.output.emails_path);
    let stored = store
        .load()
        .with_context(|| format!("Failed to read {}", config.output.emails_path))?;
    let recipients = select_recipients(&stored, selection)?;

    let body = load_template(Path::new(&config.outreach.template_path))?;
    let message = MessageSpec::from_sender(sender, body);
    let mailer = SmtpMailer::from_config(sender, smtp)?;

    tracing::info!(
        "Sending to {} recipients via {}:{}",
        recipients.len(),
        smtp.server,
        smtp.port
    );
    let report = send_in_batches(&mailer, &mut store, &recipients, &message, &config.outreach)
        .await
        .context("Sending failed")?;

    print_send_report(&report);
    Ok(())
}

/// Handles the check-config command: shows the effective configuration
fn handle_check_config(config: &Config) {
    println!("=== Email-Trawler Configuration ===\n");

    println!("Crawler:");
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Request delay: {}ms", config.crawler.request_delay);
    println!("  Request timeout: {}s", config.crawler.request_timeout);

    println!("\nUser Agent:");
    println!("  Identity: {}", config.user_agent.identity);

    println!("\nOutput:");
    println!("  Email store: {}", config.output.emails_path);

    println!("\nSender:");
    match &config.sender {
        Some(sender) => {
            println!("  Address: {}", sender.address);
            println!("  Subject: {}", sender.subject);
        }
        None => println!("  (not configured)"),
    }

    println!("\nSMTP:");
    match &config.smtp {
        Some(smtp) => {
            println!("  Server: {}:{}", smtp.server, smtp.port);
            println!(
                "  Password: {}",
                if smtp.password.is_empty() { "(empty)" } else { "(set)" }
            );
        }
        None => println!("  (not configured)"),
    }

    println!("\nOutreach:");
    println!("  Batch size: {}", config.outreach.batch_size);
    println!("  Batch delay: {}ms", config.outreach.batch_delay);
    println!("  Template: {}", config.outreach.template_path);

    println!("\n✓ Configuration is valid");
}
