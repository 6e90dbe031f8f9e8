//! CLI command definitions, routing, and tracing setup.

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tracing::info;

use docpush_core::Orchestrator;
use docpush_registry::{HandlerGroup, MarkdownTree, PackageScope};
use docpush_shared::{AppConfig, init_config, load_config, resolve_credentials};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docpush — publish Markdown documentation to a ShowDoc-compatible store.
#[derive(Parser)]
#[command(
    name = "docpush",
    version,
    about = "Publish a Markdown documentation tree to a ShowDoc-compatible store, the console, or both.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Publish a documentation tree.
    Publish {
        /// Root directory of the Markdown tree (subdirectory = group/folder).
        dir: String,

        /// Restrict the pass to one handler group (a subdirectory of the tree).
        #[arg(short, long)]
        group: Option<String>,

        /// Restrict the pass to one page within --group (file name without .md).
        #[arg(long, requires = "group")]
        page: Option<String>,

        /// Catalog prefix prepended to every folder (overrides config).
        #[arg(short, long)]
        catalog: Option<String>,

        /// Remote store domain (overrides config).
        #[arg(short, long)]
        domain: Option<String>,

        /// Also print resolved pages to the console.
        #[arg(long)]
        print: bool,

        /// Skip the remote store; print only.
        #[arg(long)]
        no_remote: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docpush=info",
        1 => "docpush=debug",
        _ => "docpush=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Publish {
            dir,
            group,
            page,
            catalog,
            domain,
            print,
            no_remote,
        } => {
            cmd_publish(
                &dir,
                group.as_deref(),
                page.as_deref(),
                catalog.as_deref(),
                domain.as_deref(),
                print,
                no_remote,
            )
            .await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_publish(
    dir: &str,
    group: Option<&str>,
    page: Option<&str>,
    catalog: Option<&str>,
    domain: Option<&str>,
    print: bool,
    no_remote: bool,
) -> Result<()> {
    let config = load_config()?;

    let root = std::path::PathBuf::from(dir);
    if !root.is_dir() {
        return Err(eyre!("'{dir}' is not a directory"));
    }

    // CLI flags override config file values.
    let catalog = catalog
        .map(String::from)
        .or_else(|| non_empty(&config.defaults.catalog));

    // A pass with no sinks does nothing useful, so --no-remote implies printing.
    let print = print || config.defaults.console_print || no_remote;

    let mut builder = Orchestrator::builder();
    if print {
        builder = builder.console_print();
    }
    if let Some(catalog) = &catalog {
        builder = builder.catalog(catalog.as_str());
    }
    if !no_remote {
        let domain = domain
            .map(String::from)
            .or_else(|| non_empty(&config.remote.domain))
            .ok_or_else(|| {
                eyre!(
                    "no remote domain configured. Set [remote].domain in the config, \
                     pass --domain, or use --no-remote."
                )
            })?;
        let (api_key, api_token) = resolve_credentials(&config)?;
        builder = builder.remote_update(domain, api_key, api_token)?;
    }
    let orchestrator = builder.build()?;

    info!(
        dir,
        group = group.unwrap_or("*"),
        page = page.unwrap_or("*"),
        catalog = catalog.as_deref().unwrap_or(""),
        remote = !no_remote,
        "publishing documentation tree"
    );

    let tree = MarkdownTree::new(&root);
    let report = match (group, page) {
        (Some(group), Some(page)) => {
            orchestrator
                .publish_operation(&tree, &HandlerGroup::new(group), page)
                .await?
        }
        (Some(group), None) => {
            orchestrator
                .publish_group(&tree, &HandlerGroup::new(group))
                .await?
        }
        (None, _) => {
            orchestrator
                .publish_package(&tree, &PackageScope::new(""))
                .await?
        }
    };

    // Print summary
    println!();
    println!("  Publish pass complete!");
    println!("  Records:   {}", report.records);
    if let Some(remote) = &report.remote {
        println!("  Published: {}", remote.published);
        println!("  Rejected:  {}", remote.rejected.len());
        for rejection in &remote.rejected {
            println!(
                "    HTTP {}  {} / {}",
                rejection.status, rejection.folder, rejection.title
            );
        }
        println!("  Time:      {:.1}s", remote.duration.as_secs_f64());
    }
    println!();

    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
