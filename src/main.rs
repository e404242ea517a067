use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use statuswatch::cli;
use statuswatch::cli::maintenances::MaintenanceFilter;
use statuswatch::core::settings::Settings;
use statuswatch::daemon;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "statuswatch")]
#[command(author, version, about = "Watch a statuspage.io page and get notified once per incident update")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the page and surface incident updates until interrupted
    Watch {
        /// statuspage.io page id (overrides the config file)
        #[arg(long)]
        page: Option<String>,

        /// Poll interval in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Disable desktop notifications
        #[arg(long)]
        no_notify: bool,
    },

    /// Show the page status rollup and component health
    Status {
        /// statuspage.io page id (overrides the config file)
        #[arg(long)]
        page: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recent incidents
    Incidents {
        /// statuspage.io page id (overrides the config file)
        #[arg(long)]
        page: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Only incidents that are not yet resolved
        #[arg(long)]
        unresolved: bool,

        /// Maximum number of incidents to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// List scheduled maintenances
    Maintenances {
        /// statuspage.io page id (overrides the config file)
        #[arg(long)]
        page: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Only maintenances currently in progress
        #[arg(long, conflicts_with = "upcoming")]
        active: bool,

        /// Only maintenances that have not started yet
        #[arg(long)]
        upcoming: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Watch {
            page,
            interval_ms,
            no_notify,
        } => {
            init_logging();
            let mut settings = Settings::load()?;
            if let Some(interval) = interval_ms {
                settings.poller.interval_ms = interval;
            }
            settings.validate()?;

            let page_id = cli::resolve_page_id(page, &settings)?;
            let notify = settings.notifications.enabled && !no_notify;
            daemon::run(&page_id, &settings, notify).await
        }
        Commands::Status { page, json } => {
            init_logging();
            let settings = Settings::load()?;
            let page_id = cli::resolve_page_id(page, &settings)?;
            cli::status::run(&page_id, json).await
        }
        Commands::Incidents {
            page,
            json,
            unresolved,
            limit,
        } => {
            init_logging();
            let settings = Settings::load()?;
            let page_id = cli::resolve_page_id(page, &settings)?;
            cli::incidents::run(&page_id, json, unresolved, limit).await
        }
        Commands::Maintenances {
            page,
            json,
            active,
            upcoming,
        } => {
            init_logging();
            let settings = Settings::load()?;
            let page_id = cli::resolve_page_id(page, &settings)?;

            let filter = if active {
                MaintenanceFilter::Active
            } else if upcoming {
                MaintenanceFilter::Upcoming
            } else {
                MaintenanceFilter::All
            };

            cli::maintenances::run(&page_id, json, filter).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}
