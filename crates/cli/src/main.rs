use clap::{Parser, Subcommand};
use picketline_domain::CliOverrides;
use std::process::ExitCode;
use tracing::info;

mod bootstrap;
mod commands;
mod di;

#[derive(Parser)]
#[command(name = "picketline")]
#[command(version)]
#[command(about = "Picket Line - labor action alerts for destinations and places you visit")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Provider API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Database path
    #[arg(long, global = true)]
    database: Option<String>,

    /// Access token file path
    #[arg(long, value_name = "FILE", global = true)]
    token_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether a host or URL belongs to an employer with an active action
    Check {
        destination: String,
        /// Proceed to a blocked destination; it is not flagged again this session
        #[arg(long)]
        proceed: bool,
    },
    /// Fetch a fresh snapshot for a location
    Refresh {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Contact the provider even inside the cached region
        #[arg(long)]
        force: bool,
    },
    /// Read "lat,lng" lines from stdin and alert when near an active action
    Watch,
    /// Show cache and credential status as JSON
    Status,
    /// Drop the cached snapshot
    ClearCache,
    /// Reset the blocked-attempt counter
    ResetStats,
    /// Manage the provider access token
    Token {
        #[command(subcommand)]
        action: TokenCommand,
    },
    /// List active actions known to the provider
    Actions,
    /// Submit a field report
    Report {
        #[command(subcommand)]
        report: ReportCommand,
    },
}

#[derive(Subcommand)]
enum TokenCommand {
    Set {
        token: String,
    },
    Clear {
        /// Also drop the cached snapshot
        #[arg(long)]
        clear_cache: bool,
    },
}

#[derive(Subcommand)]
enum ReportCommand {
    /// Report a new strike, lockout, picket or boycott
    Strike(commands::report::StrikeArgs),
    /// Report the GPS position of an ongoing action
    Location(commands::report::LocationArgs),
}


#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        base_url: cli.api_url.clone(),
        database_path: cli.database.clone(),
        token_path: cli.token_file.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Picket Line v{}", env!("CARGO_PKG_VERSION"));

    let database_url = format!("sqlite:{}", config.cache.database_path);
    let pool = bootstrap::init_database(&database_url, config.cache.max_connections).await?;

    let adapters = di::Adapters::new(&config, pool)?;
    let use_cases = di::UseCases::new(&config, &adapters);

    use_cases.cache.restore().await;
    use_cases.blocked_attempts.restore().await;

    let code = match cli.command {
        Command::Check {
            destination,
            proceed,
        } => commands::check(&use_cases, &destination, proceed).await,
        Command::Refresh { lat, lng, force } => {
            commands::refresh(&use_cases, lat, lng, force).await?
        }
        Command::Watch => commands::watch::run(&config, &adapters, &use_cases).await?,
        Command::Status => commands::status(&use_cases).await?,
        Command::ClearCache => {
            use_cases.clear_cache.execute().await;
            println!("Cache cleared");
            ExitCode::SUCCESS
        }
        Command::ResetStats => {
            use_cases.guard_destination.reset_stats().await?;
            println!("Blocked-attempt statistics reset");
            ExitCode::SUCCESS
        }
        Command::Token { action } => match action {
            TokenCommand::Set { token } => {
                use_cases.set_token.execute(&token).await?;
                println!("Access token saved");
                ExitCode::SUCCESS
            }
            TokenCommand::Clear { clear_cache } => {
                use_cases.clear_token.execute(clear_cache).await?;
                println!("Access token removed");
                ExitCode::SUCCESS
            }
        },
        Command::Actions => commands::actions(&use_cases).await?,
        Command::Report { report } => match report {
            ReportCommand::Strike(args) => commands::report::strike(&use_cases, args).await?,
            ReportCommand::Location(args) => commands::report::location(&use_cases, args).await?,
        },
    };

    Ok(code)
}
