pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod display;
pub mod entities;
pub mod scoring;
pub mod services;
pub mod state;

use std::sync::Arc;
use tokio::signal;

use anyhow::Context;
use cli::{Cli, Commands, MatchCommands, MatchTypeCommands, TeamCommands};
pub use config::Config;
use metrics_exporter_prometheus::PrometheusHandle;
use state::SharedState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Loads the config named on the command line, or searches the default
/// locations. A `--config` path must exist unless the command is `init`,
/// which creates it.
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) if path.exists() => Config::load_from_path(path)?,
        Some(_) if matches!(cli.command, Some(Commands::Init)) => Config::default(),
        Some(path) => anyhow::bail!("Config file not found: {}", path.display()),
        None => Config::load()?,
    };
    config.validate()?;
    Ok(config)
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let builder = PrometheusBuilder::new();
        let handle = builder
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    init_tracing(&config)?;

    if prometheus_handle.is_some() {
        info!("Prometheus metrics recorder initialized");
    }

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve => run_server(config, prometheus_handle).await,

        Commands::Init => cli::cmd_init(cli.config.as_deref()),

        Commands::Team { command } => {
            let state = SharedState::new(config).await?;
            match command {
                TeamCommands::Add { name, code } => cli::cmd_team_add(&state, &name, &code).await,
                TeamCommands::List => cli::cmd_team_list(&state).await,
            }
        }

        Commands::MatchType { command } => {
            let state = SharedState::new(config).await?;
            match command {
                MatchTypeCommands::Add { code, name } => {
                    cli::cmd_match_type_add(&state, &code, &name).await
                }
                MatchTypeCommands::List => cli::cmd_match_type_list(&state).await,
            }
        }

        Commands::Match { command } => {
            let state = SharedState::new(config).await?;
            match command {
                MatchCommands::Add {
                    kickoff,
                    home,
                    away,
                    match_type,
                } => cli::cmd_match_add(&state, &kickoff, home, away, match_type).await,
                MatchCommands::Result {
                    id,
                    goals_home,
                    goals_away,
                } => cli::cmd_match_result(&state, id, goals_home, goals_away).await,
                MatchCommands::List { upcoming, played } => {
                    cli::cmd_match_list(&state, upcoming, played).await
                }
            }
        }

        Commands::Leaderboard => {
            let state = SharedState::new(config).await?;
            cli::cmd_leaderboard(&state).await
        }
    }
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    // stdout belongs to command output
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    if config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;

        let mut builder = tracing_loki::builder();
        for (key, value) in &config.observability.loki_labels {
            builder = builder.label(key.clone(), value)?;
        }
        let (layer, task) = builder.build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    } else {
        registry.init();
    }

    Ok(())
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("Betpool v{} starting...", env!("CARGO_PKG_VERSION"));

    let port = config.server.port;
    let origin = config.server.origin.clone();

    let shared = Arc::new(SharedState::new(config).await?);
    let api_state = api::create_app_state(shared, prometheus_handle);
    let app = api::router(api_state).await?;

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🌐 Web Server running at http://{addr} (public origin {origin})");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
