use anyhow::Context;
use clap::Parser;
use pmoconfig::Config;
use pmosync::{RunMode, SyncConfigExt, SyncPlan, SyncReport, Synchronizer};
use pmoyoutube::YoutubeClient;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Garde une playlist YouTube sans doublon et alimentée par d'autres playlists
#[derive(Parser, Debug)]
#[command(name = "pmotube")]
#[command(about = "Deduplicate a YouTube playlist and merge source playlists into it", version)]
struct Cli {
    /// Configuration directory (default: $PMOTUBE_CONFIG, ./.pmotube or ~/.pmotube)
    #[arg(long, value_name = "DIR")]
    config_dir: Option<String>,

    /// Target playlist ID, overrides sync.target_playlist
    #[arg(long, value_name = "ID")]
    target: Option<String>,

    /// Source playlist ID, repeatable; replaces sync.source_playlists when given
    #[arg(long = "source", value_name = "ID")]
    sources: Vec<String>,

    /// Compute and report the changes without sending them
    #[arg(long)]
    dry_run: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Debug logging (ignored when RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Absent .env is not an error
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = Config::load_config(cli.config_dir.as_deref().unwrap_or(""))
        .context("Failed to load PMOTube configuration")?;
    init_logging(&config, cli.verbose);
    // Config::load_config logs before the subscriber exists
    info!("Using config directory {}", config.directory());

    if let Ok(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }

    let plan = build_plan(&config, &cli)?;
    let filter = config.availability_filter()?;
    let mode = if cli.dry_run {
        RunMode::DryRun
    } else {
        config.run_mode()?
    };

    info!(
        "🎬 Syncing {} source playlist(s) into {}",
        plan.sources.len(),
        plan.target
    );

    let client = YoutubeClient::from_config_obj(&config)
        .await
        .context("Failed to create YouTube client")?;

    let report = Synchronizer::new(&client)
        .with_filter(filter)
        .with_mode(mode)
        .run(&plan)
        .await?;

    println!("{}", render_report(&report, cli.json)?);
    info!("✅ Playlist {} synchronized", plan.target);
    Ok(())
}

/// Installe le subscriber tracing
///
/// `RUST_LOG` est prioritaire, sinon le niveau vient de `host.logger.min_level`.
fn init_logging(config: &Config, verbose: bool) {
    let default_level = if verbose {
        "debug".to_string()
    } else {
        config
            .get_log_min_level()
            .map(|level| level.to_lowercase())
            .unwrap_or_else(|_| "info".to_string())
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Texte du rapport, lisible ou JSON
fn render_report(report: &SyncReport, json: bool) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(report.to_string())
    }
}

/// Plan de la configuration, surchargé par la ligne de commande
fn build_plan(config: &Config, cli: &Cli) -> pmosync::Result<SyncPlan> {
    let target = match &cli.target {
        Some(target) => target.clone(),
        None => config.get_sync_target()?,
    };
    let sources = if cli.sources.is_empty() {
        config.get_sync_sources()?
    } else {
        cli.sources.clone()
    };

    let plan = SyncPlan::new(target, sources);
    plan.validate()?;
    Ok(plan)
}
