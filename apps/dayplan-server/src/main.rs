use anyhow::{anyhow, Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use modkit_db::{ConnectOpts, DbHandle};
use runtime::{AppConfig, AppConfigProvider, CliArgs, ConfigProvider, ConfigProviderExt};
use sea_orm_migration::MigratorTrait;
use utoipa::OpenApi;

use api_ingress::{ApiIngress, ApiIngressConfig};
use schedules::api::rest::{register_routes, ApiDoc};
use schedules::config::SchedulesConfig;
use schedules::domain::service::{Service, ServiceConfig};
use schedules::infra::storage::{
    Migrator, SeaOrmCategoriesRepository, SeaOrmSchedulesRepository, SeaOrmUsersRepository,
};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const SCHEDULES_MODULE: &str = "schedules";
const INGRESS_MODULE: &str = "api_ingress";

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Dayplan Server - personal daily schedules with a 24-hour time graph
#[derive(Parser)]
#[command(name = "dayplan-server")]
#[command(about = "Dayplan Server - personal daily schedules with a 24-hour time graph")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Dayplan Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config),
    }
}

async fn connect_db(config: &AppConfig, args: &CliArgs) -> Result<DbHandle> {
    let base_dir = PathBuf::from(&config.server.home_dir);
    let db_config = config.database.clone();

    // Use URL from config; override with in-memory SQLite when --mock is set
    let dsn = if args.mock {
        "sqlite::memory:".to_string()
    } else {
        let raw = db_config
            .as_ref()
            .map(|c| c.url.trim().to_owned())
            .unwrap_or_default();
        if raw.is_empty() {
            return Err(anyhow!("Database URL not configured"));
        }
        absolutize_sqlite_dsn(&raw, &base_dir)?
    };

    let connect_opts = ConnectOpts {
        max_conns: db_config.as_ref().and_then(|c| c.max_conns),
        acquire_timeout: Some(Duration::from_secs(5)),
        busy_timeout_ms: db_config.as_ref().and_then(|c| c.busy_timeout_ms),
        create_sqlite_dirs: true,
    };

    tracing::info!("Connecting to database: {}", dsn);
    let db = DbHandle::connect(&dsn, connect_opts)
        .await
        .with_context(|| format!("Failed to connect to {dsn}"))?;

    Migrator::up(&db.sea(), None)
        .await
        .context("Failed to apply database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(db)
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    let provider = AppConfigProvider::new(config.clone());
    let schedules_cfg: SchedulesConfig = provider.module_config(SCHEDULES_MODULE);
    let mut ingress_cfg: ApiIngressConfig = provider.module_config(INGRESS_MODULE);
    if ingress_cfg.bind_addr.trim().is_empty() {
        ingress_cfg.bind_addr = format!("{}:{}", config.server.host, config.server.port);
    }

    let db = connect_db(&config, &args).await?;
    let conn = db.sea();

    let service = Arc::new(Service::new(
        Arc::new(SeaOrmUsersRepository::new(conn.clone())),
        Arc::new(SeaOrmCategoriesRepository::new(conn.clone())),
        Arc::new(SeaOrmSchedulesRepository::new(conn)),
        ServiceConfig::from(&schedules_cfg),
    ));

    let routes = register_routes(Router::new(), service, schedules_cfg.identity.clone());
    let ingress = ApiIngress::new(ingress_cfg).with_openapi(ApiDoc::openapi());
    let router = ingress.build_router(routes);

    ingress
        .serve(router, async {
            if let Err(e) = modkit::wait_for_shutdown().await {
                tracing::error!(error = %e, "shutdown signal listener failed");
            }
        })
        .await?;

    db.close().await;
    tracing::info!("Dayplan Server stopped");
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let provider = AppConfigProvider::new(config.clone());
    if provider.get_module_config(SCHEDULES_MODULE).is_some() {
        provider.module_config_required::<SchedulesConfig>(SCHEDULES_MODULE)?;
    }
    if provider.get_module_config(INGRESS_MODULE).is_some() {
        provider.module_config_required::<ApiIngressConfig>(INGRESS_MODULE)?;
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}
