mod cli;
mod commands;
mod console;
mod export;
mod repl;
mod settings;

use std::time::Duration;

use kipi_ai::{FixedPacer, GeminiClient, GeminiConfig, Renderer, SessionController};
use kipi_common::KipiError;
use kipi_config::KipiConfig;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::repl::Repl;
use crate::settings::RuntimeSettings;

/// Load environment variables from `./.env`.
///
/// Must run before the tokio runtime starts any worker threads.
fn load_dotenv() {
    load_dotenv_from(std::path::Path::new(".env"));
}

/// KEY=VALUE lines; variables already present in the environment are left alone.
fn load_dotenv_from(path: &std::path::Path) {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim().trim_start_matches("export ").trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }
}

fn init_logging(directive: &str) {
    let mut filter = EnvFilter::from_default_env();
    match directive.parse::<Directive>() {
        Ok(d) => filter = filter.add_directive(d),
        Err(e) => eprintln!("ignoring invalid log directive {directive:?}: {e}"),
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_controller(config: &KipiConfig, no_delay: bool) -> Result<SessionController, KipiError> {
    let client = GeminiClient::new(
        GeminiConfig::default()
            .with_api_base(config.network.api_base.clone())
            .with_connect_timeout(Duration::from_secs(config.network.connect_timeout_secs))
            .with_request_timeout(Duration::from_secs(config.network.request_timeout_secs)),
    )
    .map_err(|e| KipiError::Other(e.to_string()))?;

    let interval = if no_delay {
        0
    } else {
        config.render.typing_interval_ms
    };

    Ok(SessionController::new(client)
        .with_renderer(Renderer::new().with_cursor(config.render.cursor))
        .with_pacer(FixedPacer::from_millis(interval))
        .with_export_prefix(config.export.file_prefix.clone()))
}

async fn run(args: cli::Args, config: KipiConfig) -> Result<(), KipiError> {
    let credential = kipi_config::resolve_api_key(&config, args.api_key.as_deref());
    let mut settings = RuntimeSettings::new(config.generation.clone(), credential);
    if let Some(ref model) = args.model {
        settings.set_model(model)?;
    }
    if args.batch {
        settings.set_output_mode(kipi_common::OutputMode::Batch);
    }
    tracing::debug!(?settings, "runtime settings");

    let controller = build_controller(&config, args.no_delay)?;
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();

    Repl::new(controller, settings, stdin, stdout)
        .with_export_dir(&config.export.directory)
        .with_stats(config.stats.show)
        .run()
        .await
}

fn main() {
    // Load .env before anything reads the environment
    load_dotenv();

    let args = cli::parse();

    // Config first so its log level can seed the filter; report the
    // outcome once logging is up.
    let loaded = kipi_config::load_config(args.config.as_deref());
    let directive = args
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.logging.level.clone()))
        .unwrap_or_else(|| "kipi=info".to_string());
    init_logging(&directive);

    tracing::info!("kipi v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            KipiConfig::default()
        }
    };
    tracing::info!(
        "Config loaded (model: {}, output: {})",
        config.generation.model,
        config.generation.output_mode
    );

    // Multi-threaded so the REPL can block on stdin in place
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(run(args, config)) {
        tracing::error!("{e}");
        eprintln!("kipi: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
