mod args;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tracklift_core::{
    collector::FileCollector,
    invoker::ProcessInvoker,
    registry::{Platform, ToolRegistry},
    relocator::FsRelocator,
    report::{render, CommandNotifier, Notifier, NullNotifier},
    load_config, validate_config, Config, Operation, Orchestrator, RunSummary,
};

use args::Args;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    match run(args).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("error: {:#}", e);
            std::process::exit(2);
        }
    }
}

async fn run(args: Args) -> Result<i32> {
    let config = resolve_config(&args)?;
    validate_config(&config).context("Configuration validation failed")?;
    init_logging(&config)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        operation = %args.operation(),
        "starting"
    );

    let platform = Platform::current().context("Unsupported platform")?;
    let registry = ToolRegistry::new(platform, &config.tools);
    let collector = FileCollector::new(config.collector.clone());
    let invoker = ProcessInvoker::new(config.invoker.clone());
    let relocator = FsRelocator::new(config.relocator.clone());

    let orchestrator = Orchestrator::new(registry, collector, invoker, relocator);

    // First Ctrl-C stops at the next file boundary, a second one aborts.
    let shutdown = orchestrator.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nInterrupt received; finishing the current file...");
            shutdown.store(true, std::sync::atomic::Ordering::SeqCst);
            if tokio::signal::ctrl_c().await.is_ok() {
                std::process::exit(130);
            }
        }
    });

    let options = args.run_options();

    let progress_printer = if args.percentage {
        let (tx, mut rx) = tokio::sync::mpsc::channel::<tracklift_core::orchestrator::RunProgress>(64);
        let handle = tokio::spawn(async move {
            while let Some(progress) = rx.recv().await {
                let marker = if progress.success { "done" } else { "FAILED" };
                println!(
                    "[{:>3}%] ({}/{}) {} {}",
                    progress.percent,
                    progress.index,
                    progress.total,
                    progress.path.display(),
                    marker,
                );
            }
        });
        Some((tx, handle))
    } else {
        None
    };

    let (progress_tx, printer_handle) = match progress_printer {
        Some((tx, handle)) => (Some(tx), Some(handle)),
        None => (None, None),
    };

    let summary = orchestrator.run(&options, progress_tx).await?;

    if let Some(handle) = printer_handle {
        // The sender inside run() is dropped by now; drain the printer.
        let _ = handle.await;
    }

    print!("{}", render(&summary));

    notify_completion(&config, &options.operation, &summary).await;

    Ok(exit_code(&summary))
}

/// Loads configuration from --config, TRACKLIFT_CONFIG, or ./tracklift.toml.
/// Defaults apply when no file is present, but an explicitly named file must
/// exist.
fn resolve_config(args: &Args) -> Result<Config> {
    let explicit = args
        .config
        .clone()
        .or_else(|| std::env::var("TRACKLIFT_CONFIG").ok().map(PathBuf::from));

    match explicit {
        Some(path) => load_config(&path)
            .with_context(|| format!("Failed to load config from {:?}", path)),
        None => {
            let default_path = PathBuf::from("tracklift.toml");
            if default_path.exists() {
                load_config(&default_path)
                    .with_context(|| format!("Failed to load config from {:?}", default_path))
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn init_logging(config: &Config) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let file_layer = match &config.log.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {:?}", dir))?;
            let name = format!("tracklift-{}.log", chrono::Local::now().format("%Y%m%d%H%M%S"));
            let file = std::fs::File::create(dir.join(&name))
                .with_context(|| format!("Failed to create log file {:?}", dir.join(&name)))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(())
}

async fn notify_completion(config: &Config, operation: &Operation, summary: &RunSummary) {
    let notifier: Box<dyn Notifier> = if config.notify.enabled {
        Box::new(CommandNotifier)
    } else {
        Box::new(NullNotifier)
    };

    let title = format!("tracklift: {}", operation);
    let body = if summary.is_clean() {
        format!("{} file(s) processed", summary.succeeded)
    } else {
        format!(
            "{} succeeded, {} failed; see the log for details",
            summary.succeeded, summary.failed
        )
    };
    notifier.notify(&title, &body).await;
}

fn exit_code(summary: &RunSummary) -> i32 {
    if summary.cancelled {
        130
    } else if summary.is_clean() {
        0
    } else {
        warn!(failed = summary.failed, "run finished with failures");
        1
    }
}
