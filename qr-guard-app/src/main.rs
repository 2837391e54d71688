use anyhow::{Context, Result};
use qr_guard_app::{check_payload, run_session, Config};
use qr_guard_core::{DisabledResolver, ScanIntakeController, ShortLinkResolver};
use qr_guard_interfaces::TerminalInterface;
use qr_guard_memory::BoundedHistory;
use qr_guard_providers::HttpShortLinkResolver;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: qr-guard [--config <path>] [check <payload>]";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut config_arg = None;
    let mut check_arg = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                config_arg = Some(iter.next().context(USAGE)?.clone());
            }
            "check" => {
                check_arg = Some(iter.next().context(USAGE)?.clone());
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                return Ok(());
            }
            other => anyhow::bail!("Unknown argument: {}\n{}", other, USAGE),
        }
    }

    let config_path = Config::resolve_path(config_arg.as_deref());
    let mut config = Config::load(&config_path)?;
    config.apply_env_overrides()?;
    config.validate()?;

    init_logging(&config);
    tracing::debug!("Loaded configuration from {}", config_path.display());

    let resolver = build_resolver(&config)?;

    if let Some(payload) = check_arg {
        let (content_type, warnings) = check_payload(resolver, &payload).await;
        println!("Type: {}", content_type);
        if warnings.is_empty() {
            println!("No issues found.");
        } else {
            for warning in &warnings {
                println!("- {}", warning);
            }
        }
        return Ok(());
    }

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║              QR-Guard Scan Intake                                ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!("Paste decoded QR payloads, one per line. Commands: :resume :history :quit");
    println!();

    let history = Arc::new(BoundedHistory::new(config.history_capacity));
    let controller = ScanIntakeController::new(resolver, history);
    let terminal = TerminalInterface::new(config.launch_browser);

    let summary = run_session(&controller, &terminal, &terminal, &config).await;
    println!(
        "Processed {} scan(s), {} ignored, {} cancelled.",
        summary.processed, summary.ignored, summary.cancelled
    );

    Ok(())
}

fn init_logging(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_resolver(config: &Config) -> Result<Arc<dyn ShortLinkResolver>> {
    if !config.resolver.enabled {
        return Ok(Arc::new(DisabledResolver));
    }
    let resolver = HttpShortLinkResolver::new(config.resolver.options())
        .context("Failed to build HTTP client for short link expansion")?;
    Ok(Arc::new(resolver))
}
