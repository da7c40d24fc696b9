//! listlab - Main Entry Point
//!
//! Runs every strategy through a scroll sweep under the configured controls and
//! logs the comparison table and recommendation.
//!
//! Usage: `listlab [dataset_size] [theme] [network]`

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use listlab::domain::{Controls, LabConfig, StrategyKind};
use listlab::eventing::SessionEvent;
use listlab::helpers::{get_or_create_data_dir, is_development};
use listlab::services::{TokioScheduler, block_on};
use listlab::state::{Session, load_config, seed_config};
use listlab::strategies::Strategy as _;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Sweep tick
const TICK: Duration = Duration::from_millis(16);
/// Pixels scrolled per tick
const SCROLL_STEP: f64 = 240.0;
/// Ticks between pagination page turns
const TICKS_PER_PAGE: u64 = 20;

fn init_tracing() -> Option<WorkerGuard> {
    let level = if is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let stdout = fmt::layer().with_timer(LocalTime::rfc_3339());

    // File logging is best effort; the sweep still runs without it
    match get_or_create_data_dir() {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "listlab.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::registry().with(filter).with(stdout).init();
            warn!(error = %e, "File logging disabled");
            None
        }
    }
}

/// Override controls from positional arguments
fn apply_args(mut controls: Controls) -> anyhow::Result<Controls> {
    let mut args = std::env::args().skip(1);
    if let Some(size) = args.next() {
        controls.dataset_size = size
            .replace(['_', ','], "")
            .parse()
            .with_context(|| format!("invalid dataset size: {size}"))?;
    }
    if let Some(theme) = args.next() {
        controls.theme = theme.parse()?;
    }
    if let Some(network) = args.next() {
        controls.network = network.parse()?;
    }
    Ok(controls)
}

async fn sweep(session: &mut Session, duration: Duration) {
    let mut interval = tokio::time::interval(TICK);
    let deadline = tokio::time::Instant::now() + duration;
    let mut tick: u64 = 0;

    while tokio::time::Instant::now() < deadline {
        interval.tick().await;
        tick += 1;
        session.pump();

        let offset = tick as f64 * SCROLL_STEP;
        for kind in [
            StrategyKind::Infinite,
            StrategyKind::Virtual,
            StrategyKind::Hybrid,
        ] {
            session.scroll(kind, offset);
        }
        if tick % TICKS_PER_PAGE == 0 {
            let next = session.pagination().current_page() + 1;
            session.page_requested(next);
        }
    }
    session.pump();
}

fn main() -> anyhow::Result<()> {
    let _guard = init_tracing();
    info!("Starting listlab...");

    let mut config: LabConfig = load_config()?;
    // Seed before CLI overrides apply
    if let Err(e) = seed_config(&config) {
        warn!(error = %e, "Failed to write default config");
    }
    config.controls = apply_args(config.controls)?;
    let duration = Duration::from_secs(config.simulation_secs);

    let scheduler = Arc::new(TokioScheduler::new());
    let mut session = Session::new(config, scheduler)?;
    let events = session.subscribe();

    block_on(sweep(&mut session, duration));

    let received: Vec<SessionEvent> = events.try_iter().collect();
    info!(events = received.len(), "Sweep finished");

    for line in session.board().render_table().lines() {
        info!("{line}");
    }
    match session.board().to_json() {
        Ok(json) => debug!(metrics = %json, "Metrics export"),
        Err(e) => warn!(error = %e, "Failed to export metrics"),
    }
    if let Some(lightest) = session.board().lightest() {
        info!(strategy = %lightest, "Fewest rendered nodes");
    }

    let recommendation = session.recommendation();
    info!(
        strategy = %recommendation.strategy,
        confidence = %recommendation.confidence,
        reason = recommendation.reason,
        "Recommendation"
    );
    info!("{}", recommendation.details);
    let about = recommendation.strategy.info();
    info!(strategy = about.label, "{}", about.description);
    for pro in about.pros {
        info!("  + {pro}");
    }
    for con in about.cons {
        info!("  - {con}");
    }

    let active = session.apply_recommendation();
    let strategy = session.strategy(active);
    info!(strategy = %active, status = ?strategy.status(), "Switched to recommended strategy");
    if let Some(item) = strategy.rows().first() {
        info!(
            id = item.id,
            title = item.title,
            value = %item.value_label(),
            at = ?item.timestamp(),
            "First row"
        );
    }

    Ok(())
}
