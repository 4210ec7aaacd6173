//! Window-less mode: stream samples into the log until Ctrl-C.

use crate::startup_config;
use livemon_config::{default_path, LivemonConfig};
use livemon_core::{ControllerEvent, LiveWindowController, Metric, Observer, Result, Sample, Snapshot};
use livemon_feed::{RandomSource, TokioTicker};
use tracing::{info, warn};

/// Run the live window on a Tokio ticker, logging every appended sample.
///
/// `metric` overrides the configured initial metric.
pub fn run(metric: Option<Metric>) -> Result<()> {
    let config = startup_config(default_path(), metric);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(stream(config));
    Ok(())
}

async fn stream(config: LivemonConfig) {
    let (ticker, mut ticks) = TokioTicker::channel();
    let mut controller = LiveWindowController::new(
        RandomSource::new(),
        ticker,
        config.stream.controller_options(),
    );
    controller.subscribe(SampleLogger);
    controller.toggle_running();
    info!(interval = ?controller.interval(), "Streaming samples; press Ctrl-C to stop");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(token) = ticks.recv() => {
                controller.on_scheduled_tick(token);
            }
            result = &mut shutdown => {
                if let Err(e) = result {
                    warn!("Ctrl-C listener failed: {e}");
                }
                break;
            }
        }
    }

    controller.shutdown();
    for metric in Metric::ALL {
        info!(
            "{}: {}",
            metric.descriptor().label,
            metric.format_reading(controller.current_value(metric))
        );
    }
}

/// Logs each appended sample at `info`.
struct SampleLogger;

impl Observer for SampleLogger {
    fn notify(&mut self, event: &ControllerEvent, snapshot: &Snapshot<'_>) {
        let Some((sample, evicted)) = appended(event, snapshot) else {
            return;
        };
        info!(
            time = %sample.time,
            cpu = %format_args!("{:.2}", sample.cpu),
            memory = %format_args!("{:.2}", sample.memory),
            temperature = %format_args!("{:.2}", sample.temperature),
            window = snapshot.window.len(),
            evicted,
            "sample"
        );
    }
}

/// The sample an `Appended` event refers to, and whether it evicted one.
fn appended<'s>(event: &ControllerEvent, snapshot: &Snapshot<'s>) -> Option<(&'s Sample, bool)> {
    match *event {
        ControllerEvent::Appended { cursor, evicted } => {
            snapshot.window.get(cursor).map(|s| (s, evicted))
        }
        _ => None,
    }
}
