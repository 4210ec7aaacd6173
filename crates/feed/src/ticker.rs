use livemon_core::{Scheduler, TickHandle, TickToken};
use std::time::Duration;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::debug;

/// [`Scheduler`] backed by Tokio timers.
///
/// Every registration is a background task that sends its token through the
/// channel once per interval, starting one interval after installation.
/// Must be used from within a Tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioTicker {
    tx: mpsc::UnboundedSender<TickToken>,
}

impl TokioTicker {
    pub fn new(tx: mpsc::UnboundedSender<TickToken>) -> Self {
        Self { tx }
    }

    /// Ticker plus the receiving end its registrations deliver to.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TickToken>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl Scheduler for TokioTicker {
    type Handle = TokioTickHandle;

    fn schedule(&mut self, interval: Duration, token: TickToken) -> TokioTickHandle {
        let tx = self.tx.clone();
        let interval = interval.max(Duration::from_nanos(1));
        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if tx.send(token).is_err() {
                    break; // receiver dropped
                }
            }
        });

        debug!(token = token.id(), ?interval, "tick task started");
        TokioTickHandle { token, task }
    }
}

/// Aborts its tick task when cancelled or dropped.
#[derive(Debug)]
pub struct TokioTickHandle {
    token: TickToken,
    task:  JoinHandle<()>,
}

impl TickHandle for TokioTickHandle {
    fn token(&self) -> TickToken {
        self.token
    }

    fn cancel(self) {
        debug!(token = self.token.id(), "tick task cancelled");
        // Drop aborts the task.
    }
}

impl Drop for TokioTickHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livemon_core::{ControllerOptions, LiveWindowController, RunState, Sample, MIN_INTERVAL};

    fn drain(rx: &mut mpsc::UnboundedReceiver<TickToken>) -> Vec<TickToken> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn delivers_one_token_per_interval() {
        let (mut ticker, mut rx) = TokioTicker::channel();
        let _handle = ticker.schedule(Duration::from_secs(1), TickToken::new(3));

        time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(drain(&mut rx), vec![TickToken::new(3); 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_arrives_after_cancel() {
        let (mut ticker, mut rx) = TokioTicker::channel();
        let handle = ticker.schedule(Duration::from_secs(1), TickToken::new(0));

        time::sleep(Duration::from_millis(1_500)).await;
        assert_eq!(drain(&mut rx).len(), 1);

        handle.cancel();
        time::sleep(Duration::from_secs(5)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn registrations_carry_their_own_token() {
        let (mut ticker, mut rx) = TokioTicker::channel();
        let first = ticker.schedule(Duration::from_secs(1), TickToken::new(1));
        time::sleep(Duration::from_millis(1_100)).await;
        first.cancel();
        let _second = ticker.schedule(Duration::from_secs(1), TickToken::new(2));
        time::sleep(Duration::from_millis(1_100)).await;

        assert_eq!(drain(&mut rx), vec![TickToken::new(1), TickToken::new(2)]);
    }

    fn counter() -> impl FnMut() -> Sample {
        let mut n = 0u32;
        move || {
            n += 1;
            Sample {
                time: format!("t{n}"),
                cpu: f64::from(n),
                memory: 1.0,
                temperature: 30.0,
            }
        }
    }

    /// Feed every queued token to the controller; returns how many appended.
    fn pump<G: livemon_core::SampleSource>(
        ctl: &mut LiveWindowController<G, TokioTicker>,
        rx: &mut mpsc::UnboundedReceiver<TickToken>,
    ) -> usize {
        drain(rx)
            .into_iter()
            .filter(|token| ctl.on_scheduled_tick(*token))
            .count()
    }

    #[tokio::test(start_paused = true)]
    async fn controller_appends_once_per_interval() {
        let (ticker, mut rx) = TokioTicker::channel();
        let mut ctl = LiveWindowController::new(counter(), ticker, ControllerOptions::default());
        ctl.toggle_running();

        time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(pump(&mut ctl, &mut rx), 3);
        assert_eq!(ctl.window().len(), 3);
        assert_eq!(ctl.current_value(livemon_core::Metric::Cpu), Some(3.0));
    }

    #[tokio::test(start_paused = true)]
    async fn queued_ticks_from_before_a_restart_are_dropped() {
        let (ticker, mut rx) = TokioTicker::channel();
        let mut ctl = LiveWindowController::new(counter(), ticker, ControllerOptions::default());
        ctl.toggle_running();

        // Two ticks land in the channel but are not consumed before the restart.
        time::sleep(Duration::from_millis(2_500)).await;
        ctl.toggle_running();
        ctl.toggle_running();
        assert_eq!(ctl.run_state(), RunState::Running);

        assert_eq!(pump(&mut ctl, &mut rx), 0);
        assert!(ctl.window().is_empty());

        time::sleep(Duration::from_millis(1_100)).await;
        assert_eq!(pump(&mut ctl, &mut rx), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_still_ticks() {
        let (ticker, mut rx) = TokioTicker::channel();
        let options = ControllerOptions {
            interval: Duration::ZERO,
            ..ControllerOptions::default()
        };
        let mut ctl = LiveWindowController::new(counter(), ticker, options);
        assert_eq!(ctl.interval(), MIN_INTERVAL);
        ctl.toggle_running();

        time::sleep(Duration::from_millis(3)).await;
        assert!(pump(&mut ctl, &mut rx) >= 1);
        assert!(ctl.is_running());
    }
}
