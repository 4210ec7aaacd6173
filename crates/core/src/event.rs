use crate::{metric::Metric, scheduler::TickToken, state::RunState};

/// Change notifications delivered to controller observers.
///
/// One event is emitted after every mutating controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// A sample was appended; `cursor` is its index in the window.
    Appended { cursor: usize, evicted: bool },
    /// The stream was started or stopped.
    RunStateChanged(RunState),
    /// The displayed metric changed.
    MetricSelected(Metric),
}

/// All messages that can flow from the rendering boundary into the app.
///
/// Sources:
/// - Control widgets       → `ToggleRunning`, `SelectMetric`
/// - Tick subscription     → `Tick`
/// - Config watcher task   → `ConfigReloaded`
#[derive(Debug, Clone)]
pub enum Message {
    // ── User actions ──────────────────────────────────────────────────────────
    /// Start/stop button pressed.
    ToggleRunning,
    /// A metric was picked in the selector.
    SelectMetric(Metric),

    // ── Scheduler ─────────────────────────────────────────────────────────────
    /// A scheduled tick from the registration identified by the token.
    Tick(TickToken),

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk; triggers a live theme reload.
    ConfigReloaded,
}
